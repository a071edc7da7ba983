use super::Combatant;
use crate::env::EnemyTemplate;
use crate::state::Item;

/// A hostile combatant living in a room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Enemy {
    combatant: Combatant,
    boss: bool,
}

impl Enemy {
    pub fn new(combatant: Combatant) -> Self {
        Self {
            combatant,
            boss: false,
        }
    }

    /// Spawns a fresh enemy; starting loot goes into its inventory.
    pub fn from_template(template: &EnemyTemplate) -> Self {
        let mut combatant = Combatant::new(template.name.clone(), template.health);
        if let Some(weapon) = &template.weapon {
            combatant = combatant.with_weapon(weapon.clone());
        }
        if let Some(armor) = &template.armor {
            combatant = combatant.with_armor(armor.clone());
        }
        combatant.inventory_mut().extend(template.loot.iter().cloned());

        Self {
            combatant,
            boss: template.boss,
        }
    }

    /// Marks this enemy as the castle's final boss.
    pub fn as_boss(mut self) -> Self {
        self.boss = true;
        self
    }

    pub fn is_boss(&self) -> bool {
        self.boss
    }

    pub fn name(&self) -> &str {
        self.combatant.name()
    }

    pub fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    pub fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    /// Everything the enemy drops on death: weapon, armor, then its
    /// inventory in order.
    pub fn into_loot(mut self) -> Vec<Item> {
        let mut loot = Vec::with_capacity(self.combatant.inventory().len() + 2);
        if let Some(weapon) = self.combatant.take_weapon() {
            loot.push(Item::Weapon(weapon));
        }
        if let Some(armor) = self.combatant.take_armor() {
            loot.push(Item::Armor(armor));
        }
        loot.extend(self.combatant.inventory_mut().take_all());
        loot
    }
}
