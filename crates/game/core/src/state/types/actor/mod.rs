//! Combatant state shared by the player and enemies.
//!
//! This module contains the types for everything that fights:
//! - Combatant: health, equipment and inventory
//! - Player: combatant plus location in the castle
//! - Enemy: combatant plus boss flag and loot

pub mod enemy;
pub mod player;

pub use enemy::Enemy;
pub use player::{ItemUse, Player, Waypoint};

use super::{Armor, Inventory, Weapon};

/// Health, equipment and inventory of anything that fights.
///
/// Health never drops below 0; damage past that point has no further effect.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Combatant {
    name: String,
    health: u32,
    weapon: Option<Weapon>,
    armor: Option<Armor>,
    inventory: Inventory,
}

impl Combatant {
    pub fn new(name: impl Into<String>, health: u32) -> Self {
        Self {
            name: name.into(),
            health,
            weapon: None,
            armor: None,
            inventory: Inventory::new(),
        }
    }

    pub fn with_weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    pub fn with_armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn weapon(&self) -> Option<&Weapon> {
        self.weapon.as_ref()
    }

    pub fn armor(&self) -> Option<&Armor> {
        self.armor.as_ref()
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Lowers health by `amount`, saturating at 0. Returns the new health.
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_sub(amount);
        self.health
    }

    pub fn heal(&mut self, amount: u32) -> u32 {
        self.health = self.health.saturating_add(amount);
        self.health
    }

    /// Applies a signed health change such as a potion's effect.
    pub fn apply_health_delta(&mut self, delta: i32) -> u32 {
        if delta >= 0 {
            self.heal(delta.unsigned_abs())
        } else {
            self.take_damage(delta.unsigned_abs())
        }
    }

    /// Equips a weapon, returning the previously equipped one if any.
    pub fn equip_weapon(&mut self, weapon: Weapon) -> Option<Weapon> {
        self.weapon.replace(weapon)
    }

    /// Equips armor, returning the previously worn piece if any.
    pub fn equip_armor(&mut self, armor: Armor) -> Option<Armor> {
        self.armor.replace(armor)
    }

    pub(crate) fn take_weapon(&mut self) -> Option<Weapon> {
        self.weapon.take()
    }

    pub(crate) fn take_armor(&mut self) -> Option<Armor> {
        self.armor.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_clamps_at_zero() {
        let mut bat = Combatant::new("Bat", 5);
        assert_eq!(bat.take_damage(3), 2);
        assert!(bat.is_alive());
        assert_eq!(bat.take_damage(50), 0);
        assert!(!bat.is_alive());
        assert_eq!(bat.take_damage(1), 0);
    }

    #[test]
    fn signed_deltas_heal_or_hurt() {
        let mut hero = Combatant::new("Hero", 20);
        assert_eq!(hero.apply_health_delta(15), 35);
        assert_eq!(hero.apply_health_delta(-40), 0);
        assert_eq!(hero.apply_health_delta(i32::MIN), 0);
    }

    #[test]
    fn equipping_hands_back_the_old_piece() {
        let mut hero = Combatant::new("Hero", 100).with_weapon(Weapon::fixed("Stick", 10));
        let old = hero.equip_weapon(Weapon::fixed("Sword", 25));
        assert_eq!(old, Some(Weapon::fixed("Stick", 10)));
        assert_eq!(hero.weapon().map(Weapon::name), Some("Sword"));
        assert_eq!(hero.equip_armor(Armor::new("Cloak", 2)), None);
    }
}
