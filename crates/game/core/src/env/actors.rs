//! Enemy template definitions.
//!
//! Templates describe an enemy in a data-driven way. They can be deserialized
//! from RON catalogs and spawned into [`Enemy`](crate::state::Enemy) instances
//! any number of times.

use crate::state::{Armor, Item, Weapon};

/// Everything needed to spawn one enemy.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnemyTemplate {
    pub name: String,
    pub health: u32,

    #[cfg_attr(feature = "serde", serde(default))]
    pub weapon: Option<Weapon>,

    #[cfg_attr(feature = "serde", serde(default))]
    pub armor: Option<Armor>,

    /// Starting inventory, dropped into the room on death.
    #[cfg_attr(feature = "serde", serde(default))]
    pub loot: Vec<Item>,

    /// Defeating a boss ends the game.
    #[cfg_attr(feature = "serde", serde(default))]
    pub boss: bool,
}

impl EnemyTemplate {
    pub fn builder(name: impl Into<String>, health: u32) -> EnemyTemplateBuilder {
        EnemyTemplateBuilder {
            name: name.into(),
            health,
            weapon: None,
            armor: None,
            loot: Vec::new(),
            boss: false,
        }
    }
}

/// Builder for constructing enemy templates.
#[derive(Clone, Debug)]
pub struct EnemyTemplateBuilder {
    name: String,
    health: u32,
    weapon: Option<Weapon>,
    armor: Option<Armor>,
    loot: Vec<Item>,
    boss: bool,
}

impl EnemyTemplateBuilder {
    /// Set the equipped weapon
    pub fn weapon(mut self, weapon: Weapon) -> Self {
        self.weapon = Some(weapon);
        self
    }

    /// Set the worn armor
    pub fn armor(mut self, armor: Armor) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Add one item of starting loot
    pub fn loot(mut self, item: Item) -> Self {
        self.loot.push(item);
        self
    }

    /// Mark as the final boss
    pub fn boss(mut self) -> Self {
        self.boss = true;
        self
    }

    pub fn build(self) -> EnemyTemplate {
        EnemyTemplate {
            name: self.name,
            health: self.health,
            weapon: self.weapon,
            armor: self.armor,
            loot: self.loot,
            boss: self.boss,
        }
    }
}
