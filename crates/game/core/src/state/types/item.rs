//! Item definitions.
//!
//! Items are plain values: a room or character owns them through its
//! [`Inventory`](super::Inventory), and moving an item means moving the value.
//! The four kinds form the [`Item`] tagged union so every "use" is an
//! exhaustive match rather than a runtime type check.

use std::fmt;

use crate::env::RngOracle;
use crate::error::{ErrorSeverity, GameError};

/// Errors raised while constructing item definitions.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ItemError {
    #[error("weapon '{name}' has min damage {min} above max damage {max}")]
    InvalidDamageRange { name: String, min: u32, max: u32 },
}

impl GameError for ItemError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidDamageRange { .. } => "ITEM_INVALID_DAMAGE_RANGE",
        }
    }
}

/// Coarse classification of an item, for queries and display.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumIter, strum::IntoStaticStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum ItemKind {
    Weapon,
    Armor,
    Potion,
    Key,
}

/// Weapon dealing uniformly random damage in `[min_damage, max_damage]`.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "WeaponFields"))]
pub struct Weapon {
    name: String,
    min_damage: u32,
    max_damage: u32,
}

impl Weapon {
    pub fn new(name: impl Into<String>, min_damage: u32, max_damage: u32) -> Result<Self, ItemError> {
        let name = name.into();
        if min_damage > max_damage {
            return Err(ItemError::InvalidDamageRange {
                name,
                min: min_damage,
                max: max_damage,
            });
        }
        Ok(Self {
            name,
            min_damage,
            max_damage,
        })
    }

    /// Weapon that always deals exactly `damage`.
    pub fn fixed(name: impl Into<String>, damage: u32) -> Self {
        Self {
            name: name.into(),
            min_damage: damage,
            max_damage: damage,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn min_damage(&self) -> u32 {
        self.min_damage
    }

    pub fn max_damage(&self) -> u32 {
        self.max_damage
    }

    /// Rolls the damage of one strike.
    pub fn attack_damage(&self, rng: &mut (impl RngOracle + ?Sized)) -> u32 {
        rng.range(self.min_damage, self.max_damage)
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct WeaponFields {
    name: String,
    min_damage: u32,
    max_damage: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<WeaponFields> for Weapon {
    type Error = ItemError;

    fn try_from(fields: WeaponFields) -> Result<Self, Self::Error> {
        Weapon::new(fields.name, fields.min_damage, fields.max_damage)
    }
}

/// Armor absorbing a uniformly random amount in `[0, protection]` per hit.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Armor {
    name: String,
    protection: u32,
}

impl Armor {
    pub fn new(name: impl Into<String>, protection: u32) -> Self {
        Self {
            name: name.into(),
            protection,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn protection(&self) -> u32 {
        self.protection
    }

    /// Rolls how much of one incoming hit this armor absorbs.
    pub fn protection_roll(&self, rng: &mut (impl RngOracle + ?Sized)) -> u32 {
        rng.range(0, self.protection)
    }
}

/// Consumable that adds a fixed, possibly negative, amount to health.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Potion {
    name: String,
    health_effect: i32,
}

impl Potion {
    pub fn new(name: impl Into<String>, health_effect: i32) -> Self {
        Self {
            name: name.into(),
            health_effect,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn health_effect(&self) -> i32 {
        self.health_effect
    }
}

/// What turning a key sets in motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum KeyEffect {
    /// Open a previously sealed entrance somewhere in the castle into the boss room.
    UnlockBossRoom,
}

/// Single-use key. Its effect fires exactly once; afterwards the key is
/// permanently non-useable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Key {
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    effect: Option<KeyEffect>,
    #[cfg_attr(feature = "serde", serde(default))]
    used: bool,
}

impl Key {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            effect: None,
            used: false,
        }
    }

    pub fn with_effect(mut self, effect: KeyEffect) -> Self {
        self.effect = Some(effect);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn effect(&self) -> Option<KeyEffect> {
        self.effect
    }

    pub fn is_useable(&self) -> bool {
        !self.used
    }

    /// Turns the key. Returns its effect the first time only.
    pub fn use_key(&mut self) -> Option<KeyEffect> {
        if self.used {
            return None;
        }
        self.used = true;
        self.effect
    }
}

/// Anything that can sit in an inventory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Item {
    Weapon(Weapon),
    Armor(Armor),
    Potion(Potion),
    Key(Key),
}

impl Item {
    pub fn name(&self) -> &str {
        match self {
            Item::Weapon(weapon) => weapon.name(),
            Item::Armor(armor) => armor.name(),
            Item::Potion(potion) => potion.name(),
            Item::Key(key) => key.name(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        match self {
            Item::Weapon(_) => ItemKind::Weapon,
            Item::Armor(_) => ItemKind::Armor,
            Item::Potion(_) => ItemKind::Potion,
            Item::Key(_) => ItemKind::Key,
        }
    }

    /// Whether an inventory "use" applies an effect. Only spent keys refuse.
    pub fn is_useable(&self) -> bool {
        match self {
            Item::Weapon(_) | Item::Armor(_) | Item::Potion(_) => true,
            Item::Key(key) => key.is_useable(),
        }
    }
}

impl From<Weapon> for Item {
    fn from(weapon: Weapon) -> Self {
        Item::Weapon(weapon)
    }
}

impl From<Armor> for Item {
    fn from(armor: Armor) -> Self {
        Item::Armor(armor)
    }
}

impl From<Potion> for Item {
    fn from(potion: Potion) -> Self {
        Item::Potion(potion)
    }
}

impl From<Key> for Item {
    fn from(key: Key) -> Self {
        Item::Key(key)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Item::Weapon(weapon) => write!(
                f,
                "{} ({}-{} dmg)",
                weapon.name, weapon.min_damage, weapon.max_damage
            ),
            Item::Armor(armor) => write!(f, "{} ({} prot)", armor.name, armor.protection),
            Item::Potion(potion) => write!(f, "{} ({:+} hp)", potion.name, potion.health_effect),
            Item::Key(key) if key.used => write!(f, "{} (used)", key.name),
            Item::Key(key) => f.write_str(&key.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{PcgRng, ScriptedRng};

    #[test]
    fn weapon_rejects_inverted_range() {
        let err = Weapon::new("Broken Blade", 9, 3).unwrap_err();
        assert_eq!(
            err,
            ItemError::InvalidDamageRange {
                name: "Broken Blade".into(),
                min: 9,
                max: 3,
            }
        );
        assert_eq!(err.severity(), ErrorSeverity::Validation);
    }

    #[test]
    fn fixed_weapon_always_hits_for_the_same_amount() {
        let stick = Weapon::fixed("Stick", 10);
        let mut rng = PcgRng::new(7);
        for _ in 0..50 {
            assert_eq!(stick.attack_damage(&mut rng), 10);
        }
    }

    #[test]
    fn armor_roll_follows_the_script() {
        let shield = Armor::new("Shield", 10);
        let mut rng = ScriptedRng::new([8]);
        assert_eq!(shield.protection_roll(&mut rng), 8);
    }

    #[test]
    fn key_fires_once_then_is_spent() {
        let mut key = Key::new("Crypt Key").with_effect(KeyEffect::UnlockBossRoom);
        assert!(key.is_useable());
        assert_eq!(key.use_key(), Some(KeyEffect::UnlockBossRoom));
        assert!(!key.is_useable());
        assert_eq!(key.use_key(), None);
        assert!(!Item::Key(key).is_useable());
    }

    #[test]
    fn plain_key_is_spent_without_effect() {
        let mut key = Key::new("Rusty Key");
        assert_eq!(key.use_key(), None);
        assert!(!key.is_useable());
    }

    #[test]
    fn items_report_kind_and_name() {
        let potion: Item = Potion::new("Garlic Tonic", -5).into();
        assert_eq!(potion.kind(), ItemKind::Potion);
        assert_eq!(potion.name(), "Garlic Tonic");
        assert_eq!(potion.to_string(), "Garlic Tonic (-5 hp)");
        assert_eq!(ItemKind::Armor.to_string(), "armor");
    }
}
