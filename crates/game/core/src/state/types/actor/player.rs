use super::Combatant;
use crate::state::{Item, KeyEffect, LocalPos, RoomId, UseHandler};

/// A room and a cell inside it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub room: RoomId,
    pub position: LocalPos,
}

impl Waypoint {
    pub fn new(room: RoomId, position: LocalPos) -> Self {
        Self { room, position }
    }
}

/// What activating an item from the player's pack did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemUse {
    EquippedWeapon {
        name: String,
        replaced: Option<String>,
    },
    EquippedArmor {
        name: String,
        replaced: Option<String>,
    },
    DrankPotion {
        name: String,
        health_effect: i32,
        health: u32,
    },
    TurnedKey {
        name: String,
        effect: Option<KeyEffect>,
    },
}

/// The controllable character.
///
/// The player refers to rooms by [`RoomId`]; the [`Map`](crate::state::Map)
/// owns them.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Player {
    combatant: Combatant,
    room: RoomId,
    position: LocalPos,
    previous: Option<Waypoint>,
}

impl Player {
    pub fn new(mut combatant: Combatant, room: RoomId, position: LocalPos) -> Self {
        combatant
            .inventory_mut()
            .set_handler(Some(UseHandler::Activate));
        Self {
            combatant,
            room,
            position,
            previous: None,
        }
    }

    pub fn combatant(&self) -> &Combatant {
        &self.combatant
    }

    pub fn combatant_mut(&mut self) -> &mut Combatant {
        &mut self.combatant
    }

    pub fn name(&self) -> &str {
        self.combatant.name()
    }

    pub fn health(&self) -> u32 {
        self.combatant.health()
    }

    pub fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }

    pub fn room(&self) -> RoomId {
        self.room
    }

    pub fn position(&self) -> LocalPos {
        self.position
    }

    pub fn waypoint(&self) -> Waypoint {
        Waypoint::new(self.room, self.position)
    }

    /// Room and cell the player last left, the target of a retreat.
    pub fn previous(&self) -> Option<Waypoint> {
        self.previous
    }

    pub(crate) fn set_position(&mut self, position: LocalPos) {
        self.position = position;
    }

    /// Moves to another room, remembering where the player came from.
    pub(crate) fn relocate(&mut self, room: RoomId, position: LocalPos) {
        self.previous = Some(self.waypoint());
        self.room = room;
        self.position = position;
    }

    /// Applies an item taken out of the pack.
    ///
    /// Equipment displaced by a new weapon or armor goes back into the pack,
    /// as does a key once turned.
    pub fn use_item(&mut self, item: Item) -> ItemUse {
        match item {
            Item::Weapon(weapon) => {
                let name = weapon.name().to_owned();
                let replaced = self.combatant.equip_weapon(weapon).map(|old| {
                    let old_name = old.name().to_owned();
                    self.combatant.inventory_mut().add(Item::Weapon(old));
                    old_name
                });
                ItemUse::EquippedWeapon { name, replaced }
            }
            Item::Armor(armor) => {
                let name = armor.name().to_owned();
                let replaced = self.combatant.equip_armor(armor).map(|old| {
                    let old_name = old.name().to_owned();
                    self.combatant.inventory_mut().add(Item::Armor(old));
                    old_name
                });
                ItemUse::EquippedArmor { name, replaced }
            }
            Item::Potion(potion) => {
                let health = self.combatant.apply_health_delta(potion.health_effect());
                ItemUse::DrankPotion {
                    name: potion.name().to_owned(),
                    health_effect: potion.health_effect(),
                    health,
                }
            }
            Item::Key(mut key) => {
                let effect = key.use_key();
                let name = key.name().to_owned();
                self.combatant.inventory_mut().add(Item::Key(key));
                ItemUse::TurnedKey { name, effect }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Armor, Key, Potion, Weapon};

    fn hero() -> Player {
        let combatant = Combatant::new("Jonathan", 100).with_weapon(Weapon::fixed("Stick", 10));
        Player::new(combatant, RoomId(0), LocalPos::new(3, 3))
    }

    #[test]
    fn pack_activates_items() {
        let player = hero();
        assert_eq!(
            player.combatant().inventory().handler(),
            Some(UseHandler::Activate)
        );
    }

    #[test]
    fn equipping_weapon_returns_old_one_to_pack() {
        let mut player = hero();
        let used = player.use_item(Weapon::fixed("Silver Sword", 30).into());

        assert_eq!(
            used,
            ItemUse::EquippedWeapon {
                name: "Silver Sword".into(),
                replaced: Some("Stick".into()),
            }
        );
        assert_eq!(
            player.combatant().weapon().map(Weapon::name),
            Some("Silver Sword")
        );
        assert!(
            player
                .combatant()
                .inventory()
                .contains(&Weapon::fixed("Stick", 10).into())
        );
    }

    #[test]
    fn first_armor_replaces_nothing() {
        let mut player = hero();
        let used = player.use_item(Armor::new("Chainmail", 6).into());
        assert_eq!(
            used,
            ItemUse::EquippedArmor {
                name: "Chainmail".into(),
                replaced: None,
            }
        );
        assert!(player.combatant().inventory().is_empty());
    }

    #[test]
    fn potions_change_health() {
        let mut player = hero();
        let used = player.use_item(Potion::new("Holy Water", 25).into());
        assert_eq!(
            used,
            ItemUse::DrankPotion {
                name: "Holy Water".into(),
                health_effect: 25,
                health: 125,
            }
        );
    }

    #[test]
    fn turned_key_returns_spent() {
        let mut player = hero();
        let key = Key::new("Crypt Key").with_effect(KeyEffect::UnlockBossRoom);
        let used = player.use_item(key.into());

        assert_eq!(
            used,
            ItemUse::TurnedKey {
                name: "Crypt Key".into(),
                effect: Some(KeyEffect::UnlockBossRoom),
            }
        );
        let stored = player.combatant().inventory().get(0).unwrap();
        assert!(!stored.is_useable());
    }

    #[test]
    fn relocating_remembers_the_way_back() {
        let mut player = hero();
        player.set_position(LocalPos::new(0, 3));
        player.relocate(RoomId(2), LocalPos::new(6, 3));

        assert_eq!(player.room(), RoomId(2));
        assert_eq!(
            player.previous(),
            Some(Waypoint::new(RoomId(0), LocalPos::new(0, 3)))
        );
    }
}
