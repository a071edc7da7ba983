//! Events emitted while an action executes.
//!
//! Events are the narration of a command: a presentation layer prints them
//! to its text log in the order they were emitted.

use std::fmt;

use crate::state::{BossUnlock, CardinalDirection, GamePhase, ItemUse, LocalPos, RoomId};

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GameEvent {
    PlayerMoved {
        position: LocalPos,
    },
    RoomEntered {
        room: RoomId,
        name: String,
        direction: CardinalDirection,
    },
    EncounterStarted {
        room: RoomId,
        enemy: String,
    },
    Strike {
        attacker: String,
        defender: String,
        damage: u32,
        defender_health: u32,
    },
    EnemySlain {
        room: RoomId,
        enemy: String,
        loot: Vec<String>,
    },
    PlayerKnockedOut {
        room: RoomId,
        health: u32,
    },
    Retreated {
        room: RoomId,
    },
    ItemPickedUp {
        name: String,
    },
    ItemUsed(ItemUse),
    BossRoomUnlocked(BossUnlock),
    ItemPlaced {
        room: RoomId,
        item: String,
    },
    EnemyPlaced {
        room: RoomId,
        enemy: String,
    },
    GameOver(GamePhase),
}

impl fmt::Display for GameEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameEvent::PlayerMoved { position } => write!(f, "You step to {position}."),
            GameEvent::RoomEntered { name, direction, .. } => {
                write!(f, "You head {direction} into the {name}.")
            }
            GameEvent::EncounterStarted { enemy, .. } => write!(f, "A {enemy} blocks your way!"),
            GameEvent::Strike {
                attacker,
                defender,
                damage,
                defender_health,
            } => write!(
                f,
                "{attacker} hits {defender} for {damage} ({defender_health} hp left)."
            ),
            GameEvent::EnemySlain { enemy, loot, .. } if loot.is_empty() => {
                write!(f, "The {enemy} falls.")
            }
            GameEvent::EnemySlain { enemy, loot, .. } => {
                write!(f, "The {enemy} falls, dropping {}.", loot.join(", "))
            }
            GameEvent::PlayerKnockedOut { health, .. } => write!(
                f,
                "You are knocked out and come to where you came from with {health} hp."
            ),
            GameEvent::Retreated { .. } => write!(f, "You flee the fight."),
            GameEvent::ItemPickedUp { name } => write!(f, "You pick up the {name}."),
            GameEvent::ItemUsed(ItemUse::EquippedWeapon { name, .. }) => {
                write!(f, "You wield the {name}.")
            }
            GameEvent::ItemUsed(ItemUse::EquippedArmor { name, .. }) => {
                write!(f, "You put on the {name}.")
            }
            GameEvent::ItemUsed(ItemUse::DrankPotion { name, health, .. }) => {
                write!(f, "You drink the {name} and now have {health} hp.")
            }
            GameEvent::ItemUsed(ItemUse::TurnedKey { name, .. }) => {
                write!(f, "You turn the {name}.")
            }
            GameEvent::BossRoomUnlocked(unlock) => write!(
                f,
                "Somewhere a door grinds open to the {} of {}.",
                unlock.direction, unlock.room
            ),
            GameEvent::ItemPlaced { room, item } => write!(f, "{item} placed in {room}."),
            GameEvent::EnemyPlaced { room, enemy } => write!(f, "{enemy} lurks in {room}."),
            GameEvent::GameOver(GamePhase::Victory) => write!(f, "The master of the castle is destroyed. You win!"),
            GameEvent::GameOver(_) => write!(f, "You have perished in the castle."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slain_message_lists_loot() {
        let event = GameEvent::EnemySlain {
            room: RoomId(3),
            enemy: "Ghoul".into(),
            loot: vec!["Claws".into(), "Bone Charm".into()],
        };
        assert_eq!(event.to_string(), "The Ghoul falls, dropping Claws, Bone Charm.");

        let bare = GameEvent::EnemySlain {
            room: RoomId(3),
            enemy: "Rat".into(),
            loot: Vec::new(),
        };
        assert_eq!(bare.to_string(), "The Rat falls.");
    }

    #[test]
    fn room_entry_names_direction() {
        let event = GameEvent::RoomEntered {
            room: RoomId(1),
            name: "Chapel".into(),
            direction: CardinalDirection::West,
        };
        assert_eq!(event.to_string(), "You head west into the Chapel.");
    }
}
