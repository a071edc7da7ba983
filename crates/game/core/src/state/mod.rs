//! Authoritative game state representation.
//!
//! This module owns the castle map, the player and the game phase. Callers
//! query this state freely but mutate it exclusively through the engine.
pub mod types;

pub use types::{
    Armor, BlockReason, BossUnlock, CardinalDirection, Cell, Combatant, Enemy, Entrance, GridPos,
    Inventory, InventoryError, Item, ItemError, ItemKind, ItemUse, Key, KeyEffect, LocalGrid,
    LocalPos, Map, MapError, Player, Potion, Room, RoomError, RoomId, Step, UnlockError,
    UseHandler, Waypoint, Weapon,
};

use crate::config::GameConfig;

/// Where the game stands between commands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GamePhase {
    #[default]
    Exploring,
    /// Fighting the first enemy of `room`. Movement is locked.
    Encounter { room: RoomId },
    /// The boss is dead.
    Victory,
    /// The player died in the boss room.
    Defeat,
}

impl GamePhase {
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::Victory | GamePhase::Defeat)
    }

    pub fn encounter_room(self) -> Option<RoomId> {
        match self {
            GamePhase::Encounter { room } => Some(room),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            GamePhase::Exploring => "exploring",
            GamePhase::Encounter { .. } => "encounter",
            GamePhase::Victory => "victory",
            GamePhase::Defeat => "defeat",
        }
    }
}

/// Canonical snapshot of a running game.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameState {
    pub config: GameConfig,
    pub map: Map,
    pub player: Player,
    pub phase: GamePhase,
    /// Number of commands the engine has accepted.
    pub turn: u64,
}

impl GameState {
    /// Places `hero` in the centre of the map's start room.
    pub fn new(config: GameConfig, map: Map, hero: Combatant) -> Self {
        let start = map.start_room();
        let position = map[start].centre();
        Self {
            config,
            map,
            player: Player::new(hero, start, position),
            phase: GamePhase::Exploring,
            turn: 0,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn current_room(&self) -> &Room {
        &self.map[self.player.room()]
    }

    /// The enemy currently fighting the player, if any.
    pub fn current_enemy(&self) -> Option<&Enemy> {
        let room = self.phase.encounter_room()?;
        self.map.room(room)?.enemies().first()
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_rooms() -> Map {
        Map::new(
            vec![vec![
                Some(Room::new("Gate", 5).unwrap().with_entrance(CardinalDirection::East, Entrance::Open)),
                Some(Room::new("Throne", 5).unwrap()),
            ]],
            GridPos::new(0, 0),
            GridPos::new(0, 1),
        )
        .unwrap()
    }

    #[test]
    fn player_starts_in_start_room_centre() {
        let state = GameState::new(GameConfig::default(), two_rooms(), Combatant::new("Mina", 100));
        assert_eq!(state.player.room(), state.map.start_room());
        assert_eq!(state.player.position(), LocalPos::new(2, 2));
        assert_eq!(state.current_room().name(), "Gate");
        assert_eq!(state.phase(), GamePhase::Exploring);
        assert!(state.current_enemy().is_none());
    }

    #[test]
    fn only_victory_and_defeat_are_terminal() {
        assert!(!GamePhase::Exploring.is_terminal());
        assert!(!GamePhase::Encounter { room: RoomId(1) }.is_terminal());
        assert!(GamePhase::Victory.is_terminal());
        assert!(GamePhase::Defeat.is_terminal());
    }
}
