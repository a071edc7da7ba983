//! Random placement of items and enemies.
//!
//! Items may land in any room except the boss room. Enemies may land in any
//! room except the start room and the boss room, so the player never starts
//! in a fight and the boss fights alone.

use tracing::debug;

use crate::action::{ActionContext, ActionTransition};
use crate::engine::GameEvent;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Enemy, GameState, Item, Map, RoomId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    #[error("no room may receive the placement")]
    NoEligibleRoom,
}

impl GameError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        "PLACEMENT_NO_ELIGIBLE_ROOM"
    }
}

fn accepts_item(map: &Map, room: RoomId) -> bool {
    room != map.boss_room()
}

fn accepts_enemy(map: &Map, room: RoomId) -> bool {
    room != map.boss_room() && room != map.start_room()
}

/// Drops an item on the floor of a uniformly chosen non-boss room.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceItemAction {
    pub item: Item,
}

impl PlaceItemAction {
    pub fn new(item: impl Into<Item>) -> Self {
        Self { item: item.into() }
    }
}

impl ActionTransition for PlaceItemAction {
    type Error = PlacementError;
    type Result = RoomId;

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if !state.map.rooms().any(|(id, _)| accepts_item(&state.map, id)) {
            return Err(PlacementError::NoEligibleRoom);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let map = &state.map;
        let room = map
            .random_room(ctx.rng(), |id, _| accepts_item(map, id))
            .ok_or(PlacementError::NoEligibleRoom)?;
        if let Some(target) = state.map.room_mut(room) {
            target.inventory_mut().add(self.item.clone());
        }

        debug!(%room, item = self.item.name(), "item placed");
        ctx.emit(GameEvent::ItemPlaced {
            room,
            item: self.item.name().to_owned(),
        });
        Ok(room)
    }
}

/// Puts an enemy into a uniformly chosen room other than start and boss.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlaceEnemyAction {
    pub enemy: Enemy,
}

impl PlaceEnemyAction {
    pub fn new(enemy: Enemy) -> Self {
        Self { enemy }
    }
}

impl ActionTransition for PlaceEnemyAction {
    type Error = PlacementError;
    type Result = RoomId;

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if !state.map.rooms().any(|(id, _)| accepts_enemy(&state.map, id)) {
            return Err(PlacementError::NoEligibleRoom);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let map = &state.map;
        let room = map
            .random_room(ctx.rng(), |id, _| accepts_enemy(map, id))
            .ok_or(PlacementError::NoEligibleRoom)?;
        if let Some(target) = state.map.room_mut(room) {
            target.add_enemy(self.enemy.clone());
        }

        debug!(%room, enemy = self.enemy.name(), "enemy placed");
        ctx.emit(GameEvent::EnemyPlaced {
            room,
            enemy: self.enemy.name().to_owned(),
        });
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::env::{PcgRng, ScriptedRng};
    use crate::state::{Combatant, GridPos, Potion, Room};

    fn castle(rooms: usize) -> GameState {
        let row = (0..rooms)
            .map(|i| Some(Room::new(format!("Room {i}"), 5).unwrap()))
            .collect();
        let map = Map::new(vec![row], GridPos::new(0, 0), GridPos::new(0, rooms - 1)).unwrap();
        GameState::new(GameConfig::new().with_room_size(5), map, Combatant::new("Hero", 100))
    }

    #[test]
    fn items_never_land_in_the_boss_room() {
        let mut state = castle(3);
        let boss = state.map.boss_room();
        let mut rng = PcgRng::new(7);
        let action = PlaceItemAction::new(Potion::new("Garlic Tonic", 15));

        for _ in 0..50 {
            let mut ctx = ActionContext::new(&mut rng);
            let room = action.apply(&mut state, &mut ctx).unwrap();
            assert_ne!(room, boss);
        }
        assert!(state.map[boss].inventory().is_empty());
        let placed: usize = state.map.rooms().map(|(_, room)| room.inventory().len()).sum();
        assert_eq!(placed, 50);
    }

    #[test]
    fn enemies_avoid_start_and_boss() {
        let mut state = castle(3);
        let action = PlaceEnemyAction::new(Enemy::new(Combatant::new("Ghoul", 20)));
        let mut rng = ScriptedRng::new([0, 5, 9]);

        for _ in 0..3 {
            let mut ctx = ActionContext::new(&mut rng);
            assert_eq!(action.apply(&mut state, &mut ctx), Ok(RoomId(1)));
        }
        assert_eq!(state.map[RoomId(1)].enemies().len(), 3);
    }

    #[test]
    fn enemy_placement_needs_a_middle_room() {
        let state = castle(2);
        let action = PlaceEnemyAction::new(Enemy::new(Combatant::new("Ghoul", 20)));
        assert_eq!(action.pre_validate(&state), Err(PlacementError::NoEligibleRoom));
        assert_eq!(
            PlaceItemAction::new(Potion::new("Tonic", 1)).pre_validate(&state),
            Ok(())
        );
    }
}
