//! Action execution pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`GameState`]. It
//! orchestrates the transition phases and surfaces rich error information
//! for the presentation layer. Player commands and world setup (random
//! placement, the boss-room unlock) flow through the same pipeline.

mod errors;
pub mod events;
mod transition;

pub use errors::{ExecuteError, TransitionPhase, TransitionPhaseError};
pub use events::GameEvent;

use tracing::{debug, info, warn};

use crate::action::{
    Action, ActionContext, ActionTransition, AttackAction, BattleRound, InventoryOwner,
    MoveAction, MoveOutcome, PlaceEnemyAction, PlaceItemAction, RetreatAction,
    UnlockBossRoomAction, UseItemAction, UseOutcome,
};
use crate::env::RngOracle;
use crate::state::{BossUnlock, CardinalDirection, Enemy, GameState, Item, RoomId, Waypoint};

/// Action-specific result of a successful execution.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionResult {
    Move(MoveOutcome),
    Attack(BattleRound),
    Retreat(Waypoint),
    UseItem(UseOutcome),
    PlaceItem(RoomId),
    PlaceEnemy(RoomId),
    UnlockBossRoom(BossUnlock),
}

/// Complete outcome of action execution.
///
/// [`GameEngine::execute`] yields an [`ActionResult`]; the typed helpers
/// such as [`GameEngine::attack`] yield the transition's own result type.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExecutionOutcome<R = ActionResult> {
    pub result: R,

    /// Narration in emission order.
    pub events: Vec<GameEvent>,
}

impl<R> ExecutionOutcome<R> {
    pub fn map<U>(self, f: impl FnOnce(R) -> U) -> ExecutionOutcome<U> {
        ExecutionOutcome {
            result: f(self.result),
            events: self.events,
        }
    }
}

/// Game engine that manages action execution.
///
/// All state mutations flow through the three-phase action pipeline:
/// pre_validate → apply → post_validate
///
/// A rejected action leaves no trace in the turn counter. Once the game has
/// reached [`GamePhase::Victory`](crate::state::GamePhase::Victory) or
/// [`GamePhase::Defeat`](crate::state::GamePhase::Defeat) every action is
/// refused.
pub struct GameEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine with the given state.
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    pub fn state(&self) -> &GameState {
        self.state
    }

    /// Executes an action by routing it through the appropriate transition pipeline.
    pub fn execute(
        &mut self,
        rng: &mut dyn RngOracle,
        action: &Action,
    ) -> Result<ExecutionOutcome, ExecuteError> {
        let name = action.name();
        self.ensure_running(name)?;

        let mut ctx = ActionContext::new(rng);
        let result = transition::execute_transition(action, self.state, &mut ctx)
            .inspect_err(|error| warn!(action = name, %error, "action rejected"))?;
        Ok(self.finish(name, result, ctx))
    }

    /// Takes one step in `direction`.
    pub fn move_player(
        &mut self,
        rng: &mut dyn RngOracle,
        direction: CardinalDirection,
    ) -> Result<ExecutionOutcome<MoveOutcome>, ExecuteError> {
        self.run(rng, "move", &MoveAction::new(direction), ExecuteError::Move)
    }

    /// Fights one round against the current enemy.
    pub fn attack(
        &mut self,
        rng: &mut dyn RngOracle,
    ) -> Result<ExecutionOutcome<BattleRound>, ExecuteError> {
        self.run(rng, "attack", &AttackAction, ExecuteError::Attack)
    }

    /// Flees the current encounter.
    pub fn retreat(
        &mut self,
        rng: &mut dyn RngOracle,
    ) -> Result<ExecutionOutcome<Waypoint>, ExecuteError> {
        self.run(rng, "retreat", &RetreatAction, ExecuteError::Retreat)
    }

    /// Uses the item under `cursor` in the chosen inventory.
    pub fn use_item(
        &mut self,
        rng: &mut dyn RngOracle,
        owner: InventoryOwner,
        cursor: usize,
    ) -> Result<ExecutionOutcome<UseOutcome>, ExecuteError> {
        let action = UseItemAction::new(owner, cursor);
        self.run(rng, "use_item", &action, ExecuteError::UseItem)
    }

    pub fn add_item_to_random_room(
        &mut self,
        rng: &mut dyn RngOracle,
        item: impl Into<Item>,
    ) -> Result<ExecutionOutcome<RoomId>, ExecuteError> {
        let action = PlaceItemAction::new(item);
        self.run(rng, "place_item", &action, ExecuteError::PlaceItem)
    }

    pub fn add_enemy_to_random_room(
        &mut self,
        rng: &mut dyn RngOracle,
        enemy: Enemy,
    ) -> Result<ExecutionOutcome<RoomId>, ExecuteError> {
        let action = PlaceEnemyAction::new(enemy);
        self.run(rng, "place_enemy", &action, ExecuteError::PlaceEnemy)
    }

    pub fn unlock_boss_room(
        &mut self,
        rng: &mut dyn RngOracle,
    ) -> Result<ExecutionOutcome<BossUnlock>, ExecuteError> {
        self.run(
            rng,
            "unlock_boss_room",
            &UnlockBossRoomAction,
            ExecuteError::UnlockBossRoom,
        )
    }

    fn run<T>(
        &mut self,
        rng: &mut dyn RngOracle,
        name: &'static str,
        transition: &T,
        wrap: fn(TransitionPhaseError<T::Error>) -> ExecuteError,
    ) -> Result<ExecutionOutcome<T::Result>, ExecuteError>
    where
        T: ActionTransition,
    {
        self.ensure_running(name)?;

        let mut ctx = ActionContext::new(rng);
        let result = transition::drive_transition(transition, self.state, &mut ctx)
            .map_err(wrap)
            .inspect_err(|error| warn!(action = name, %error, "action rejected"))?;
        Ok(self.finish(name, result, ctx))
    }

    fn ensure_running(&self, name: &'static str) -> Result<(), ExecuteError> {
        if self.state.phase.is_terminal() {
            let phase = self.state.phase;
            warn!(action = name, phase = phase.as_str(), "action after game over");
            return Err(ExecuteError::GameOver { phase });
        }
        Ok(())
    }

    fn finish<R>(
        &mut self,
        name: &'static str,
        result: R,
        ctx: ActionContext<'_>,
    ) -> ExecutionOutcome<R> {
        self.state.turn += 1;
        let events = ctx.into_events();
        debug!(
            action = name,
            turn = self.state.turn,
            events = events.len(),
            "action executed"
        );
        if self.state.phase.is_terminal() {
            info!(
                phase = self.state.phase.as_str(),
                turn = self.state.turn,
                "game over"
            );
        }
        ExecutionOutcome { result, events }
    }
}
