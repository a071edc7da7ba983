//! Action transition dispatch and execution logic.

use crate::action::{
    Action, ActionContext, ActionTransition, CharacterActionKind, SystemActionKind,
};
use crate::state::GameState;

use super::ActionResult;
use super::errors::{ExecuteError, TransitionPhase, TransitionPhaseError};

/// Executes a transition through the three-phase pipeline and returns the result.
///
/// Phases:
/// 1. `pre_validate` - Check preconditions before mutation
/// 2. `apply` - Mutate the game state and return result
/// 3. `post_validate` - Verify postconditions after mutation
#[inline]
pub(super) fn drive_transition<T>(
    transition: &T,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<T::Result, TransitionPhaseError<T::Error>>
where
    T: ActionTransition,
{
    transition
        .pre_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PreValidate, error))?;

    let result = transition
        .apply(state, ctx)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::Apply, error))?;

    transition
        .post_validate(state)
        .map_err(|error| TransitionPhaseError::new(TransitionPhase::PostValidate, error))?;

    Ok(result)
}

/// Routes each action type to its transition and wraps the result in
/// [`ActionResult`].
pub(super) fn execute_transition(
    action: &Action,
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
) -> Result<ActionResult, ExecuteError> {
    match action {
        Action::Character { kind } => match kind {
            CharacterActionKind::Move(transition) => drive_transition(transition, state, ctx)
                .map(ActionResult::Move)
                .map_err(ExecuteError::Move),
            CharacterActionKind::Attack(transition) => drive_transition(transition, state, ctx)
                .map(ActionResult::Attack)
                .map_err(ExecuteError::Attack),
            CharacterActionKind::Retreat(transition) => drive_transition(transition, state, ctx)
                .map(ActionResult::Retreat)
                .map_err(ExecuteError::Retreat),
            CharacterActionKind::UseItem(transition) => drive_transition(transition, state, ctx)
                .map(ActionResult::UseItem)
                .map_err(ExecuteError::UseItem),
        },
        Action::System { kind } => match kind {
            SystemActionKind::PlaceItem(transition) => drive_transition(transition, state, ctx)
                .map(ActionResult::PlaceItem)
                .map_err(ExecuteError::PlaceItem),
            SystemActionKind::PlaceEnemy(transition) => drive_transition(transition, state, ctx)
                .map(ActionResult::PlaceEnemy)
                .map_err(ExecuteError::PlaceEnemy),
            SystemActionKind::UnlockBossRoom(transition) => {
                drive_transition(transition, state, ctx)
                    .map(ActionResult::UnlockBossRoom)
                    .map_err(ExecuteError::UnlockBossRoom)
            }
        },
    }
}
