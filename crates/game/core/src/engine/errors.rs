//! Error types for action execution pipeline.

use crate::action::{
    ActionTransition, AttackAction, MoveAction, PlaceEnemyAction, PlaceItemAction, RetreatAction,
    UnlockBossRoomAction, UseItemAction,
};
use crate::error::{ErrorSeverity, GameError};
use crate::state::GamePhase;

/// Identifies which stage of the transition pipeline produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TransitionPhase {
    PreValidate,
    Apply,
    PostValidate,
}

impl TransitionPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionPhase::PreValidate => "pre_validate",
            TransitionPhase::Apply => "apply",
            TransitionPhase::PostValidate => "post_validate",
        }
    }
}

/// Associates a transition phase with the underlying error.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionPhaseError<E> {
    pub phase: TransitionPhase,
    pub error: E,
}

impl<E> TransitionPhaseError<E> {
    pub fn new(phase: TransitionPhase, error: E) -> Self {
        Self { phase, error }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for TransitionPhaseError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} failed: {}", self.phase.as_str(), self.error)
    }
}

impl<E: std::fmt::Display + std::fmt::Debug> std::error::Error for TransitionPhaseError<E> {}

type PhaseError<T> = TransitionPhaseError<<T as ActionTransition>::Error>;

/// Errors surfaced while executing an action through the game engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExecuteError {
    #[error("the game is over ({})", .phase.as_str())]
    GameOver { phase: GamePhase },

    #[error("move action failed: {0}")]
    Move(PhaseError<MoveAction>),

    #[error("attack action failed: {0}")]
    Attack(PhaseError<AttackAction>),

    #[error("retreat action failed: {0}")]
    Retreat(PhaseError<RetreatAction>),

    #[error("use item action failed: {0}")]
    UseItem(PhaseError<UseItemAction>),

    #[error("place item action failed: {0}")]
    PlaceItem(PhaseError<PlaceItemAction>),

    #[error("place enemy action failed: {0}")]
    PlaceEnemy(PhaseError<PlaceEnemyAction>),

    #[error("unlock boss room action failed: {0}")]
    UnlockBossRoom(PhaseError<UnlockBossRoomAction>),
}

impl ExecuteError {
    /// Pipeline stage that failed, if the error came from a transition.
    pub fn phase(&self) -> Option<TransitionPhase> {
        match self {
            Self::GameOver { .. } => None,
            Self::Move(err) => Some(err.phase),
            Self::Attack(err) => Some(err.phase),
            Self::Retreat(err) => Some(err.phase),
            Self::UseItem(err) => Some(err.phase),
            Self::PlaceItem(err) => Some(err.phase),
            Self::PlaceEnemy(err) => Some(err.phase),
            Self::UnlockBossRoom(err) => Some(err.phase),
        }
    }

    fn inner(&self) -> Option<&dyn GameError> {
        let inner: &dyn GameError = match self {
            Self::GameOver { .. } => return None,
            Self::Move(err) => &err.error,
            Self::Attack(err) => &err.error,
            Self::Retreat(err) => &err.error,
            Self::UseItem(err) => &err.error,
            Self::PlaceItem(err) => &err.error,
            Self::PlaceEnemy(err) => &err.error,
            Self::UnlockBossRoom(err) => &err.error,
        };
        Some(inner)
    }
}

impl GameError for ExecuteError {
    fn severity(&self) -> ErrorSeverity {
        self.inner()
            .map_or(ErrorSeverity::Validation, |err| err.severity())
    }

    fn error_code(&self) -> &'static str {
        self.inner()
            .map_or("EXECUTE_GAME_OVER", |err| err.error_code())
    }
}
