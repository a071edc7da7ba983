use tracing::{debug, info};

use crate::action::{ActionContext, ActionTransition};
use crate::engine::GameEvent;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{BlockReason, CardinalDirection, GamePhase, GameState, LocalPos, RoomId, Step};

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("cannot move while fighting in {room}")]
    EncounterInProgress { room: RoomId },

    #[error("{0} is not in the castle")]
    UnknownRoom(RoomId),

    #[error("player position {position} is outside {room}")]
    PositionDesync { room: RoomId, position: LocalPos },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::EncounterInProgress { .. } => ErrorSeverity::Recoverable,
            Self::UnknownRoom(_) | Self::PositionDesync { .. } => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EncounterInProgress { .. } => "MOVE_ENCOUNTER_IN_PROGRESS",
            Self::UnknownRoom(_) => "MOVE_UNKNOWN_ROOM",
            Self::PositionDesync { .. } => "MOVE_POSITION_DESYNC",
        }
    }
}

/// What a single step did. A blocked step is not an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveOutcome {
    Blocked(BlockReason),
    Walked(LocalPos),
    Entered {
        room: RoomId,
        position: LocalPos,
        encounter: bool,
    },
}

/// One unit step of the player on the current room's grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoveAction {
    pub direction: CardinalDirection,
}

impl MoveAction {
    pub fn new(direction: CardinalDirection) -> Self {
        Self { direction }
    }
}

impl ActionTransition for MoveAction {
    type Error = MoveError;
    type Result = MoveOutcome;

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if let GamePhase::Encounter { room } = state.phase {
            return Err(MoveError::EncounterInProgress { room });
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let here = state.player.room();
        let room = state.map.room(here).ok_or(MoveError::UnknownRoom(here))?;

        match room.resolve_step(state.player.position(), self.direction) {
            Step::Blocked(reason) => {
                debug!(direction = %self.direction, ?reason, "step blocked");
                Ok(MoveOutcome::Blocked(reason))
            }
            Step::Walk(position) => {
                state.player.set_position(position);
                debug!(%position, "player moved");
                ctx.emit(GameEvent::PlayerMoved { position });
                Ok(MoveOutcome::Walked(position))
            }
            Step::Enter { room, direction } => enter_room(state, ctx, room, direction),
        }
    }

    fn post_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let room = state.player.room();
        let position = state.player.position();
        let inside = state
            .map
            .room(room)
            .and_then(|room| room.cell(position))
            .is_some();
        if !inside {
            return Err(MoveError::PositionDesync { room, position });
        }
        Ok(())
    }
}

/// Moves the player into `room` travelling in `direction` and starts an
/// encounter with its first enemy, if any.
pub(crate) fn enter_room(
    state: &mut GameState,
    ctx: &mut ActionContext<'_>,
    room: RoomId,
    direction: CardinalDirection,
) -> Result<MoveOutcome, MoveError> {
    let target = state.map.room(room).ok_or(MoveError::UnknownRoom(room))?;
    let position = target.entry_point(direction);
    let name = target.name().to_owned();
    let first_enemy = target.enemies().first().map(|enemy| enemy.name().to_owned());

    state.player.relocate(room, position);
    info!(%room, room_name = %name, %direction, %position, "entered room");
    ctx.emit(GameEvent::RoomEntered {
        room,
        name,
        direction,
    });

    let encounter = first_enemy.is_some();
    if let Some(enemy) = first_enemy {
        state.phase = GamePhase::Encounter { room };
        info!(%room, %enemy, "encounter started");
        ctx.emit(GameEvent::EncounterStarted { room, enemy });
    }

    Ok(MoveOutcome::Entered {
        room,
        position,
        encounter,
    })
}
