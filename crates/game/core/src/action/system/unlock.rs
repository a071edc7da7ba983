use tracing::info;

use crate::action::{ActionContext, ActionTransition};
use crate::engine::GameEvent;
use crate::state::{BossUnlock, GameState, UnlockError};

/// Binds one random unbound entrance outside the boss room to the boss room.
///
/// The same effect fires when the player turns a key carrying
/// [`KeyEffect::UnlockBossRoom`](crate::state::KeyEffect::UnlockBossRoom).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnlockBossRoomAction;

impl ActionTransition for UnlockBossRoomAction {
    type Error = UnlockError;
    type Result = BossUnlock;

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        if state.map.is_boss_unlocked() {
            return Err(UnlockError::AlreadyUnlocked);
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let unlock = state.map.unlock_boss_room(ctx.rng())?;
        info!(room = %unlock.room, direction = %unlock.direction, "boss room unlocked");
        ctx.emit(GameEvent::BossRoomUnlocked(unlock));
        Ok(unlock)
    }
}
