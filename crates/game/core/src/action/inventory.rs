//! Using the cursored item of an inventory.
//!
//! The inventory's [`UseHandler`] decides what "use" means: a room floor
//! hands the item to the player, the player's pack equips, drinks or turns it.

use tracing::{info, warn};

use crate::action::combat::{KnockOut, knock_out};
use crate::action::{ActionContext, ActionTransition};
use crate::engine::GameEvent;
use crate::error::{ErrorSeverity, GameError};
use crate::state::{
    BossUnlock, GameState, Inventory, InventoryError, Item, ItemUse, KeyEffect, RoomId, UseHandler,
};

/// Which inventory an item is used from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryOwner {
    /// The player's own pack.
    Player,
    /// The floor of the room the player stands in.
    Room,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseItemError {
    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error("{0} is not in the castle")]
    UnknownRoom(RoomId),
}

impl GameError for UseItemError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Inventory(err) => err.severity(),
            Self::UnknownRoom(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Inventory(err) => err.error_code(),
            Self::UnknownRoom(_) => "USE_ITEM_UNKNOWN_ROOM",
        }
    }
}

/// What using an item did.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UseOutcome {
    /// Moved from a room floor into the player's pack.
    PickedUp { name: String },
    /// Applied by the player.
    Activated {
        effect: ItemUse,
        /// Set when a key opened the way to the boss room.
        unlocked: Option<BossUnlock>,
        /// Set when a potion dropped the player to 0 health.
        knock_out: Option<KnockOut>,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UseItemAction {
    pub owner: InventoryOwner,
    /// Display cursor; an out-of-range cursor selects the first item.
    pub cursor: usize,
}

impl UseItemAction {
    pub fn new(owner: InventoryOwner, cursor: usize) -> Self {
        Self { owner, cursor }
    }

    fn inventory<'s>(&self, state: &'s GameState) -> Result<&'s Inventory, UseItemError> {
        match self.owner {
            InventoryOwner::Player => Ok(state.player.combatant().inventory()),
            InventoryOwner::Room => {
                let here = state.player.room();
                state
                    .map
                    .room(here)
                    .map(|room| room.inventory())
                    .ok_or(UseItemError::UnknownRoom(here))
            }
        }
    }

    fn inventory_mut<'s>(
        &self,
        state: &'s mut GameState,
    ) -> Result<&'s mut Inventory, UseItemError> {
        match self.owner {
            InventoryOwner::Player => Ok(state.player.combatant_mut().inventory_mut()),
            InventoryOwner::Room => {
                let here = state.player.room();
                state
                    .map
                    .room_mut(here)
                    .map(|room| room.inventory_mut())
                    .ok_or(UseItemError::UnknownRoom(here))
            }
        }
    }
}

impl ActionTransition for UseItemAction {
    type Error = UseItemError;
    type Result = UseOutcome;

    fn pre_validate(&self, state: &GameState) -> Result<(), Self::Error> {
        let inventory = self.inventory(state)?;
        if inventory.handler().is_none() {
            return Err(InventoryError::NoHandler.into());
        }
        if inventory.is_empty() {
            return Err(InventoryError::Empty.into());
        }
        Ok(())
    }

    fn apply(
        &self,
        state: &mut GameState,
        ctx: &mut ActionContext<'_>,
    ) -> Result<Self::Result, Self::Error> {
        let inventory = self.inventory_mut(state)?;
        let handler = inventory.handler().ok_or(InventoryError::NoHandler)?;
        let item = inventory.take_current(self.cursor)?;

        match handler {
            UseHandler::PickUp => Ok(pick_up(state, ctx, item)),
            UseHandler::Activate => Ok(activate(state, ctx, item)),
        }
    }
}

fn pick_up(state: &mut GameState, ctx: &mut ActionContext<'_>, item: Item) -> UseOutcome {
    let name = item.name().to_owned();
    state.player.combatant_mut().inventory_mut().add(item);

    info!(item = %name, "picked up item");
    ctx.emit(GameEvent::ItemPickedUp { name: name.clone() });
    UseOutcome::PickedUp { name }
}

fn activate(state: &mut GameState, ctx: &mut ActionContext<'_>, item: Item) -> UseOutcome {
    let effect = state.player.use_item(item);
    info!(?effect, "item used");
    ctx.emit(GameEvent::ItemUsed(effect.clone()));

    let mut unlocked = None;
    let mut knocked_out = None;
    match &effect {
        ItemUse::TurnedKey {
            effect: Some(KeyEffect::UnlockBossRoom),
            ..
        } => match state.map.unlock_boss_room(ctx.rng()) {
            Ok(unlock) => {
                info!(room = %unlock.room, direction = %unlock.direction, "boss room unlocked");
                ctx.emit(GameEvent::BossRoomUnlocked(unlock));
                unlocked = Some(unlock);
            }
            Err(err) => warn!(error = %err, "key turned but the boss room stays shut"),
        },
        ItemUse::DrankPotion { health: 0, .. } => {
            knocked_out = Some(knock_out(state, ctx));
        }
        _ => {}
    }

    UseOutcome::Activated {
        effect,
        unlocked,
        knock_out: knocked_out,
    }
}
