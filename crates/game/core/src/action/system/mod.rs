//! System-level actions that set up or alter the castle.
//!
//! System actions are not initiated by the player. They include:
//!
//! - Dropping an item into a random room
//! - Spawning an enemy in a random room
//! - Opening a way into the boss room
//!
//! All system actions implement [`ActionTransition`](crate::action::ActionTransition)
//! and follow the same three-phase pipeline as player commands.

mod placement;
mod unlock;

pub use placement::{PlaceEnemyAction, PlaceItemAction, PlacementError};
pub use unlock::UnlockBossRoomAction;
