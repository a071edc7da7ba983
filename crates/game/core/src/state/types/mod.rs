pub mod actor;
pub mod common;
pub mod inventory;
pub mod item;
pub mod map;
pub mod room;

// Re-export character types
pub use actor::{Combatant, Enemy, ItemUse, Player, Waypoint};

// Re-export common types
pub use common::{CardinalDirection, GridPos, LocalPos, RoomId};

// Re-export inventory types
pub use inventory::{Inventory, InventoryError, UseHandler};

// Re-export item types
pub use item::{Armor, Item, ItemError, ItemKind, Key, KeyEffect, Potion, Weapon};

// Re-export map types
pub use map::{BossUnlock, Map, MapError, UnlockError};

// Re-export room types
pub use room::{BlockReason, Cell, Entrance, LocalGrid, Room, RoomError, Step};
