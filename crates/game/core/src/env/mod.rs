//! Static world data and the random source.
//!
//! Layouts and enemy templates describe the castle before it is built; the
//! [`RngOracle`] supplies every random decision the rules make.
mod actors;
mod map;
mod rng;

pub use actors::{EnemyTemplate, EnemyTemplateBuilder};
pub use map::{CastleLayout, EntranceSpec, RoomSpec, ShortcutSpec};
pub use rng::{PcgRng, RngOracle, ScriptedRng};
