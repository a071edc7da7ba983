//! Content loaders for reading game data from files.
//!
//! Every loader offers `load(path)` for files on disk and `parse(str)` for
//! text already in memory, such as the built-in data compiled into the crate.

pub mod actors;
pub mod config;
pub mod factory;
pub mod item;
pub mod map;

pub use actors::{EnemyCatalog, EnemyLoader};
pub use config::ConfigLoader;
pub use factory::{Content, ContentFactory};
pub use item::{ItemCatalog, ItemLoader};
pub use map::MapLoader;

use std::path::Path;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read file {}: {}", path.display(), e))
}
