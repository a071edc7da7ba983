//! Item catalog loader.

use std::path::Path;

use castle_core::{Item, KeyEffect, Weapon};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCatalog {
    /// Weapon the player starts with equipped.
    #[serde(default)]
    pub starting_weapon: Option<Weapon>,

    /// Items scattered across the castle at game start.
    pub items: Vec<Item>,
}

impl ItemCatalog {
    /// Whether some item can open the way to the boss room.
    pub fn has_boss_key(&self) -> bool {
        self.items.iter().any(|item| {
            matches!(item, Item::Key(key) if key.effect() == Some(KeyEffect::UnlockBossRoom))
        })
    }
}

/// Loader for item catalog from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load item catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing ItemCatalog
    pub fn load(path: &Path) -> LoadResult<ItemCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<ItemCatalog> {
        let catalog: ItemCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;

        Ok(catalog)
    }
}
