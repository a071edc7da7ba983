//! Enemy catalog loader.
//!
//! Loads enemy templates from RON files. Each regular template may spawn
//! several times; the single boss template guards the boss room.

use std::path::Path;

use castle_core::EnemyTemplate;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

fn one() -> u32 {
    1
}

/// One catalog row: a template and how many copies roam the castle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyEntry {
    pub template: EnemyTemplate,

    #[serde(default = "one")]
    pub count: u32,
}

/// Enemy catalog structure for RON files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyCatalog {
    pub enemies: Vec<EnemyEntry>,
}

impl EnemyCatalog {
    /// The boss template, if the catalog declares exactly one.
    pub fn boss(&self) -> LoadResult<&EnemyTemplate> {
        let mut bosses = self
            .enemies
            .iter()
            .map(|entry| &entry.template)
            .filter(|template| template.boss);
        let boss = bosses
            .next()
            .ok_or_else(|| anyhow::anyhow!("Enemy catalog has no boss template"))?;
        if let Some(extra) = bosses.next() {
            anyhow::bail!(
                "Enemy catalog declares more than one boss: '{}' and '{}'",
                boss.name,
                extra.name
            );
        }
        Ok(boss)
    }

    /// Regular templates, repeated by their spawn count.
    pub fn roaming(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.enemies
            .iter()
            .filter(|entry| !entry.template.boss)
            .flat_map(|entry| std::iter::repeat_n(&entry.template, entry.count as usize))
    }
}

/// Loader for enemy catalog from RON files.
pub struct EnemyLoader;

impl EnemyLoader {
    /// Load enemy catalog from a RON file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the RON file containing EnemyCatalog
    pub fn load(path: &Path) -> LoadResult<EnemyCatalog> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<EnemyCatalog> {
        let catalog: EnemyCatalog = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse enemy catalog RON: {}", e))?;

        for entry in &catalog.enemies {
            if entry.template.health == 0 {
                anyhow::bail!("Enemy '{}' must start with health", entry.template.name);
            }
        }

        Ok(catalog)
    }
}
