//! Content factory for building games from data files.

use std::path::{Path, PathBuf};

use castle_core::{
    CastleLayout, Combatant, Enemy, GameConfig, GameEngine, GameState, Map, RngOracle,
};
use tracing::{debug, info};

use crate::loaders::{
    ConfigLoader, EnemyCatalog, EnemyLoader, ItemCatalog, ItemLoader, LoadResult, MapLoader,
};

const BUILTIN_CONFIG: &str = include_str!("../../data/config.toml");
const BUILTIN_CASTLE: &str = include_str!("../../data/castle.ron");
const BUILTIN_ITEMS: &str = include_str!("../../data/items.ron");
const BUILTIN_ENEMIES: &str = include_str!("../../data/enemies.ron");

/// Everything needed to start a game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub config: GameConfig,
    pub layout: CastleLayout,
    pub items: ItemCatalog,
    pub enemies: EnemyCatalog,
}

impl Content {
    /// Checks the references the castle cannot be won without: a key that
    /// unlocks the boss room and exactly one boss.
    pub fn validate(&self) -> LoadResult<()> {
        self.config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid game config: {}", e))?;
        if !self.items.has_boss_key() {
            anyhow::bail!("Item catalog has no key that unlocks the boss room");
        }
        self.enemies.boss()?;
        Ok(())
    }

    /// Builds the castle, equips the hero, puts the boss in its room, and
    /// scatters items and roaming enemies at random.
    pub fn new_game(&self, hero: &str, rng: &mut dyn RngOracle) -> LoadResult<GameState> {
        self.validate()?;

        let map = Map::from_layout(&self.layout, self.config.room_size)
            .map_err(|e| anyhow::anyhow!("Failed to build castle map: {}", e))?;

        let mut combatant = Combatant::new(hero, self.config.player_health);
        if let Some(weapon) = &self.items.starting_weapon {
            combatant = combatant.with_weapon(weapon.clone());
        }
        let mut state = GameState::new(self.config.clone(), map, combatant);

        let boss = Enemy::from_template(self.enemies.boss()?);
        let boss_room = state.map.boss_room();
        debug!(room = %boss_room, boss = boss.name(), "boss placed");
        if let Some(room) = state.map.room_mut(boss_room) {
            room.add_enemy(boss);
        }

        let mut engine = GameEngine::new(&mut state);
        for item in &self.items.items {
            engine.add_item_to_random_room(rng, item.clone())?;
        }
        for template in self.enemies.roaming() {
            engine.add_enemy_to_random_room(rng, Enemy::from_template(template))?;
        }

        info!(
            hero,
            rooms = state.map.len(),
            items = self.items.items.len(),
            "castle ready"
        );
        Ok(state)
    }
}

/// Content factory that loads all game content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// ├── castle.ron
/// ├── items.ron
/// └── enemies.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    /// Creates a new content factory pointing to a data directory.
    ///
    /// # Arguments
    ///
    /// * `data_dir` - Path to the directory containing data files
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// The Dracula's Castle content compiled into this crate.
    pub fn builtin() -> LoadResult<Content> {
        let content = Content {
            config: ConfigLoader::parse(BUILTIN_CONFIG)?,
            layout: MapLoader::parse(BUILTIN_CASTLE)?,
            items: ItemLoader::parse(BUILTIN_ITEMS)?,
            enemies: EnemyLoader::parse(BUILTIN_ENEMIES)?,
        };
        content.validate()?;
        Ok(content)
    }

    /// Loads and validates every file of the data directory.
    pub fn load(&self) -> LoadResult<Content> {
        let content = Content {
            config: self.load_config()?,
            layout: self.load_layout()?,
            items: self.load_items()?,
            enemies: self.load_enemies()?,
        };
        content.validate()?;
        info!(data_dir = %self.data_dir.display(), "content loaded");
        Ok(content)
    }

    /// Load game configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<GameConfig> {
        let path = self.data_dir.join("config.toml");
        ConfigLoader::load(&path)
    }

    /// Load the castle layout from `castle.ron`.
    pub fn load_layout(&self) -> LoadResult<CastleLayout> {
        let path = self.data_dir.join("castle.ron");
        MapLoader::load(&path)
    }

    /// Load item catalog from `items.ron`.
    pub fn load_items(&self) -> LoadResult<ItemCatalog> {
        let path = self.data_dir.join("items.ron");
        ItemLoader::load(&path)
    }

    /// Load enemy catalog from `enemies.ron`.
    pub fn load_enemies(&self) -> LoadResult<EnemyCatalog> {
        let path = self.data_dir.join("enemies.ron");
        EnemyLoader::load(&path)
    }

    /// Returns the data directory path.
    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
    }

    #[test]
    fn builtin_content_is_consistent() {
        let content = ContentFactory::builtin().unwrap();
        assert_eq!(content.enemies.boss().unwrap().name, "Count Dracula");
        assert!(content.items.has_boss_key());
        assert_eq!(content.layout.room_count(), 8);
    }

    #[test]
    fn missing_boss_key_fails_validation() {
        let mut content = ContentFactory::builtin().unwrap();
        content
            .items
            .items
            .retain(|item| !matches!(item, castle_core::Item::Key(_)));
        let err = content.validate().unwrap_err();
        assert!(err.to_string().contains("boss room"));
    }
}
