//! Game configuration loader.

use std::path::Path;

use castle_core::GameConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for game configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the TOML file containing GameConfig
    pub fn load(path: &Path) -> LoadResult<GameConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parse and validate config TOML. Missing keys take their defaults.
    pub fn parse(content: &str) -> LoadResult<GameConfig> {
        let config: GameConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        config
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid game config: {}", e))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = ConfigLoader::parse("retreat_heal = 25\n").unwrap();
        assert_eq!(config.retreat_heal, 25);
        assert_eq!(config.room_size, GameConfig::DEFAULT_ROOM_SIZE);
        assert_eq!(config.player_health, GameConfig::DEFAULT_PLAYER_HEALTH);
    }

    #[test]
    fn even_room_size_is_rejected() {
        let err = ConfigLoader::parse("room_size = 6\n").unwrap_err();
        assert!(err.to_string().starts_with("Invalid game config"));
    }
}
