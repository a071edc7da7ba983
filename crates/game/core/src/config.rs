use crate::error::{ErrorSeverity, GameError};

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GameConfig {
    /// Side length of every room's local grid. Must be odd and at least 3 so
    /// the grid has a centre cell and a walkable ring inside the walls.
    pub room_size: usize,

    /// Health the player starts with.
    pub player_health: u32,

    /// Health restored when the player is knocked out outside the boss room.
    pub retreat_heal: u32,
}

impl GameConfig {
    pub const MIN_ROOM_SIZE: usize = 3;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_ROOM_SIZE: usize = 7;
    pub const DEFAULT_PLAYER_HEALTH: u32 = 100;
    pub const DEFAULT_RETREAT_HEAL: u32 = 10;

    pub fn new() -> Self {
        Self {
            room_size: Self::DEFAULT_ROOM_SIZE,
            player_health: Self::DEFAULT_PLAYER_HEALTH,
            retreat_heal: Self::DEFAULT_RETREAT_HEAL,
        }
    }

    pub fn with_room_size(mut self, room_size: usize) -> Self {
        self.room_size = room_size;
        self
    }

    pub fn with_player_health(mut self, player_health: u32) -> Self {
        self.player_health = player_health;
        self
    }

    pub fn with_retreat_heal(mut self, retreat_heal: u32) -> Self {
        self.retreat_heal = retreat_heal;
        self
    }

    /// Checks the invariants the room and combat code rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_size < Self::MIN_ROOM_SIZE || self.room_size % 2 == 0 {
            return Err(ConfigError::InvalidRoomSize(self.room_size));
        }
        if self.player_health == 0 {
            return Err(ConfigError::ZeroPlayerHealth);
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors raised by [`GameConfig::validate`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("room size {0} must be odd and at least 3")]
    InvalidRoomSize(usize),

    #[error("player must start with more than 0 health")]
    ZeroPlayerHealth,
}

impl GameError for ConfigError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRoomSize(_) => "CONFIG_INVALID_ROOM_SIZE",
            Self::ZeroPlayerHealth => "CONFIG_ZERO_PLAYER_HEALTH",
        }
    }
}
