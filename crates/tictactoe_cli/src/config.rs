//! Persisted player settings.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tictactoe_engine::Difficulty;
use tracing::{debug, info, instrument};

/// Default config file name, relative to the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "tictactoe_config.toml";

/// Player name and preferred difficulty, stored as TOML.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Name shown in prompts and results.
    #[serde(default = "default_player_name")]
    player_name: String,

    /// Opponent tier for new sessions.
    #[serde(default)]
    difficulty: Difficulty,
}

fn default_player_name() -> String {
    "Player".to_string()
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            player_name: default_player_name(),
            difficulty: Difficulty::default(),
        }
    }
}

impl PlayerConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(player = %config.player_name, difficulty = %config.difficulty, "Config loaded");
        Ok(config)
    }

    /// Loads the file at `path`, writing the defaults there first if it
    /// does not exist.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            return Self::from_file(path);
        }
        info!("No config file, writing defaults");
        let config = Self::default();
        config.save(path)?;
        Ok(config)
    }

    /// Writes configuration as TOML.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::new(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path.as_ref(), content)
            .map_err(|e| ConfigError::new(format!("Failed to write config file: {}", e)))?;
        debug!("Config saved");
        Ok(())
    }

    /// Sets the player name. Surrounding whitespace is dropped.
    ///
    /// # Errors
    ///
    /// Rejects names that are empty after trimming.
    #[instrument(skip(self))]
    pub fn set_player_name(&mut self, name: &str) -> Result<(), ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::new("Player name cannot be empty".to_string()));
        }
        self.player_name = name.to_string();
        Ok(())
    }

    /// Sets the preferred difficulty.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: PlayerConfig = toml::from_str("").expect("empty table");
        assert_eq!(config, PlayerConfig::default());
        assert_eq!(config.player_name(), "Player");
        assert_eq!(*config.difficulty(), Difficulty::Medium);
    }

    #[test]
    fn test_parses_lowercase_difficulty() {
        let config: PlayerConfig =
            toml::from_str("player_name = \"Ada\"\ndifficulty = \"hard\"\n").expect("valid toml");
        assert_eq!(config.player_name(), "Ada");
        assert_eq!(*config.difficulty(), Difficulty::Hard);
    }

    #[test]
    fn test_rejects_unknown_difficulty() {
        let result: Result<PlayerConfig, _> = toml::from_str("difficulty = \"nightmare\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut config = PlayerConfig::default();
        assert!(config.set_player_name("   ").is_err());
        assert_eq!(config.player_name(), "Player");
        config.set_player_name("  Grace ").expect("non-empty name");
        assert_eq!(config.player_name(), "Grace");
    }
}
