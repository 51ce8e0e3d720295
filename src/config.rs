//! Engine configuration.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Settings for the `cots` driver.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct EngineConfig {
    /// SQLite database file.
    #[serde(default = "default_database_path")]
    database_path: String,

    /// Tracing filter used when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    log_filter: String,

    /// Seed for color draws. Unset draws from OS entropy.
    #[serde(default)]
    color_seed: Option<u64>,
}

fn default_database_path() -> String {
    "command_of_the_sea.db".to_string()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_filter: default_log_filter(),
            color_seed: None,
        }
    }
}

impl EngineConfig {
    /// Loads configuration from a TOML file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;

        info!(database_path = %config.database_path, "Config loaded successfully");
        Ok(config)
    }

    /// Replaces the database path.
    pub fn with_database_path(mut self, database_path: impl Into<String>) -> Self {
        self.database_path = database_path.into();
        self
    }

    /// Replaces the color seed.
    pub fn with_color_seed(mut self, color_seed: Option<u64>) -> Self {
        self.color_seed = color_seed;
        self
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
    fn test_partial_file_takes_defaults() {
        let config: EngineConfig = toml::from_str("color_seed = 9\n").unwrap();
        assert_eq!(config.database_path(), "command_of_the_sea.db");
        assert_eq!(config.log_filter(), "info");
        assert_eq!(*config.color_seed(), Some(9));
    }

    #[test]
    fn test_from_file_reads_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cots.toml");
        std::fs::write(&path, "database_path = \"games.db\"\nlog_filter = \"debug\"\n").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.database_path(), "games.db");
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(*config.color_seed(), None);
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = EngineConfig::from_file("/nonexistent/cots.toml").unwrap_err();
        assert!(err.message.starts_with("Failed to read config file"));
    }

    #[test]
    fn test_overrides() {
        let config = EngineConfig::default()
            .with_database_path("other.db")
            .with_color_seed(Some(3));
        assert_eq!(config.database_path(), "other.db");
        assert_eq!(*config.color_seed(), Some(3));
    }
}
