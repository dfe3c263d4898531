//! Configuration management for farm-ledger.
//!
//! Configuration is layered with figment: serde defaults, then an optional
//! TOML file, then environment variables.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{FarmError, FarmResult};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default data directory name.
const DATA_DIR_NAME: &str = "farm-ledger";

/// Default database file name.
const DATABASE_FILE_NAME: &str = "farm.db";

/// Environment variable prefix.
const ENV_PREFIX: &str = "FARM_LEDGER_";

/// Default ceiling, the usual browser local storage quota.
pub const DEFAULT_CAPACITY_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FARM_LEDGER_`, nested with `__`)
/// 2. TOML config file at `~/.config/farm-ledger/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Vaccination schedule configuration.
    pub schedule: ScheduleConfig,
}

/// Which key-value backend holds the collections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database file.
    #[default]
    Sqlite,
    /// Process memory only; nothing survives a restart.
    Memory,
}

/// Storage-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Backend selection.
    pub backend: StorageBackend,
    /// Path to the database file.
    /// Defaults to `~/.local/share/farm-ledger/farm.db`
    pub database_path: Option<PathBuf>,
    /// Maximum bytes of keys plus values the store may hold.
    /// Set to 0 for unlimited.
    pub capacity_bytes: usize,
    /// Seed each absent collection with example records on open.
    pub seed_examples: bool,
}

/// Vaccination schedule configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Months between a vaccination and its next due date.
    pub vaccination_interval_months: u32,
    /// Days ahead (inclusive) counted as "due this week".
    pub due_window_days: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Sqlite,
            database_path: None, // Resolved at runtime
            capacity_bytes: DEFAULT_CAPACITY_BYTES,
            seed_examples: true,
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            vaccination_interval_months: 3,
            due_window_days: 7,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> FarmResult<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> FarmResult<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(DATA_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Get the default data directory path.
    #[must_use]
    pub fn default_data_dir() -> PathBuf {
        dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from(".local/share"))
            .join(DATA_DIR_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> FarmResult<()> {
        if self.schedule.vaccination_interval_months == 0 {
            return Err(FarmError::ConfigValidation {
                message: "vaccination_interval_months must be greater than 0".to_string(),
            });
        }

        if self.storage.backend == StorageBackend::Memory && self.storage.database_path.is_some()
        {
            return Err(FarmError::ConfigValidation {
                message: "database_path is only meaningful for the sqlite backend".to_string(),
            });
        }

        Ok(())
    }

    /// Get the database path, resolving defaults if not set.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.storage
            .database_path
            .clone()
            .unwrap_or_else(|| Self::default_data_dir().join(DATABASE_FILE_NAME))
    }

    /// Get the capacity ceiling, `None` when unlimited.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        match self.storage.capacity_bytes {
            0 => None,
            bytes => Some(bytes),
        }
    }
}
