//! # Warehouse Configuration
//!
//! Where the store keeps its file and how often it scans for expired food.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     WAREHOUSE_DATA_PATH=/srv/stock/warehouse.json                      │
//! │     WAREHOUSE_SCAN_INTERVAL_SECS=30                                    │
//! │     WAREHOUSE_MONITOR=off                                              │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/warehouse-master/warehouse.toml (Linux)                  │
//! │     ~/Library/Application Support/com.warehouse.master/... (macOS)     │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     ./warehouse.json, pretty output, scan every 30 s                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # warehouse.toml
//! [storage]
//! data_path = "warehouse.json"
//! pretty = true
//!
//! [monitor]
//! enabled = true
//! interval_secs = 30
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ConfigError, ConfigResult};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "warehouse.toml";

// =============================================================================
// Storage Settings
// =============================================================================

/// Persisted file settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageSettings {
    /// Path of the JSON document holding the whole collection.
    #[serde(default = "default_data_path")]
    pub data_path: PathBuf,

    /// Indent the JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

fn default_data_path() -> PathBuf {
    PathBuf::from("warehouse.json")
}

fn default_true() -> bool {
    true
}

impl Default for StorageSettings {
    fn default() -> Self {
        StorageSettings {
            data_path: default_data_path(),
            pretty: true,
        }
    }
}

// =============================================================================
// Monitor Settings
// =============================================================================

/// Expiration monitor settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorSettings {
    /// Run the background scan at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between scans. The first scan runs at startup.
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
}

fn default_interval() -> u64 {
    30
}

impl Default for MonitorSettings {
    fn default() -> Self {
        MonitorSettings {
            enabled: true,
            interval_secs: default_interval(),
        }
    }
}

// =============================================================================
// Warehouse Config
// =============================================================================

/// Complete store configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WarehouseConfig {
    #[serde(default)]
    pub storage: StorageSettings,

    #[serde(default)]
    pub monitor: MonitorSettings,
}

impl WarehouseConfig {
    /// Defaults with a different data file.
    pub fn with_data_path(path: impl Into<PathBuf>) -> Self {
        let mut config = Self::default();
        config.storage.data_path = path.into();
        config
    }

    /// Loads configuration: defaults, then file, then environment.
    ///
    /// A missing file is not an error.
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(path = %path.display(), "Loading warehouse config from file");
                let contents = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Io { path, source })?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(path = %path.display(), "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns defaults if loading fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load warehouse config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, config_path: Option<PathBuf>) -> ConfigResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or(ConfigError::NoConfigPath)?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;

        info!(path = %path.display(), "Warehouse config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.storage.data_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("data_path must not be empty".into()));
        }

        if self.monitor.interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "interval_secs must be greater than 0".into(),
            ));
        }

        Ok(())
    }

    /// Applies `WAREHOUSE_*` overrides read through `lookup`.
    ///
    /// Unparsable values are logged and ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("WAREHOUSE_DATA_PATH") {
            debug!(path = %path, "Overriding data path from environment");
            self.storage.data_path = PathBuf::from(path);
        }

        if let Some(secs) = lookup("WAREHOUSE_SCAN_INTERVAL_SECS") {
            match secs.trim().parse::<u64>() {
                Ok(secs) => self.monitor.interval_secs = secs,
                Err(_) => warn!(value = %secs, "Ignoring invalid WAREHOUSE_SCAN_INTERVAL_SECS"),
            }
        }

        if let Some(flag) = lookup("WAREHOUSE_MONITOR") {
            match parse_switch(&flag) {
                Some(enabled) => {
                    debug!(enabled, "Overriding monitor switch from environment");
                    self.monitor.enabled = enabled;
                }
                None => warn!(value = %flag, "Ignoring invalid WAREHOUSE_MONITOR"),
            }
        }
    }

    /// `warehouse.toml` in the platform config directory.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "warehouse", "master")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    pub fn data_path(&self) -> &Path {
        &self.storage.data_path
    }

    pub fn scan_interval(&self) -> Duration {
        Duration::from_secs(self.monitor.interval_secs)
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "on" | "yes" | "enabled" => Some(true),
        "0" | "false" | "off" | "no" | "disabled" => Some(false),
        _ => None,
    }
}

// =============================================================================
// Tests
// =============================================================================
