//! Daemon configuration loaded from `~/.inventory/config.toml`.
//!
//! The file is optional; when it does not exist every field falls back to its
//! `Default` value. Command-line flags override anything set here.

mod loader;

pub use loader::{load_config, parse_config};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Default bound on a single `nextValue` call, in milliseconds.
pub const DEFAULT_SEQUENCE_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Storage settings (`[storage]` table in the TOML file).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Root of the document store (default: `~/.inventory/data`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Timeout for one sequence increment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sequence_timeout_ms: Option<u64>,
}

/// Top-level daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct DaemonConfig {
    #[serde(default)]
    pub storage: StorageConfig,
}

impl DaemonConfig {
    /// The configured sequence timeout, or the default.
    #[must_use]
    pub fn sequence_timeout(&self) -> Duration {
        Duration::from_millis(
            self.storage
                .sequence_timeout_ms
                .unwrap_or(DEFAULT_SEQUENCE_TIMEOUT_MS),
        )
    }
}

/// Canonical location of the config file (`~/.inventory/config.toml`).
#[must_use]
pub fn default_config_path() -> PathBuf {
    crate::utils::get_inventory_home().join("config.toml")
}

#[cfg(test)]
#[path = "../config_tests.rs"]
mod config_tests;
