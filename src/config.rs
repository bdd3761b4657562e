//! Daemon configuration loaded from `~/.listings/config.toml`.
//!
//! The file is optional; if it does not exist every field falls back to its
//! `Default` value. Code table overrides are deploy-time only: they are read
//! once at startup and never change while the daemon runs.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::code::{CodeError, CodeTables};
use crate::storage::{DATABASE_FILENAME, DEFAULT_STORE_TIMEOUT};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config TOML: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid store timeout '{value}': {source}")]
    Timeout {
        value: String,
        source: humantime::DurationError,
    },

    #[error("Invalid code table: {0}")]
    Codes(#[from] CodeError),
}

// ---------------------------------------------------------------------------
// Schema
// ---------------------------------------------------------------------------

/// `[store]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    /// Per-operation timeout, humantime syntax (`"5s"`, `"750ms"`).
    pub timeout: String,
    /// Database filename, relative to the data directory.
    pub file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            timeout: humantime::format_duration(DEFAULT_STORE_TIMEOUT).to_string(),
            file: DATABASE_FILENAME.to_string(),
        }
    }
}

/// `[codes]` table: extra or replacement mappings on top of the built-in
/// location and type codes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct CodesConfig {
    pub locations: BTreeMap<String, String>,
    pub types: BTreeMap<String, String>,
}

/// Top-level daemon configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct DaemonConfig {
    pub store: StoreConfig,
    pub codes: CodesConfig,
}

impl DaemonConfig {
    /// Parse the store timeout.
    pub fn store_timeout(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(self.store.timeout.trim()).map_err(|source| {
            ConfigError::Timeout {
                value: self.store.timeout.clone(),
                source,
            }
        })
    }

    /// Build the code tables: defaults merged with `[codes]`.
    pub fn code_tables(&self) -> Result<CodeTables, ConfigError> {
        Ok(CodeTables::with_overrides(
            &self.codes.locations,
            &self.codes.types,
        )?)
    }

    /// Resolve the database file under `data_dir`.
    #[must_use]
    pub fn database_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.store.file)
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Root directory for user-scoped daemon state (`~/.listings`).
#[must_use]
pub fn listings_home() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".listings")
}

/// Default config file location (`~/.listings/config.toml`).
#[must_use]
pub fn default_config_path() -> PathBuf {
    listings_home().join("config.toml")
}

/// Default data directory (`~/.listings/data`).
#[must_use]
pub fn default_data_dir() -> PathBuf {
    listings_home().join("data")
}

/// Load the daemon configuration from `path`.
///
/// Returns `Ok(DaemonConfig::default())` if the file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config(path: &Path) -> Result<DaemonConfig, ConfigError> {
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(DaemonConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: DaemonConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
