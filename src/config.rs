//! Configuration management for chatsweep
//!
//! This module handles loading, parsing, validating, and managing
//! configuration from files and CLI overrides.

use crate::error::{Result, SweepError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure for chatsweep
///
/// This structure holds all configuration needed for scanning and
/// deleting, including store location, timeouts, and delete behavior.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Chat store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Delete behavior configuration
    #[serde(default)]
    pub delete: DeleteConfig,
}

/// Chat store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path to the store database; `None` uses the default data directory
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Timeout for any single store operation (seconds)
    #[serde(default = "default_store_timeout")]
    pub timeout_seconds: u64,
}

fn default_store_timeout() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: None,
            timeout_seconds: default_store_timeout(),
        }
    }
}

/// Delete behavior configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteConfig {
    /// What to do with a message left with no content parts after an
    /// attachment delete
    #[serde(default)]
    pub empty_message: EmptyMessagePolicy,
}

/// Policy for a message whose content becomes empty after a delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmptyMessagePolicy {
    /// Keep the message with an empty content array
    #[default]
    Keep,
    /// Remove the whole message from the record
    Remove,
}

impl Config {
    /// Load configuration from a file with CLI overrides applied
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Config`] when the file exists but cannot be
    /// read or parsed.
    pub fn load(path: &str, cli: &crate::cli::Cli) -> Result<Self> {
        let mut config = if Path::new(path).exists() {
            Self::from_file(path)?
        } else {
            tracing::debug!("Config file not found at {}, using defaults", path);
            Self::default()
        };

        config.apply_cli_overrides(cli);

        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| SweepError::Config(format!("Failed to read config file: {}", e)))?;
        serde_yaml::from_str(&contents)
            .map_err(|e| SweepError::Config(format!("Failed to parse config: {}", e)))
    }

    fn apply_cli_overrides(&mut self, cli: &crate::cli::Cli) {
        if let Some(store) = &cli.store {
            self.store.path = Some(store.clone());
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns [`SweepError::Config`] describing the first invalid value.
    pub fn validate(&self) -> Result<()> {
        if self.store.timeout_seconds == 0 {
            return Err(SweepError::Config(
                "store timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.store.timeout_seconds > 600 {
            return Err(SweepError::Config(
                "store timeout_seconds must be less than or equal to 600".to_string(),
            ));
        }

        Ok(())
    }
}
