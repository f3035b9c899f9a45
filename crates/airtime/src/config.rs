//! Configuration management for airtime.
//!
//! This module provides configuration loading and validation using figment,
//! supporting an optional TOML config file, environment variables, and
//! defaults. The defaults describe the stock behavior; nothing needs to be
//! configured to run airtime.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::flight::DEFAULT_DUMMY_THRESHOLD;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const CONFIG_DIR_NAME: &str = "airtime";

/// Prefix of environment variable overrides.
const ENV_PREFIX: &str = "AIRTIME_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `AIRTIME_`, nested with `__`)
/// 2. TOML config file at `~/.config/airtime/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log discovery configuration.
    pub scan: ScanConfig,
    /// Dummy-log detection configuration.
    pub dummy: DummyConfig,
}

/// Log discovery configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// File name suffix of flight logs. Matched case-sensitively and without
    /// requiring a dot, so `flightigc` matches `igc`.
    pub suffix: String,
    /// Also summarize the root directory as a whole after its subdirectories.
    pub include_root: bool,
}

/// Dummy-log detection configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DummyConfig {
    /// Logs strictly smaller than this are reported as possible dummies.
    pub threshold_bytes: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            suffix: "igc".to_string(),
            include_root: true,
        }
    }
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            threshold_bytes: DEFAULT_DUMMY_THRESHOLD,
        }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// A config file that does not exist is skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);
        tracing::debug!(path = %config_file.display(), "loading configuration");

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        Self::from_figment(&figment)
    }

    /// Extract and validate configuration from a prepared figment.
    ///
    /// # Errors
    ///
    /// Returns an error if extraction or validation fails.
    pub fn from_figment(figment: &Figment) -> Result<Self> {
        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.scan.suffix.is_empty() {
            return Err(Error::ConfigValidation {
                message: "scan.suffix must not be empty".to_string(),
            });
        }

        if self.dummy.threshold_bytes == 0 {
            return Err(Error::ConfigValidation {
                message: "dummy.threshold_bytes must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
