//! Configuration management for the feature toggle form.
//!
//! This module provides configuration loading with multiple sources:
//! 1. Default values (hardcoded)
//! 2. Configuration file (YAML)
//! 3. Environment variables (override)
//!
//! Environment variables take precedence over config file values,
//! which take precedence over defaults.
//!
//! # Example
//!
//! ```ignore
//! use featctl_server::config::FormConfig;
//!
//! // Load from file with env overrides
//! let config = FormConfig::load("featctl.yaml")?;
//!
//! // Or load from environment only
//! let config = FormConfig::from_env()?;
//! ```

use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use featctl_domain::DEFAULT_BATCH_SIZE;

/// Largest accepted `commands.batch_size`.
pub const MAX_BATCH_SIZE: usize = 10_000;

/// Form configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct FormConfig {
    /// Command generation settings
    #[serde(default)]
    pub commands: CommandSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Command generation settings.
///
/// # Example YAML Configuration
///
/// ```yaml
/// commands:
///   batch_size: 500
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct CommandSettings {
    /// Maximum number of objects per toggle command.
    ///
    /// Environment variable: `FEATCTL_COMMANDS__BATCH_SIZE`
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
}

impl Default for CommandSettings {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
        }
    }
}

fn default_batch_size() -> usize {
    DEFAULT_BATCH_SIZE
}

/// Logging settings.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingSettings {
    /// Log level: "trace", "debug", "info", "warn", "error"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Use JSON format (true for production, false for development)
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ConfigError),

    #[error("configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("invalid configuration: {message}")]
    Invalid { message: String },
}

impl FormConfig {
    /// Load configuration from a YAML file with environment variable overrides.
    ///
    /// Environment variables are prefixed with `FEATCTL_` and use `__` as separator,
    /// e.g. `FEATCTL_COMMANDS__BATCH_SIZE=500` overrides `commands.batch_size`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigLoadError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigLoadError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let config = Config::builder()
            .add_source(Config::try_from(&FormConfig::default())?)
            .add_source(File::from(path).format(FileFormat::Yaml))
            .add_source(
                Environment::with_prefix("FEATCTL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let form_config: FormConfig = config.try_deserialize()?;
        form_config.validate()?;

        Ok(form_config)
    }

    /// Load configuration from environment variables only.
    ///
    /// Uses default values and allows overrides via FEATCTL_ prefixed env vars.
    pub fn from_env() -> Result<Self, ConfigLoadError> {
        let config = Config::builder()
            .add_source(Config::try_from(&FormConfig::default())?)
            .add_source(
                Environment::with_prefix("FEATCTL")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let form_config: FormConfig = config.try_deserialize()?;
        form_config.validate()?;

        Ok(form_config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigLoadError> {
        if !(1..=MAX_BATCH_SIZE).contains(&self.commands.batch_size) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "commands.batch_size must be between 1 and {MAX_BATCH_SIZE}, got: {}",
                    self.commands.batch_size
                ),
            });
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigLoadError::Invalid {
                message: format!(
                    "logging.level must be one of: {:?}, got: {}",
                    valid_levels, self.logging.level
                ),
            });
        }

        Ok(())
    }
}
