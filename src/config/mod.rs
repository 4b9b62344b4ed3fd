//! Configuration management for the dso-notary vault
//!
//! This module handles loading, validating, and providing access to the
//! application configuration. It supports loading configuration from files,
//! environment variables, and programmatic overrides.

#![deny(missing_docs)]
#![forbid(unsafe_code)]

mod error;

#[cfg(test)]
#[path = "tests/config_mod_tests.rs"]
mod config_mod_tests;

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::types::{LogLevel, StorageType};

/// Re-export the error type
pub use error::ConfigError;

/// The environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "DSO_";

/// The application name used for finding config directories
const APP_NAME: &str = "dso-notary";

/// Main configuration structure for the dso-notary vault.
///
/// This struct holds all configuration options for the application.
/// It can be loaded from a TOML file, environment variables, or created
/// programmatically.
///
/// # Example
///
/// ```no_run
/// use dso_notary::config::Config;
///
/// // Falls back to defaults when the file does not exist.
/// let config = Config::load("path/to/dso-notary.toml").unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Storage configuration
    #[serde(default)]
    pub storage: StorageConfig,

    /// Timestamp-anchoring configuration
    #[serde(default)]
    pub anchoring: AnchoringConfig,

    /// Status message configuration
    #[serde(default)]
    pub status: StatusConfig,

    /// Partition export configuration
    #[serde(default)]
    pub export: ExportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Storage type
    #[serde(rename = "type")]
    pub storage_type: StorageType,
    /// Base path for file storage (ignored for memory storage)
    pub base_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_type: StorageType::File,
            base_path: "./data".to_string(),
        }
    }
}

/// Timestamp-anchoring configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnchoringConfig {
    /// Whether saves may anchor digests to the timestamping service.
    /// When disabled, anchored saves degrade to local-only saves.
    pub enabled: bool,
}

impl Default for AnchoringConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Status message configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// Auto-hide delay for transient status messages, in milliseconds
    pub auto_hide_ms: u64,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self { auto_hide_ms: 5000 }
    }
}

/// Partition export configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Filename prefix for exported partition documents
    /// (`<prefix>-<ISO-date>.json`)
    pub filename_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename_prefix: "dso-items".to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level
    pub level: LogLevel,
    /// Whether to log to console
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: LogLevel::Info,
            console: true,
        }
    }
}

impl Default for Config {
    /// Creates a default configuration with sensible defaults.
    fn default() -> Self {
        Config {
            storage: StorageConfig::default(),
            anchoring: AnchoringConfig::default(),
            status: StatusConfig::default(),
            export: ExportConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Loads the configuration from the specified path.
    ///
    /// A missing file falls back to built-in defaults; environment variables
    /// with the `DSO_` prefix override values from either source, and the
    /// result is validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration file exists but cannot be read
    /// or parsed, or if the resulting configuration is invalid.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        match fs::read_to_string(path) {
            Ok(config_str) => {
                let mut config: Config = toml::from_str(&config_str).map_err(|e| {
                    ConfigError::validation_error(format!("Failed to parse config file: {}", e))
                })?;

                config.apply_env_vars()?;
                config.validate()?;

                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!("Config file not found at {}, using defaults", path.display());
                let mut config = Self::default();
                config.apply_env_vars()?;
                config.validate()?;
                Ok(config)
            }
            Err(e) => Err(ConfigError::file_not_found(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Environment variables should be prefixed with `DSO_` and use `_` as a
    /// separator. For example, to set the log level, use
    /// `DSO_LOGGING_LEVEL=debug`.
    ///
    /// # Errors
    ///
    /// Returns an error if any environment variable cannot be parsed.
    pub fn apply_env_vars(&mut self) -> Result<(), ConfigError> {
        for (key, value) in env::vars() {
            if let Some(stripped) = key.strip_prefix(ENV_PREFIX) {
                if value.trim().is_empty() {
                    continue;
                }

                match stripped.to_lowercase().as_str() {
                    "logging_level" => {
                        self.logging.level = value.parse().map_err(|_| {
                            ConfigError::invalid_value("logging.level", &value, "Invalid log level")
                        })?;
                    }
                    "storage_type" => {
                        self.storage.storage_type = value.parse().map_err(|_| {
                            ConfigError::invalid_value("storage.type", &value, "Invalid storage type")
                        })?;
                    }
                    "storage_base_path" => {
                        self.storage.base_path = value;
                    }
                    "anchoring_enabled" => {
                        self.anchoring.enabled = value.parse().map_err(|_| {
                            ConfigError::invalid_value("anchoring.enabled", &value, "Expected true or false")
                        })?;
                    }
                    "status_auto_hide_ms" => {
                        self.status.auto_hide_ms = value.parse().map_err(|_| {
                            ConfigError::invalid_value("status.auto_hide_ms", &value, "Expected milliseconds")
                        })?;
                    }
                    "export_filename_prefix" => {
                        self.export.filename_prefix = value;
                    }
                    _ => {}
                }
            }
        }

        Ok(())
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.status.auto_hide_ms == 0 {
            return Err(ConfigError::invalid_value(
                "status.auto_hide_ms",
                self.status.auto_hide_ms,
                "Auto-hide delay must be greater than zero",
            ));
        }

        if self.storage.storage_type == StorageType::File && self.storage.base_path.trim().is_empty() {
            return Err(ConfigError::invalid_value(
                "storage.base_path",
                &self.storage.base_path,
                "File storage requires a base path",
            ));
        }

        let prefix = &self.export.filename_prefix;
        if prefix.trim().is_empty() || prefix.contains(['/', '\\']) {
            return Err(ConfigError::invalid_value(
                "export.filename_prefix",
                prefix,
                "Prefix must be non-empty and must not contain path separators",
            ));
        }

        Ok(())
    }

    /// Returns the path to the directory where configuration files should be
    /// stored.
    ///
    /// This is OS-specific:
    /// - Linux: `$HOME/.config/dso-notary`
    /// - macOS: `$HOME/Library/Application Support/org.dso.dso-notary`
    /// - Windows: `%APPDATA%\\dso\\dso-notary`
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("org", "dso", APP_NAME).map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
    }
}
