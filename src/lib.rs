// src/lib.rs

//! # dso-notary
//!
//! A content-notarizing item vault. Caller-supplied item payloads are hashed
//! (SHA-256 over a canonical serialization), optionally anchored to an
//! external timestamping service, and persisted newest-first in named
//! partitions behind pluggable storage backends. Transient status messages
//! report each operation's outcome and clear themselves.
//!
//! The timestamping network is an opaque collaborator behind the
//! [`anchor::TimestampClient`] trait; this crate submits digests and carries
//! proof blobs but never interprets them.
//!
//! ## Example
//!
//! ```no_run
//! use dso_notary::anchor::FixedProofClient;
//! use dso_notary::{Config, Notary};
//! use serde_json::json;
//!
//! # async fn run() -> dso_notary::Result<()> {
//! let config = Config::load("dso-notary.toml")?;
//! let notary = Notary::new(config, FixedProofClient::new(b"proof".to_vec()).shared()).await?;
//!
//! let mut fields = serde_json::Map::new();
//! fields.insert("title".to_string(), json!("First post"));
//! let item = notary.save("posts", fields, true).await?;
//! println!("saved {} with status {}", item.id, item.ots_status);
//! # Ok(())
//! # }
//! ```

pub mod anchor;
pub mod config;
pub mod core;
pub mod error;
pub mod notary;
pub mod session;
pub mod status;
pub mod storage;
pub mod store;
pub mod types;

pub use crate::config::Config;
pub use crate::core::item::Item;
pub use crate::error::{NotaryError, Result};
pub use crate::notary::Notary;
pub use crate::session::SessionGate;
pub use crate::status::StatusReporter;
pub use crate::store::ItemStore;
pub use crate::types::{LogLevel, ProofStatus, Severity, StorageType};

/// Loads configuration and installs the global logger.
///
/// With `config_path` set the file is loaded (falling back to defaults when
/// absent); without it, defaults plus `DSO_`-prefixed environment overrides
/// apply. When the `logging` feature is enabled and console logging is on,
/// the logger is installed at the configured level.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, or `InvalidInput` if a
/// logger was already installed.
pub fn init(config_path: Option<&str>) -> Result<Config> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => {
            let mut config = Config::default();
            config.apply_env_vars()?;
            config.validate()?;
            config
        }
    };

    #[cfg(feature = "logging")]
    if config.logging.console {
        env_logger::Builder::new()
            .filter_level(config.logging.level.to_filter())
            .try_init()
            .map_err(|_| NotaryError::invalid_input("logger already initialized"))?;
    }

    Ok(config)
}
