//! Error types for the dso-notary vault
//!
//! This module defines the error types used throughout the vault. The main
//! error type is `NotaryError`, which covers every failure a store, anchoring
//! or configuration operation can surface.
//!
//! The failure policy is deliberately mild: a malformed import payload aborts
//! the import, a timestamping-service failure degrades the save to local-only,
//! and an unparseable persisted partition is treated as empty by the storage
//! layer rather than reported here.

use thiserror::Error;

/// Main error type for the dso-notary vault
#[derive(Error, Debug)]
pub enum NotaryError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error (JSON): {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// Import payload was not a well-formed sequence of items
    #[error("Malformed import payload: {0}")]
    Format(String),

    /// Timestamping service rejected or failed a submission
    #[error("Timestamp anchoring failed: {0}")]
    Anchoring(String),

    /// Storage operation failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for operations that can fail with a [NotaryError]
pub type Result<T> = std::result::Result<T, NotaryError>;

impl NotaryError {
    /// Create a new error with a string message
    pub fn new<S: Into<String>>(msg: S) -> Self {
        NotaryError::InvalidInput(msg.into())
    }

    /// Create a new malformed-payload error
    pub fn format<S: Into<String>>(msg: S) -> Self {
        NotaryError::Format(msg.into())
    }

    /// Create a new anchoring error
    pub fn anchoring<S: Into<String>>(msg: S) -> Self {
        NotaryError::Anchoring(msg.into())
    }

    /// Create a new storage error
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        NotaryError::Storage(msg.into())
    }

    /// Create a new not found error
    pub fn not_found<S: Into<String>>(what: S) -> Self {
        NotaryError::NotFound(what.into())
    }

    /// Create a new invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        NotaryError::InvalidInput(msg.into())
    }
}

// Implement From for common error types
impl From<&str> for NotaryError {
    fn from(s: &str) -> Self {
        NotaryError::new(s)
    }
}

impl From<String> for NotaryError {
    fn from(s: String) -> Self {
        NotaryError::new(s)
    }
}

impl From<tokio::task::JoinError> for NotaryError {
    fn from(err: tokio::task::JoinError) -> Self {
        NotaryError::new(format!("Async task error: {}", err))
    }
}
