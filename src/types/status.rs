use serde::{Deserialize, Serialize};
use std::fmt;

/// Anchoring state of an item's timestamp proof.
///
/// `None` means the item was saved locally without a proof. `Pending` means a
/// proof was obtained from the timestamping service but has not yet been
/// confirmed. `Confirmed` means a later verification pass upgraded the proof.
///
/// An item holds a proof blob if and only if its status is not `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofStatus {
    /// No proof attached; the item exists only locally
    None,
    /// Proof obtained, awaiting confirmation by the timestamping network
    Pending,
    /// Proof confirmed and upgraded
    Confirmed,
}

impl Default for ProofStatus {
    fn default() -> Self {
        Self::None
    }
}

impl fmt::Display for ProofStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Pending => write!(f, "pending"),
            Self::Confirmed => write!(f, "confirmed"),
        }
    }
}

/// Severity class for a transient status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Operation completed as requested
    Success,
    /// Neutral information
    Info,
    /// Operation failed or degraded
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Error => write!(f, "error"),
        }
    }
}
