// src/anchor/mod.rs

//! The timestamp-anchoring boundary.
//!
//! The timestamping network itself is an opaque collaborator: this crate only
//! submits a 32-byte digest and carries whatever proof blob comes back. Proof
//! format and upgrade mechanics live entirely behind [`TimestampClient`];
//! nothing here parses a proof.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::error::{NotaryError, Result};

/// Outcome of a proof verification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProofCheck {
    /// The network has not yet confirmed the digest
    Pending,
    /// The digest is confirmed; the service may hand back an upgraded proof
    Confirmed {
        /// Replacement proof blob, when the service upgraded it
        upgraded: Option<Vec<u8>>,
    },
}

/// Capability interface to an external timestamping service.
///
/// No retry or backoff contract is specified here; a transport or service
/// failure surfaces as [`NotaryError::Anchoring`] and the caller decides how
/// to degrade.
#[async_trait]
pub trait TimestampClient: Send + Sync {
    /// Submits a digest for anchoring and returns the opaque proof blob.
    async fn submit(&self, digest: &[u8; 32]) -> Result<Vec<u8>>;

    /// Checks a previously obtained proof against the network.
    async fn verify(&self, digest: &[u8; 32], proof: &[u8]) -> Result<ProofCheck>;
}

/// A timestamp client that hands out a fixed proof blob.
///
/// This implementation is primarily used for testing and development
/// purposes. It includes mechanisms to simulate submission failures and to
/// script what a verification pass reports, for exercising the degraded-save
/// and proof-upgrade paths.
#[derive(Debug, Clone)]
pub struct FixedProofClient {
    proof: Vec<u8>,
    fail_on_submit: Arc<Mutex<bool>>,
    check_result: Arc<Mutex<ProofCheck>>,
}

impl FixedProofClient {
    /// Creates a client that returns `proof` from every submission.
    pub fn new(proof: impl Into<Vec<u8>>) -> Self {
        Self {
            proof: proof.into(),
            fail_on_submit: Arc::new(Mutex::new(false)),
            check_result: Arc::new(Mutex::new(ProofCheck::Pending)),
        }
    }

    /// Configures whether submissions fail with a simulated service error.
    pub fn set_fail_on_submit(&self, fail: bool) {
        *self.fail_on_submit.lock().unwrap() = fail;
    }

    /// Scripts the outcome of subsequent `verify` calls.
    pub fn set_check_result(&self, result: ProofCheck) {
        *self.check_result.lock().unwrap() = result;
    }

    /// Helper to create an `Arc<dyn TimestampClient>` from this client.
    pub fn shared(self) -> Arc<dyn TimestampClient> {
        Arc::new(self)
    }
}

#[async_trait]
impl TimestampClient for FixedProofClient {
    async fn submit(&self, _digest: &[u8; 32]) -> Result<Vec<u8>> {
        if *self.fail_on_submit.lock().unwrap() {
            return Err(NotaryError::anchoring(
                "Simulated timestamping service failure".to_string(),
            ));
        }
        Ok(self.proof.clone())
    }

    async fn verify(&self, _digest: &[u8; 32], _proof: &[u8]) -> Result<ProofCheck> {
        Ok(self.check_result.lock().unwrap().clone())
    }
}
