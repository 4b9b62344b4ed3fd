// src/core/item.rs
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::core::hash::{sha256_digest, sha256_hex};
use crate::error::{NotaryError, Result};
use crate::types::ProofStatus;

/// A single notarized record stored in a partition.
///
/// The `hash` field is the hex-encoded SHA-256 of the item's canonical
/// payload: the creation timestamp plus the caller-supplied fields, serialized
/// with sorted keys *before* `id`, `hash` and the proof pair are attached.
/// That digest is what gets submitted to the timestamping service.
///
/// Items are immutable once created, with one exception: the proof pair
/// (`otsProof`/`otsStatus`) may be upgraded by a later confirmation check.
/// The pair moves together; an item never carries a proof with status `none`
/// or a `pending`/`confirmed` status without a proof.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Unique opaque identifier (UUID v4), unique within a partition
    pub id: String,
    /// Creation instant, ISO-8601 at rest
    pub timestamp: DateTime<Utc>,
    /// Caller-supplied payload fields, stored inline with the record
    #[serde(flatten)]
    pub fields: Map<String, Value>,
    /// Hex-encoded SHA-256 of the canonical payload
    pub hash: String,
    /// Opaque timestamp proof, base64 at rest
    #[serde(rename = "otsProof", default, skip_serializing_if = "Option::is_none")]
    pub ots_proof: Option<String>,
    /// Anchoring state of the proof
    #[serde(rename = "otsStatus", default)]
    pub ots_status: ProofStatus,
}

/// Serializes the canonical payload: caller fields plus the creation
/// timestamp, keys sorted. A caller-supplied `timestamp` field is overwritten
/// by the stamped one.
pub fn canonical_payload(
    timestamp: DateTime<Utc>,
    fields: &Map<String, Value>,
) -> Result<Vec<u8>> {
    let mut payload = fields.clone();
    payload.insert("timestamp".to_string(), serde_json::to_value(timestamp)?);
    Ok(serde_json::to_vec(&payload)?)
}

/// Computes the 32-byte digest of the canonical payload.
pub fn payload_digest(
    timestamp: DateTime<Utc>,
    fields: &Map<String, Value>,
) -> Result<[u8; 32]> {
    Ok(sha256_digest(&canonical_payload(timestamp, fields)?))
}

impl Item {
    /// Creates a new `Item` from caller-supplied fields.
    ///
    /// Stamps the given creation timestamp, computes the canonical-payload
    /// hash, and assigns a fresh UUID. The item starts without a proof.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized to JSON.
    pub fn new(timestamp: DateTime<Utc>, fields: Map<String, Value>) -> Result<Self> {
        let hash = sha256_hex(&canonical_payload(timestamp, &fields)?);
        Ok(Item {
            id: Uuid::new_v4().to_string(),
            timestamp,
            fields,
            hash,
            ots_proof: None,
            ots_status: ProofStatus::None,
        })
    }

    /// Recomputes the canonical-payload digest from the stored fields.
    pub fn digest(&self) -> Result<[u8; 32]> {
        payload_digest(self.timestamp, &self.fields)
    }

    /// Attaches a freshly obtained proof blob and marks the item pending.
    pub fn attach_proof(&mut self, proof: &[u8]) {
        self.ots_proof = Some(BASE64.encode(proof));
        self.ots_status = ProofStatus::Pending;
    }

    /// Marks the proof confirmed, swapping in an upgraded blob when the
    /// verification pass returned one.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the item carries no proof.
    pub fn confirm_proof(&mut self, upgraded: Option<&[u8]>) -> Result<()> {
        if self.ots_proof.is_none() {
            return Err(NotaryError::invalid_input(
                "cannot confirm an item without a timestamp proof",
            ));
        }
        if let Some(bytes) = upgraded {
            self.ots_proof = Some(BASE64.encode(bytes));
        }
        self.ots_status = ProofStatus::Confirmed;
        Ok(())
    }

    /// Decodes the stored proof, if any.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the stored blob is not valid base64.
    pub fn proof_bytes(&self) -> Result<Option<Vec<u8>>> {
        match &self.ots_proof {
            None => Ok(None),
            Some(encoded) => BASE64
                .decode(encoded)
                .map(Some)
                .map_err(|e| NotaryError::invalid_input(format!("stored proof is not valid base64: {}", e))),
        }
    }
}
