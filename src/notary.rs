// src/notary.rs

//! The save orchestrator.
//!
//! [`Notary`] composes the hasher, the timestamp client, the item store and
//! the status reporter into the user-facing operations: saving an item
//! (local-only or anchored), confirming a pending anchor, and moving whole
//! partitions in and out as files.

use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};

use crate::anchor::{ProofCheck, TimestampClient};
use crate::config::Config;
use crate::core::item::Item;
use crate::error::{NotaryError, Result};
use crate::status::StatusReporter;
use crate::storage::StorageBackend;
use crate::store::ItemStore;
use crate::types::{ProofStatus, Severity};

/// Status channel for save operations.
pub const SAVE_CHANNEL: &str = "save";
/// Status channel for import/export operations.
pub const TRANSFER_CHANNEL: &str = "transfer";
/// Status channel for anchor-confirmation checks.
pub const ANCHOR_CHANNEL: &str = "anchor";

/// User-facing entry point over a storage backend and a timestamp client.
pub struct Notary {
    store: ItemStore,
    client: Arc<dyn TimestampClient>,
    status: StatusReporter,
    config: Config,
}

impl Notary {
    /// Creates a notary from configuration, constructing the storage backend
    /// the config names.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured backend cannot be initialized or is
    /// not compiled into this build.
    pub async fn new(config: Config, client: Arc<dyn TimestampClient>) -> Result<Self> {
        let backend: Arc<dyn StorageBackend> = match config.storage.storage_type {
            #[cfg(feature = "memory-storage")]
            crate::types::StorageType::Memory => Arc::new(crate::storage::MemoryStorage::new()),
            #[cfg(feature = "file-storage")]
            crate::types::StorageType::File => {
                Arc::new(crate::storage::FileStorage::new(&config.storage.base_path).await?)
            }
            #[allow(unreachable_patterns)]
            other => {
                return Err(NotaryError::invalid_input(format!(
                    "storage type '{}' is not enabled in this build",
                    other
                )))
            }
        };
        Ok(Self::with_backend(config, backend, client))
    }

    /// Creates a notary over an explicit backend. Useful for tests and for
    /// callers that manage their own storage.
    pub fn with_backend(
        config: Config,
        backend: Arc<dyn StorageBackend>,
        client: Arc<dyn TimestampClient>,
    ) -> Self {
        let status = StatusReporter::new(std::time::Duration::from_millis(config.status.auto_hide_ms));
        Self {
            store: ItemStore::new(backend),
            client,
            status,
            config,
        }
    }

    /// Saves caller-supplied fields as a new item in `partition`.
    ///
    /// Stamps the creation timestamp, computes the canonical digest, and —
    /// when `anchor` is set and anchoring is enabled — submits the digest to
    /// the timestamping service. A service failure degrades the save to
    /// local-only rather than aborting it: the item is stored without a
    /// proof, the failure is reported on the save status channel, and no
    /// retry is attempted. The finalized item is returned regardless of the
    /// anchoring outcome.
    pub async fn save(
        &self,
        partition: &str,
        fields: Map<String, Value>,
        anchor: bool,
    ) -> Result<Item> {
        let mut item = Item::new(Utc::now(), fields)?;

        let (message, severity) = if anchor && self.config.anchoring.enabled {
            match self.client.submit(&item.digest()?).await {
                Ok(proof) => {
                    item.attach_proof(&proof);
                    ("Item saved; anchor pending confirmation".to_string(), Severity::Success)
                }
                Err(e) => {
                    log::warn!("Timestamp anchoring failed, saving locally: {}", e);
                    (
                        format!("Anchoring failed: {}. Item saved locally.", e),
                        Severity::Error,
                    )
                }
            }
        } else if anchor {
            ("Anchoring is disabled; item saved locally".to_string(), Severity::Info)
        } else {
            ("Item saved".to_string(), Severity::Success)
        };

        self.store.insert(partition, item.clone()).await?;
        self.status.show(SAVE_CHANNEL, message, severity);

        Ok(item)
    }

    /// Returns the persisted items of a partition, newest first.
    pub async fn list(&self, partition: &str) -> Result<Vec<Item>> {
        self.store.list(partition).await
    }

    /// Deletes an item by id. A missing id is a no-op.
    pub async fn delete(&self, partition: &str, id: &str) -> Result<()> {
        self.store.delete(partition, id).await
    }

    /// Re-checks a pending anchor against the timestamping service.
    ///
    /// On confirmation the item's status flips to `confirmed` and, when the
    /// service handed back an upgraded proof, the stored blob is replaced —
    /// the one mutation items permit after creation.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidInput` when the item
    /// carries no proof to check.
    pub async fn check_anchor(&self, partition: &str, id: &str) -> Result<ProofStatus> {
        let mut item = self.find(partition, id).await?;
        let proof = item.proof_bytes()?.ok_or_else(|| {
            NotaryError::invalid_input(format!("item '{}' has no timestamp proof to check", id))
        })?;

        match self.client.verify(&item.digest()?, &proof).await? {
            ProofCheck::Pending => {
                self.status
                    .show(ANCHOR_CHANNEL, "Anchor not confirmed yet", Severity::Info);
                Ok(ProofStatus::Pending)
            }
            ProofCheck::Confirmed { upgraded } => {
                item.confirm_proof(upgraded.as_deref())?;
                self.store.replace(partition, item).await?;
                self.status
                    .show(ANCHOR_CHANNEL, "Anchor confirmed", Severity::Success);
                Ok(ProofStatus::Confirmed)
            }
        }
    }

    /// Returns an item's raw proof bytes with the download filename
    /// `dso-<partition>-<id>.ots` (content type `application/octet-stream`).
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `InvalidInput` when the item
    /// carries no proof.
    pub async fn export_proof(&self, partition: &str, id: &str) -> Result<(String, Vec<u8>)> {
        let item = self.find(partition, id).await?;
        let proof = item.proof_bytes()?.ok_or_else(|| {
            NotaryError::invalid_input(format!("item '{}' has no timestamp proof to export", id))
        })?;
        Ok((format!("dso-{}-{}.ots", partition, id), proof))
    }

    /// Serializes a partition as a pretty-printed JSON document with the
    /// download filename `<prefix>-<ISO-date>.json`.
    pub async fn export_partition(&self, partition: &str) -> Result<(String, Vec<u8>)> {
        let document = self.store.export(partition).await?;
        let filename = format!(
            "{}-{}.json",
            self.config.export.filename_prefix,
            Utc::now().format("%Y-%m-%d")
        );
        Ok((filename, document))
    }

    /// Merges an exported document into a partition.
    ///
    /// Returns the count of newly added items. A malformed payload aborts the
    /// import with [`NotaryError::Format`] and an error status message.
    pub async fn import_partition(&self, partition: &str, blob: &[u8]) -> Result<usize> {
        match self.store.import(partition, blob).await {
            Ok(added) => {
                self.status.show(
                    TRANSFER_CHANNEL,
                    format!("Imported {} new item(s)", added),
                    Severity::Success,
                );
                Ok(added)
            }
            Err(e @ NotaryError::Format(_)) => {
                self.status
                    .show(TRANSFER_CHANNEL, format!("Import failed: {}", e), Severity::Error);
                Err(e)
            }
            Err(e) => Err(e),
        }
    }

    /// The reporter carrying this notary's transient status messages.
    pub fn status(&self) -> &StatusReporter {
        &self.status
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    async fn find(&self, partition: &str, id: &str) -> Result<Item> {
        self.store
            .list(partition)
            .await?
            .into_iter()
            .find(|item| item.id == id)
            .ok_or_else(|| NotaryError::not_found(format!("item '{}' in partition '{}'", id, partition)))
    }
}
