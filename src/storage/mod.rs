// src/storage/mod.rs

//! Persistence backends for item partitions.
//!
//! A partition is an ordered sequence of [`Item`]s persisted as one
//! self-describing JSON document. Backends load and rewrite whole partitions;
//! there is no incremental update and no locking, so concurrent writers of
//! the same partition follow last-writer-wins.

use async_trait::async_trait;

use crate::core::item::Item;
use crate::error::Result;

#[cfg(feature = "file-storage")]
pub mod file;
#[cfg(feature = "memory-storage")]
pub mod memory;

#[cfg(feature = "file-storage")]
pub use file::FileStorage;
#[cfg(feature = "memory-storage")]
pub use memory::MemoryStorage;

/// A storage backend holding named item partitions.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    /// Loads the full item sequence of a partition.
    ///
    /// Returns `Ok(None)` when the partition does not exist. A persisted
    /// document that cannot be parsed is reported the same way (after a
    /// warning log), never as an error: the caller sees an empty partition.
    async fn load_partition(&self, partition: &str) -> Result<Option<Vec<Item>>>;

    /// Rewrites the full item sequence of a partition.
    async fn store_partition(&self, partition: &str, items: &[Item]) -> Result<()>;

    /// Checks whether a partition has a persisted representation.
    async fn partition_exists(&self, partition: &str) -> Result<bool>;

    /// Removes a partition's persisted representation. No-op if absent.
    async fn delete_partition(&self, partition: &str) -> Result<()>;

    /// Lists the names of all persisted partitions.
    async fn list_partitions(&self) -> Result<Vec<String>>;
}
