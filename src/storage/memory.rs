// src/storage/memory.rs

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::{Arc, Mutex};

use crate::core::item::Item;
use crate::error::{NotaryError, Result};
use crate::storage::StorageBackend;

/// `None` = no failure, `Some(None)` = fail every store,
/// `Some(Some(name))` = fail stores to that partition only.
type FailCondition = Option<Option<String>>;

/// An in-memory storage backend for item partitions.
///
/// This implementation is primarily used for testing and development
/// purposes. Partitions are stored in a `DashMap` keyed by partition name for
/// thread-safe concurrent access.
///
/// It also includes a mechanism to simulate storage failures for testing
/// error handling paths, configurable via `set_fail_on_store`.
#[derive(Debug, Clone)]
pub struct MemoryStorage {
    partitions: Arc<DashMap<String, Vec<Item>>>,
    fail_on_store_for: Arc<Mutex<FailCondition>>,
}

impl MemoryStorage {
    /// Creates a new, empty `MemoryStorage` instance.
    pub fn new() -> Self {
        Self {
            partitions: Arc::new(DashMap::new()),
            fail_on_store_for: Arc::new(Mutex::new(None)),
        }
    }

    /// Configures this `MemoryStorage` instance to simulate a failure when
    /// `store_partition` is called for the given partition, or for any
    /// partition when `None`.
    pub fn set_fail_on_store(&self, partition: Option<&str>) {
        let mut guard = self.fail_on_store_for.lock().unwrap();
        *guard = Some(partition.map(str::to_string));
    }

    /// Clears any previously set failure condition for `store_partition`.
    pub fn clear_fail_on_store(&self) {
        let mut guard = self.fail_on_store_for.lock().unwrap();
        *guard = None;
    }

    /// Checks if the storage contains no partitions.
    pub fn is_empty(&self) -> bool {
        self.partitions.is_empty()
    }

    /// Removes all partitions from the storage.
    pub fn clear(&self) {
        self.partitions.clear();
    }

    /// Helper to create a boxed version of `MemoryStorage`.
    /// This is useful when a `Box<dyn StorageBackend>` is needed.
    pub fn boxed(self) -> Box<dyn StorageBackend> {
        Box::new(self)
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn load_partition(&self, partition: &str) -> Result<Option<Vec<Item>>> {
        Ok(self.partitions.get(partition).map(|entry| entry.value().clone()))
    }

    async fn store_partition(&self, partition: &str, items: &[Item]) -> Result<()> {
        if let Some(condition) = &*self.fail_on_store_for.lock().unwrap() {
            match condition {
                Some(name) if name != partition => {}
                _ => {
                    return Err(NotaryError::storage(format!(
                        "Simulated MemoryStorage write failure for partition '{}'",
                        partition
                    )));
                }
            }
        }
        self.partitions.insert(partition.to_string(), items.to_vec());
        Ok(())
    }

    async fn partition_exists(&self, partition: &str) -> Result<bool> {
        Ok(self.partitions.contains_key(partition))
    }

    async fn delete_partition(&self, partition: &str) -> Result<()> {
        self.partitions.remove(partition);
        Ok(())
    }

    async fn list_partitions(&self) -> Result<Vec<String>> {
        let mut names: Vec<String> = self.partitions.iter().map(|e| e.key().clone()).collect();
        names.sort();
        Ok(names)
    }
}
