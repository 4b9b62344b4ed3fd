// src/store/mod.rs

//! The partition-level item store.
//!
//! [`ItemStore`] layers the item CRUD contract over a [`StorageBackend`]:
//! newest-first ordering, id-keyed merge on import, and the full
//! read-modify-write persistence discipline. Every mutation rewrites the
//! whole partition document.

use std::collections::HashSet;
use std::sync::Arc;

use crate::core::item::Item;
use crate::error::{NotaryError, Result};
use crate::storage::StorageBackend;

/// Keyed, ordered item collections persisted in named partitions.
pub struct ItemStore {
    backend: Arc<dyn StorageBackend>,
}

/// Sorts a partition newest-first by creation timestamp.
fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

impl ItemStore {
    /// Creates a store over the given backend.
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Returns the persisted items of a partition, newest first.
    ///
    /// An absent partition (or one whose persisted document could not be
    /// parsed) yields an empty sequence, not an error.
    pub async fn list(&self, partition: &str) -> Result<Vec<Item>> {
        Ok(self.backend.load_partition(partition).await?.unwrap_or_default())
    }

    /// Prepends an item to a partition and persists the full sequence.
    pub async fn insert(&self, partition: &str, item: Item) -> Result<()> {
        let mut items = self.list(partition).await?;
        items.insert(0, item);
        self.backend.store_partition(partition, &items).await
    }

    /// Removes the first item with the given id and persists the result.
    ///
    /// A missing id is a no-op, not an error; the partition is not rewritten.
    pub async fn delete(&self, partition: &str, id: &str) -> Result<()> {
        let mut items = self.list(partition).await?;
        match items.iter().position(|item| item.id == id) {
            Some(index) => {
                items.remove(index);
                self.backend.store_partition(partition, &items).await
            }
            None => Ok(()),
        }
    }

    /// Replaces the stored item carrying the same id.
    ///
    /// This is the proof-upgrade path; items are otherwise immutable.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no stored item has the id.
    pub async fn replace(&self, partition: &str, item: Item) -> Result<()> {
        let mut items = self.list(partition).await?;
        let index = items
            .iter()
            .position(|existing| existing.id == item.id)
            .ok_or_else(|| {
                NotaryError::not_found(format!("item '{}' in partition '{}'", item.id, partition))
            })?;
        items[index] = item;
        self.backend.store_partition(partition, &items).await
    }

    /// Serializes the full partition as a pretty-printed JSON document.
    pub async fn export(&self, partition: &str) -> Result<Vec<u8>> {
        let items = self.list(partition).await?;
        Ok(serde_json::to_vec_pretty(&items)?)
    }

    /// Parses `blob` as a sequence of items and merges it into the partition.
    ///
    /// Items whose id already exists are dropped, never overwritten. The
    /// merged partition is re-sorted newest-first by timestamp and persisted.
    /// Returns the count of newly added items.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError::Format`] when the blob is not a JSON sequence
    /// of items; the partition is left untouched.
    pub async fn import(&self, partition: &str, blob: &[u8]) -> Result<usize> {
        let value: serde_json::Value = serde_json::from_slice(blob)
            .map_err(|e| NotaryError::format(format!("not valid JSON: {}", e)))?;
        if !value.is_array() {
            return Err(NotaryError::format("expected a sequence of items".to_string()));
        }
        let incoming: Vec<Item> = serde_json::from_value(value)
            .map_err(|e| NotaryError::format(format!("not a sequence of items: {}", e)))?;

        let mut items = self.list(partition).await?;
        let mut seen: HashSet<String> = items.iter().map(|item| item.id.clone()).collect();

        let mut added = 0;
        for item in incoming {
            if seen.insert(item.id.clone()) {
                items.push(item);
                added += 1;
            }
        }

        sort_newest_first(&mut items);
        self.backend.store_partition(partition, &items).await?;
        Ok(added)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use chrono::{Duration, Utc};
    use serde_json::json;

    fn store() -> (ItemStore, Arc<MemoryStorage>) {
        let backend = Arc::new(MemoryStorage::new());
        (ItemStore::new(backend.clone()), backend)
    }

    fn test_item(title: &str, offset_secs: i64) -> Item {
        let mut fields = serde_json::Map::new();
        fields.insert("title".to_string(), json!(title));
        Item::new(Utc::now() + Duration::seconds(offset_secs), fields).unwrap()
    }

    #[tokio::test]
    async fn test_list_absent_partition_is_empty() {
        let (store, _) = store();
        assert!(store.list("notes").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_prepends() {
        let (store, _) = store();
        let older = test_item("older", 0);
        let newer = test_item("newer", 1);

        store.insert("notes", older.clone()).await.unwrap();
        store.insert("notes", newer.clone()).await.unwrap();

        let items = store.list("notes").await.unwrap();
        assert_eq!(items, vec![newer, older]);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_noop() {
        let (store, backend) = store();
        let item = test_item("keep", 0);
        store.insert("notes", item.clone()).await.unwrap();

        // A rewrite would fail; delete of a missing id must not write.
        backend.set_fail_on_store(Some("notes"));
        store.delete("notes", "no-such-id").await.unwrap();
        backend.clear_fail_on_store();

        assert_eq!(store.list("notes").await.unwrap(), vec![item]);
    }

    #[tokio::test]
    async fn test_delete_removes_exactly_one() {
        let (store, _) = store();
        let a = test_item("a", 0);
        let b = test_item("b", 1);
        store.insert("notes", a.clone()).await.unwrap();
        store.insert("notes", b.clone()).await.unwrap();

        store.delete("notes", &a.id).await.unwrap();
        let items = store.list("notes").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, b.id);
    }

    #[tokio::test]
    async fn test_replace_unknown_id_fails() {
        let (store, _) = store();
        let err = store.replace("notes", test_item("ghost", 0)).await.unwrap_err();
        assert!(matches!(err, NotaryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_import_rejects_non_sequence() {
        let (store, _) = store();
        let err = store.import("notes", b"{\"id\":\"x\"}").await.unwrap_err();
        assert!(matches!(err, NotaryError::Format(_)));

        let err = store.import("notes", b"not json at all").await.unwrap_err();
        assert!(matches!(err, NotaryError::Format(_)));
    }

    #[tokio::test]
    async fn test_import_export_round_trip() {
        let (store, _) = store();
        store.insert("notes", test_item("a", 0)).await.unwrap();
        store.insert("notes", test_item("b", 1)).await.unwrap();
        let before = store.list("notes").await.unwrap();

        let blob = store.export("notes").await.unwrap();
        let (other, _) = self::store();
        let added = other.import("notes", &blob).await.unwrap();
        assert_eq!(added, 2);
        assert_eq!(other.list("notes").await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_import_is_idempotent() {
        let (store, _) = store();
        store.insert("notes", test_item("a", 0)).await.unwrap();
        let blob = store.export("notes").await.unwrap();

        assert_eq!(store.import("notes", &blob).await.unwrap(), 0);
        assert_eq!(store.list("notes").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_import_merges_newest_first() {
        let (store, _) = store();
        let t1 = test_item("t1", 10);
        let t2 = test_item("t2", 20);
        let t3 = test_item("t3", 30);

        store.insert("notes", t3.clone()).await.unwrap();

        let blob = serde_json::to_vec(&vec![t1.clone(), t2.clone()]).unwrap();
        let added = store.import("notes", &blob).await.unwrap();
        assert_eq!(added, 2);

        let items = store.list("notes").await.unwrap();
        let ids: Vec<String> = items.iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec![t3.id, t2.id, t1.id]);
    }

    #[tokio::test]
    async fn test_import_keeps_existing_on_id_clash() {
        let (store, _) = store();
        let original = test_item("original", 0);
        store.insert("notes", original.clone()).await.unwrap();

        let mut tampered = original.clone();
        tampered.fields.insert("title".to_string(), json!("tampered"));
        let blob = serde_json::to_vec(&vec![tampered]).unwrap();

        assert_eq!(store.import("notes", &blob).await.unwrap(), 0);
        assert_eq!(store.list("notes").await.unwrap(), vec![original]);
    }
}
