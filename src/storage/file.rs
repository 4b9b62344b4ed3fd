// src/storage/file.rs

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::core::item::Item;
use crate::error::{NotaryError, Result};
use crate::storage::StorageBackend;

const MARKER_FILE_NAME: &str = ".dso-notary";
const PARTITION_SUBDIR: &str = "partitions";

/// A storage backend that persists item partitions to the file system.
///
/// Each partition is one pretty-printed JSON document:
/// `base_path/partitions/<name>.json`
#[derive(Debug)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Creates a new `FileStorage` instance.
    ///
    /// This will create the base directory and a marker file (`.dso-notary`)
    /// if they don't already exist.
    ///
    /// # Arguments
    ///
    /// * `base_path` - The root directory where partition data will be stored.
    pub async fn new<P: AsRef<Path>>(base_path: P) -> Result<Self> {
        let path = base_path.as_ref().to_path_buf();

        fs::create_dir_all(&path).await.map_err(|e| {
            NotaryError::storage(format!("Failed to create base path '{}': {}", path.display(), e))
        })?;

        let marker_path = path.join(MARKER_FILE_NAME);
        if !fs::try_exists(&marker_path).await.map_err(|e| {
            NotaryError::storage(format!(
                "Failed to check marker file existence '{}': {}",
                marker_path.display(),
                e
            ))
        })? {
            fs::File::create(&marker_path).await.map_err(|e| {
                NotaryError::storage(format!(
                    "Failed to create marker file '{}': {}",
                    marker_path.display(),
                    e
                ))
            })?;
        }

        Ok(Self { base_path: path })
    }

    /// Helper to create a boxed version of `FileStorage`.
    /// This is useful when a `Box<dyn StorageBackend>` is needed.
    pub fn boxed(self) -> Box<dyn StorageBackend> {
        Box::new(self)
    }

    /// Constructs the path for a partition document.
    /// Path: `base_path/partitions/<name>.json`
    fn partition_path(&self, partition: &str) -> Result<PathBuf> {
        // Partition names become file names; keep them out of parent dirs.
        if partition.is_empty()
            || partition.contains(['/', '\\'])
            || partition.contains("..")
        {
            return Err(NotaryError::invalid_input(format!(
                "invalid partition name: '{}'",
                partition
            )));
        }
        Ok(self
            .base_path
            .join(PARTITION_SUBDIR)
            .join(format!("{}.json", partition)))
    }
}

#[async_trait]
impl StorageBackend for FileStorage {
    async fn load_partition(&self, partition: &str) -> Result<Option<Vec<Item>>> {
        let path = self.partition_path(partition)?;

        if !fs::try_exists(&path).await.map_err(|e| {
            NotaryError::storage(format!("Failed to check partition existence '{}': {}", path.display(), e))
        })? {
            return Ok(None);
        }

        let document = fs::read_to_string(&path).await.map_err(|e| {
            NotaryError::storage(format!("Failed to read partition '{}': {}", path.display(), e))
        })?;

        // An unparseable document is treated as an absent partition, not an
        // error; the next full rewrite replaces it.
        match serde_json::from_str::<Vec<Item>>(&document) {
            Ok(items) => Ok(Some(items)),
            Err(e) => {
                log::warn!(
                    "Partition document '{}' is unparseable, treating as empty: {}",
                    path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    async fn store_partition(&self, partition: &str, items: &[Item]) -> Result<()> {
        let path = self.partition_path(partition)?;

        if let Some(parent_dir) = path.parent() {
            fs::create_dir_all(parent_dir).await.map_err(|e| {
                NotaryError::storage(format!(
                    "Failed to create parent directory for partition '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }

        let document = serde_json::to_string_pretty(items).map_err(NotaryError::from)?;

        fs::write(&path, document).await.map_err(|e| {
            NotaryError::storage(format!("Failed to write partition '{}': {}", path.display(), e))
        })?;

        Ok(())
    }

    async fn partition_exists(&self, partition: &str) -> Result<bool> {
        let path = self.partition_path(partition)?;
        fs::try_exists(&path).await.map_err(|e| {
            NotaryError::storage(format!("Failed to check partition existence '{}': {}", path.display(), e))
        })
    }

    async fn delete_partition(&self, partition: &str) -> Result<()> {
        let path = self.partition_path(partition)?;
        if fs::try_exists(&path).await.map_err(|e| {
            NotaryError::storage(format!(
                "Failed to check partition existence for deletion '{}': {}",
                path.display(),
                e
            ))
        })? {
            fs::remove_file(&path).await.map_err(|e| {
                NotaryError::storage(format!("Failed to delete partition '{}': {}", path.display(), e))
            })?;
        }
        Ok(())
    }

    async fn list_partitions(&self) -> Result<Vec<String>> {
        let dir = self.base_path.join(PARTITION_SUBDIR);
        if !fs::try_exists(&dir).await.map_err(|e| {
            NotaryError::storage(format!("Failed to check partitions directory '{}': {}", dir.display(), e))
        })? {
            return Ok(Vec::new());
        }

        let mut names = Vec::new();
        let mut read_dir = fs::read_dir(&dir).await.map_err(|e| {
            NotaryError::storage(format!("Failed to read partitions directory '{}': {}", dir.display(), e))
        })?;

        while let Some(entry) = read_dir.next_entry().await.map_err(|e| {
            NotaryError::storage(format!("Failed to read directory entry in '{}': {}", dir.display(), e))
        })? {
            let path = entry.path();
            if path.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }
}
