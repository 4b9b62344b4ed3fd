//! Tests for the file-backed vault: persistence across instances and the
//! treat-corruption-as-empty read policy.

use dso_notary::anchor::FixedProofClient;
use dso_notary::{Config, Notary, ProofStatus, StorageType};
use serde_json::json;
use tempfile::tempdir;

fn file_config(base: &std::path::Path) -> Config {
    let mut config = Config::default();
    config.storage.storage_type = StorageType::File;
    config.storage.base_path = base.to_string_lossy().into_owned();
    config
}

fn fields(title: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut fields = serde_json::Map::new();
    fields.insert("title".to_string(), json!(title));
    fields
}

#[tokio::test]
async fn test_items_survive_reopen() {
    let dir = tempdir().unwrap();
    let client = FixedProofClient::new(b"proof".to_vec()).shared();

    let saved = {
        let notary = Notary::new(file_config(dir.path()), client.clone()).await.unwrap();
        notary.save("posts", fields("durable"), true).await.unwrap()
    };

    let reopened = Notary::new(file_config(dir.path()), client).await.unwrap();
    let items = reopened.list("posts").await.unwrap();
    assert_eq!(items, vec![saved]);
    assert_eq!(items[0].ots_status, ProofStatus::Pending);
}

#[tokio::test]
async fn test_partitions_are_independent_documents() {
    let dir = tempdir().unwrap();
    let client = FixedProofClient::new(b"proof".to_vec()).shared();
    let notary = Notary::new(file_config(dir.path()), client).await.unwrap();

    notary.save("posts", fields("post"), false).await.unwrap();
    notary.save("drafts", fields("draft"), false).await.unwrap();

    assert!(dir.path().join("partitions").join("posts.json").exists());
    assert!(dir.path().join("partitions").join("drafts.json").exists());
    assert_eq!(notary.list("posts").await.unwrap().len(), 1);
    assert_eq!(notary.list("drafts").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_corrupt_partition_lists_as_empty() {
    let dir = tempdir().unwrap();
    let client = FixedProofClient::new(b"proof".to_vec()).shared();
    let notary = Notary::new(file_config(dir.path()), client).await.unwrap();

    notary.save("posts", fields("lost"), false).await.unwrap();
    std::fs::write(dir.path().join("partitions").join("posts.json"), "garbage").unwrap();

    // Unparseable content degrades to an empty partition, not an error.
    assert!(notary.list("posts").await.unwrap().is_empty());

    // The next save rewrites the document from scratch.
    let item = notary.save("posts", fields("fresh"), false).await.unwrap();
    assert_eq!(notary.list("posts").await.unwrap(), vec![item]);
}

#[tokio::test]
async fn test_exported_document_is_importable_elsewhere() {
    let dir_a = tempdir().unwrap();
    let dir_b = tempdir().unwrap();
    let client = FixedProofClient::new(b"proof".to_vec()).shared();

    let source = Notary::new(file_config(dir_a.path()), client.clone()).await.unwrap();
    source.save("posts", fields("travels"), false).await.unwrap();
    let (_, document) = source.export_partition("posts").await.unwrap();

    let target = Notary::new(file_config(dir_b.path()), client).await.unwrap();
    assert_eq!(target.import_partition("posts", &document).await.unwrap(), 1);
    assert_eq!(
        target.list("posts").await.unwrap(),
        source.list("posts").await.unwrap()
    );
}
