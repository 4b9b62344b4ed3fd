//! Tests for the partition import/export surfaces and their file naming.

use std::sync::Arc;

use dso_notary::anchor::FixedProofClient;
use dso_notary::notary::TRANSFER_CHANNEL;
use dso_notary::storage::MemoryStorage;
use dso_notary::{Config, Notary, NotaryError, Severity, StorageType};
use serde_json::json;

fn notary() -> Notary {
    let mut config = Config::default();
    config.storage.storage_type = StorageType::Memory;
    Notary::with_backend(
        config,
        Arc::new(MemoryStorage::new()),
        FixedProofClient::new(b"proof".to_vec()).shared(),
    )
}

fn fields(title: &str) -> serde_json::Map<String, serde_json::Value> {
    let mut fields = serde_json::Map::new();
    fields.insert("title".to_string(), json!(title));
    fields
}

#[tokio::test]
async fn test_export_partition_filename_and_content() {
    let notary = notary();
    let item = notary.save("posts", fields("exported"), false).await.unwrap();

    let (filename, document) = notary.export_partition("posts").await.unwrap();

    // <prefix>-<ISO-date>.json with the default prefix.
    assert!(filename.starts_with("dso-items-"), "filename: {}", filename);
    assert!(filename.ends_with(".json"));
    let date_part = &filename["dso-items-".len()..filename.len() - ".json".len()];
    assert_eq!(date_part.len(), 10, "expected YYYY-MM-DD, got {}", date_part);

    let parsed: Vec<dso_notary::Item> = serde_json::from_slice(&document).unwrap();
    assert_eq!(parsed, vec![item]);
}

#[tokio::test]
async fn test_export_then_import_round_trip() {
    let source = notary();
    source.save("posts", fields("a"), false).await.unwrap();
    source.save("posts", fields("b"), false).await.unwrap();
    let original = source.list("posts").await.unwrap();

    let (_, document) = source.export_partition("posts").await.unwrap();

    let target = notary();
    let added = target.import_partition("posts", &document).await.unwrap();
    assert_eq!(added, 2);
    assert_eq!(target.list("posts").await.unwrap(), original);

    let (message, severity) = target.status().current(TRANSFER_CHANNEL).unwrap();
    assert_eq!(severity, Severity::Success);
    assert!(message.contains('2'), "message: {}", message);
}

#[tokio::test]
async fn test_import_twice_adds_nothing() {
    let notary = notary();
    notary.save("posts", fields("once"), false).await.unwrap();
    let (_, document) = notary.export_partition("posts").await.unwrap();

    assert_eq!(notary.import_partition("posts", &document).await.unwrap(), 0);
    assert_eq!(notary.list("posts").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_import_malformed_payload_reports_error() {
    let notary = notary();
    let err = notary
        .import_partition("posts", b"{\"not\": \"a sequence\"}")
        .await
        .unwrap_err();
    assert!(matches!(err, NotaryError::Format(_)));

    let (_, severity) = notary.status().current(TRANSFER_CHANNEL).unwrap();
    assert_eq!(severity, Severity::Error);

    // The partition is untouched.
    assert!(notary.list("posts").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_export_proof_filename_and_bytes() {
    let notary = notary();
    let item = notary.save("posts", fields("anchored"), true).await.unwrap();

    let (filename, proof) = notary.export_proof("posts", &item.id).await.unwrap();
    assert_eq!(filename, format!("dso-posts-{}.ots", item.id));
    assert_eq!(proof, b"proof");
}

#[tokio::test]
async fn test_export_proof_without_proof_fails() {
    let notary = notary();
    let item = notary.save("posts", fields("local"), false).await.unwrap();

    let err = notary.export_proof("posts", &item.id).await.unwrap_err();
    assert!(matches!(err, NotaryError::InvalidInput(_)));

    let err = notary.export_proof("posts", "missing-id").await.unwrap_err();
    assert!(matches!(err, NotaryError::NotFound(_)));
}
