//! Tests for the library entry point: config loading plus logger install.

use assert_matches::assert_matches;
use dso_notary::{init, Config, NotaryError, StorageType};
use serial_test::serial;
use tempfile::tempdir;

#[tokio::test]
#[serial]
async fn test_init_loads_config_from_file() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("cfg.toml");
    let mut cfg = Config::default();
    cfg.storage.storage_type = StorageType::Memory;
    cfg.storage.base_path = "".into();
    std::fs::write(&config_path, toml::to_string(&cfg).unwrap()).unwrap();

    // A logger may already be installed by an earlier test in this process;
    // only config handling is asserted here.
    match init(Some(config_path.to_str().unwrap())) {
        Ok(loaded) => assert_eq!(loaded.storage.storage_type, StorageType::Memory),
        Err(NotaryError::InvalidInput(_)) => {}
        Err(e) => panic!("unexpected error: {}", e),
    }
}

#[cfg(feature = "logging")]
#[tokio::test]
#[serial]
async fn test_init_fails_when_logger_already_set() {
    // Pre-initialize the logger.
    let _ = env_logger::builder().is_test(true).try_init();

    let dir = tempdir().unwrap();
    let config_path = dir.path().join("cfg.toml");
    std::fs::write(&config_path, toml::to_string(&Config::default()).unwrap()).unwrap();

    let result = init(Some(config_path.to_str().unwrap()));
    assert_matches!(result, Err(NotaryError::InvalidInput(_)));
}

#[tokio::test]
#[serial]
async fn test_init_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let config_path = dir.path().join("cfg.toml");
    let mut cfg = Config::default();
    cfg.status.auto_hide_ms = 0;
    std::fs::write(&config_path, toml::to_string(&cfg).unwrap()).unwrap();

    let result = init(Some(config_path.to_str().unwrap()));
    assert_matches!(result, Err(NotaryError::Config(_)));
}
