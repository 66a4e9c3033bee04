use inventory_model::preview::preview_receipts;
use inventory_store::{
    open_store, Backend, ConfigError, ReceiptQueries, Repository, StoreConfig, StoreError,
};
use inventory_test_utils::{amount, receipt_from};
use std::io::Write;
use std::time::Duration;

fn write_config(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[tokio::test]
async fn test_load_config_file_and_open() {
    let file = write_config(
        r#"
        backend = "actor"
        mailbox_capacity = 4
        operation_timeout_ms = 2000
        seed_preview_data = true
        "#,
    );

    let config = StoreConfig::load(file.path()).unwrap();
    assert_eq!(config.backend, Backend::Actor);
    assert_eq!(config.operation_timeout(), Some(Duration::from_secs(2)));

    let store = open_store(&config, vec![receipt_from("Local Hardware")]).unwrap();
    let all = store.fetch_all().await.unwrap();
    assert_eq!(all.len(), preview_receipts().len() + 1);

    // caller seed comes first, preview receipts after
    assert_eq!(all[0].store_name, "Local Hardware");
}

#[test]
fn test_load_malformed_config() {
    let file = write_config("backend = [not toml");
    let err = StoreConfig::load(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[tokio::test]
async fn test_preview_queries() {
    let store = open_store(&StoreConfig::new().with_preview_data(true), Vec::new()).unwrap();

    let marts = store.fetch_by_store("mart").await.unwrap();
    assert_eq!(marts.len(), 1);
    assert_eq!(marts[0].store_name, "Walmart");

    let above = store.fetch_above_amount(amount("100")).await.unwrap();
    assert!(above.iter().all(|r| r.total_amount > amount("100")));
    assert_eq!(above.len(), 3);
}

#[tokio::test]
async fn test_timeout_configured_store_serves_requests() {
    for backend in [Backend::RwLock, Backend::Actor] {
        let config = StoreConfig::new()
            .with_backend(backend)
            .with_operation_timeout(Duration::from_secs(1));
        let store = open_store(&config, Vec::new()).unwrap();

        let result: Result<(), StoreError> = store.save(receipt_from("Target")).await;
        assert!(result.is_ok(), "{backend}");
        assert_eq!(store.count().await.unwrap(), 1, "{backend}");
    }
}
