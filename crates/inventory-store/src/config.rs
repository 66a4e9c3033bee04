//! Store configuration and factory
//!
//! [`StoreConfig`] selects a backend and its limits; [`open_store`] builds
//! it and hands back a shared trait object for injection.

use crate::actor::{ActorRecordStore, DEFAULT_MAILBOX_CAPACITY};
use crate::error::ConfigError;
use crate::repository::Repository;
use crate::store::ConcurrentRecordStore;
use inventory_model::preview::preview_receipts;
use inventory_model::Receipt;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

/// Synchronization backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    /// Reader-writer lock around the collection
    #[default]
    RwLock,
    /// Dedicated owner task with snapshot reads
    Actor,
}

impl Backend {
    /// Canonical name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Backend::RwLock => "rw_lock",
            Backend::Actor => "actor",
        }
    }
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "rw_lock" | "rwlock" => Ok(Backend::RwLock),
            "actor" => Ok(Backend::Actor),
            other => Err(ConfigError::Invalid(format!("unknown backend: '{other}'"))),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Record store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Which backend to build
    pub backend: Backend,
    /// Mailbox size for the actor backend
    pub mailbox_capacity: usize,
    /// Admission deadline per operation, in milliseconds
    pub operation_timeout_ms: Option<u64>,
    /// Seed the store with the built-in preview receipts
    pub seed_preview_data: bool,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With backend
    #[inline]
    #[must_use]
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.backend = backend;
        self
    }

    /// With actor mailbox capacity
    #[inline]
    #[must_use]
    pub fn with_mailbox_capacity(mut self, capacity: usize) -> Self {
        self.mailbox_capacity = capacity;
        self
    }

    /// With admission deadline
    ///
    /// Sub-millisecond remainders round up, so any nonzero timeout stays
    /// nonzero.
    #[inline]
    #[must_use]
    pub fn with_operation_timeout(mut self, timeout: Duration) -> Self {
        let millis = timeout.as_millis() + u128::from(timeout.subsec_nanos() % 1_000_000 != 0);
        self.operation_timeout_ms = Some(u64::try_from(millis).unwrap_or(u64::MAX));
        self
    }

    /// With preview seed data
    #[inline]
    #[must_use]
    pub fn with_preview_data(mut self, enabled: bool) -> Self {
        self.seed_preview_data = enabled;
        self
    }

    /// Admission deadline, if any
    #[inline]
    #[must_use]
    pub fn operation_timeout(&self) -> Option<Duration> {
        self.operation_timeout_ms.map(Duration::from_millis)
    }

    /// Parse from TOML text and validate
    ///
    /// # Errors
    /// - `ConfigError::Parse` on malformed TOML or an unknown backend
    /// - `ConfigError::Invalid` if validation fails
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate
    ///
    /// # Errors
    /// Returns `ConfigError::Io` if the file cannot be read, otherwise as
    /// [`StoreConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&text)
    }

    /// Check values are usable
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` for a zero mailbox capacity or a zero
    /// operation timeout.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.mailbox_capacity == 0 {
            return Err(ConfigError::Invalid(
                "mailbox_capacity must be greater than 0".to_string(),
            ));
        }
        if self.operation_timeout_ms == Some(0) {
            return Err(ConfigError::Invalid(
                "operation_timeout_ms must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::RwLock,
            mailbox_capacity: DEFAULT_MAILBOX_CAPACITY,
            operation_timeout_ms: None,
            seed_preview_data: false,
        }
    }
}

/// Build the configured receipt store
///
/// `seed` records go in first, followed by the preview receipts when
/// `seed_preview_data` is set.
///
/// # Errors
/// Returns `ConfigError::Invalid` if the configuration does not validate,
/// and `ConfigError::NoRuntime` when the actor backend is requested outside
/// a Tokio runtime.
pub fn open_store(
    config: &StoreConfig,
    seed: impl IntoIterator<Item = Receipt>,
) -> Result<Arc<dyn Repository<Receipt>>, ConfigError> {
    config.validate()?;
    if config.backend == Backend::Actor && tokio::runtime::Handle::try_current().is_err() {
        return Err(ConfigError::NoRuntime);
    }

    let mut records: Vec<Receipt> = seed.into_iter().collect();
    if config.seed_preview_data {
        records.extend(preview_receipts());
    }

    tracing::info!(
        "Opening {} record store with {} seed records",
        config.backend,
        records.len()
    );

    let store: Arc<dyn Repository<Receipt>> = match config.backend {
        Backend::RwLock => {
            let store = ConcurrentRecordStore::with_records(records);
            match config.operation_timeout() {
                Some(timeout) => Arc::new(store.with_timeout(timeout)),
                None => Arc::new(store),
            }
        }
        Backend::Actor => {
            let store = ActorRecordStore::spawn_with_records(records, config.mailbox_capacity);
            match config.operation_timeout() {
                Some(timeout) => Arc::new(store.with_timeout(timeout)),
                None => Arc::new(store),
            }
        }
    };

    Ok(store)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = StoreConfig::new();
        assert_eq!(config.backend, Backend::RwLock);
        assert_eq!(config.mailbox_capacity, DEFAULT_MAILBOX_CAPACITY);
        assert_eq!(config.operation_timeout(), None);
        assert!(!config.seed_preview_data);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn config_builder() {
        let config = StoreConfig::new()
            .with_backend(Backend::Actor)
            .with_mailbox_capacity(16)
            .with_operation_timeout(Duration::from_millis(500))
            .with_preview_data(true);

        assert_eq!(config.backend, Backend::Actor);
        assert_eq!(config.mailbox_capacity, 16);
        assert_eq!(config.operation_timeout(), Some(Duration::from_millis(500)));
        assert!(config.seed_preview_data);
    }

    #[test]
    fn config_timeout_rounds_up_to_whole_millis() {
        let config = StoreConfig::new().with_operation_timeout(Duration::from_micros(500));
        assert_eq!(config.operation_timeout_ms, Some(1));
        assert!(config.validate().is_ok());

        let config = StoreConfig::new().with_operation_timeout(Duration::from_micros(1200));
        assert_eq!(config.operation_timeout_ms, Some(2));

        let config = StoreConfig::new().with_operation_timeout(Duration::ZERO);
        assert!(config.validate().is_err());
    }

    #[test]
    fn config_from_toml() {
        let config = StoreConfig::from_toml_str(
            r#"
            backend = "actor"
            mailbox_capacity = 32
            operation_timeout_ms = 1000
            "#,
        )
        .unwrap();

        assert_eq!(config.backend, Backend::Actor);
        assert_eq!(config.mailbox_capacity, 32);
        assert_eq!(config.operation_timeout_ms, Some(1000));
        assert!(!config.seed_preview_data);
    }

    #[test]
    fn config_empty_toml_is_default() {
        assert_eq!(StoreConfig::from_toml_str("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn config_rejects_zero_capacity() {
        let err = StoreConfig::from_toml_str("mailbox_capacity = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn config_rejects_zero_timeout() {
        let err = StoreConfig::from_toml_str("operation_timeout_ms = 0").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn config_rejects_unknown_backend() {
        let err = StoreConfig::from_toml_str(r#"backend = "sqlite""#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn config_load_missing_file() {
        let err = StoreConfig::load("/nonexistent/inventory.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn backend_from_str() {
        assert_eq!("rw-lock".parse::<Backend>().unwrap(), Backend::RwLock);
        assert_eq!("RW_LOCK".parse::<Backend>().unwrap(), Backend::RwLock);
        assert_eq!("actor".parse::<Backend>().unwrap(), Backend::Actor);
        assert!("mutex".parse::<Backend>().is_err());
        assert_eq!(Backend::Actor.to_string(), "actor");
    }

    #[tokio::test]
    async fn open_store_seeds_preview_data() {
        let config = StoreConfig::new().with_preview_data(true);
        let store = open_store(&config, Vec::new()).unwrap();
        assert_eq!(store.count().await.unwrap(), preview_receipts().len());
    }

    #[tokio::test]
    async fn open_store_actor_backend() {
        let config = StoreConfig::new().with_backend(Backend::Actor);
        let store = open_store(&config, preview_receipts()).unwrap();
        assert_eq!(store.count().await.unwrap(), preview_receipts().len());
    }

    #[test]
    fn open_store_actor_needs_runtime() {
        let config = StoreConfig::new().with_backend(Backend::Actor);
        let err = open_store(&config, Vec::new()).err().unwrap();
        assert!(matches!(err, ConfigError::NoRuntime));
    }

    #[test]
    fn open_store_rw_lock_without_runtime() {
        assert!(open_store(&StoreConfig::new(), Vec::new()).is_ok());
    }

    #[test]
    fn open_store_rejects_invalid_config() {
        let config = StoreConfig::new().with_mailbox_capacity(0);
        assert!(open_store(&config, Vec::new()).is_err());
    }
}
