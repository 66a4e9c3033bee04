//! Home Inventory record store
//!
//! A thread-safe, query-capable repository for receipts behind an
//! asynchronous interface. Reads run in parallel; each write is exclusive
//! and atomic, so no caller ever observes a half-applied change.
//!
//! # Core Concepts
//!
//! - [`Repository`]: the asynchronous CRUD contract every backend satisfies
//! - [`ReceiptQueries`]: date, store-name, item and amount queries
//! - [`ConcurrentRecordStore`]: reader-writer lock backend
//! - [`ActorRecordStore`]: single-owner task backend with snapshot reads
//! - [`StoreConfig`] / [`open_store`]: configuration and factory
//!
//! # Example
//!
//! ```rust,ignore
//! use inventory_store::{open_store, ReceiptQueries, StoreConfig};
//!
//! let store = open_store(&StoreConfig::new().with_preview_data(true), Vec::new())?;
//!
//! let marts = store.fetch_by_store("mart").await?;
//! let big = store.fetch_above_amount("100.00".parse()?).await?;
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod actor;
mod collection;
mod config;
mod error;
mod query;
mod repository;
mod store;

// Re-exports
pub use actor::{ActorRecordStore, DEFAULT_MAILBOX_CAPACITY};
pub use config::{open_store, Backend, StoreConfig};
pub use error::{ConfigError, StoreError, StoreResult};
pub use query::ReceiptQuery;
pub use repository::{ReceiptQueries, RecordFilter, Repository};
pub use store::ConcurrentRecordStore;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the record store
    pub use crate::{
        open_store, ActorRecordStore, ConcurrentRecordStore, ReceiptQueries, Repository,
        StoreConfig, StoreError, StoreResult,
    };
    pub use inventory_model::{ItemId, Receipt, ReceiptId, Record};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
