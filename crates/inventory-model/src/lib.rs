//! Home Inventory record model
//!
//! Defines the values held by the record store:
//! - [`Record`]: identity contract every stored value satisfies
//! - [`Receipt`]: a purchase receipt with queryable fields
//! - [`ReceiptId`] / [`ItemId`]: 128-bit random identifiers
//!
//! # Example
//!
//! ```rust
//! use inventory_model::{ItemId, Receipt, Record};
//! use chrono::Utc;
//!
//! let item = ItemId::new();
//! let receipt = Receipt::new(Utc::now(), "Target", "42.50".parse().unwrap())
//!     .with_item(item);
//!
//! assert!(receipt.contains_item(item));
//! assert_eq!(receipt.id(), receipt.id);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod preview;
mod receipt;
mod record;

pub use receipt::{ItemId, Receipt, ReceiptId};
pub use record::Record;

/// Re-exported so callers can build amounts without a direct dependency
pub use bigdecimal::BigDecimal;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
