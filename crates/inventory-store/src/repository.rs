//! Asynchronous repository contract
//!
//! [`Repository`] is the record surface every backend satisfies.
//! The receipt-specific queries live on [`ReceiptQueries`], which is
//! implemented for any `Repository<Receipt>`, including trait objects.

use crate::error::StoreResult;
use crate::query::ReceiptQuery;
use async_trait::async_trait;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use inventory_model::{ItemId, Receipt, Record};

/// Predicate applied to records during a read
pub trait RecordFilter<R>: Send + Sync {
    /// Whether the record belongs in the result
    fn matches(&self, record: &R) -> bool;
}

impl<R, F> RecordFilter<R> for F
where
    F: Fn(&R) -> bool + Send + Sync,
{
    #[inline]
    fn matches(&self, record: &R) -> bool {
        self(record)
    }
}

/// Concurrent record repository
///
/// Reads may run alongside any number of other reads. Writes are exclusive:
/// no operation ever observes a half-applied `save` or `delete`. Every
/// returned sequence is an owned copy in insertion order.
#[async_trait]
pub trait Repository<R: Record>: Send + Sync {
    /// All records, oldest insertion first
    async fn fetch_all(&self) -> StoreResult<Vec<R>>;

    /// The record with this id, or `None` when it was never saved
    async fn fetch(&self, id: R::Id) -> StoreResult<Option<R>>;

    /// Upsert: replace in place when the id exists, append otherwise
    async fn save(&self, record: R) -> StoreResult<()>;

    /// Remove the record with the same id; unknown ids are a no-op
    async fn delete(&self, record: &R) -> StoreResult<()>;

    /// Records accepted by the filter, in insertion order
    async fn fetch_matching(&self, filter: &dyn RecordFilter<R>) -> StoreResult<Vec<R>>;

    /// Number of records currently held
    async fn count(&self) -> StoreResult<usize> {
        Ok(self.fetch_all().await?.len())
    }
}

/// Receipt queries over any receipt repository
#[async_trait]
pub trait ReceiptQueries: Repository<Receipt> {
    /// Receipts dated within `[from, to]`, both ends inclusive
    async fn fetch_by_date_range(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> StoreResult<Vec<Receipt>> {
        self.fetch_matching(&ReceiptQuery::date_range(from, to)).await
    }

    /// Receipts whose store name contains `name`, ignoring case
    async fn fetch_by_store(&self, name: &str) -> StoreResult<Vec<Receipt>> {
        self.fetch_matching(&ReceiptQuery::store_name(name)).await
    }

    /// Receipts that reference the item
    async fn fetch_by_item_id(&self, item_id: ItemId) -> StoreResult<Vec<Receipt>> {
        self.fetch_matching(&ReceiptQuery::item(item_id)).await
    }

    /// Receipts with a total strictly greater than `amount`
    async fn fetch_above_amount(&self, amount: BigDecimal) -> StoreResult<Vec<Receipt>> {
        self.fetch_matching(&ReceiptQuery::above_amount(amount)).await
    }
}

impl<T: Repository<Receipt> + ?Sized> ReceiptQueries for T {}
