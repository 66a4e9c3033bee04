//! Reader-writer lock backend
//!
//! An ordered collection behind a `tokio::sync::RwLock`. Reads share the
//! lock; `save` and `delete` take it exclusively and mutate with no await
//! point while the guard is held.

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use crate::repository::{RecordFilter, Repository};
use async_trait::async_trait;
use inventory_model::{Receipt, Record};
use std::future::Future;
use std::time::Duration;
use tokio::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Concurrent in-memory record store
///
/// # Characteristics
/// - Any number of concurrent readers
/// - Exclusive, atomic writes
/// - Insertion order preserved; upserts keep their slot
/// - Optional admission deadline for lock acquisition
#[derive(Debug)]
pub struct ConcurrentRecordStore<R: Record = Receipt> {
    records: RwLock<Collection<R>>,
    timeout: Option<Duration>,
}

impl<R: Record> ConcurrentRecordStore<R> {
    /// Create empty store
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Collection::new()),
            timeout: None,
        }
    }

    /// Create store seeded with records
    ///
    /// Seed records are upserted in order, so a repeated id keeps the
    /// position of its first occurrence and the value of its last.
    #[must_use]
    pub fn with_records(seed: impl IntoIterator<Item = R>) -> Self {
        let collection = Collection::from_seed(seed);
        tracing::info!("Record store created with {} seed records", collection.len());
        Self {
            records: RwLock::new(collection),
            timeout: None,
        }
    }

    /// With an admission deadline for every operation
    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Configured admission deadline
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    async fn read(&self) -> StoreResult<RwLockReadGuard<'_, Collection<R>>> {
        self.admit(self.records.read()).await
    }

    async fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Collection<R>>> {
        self.admit(self.records.write()).await
    }

    /// Wait for lock acquisition, bounded by the deadline when one is set
    async fn admit<G>(&self, acquire: impl Future<Output = G>) -> StoreResult<G> {
        match self.timeout {
            Some(deadline) => tokio::time::timeout(deadline, acquire)
                .await
                .map_err(|_| StoreError::timeout(deadline)),
            None => Ok(acquire.await),
        }
    }
}

impl<R: Record> Default for ConcurrentRecordStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> Repository<R> for ConcurrentRecordStore<R> {
    async fn fetch_all(&self) -> StoreResult<Vec<R>> {
        Ok(self.read().await?.to_vec())
    }

    async fn fetch(&self, id: R::Id) -> StoreResult<Option<R>> {
        Ok(self.read().await?.get(&id))
    }

    async fn save(&self, record: R) -> StoreResult<()> {
        let id = record.id();
        let replaced = self.write().await?.upsert(record);
        tracing::debug!(%id, replaced, "saved record");
        Ok(())
    }

    async fn delete(&self, record: &R) -> StoreResult<()> {
        let id = record.id();
        let removed = self.write().await?.remove(&id);
        tracing::debug!(%id, removed, "deleted record");
        Ok(())
    }

    async fn fetch_matching(&self, filter: &dyn RecordFilter<R>) -> StoreResult<Vec<R>> {
        Ok(self.read().await?.filter(filter))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.read().await?.len())
    }
}
