//! Single-owner task backend
//!
//! One Tokio task owns the collection and serves requests from a bounded
//! mailbox, replying on a per-request oneshot channel. The collection is
//! held behind an `Arc`: reads are answered with a snapshot and filtered in
//! the caller's task, so they run concurrently; writes go through
//! `Arc::make_mut`, which copies the collection whenever a snapshot is still
//! outstanding. A snapshot therefore never changes after it is handed out.

use crate::collection::Collection;
use crate::error::{StoreError, StoreResult};
use crate::repository::{RecordFilter, Repository};
use async_trait::async_trait;
use inventory_model::{Receipt, Record};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::error::SendTimeoutError;
use tokio::sync::{mpsc, oneshot};

/// Default mailbox capacity
pub const DEFAULT_MAILBOX_CAPACITY: usize = 256;

/// Requests served by the owner task
enum Request<R: Record> {
    /// Current snapshot
    Snapshot(oneshot::Sender<Arc<Collection<R>>>),
    /// Upsert a record
    Save { record: R, reply: oneshot::Sender<()> },
    /// Remove by id
    Delete { id: R::Id, reply: oneshot::Sender<()> },
}

/// Record store owned by a dedicated task
///
/// Handles are cheap to clone and all talk to the same owner. The owner
/// task exits once every handle is dropped.
#[derive(Debug, Clone)]
pub struct ActorRecordStore<R: Record = Receipt> {
    sender: mpsc::Sender<Request<R>>,
    timeout: Option<Duration>,
}

impl<R: Record> ActorRecordStore<R> {
    /// Spawn an owner task with an empty collection
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn(mailbox_capacity: usize) -> Self {
        Self::spawn_with_records(Vec::new(), mailbox_capacity)
    }

    /// Spawn an owner task seeded with records
    ///
    /// Seed records are upserted in order. A zero capacity is raised to one.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn spawn_with_records(
        seed: impl IntoIterator<Item = R>,
        mailbox_capacity: usize,
    ) -> Self {
        let collection = Collection::from_seed(seed);
        tracing::info!("Record store actor started with {} seed records", collection.len());

        let (sender, receiver) = mpsc::channel(mailbox_capacity.max(1));
        tokio::spawn(owner_task(Arc::new(collection), receiver));

        Self {
            sender,
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

    /// Check whether the owner task is still serving requests
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Enqueue a request and wait for its reply
    ///
    /// The deadline bounds enqueueing only. Once the owner has the request
    /// it runs to completion even if this future is dropped.
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Request<R>,
    ) -> StoreResult<T> {
        let (reply, response) = oneshot::channel();
        let request = make(reply);

        match self.timeout {
            Some(deadline) => self
                .sender
                .send_timeout(request, deadline)
                .await
                .map_err(|e| match e {
                    SendTimeoutError::Timeout(_) => StoreError::timeout(deadline),
                    SendTimeoutError::Closed(_) => StoreError::Closed,
                })?,
            None => self
                .sender
                .send(request)
                .await
                .map_err(|_| StoreError::Closed)?,
        }

        response.await.map_err(|_| StoreError::Closed)
    }

    async fn snapshot(&self) -> StoreResult<Arc<Collection<R>>> {
        self.request(Request::Snapshot).await
    }
}

#[async_trait]
impl<R: Record> Repository<R> for ActorRecordStore<R> {
    async fn fetch_all(&self) -> StoreResult<Vec<R>> {
        Ok(self.snapshot().await?.to_vec())
    }

    async fn fetch(&self, id: R::Id) -> StoreResult<Option<R>> {
        Ok(self.snapshot().await?.get(&id))
    }

    async fn save(&self, record: R) -> StoreResult<()> {
        self.request(|reply| Request::Save { record, reply }).await
    }

    async fn delete(&self, record: &R) -> StoreResult<()> {
        let id = record.id();
        self.request(|reply| Request::Delete { id, reply }).await
    }

    async fn fetch_matching(&self, filter: &dyn RecordFilter<R>) -> StoreResult<Vec<R>> {
        Ok(self.snapshot().await?.filter(filter))
    }

    async fn count(&self) -> StoreResult<usize> {
        Ok(self.snapshot().await?.len())
    }
}

/// Owner task (runs in separate tokio task)
async fn owner_task<R: Record>(
    mut records: Arc<Collection<R>>,
    mut rx: mpsc::Receiver<Request<R>>,
) {
    while let Some(request) = rx.recv().await {
        match request {
            Request::Snapshot(reply) => {
                let _ = reply.send(Arc::clone(&records));
            }
            Request::Save { record, reply } => {
                let id = record.id();
                let replaced = Arc::make_mut(&mut records).upsert(record);
                tracing::debug!(%id, replaced, "saved record");
                let _ = reply.send(());
            }
            Request::Delete { id, reply } => {
                let removed = Arc::make_mut(&mut records).remove(&id);
                tracing::debug!(%id, removed, "deleted record");
                let _ = reply.send(());
            }
        }
    }

    tracing::debug!("Record store actor stopped with {} records", records.len());
}
