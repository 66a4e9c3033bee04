#![allow(dead_code)]

use inventory_store::{ActorRecordStore, ConcurrentRecordStore, Repository};
use inventory_model::Receipt;
use std::sync::Arc;

pub type SharedStore = Arc<dyn Repository<Receipt>>;

/// One empty store per backend, labelled for assertion messages
pub fn backends() -> Vec<(&'static str, SharedStore)> {
    seeded_backends(Vec::new())
}

/// One seeded store per backend
pub fn seeded_backends(seed: Vec<Receipt>) -> Vec<(&'static str, SharedStore)> {
    vec![
        (
            "rw_lock",
            Arc::new(ConcurrentRecordStore::with_records(seed.clone())) as SharedStore,
        ),
        (
            "actor",
            Arc::new(ActorRecordStore::spawn_with_records(seed, 64)) as SharedStore,
        ),
    ]
}
