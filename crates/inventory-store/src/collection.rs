//! Ordered, id-keyed record collection shared by both backends
//!
//! Insertion order is iteration order. Replacing a record keeps its slot;
//! removing one keeps the relative order of the rest.

use crate::repository::RecordFilter;
use indexmap::IndexMap;
use inventory_model::Record;

#[derive(Debug, Clone)]
pub(crate) struct Collection<R: Record> {
    entries: IndexMap<R::Id, R>,
}

impl<R: Record> Collection<R> {
    pub(crate) fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Build from seed records, upserting in order
    pub(crate) fn from_seed(seed: impl IntoIterator<Item = R>) -> Self {
        let mut collection = Self::new();
        for record in seed {
            collection.upsert(record);
        }
        collection
    }

    /// Returns true when an existing record was replaced
    pub(crate) fn upsert(&mut self, record: R) -> bool {
        self.entries.insert(record.id(), record).is_some()
    }

    /// Returns true when a record was removed
    pub(crate) fn remove(&mut self, id: &R::Id) -> bool {
        self.entries.shift_remove(id).is_some()
    }

    pub(crate) fn get(&self, id: &R::Id) -> Option<R> {
        self.entries.get(id).cloned()
    }

    pub(crate) fn to_vec(&self) -> Vec<R> {
        self.entries.values().cloned().collect()
    }

    pub(crate) fn filter(&self, filter: &dyn RecordFilter<R>) -> Vec<R> {
        self.entries
            .values()
            .filter(|record| filter.matches(record))
            .cloned()
            .collect()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl<R: Record> Default for Collection<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Tag {
        id: u32,
        label: &'static str,
    }

    impl Record for Tag {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }
    }

    fn tag(id: u32, label: &'static str) -> Tag {
        Tag { id, label }
    }

    fn labels(collection: &Collection<Tag>) -> Vec<&'static str> {
        collection.to_vec().into_iter().map(|t| t.label).collect()
    }

    #[test]
    fn upsert_appends_new_ids() {
        let mut c = Collection::new();
        assert!(!c.upsert(tag(1, "a")));
        assert!(!c.upsert(tag(2, "b")));
        assert_eq!(labels(&c), vec!["a", "b"]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut c = Collection::from_seed([tag(1, "a"), tag(2, "b"), tag(3, "c")]);
        assert!(c.upsert(tag(2, "B")));
        assert_eq!(labels(&c), vec!["a", "B", "c"]);
    }

    #[test]
    fn seed_duplicates_collapse() {
        let c = Collection::from_seed([tag(1, "a"), tag(2, "b"), tag(1, "a2")]);
        assert_eq!(c.len(), 2);
        assert_eq!(labels(&c), vec!["a2", "b"]);
    }

    #[test]
    fn remove_keeps_order() {
        let mut c = Collection::from_seed([tag(1, "a"), tag(2, "b"), tag(3, "c")]);
        assert!(c.remove(&1));
        assert!(!c.remove(&1));
        assert_eq!(labels(&c), vec!["b", "c"]);
        assert_eq!(c.get(&3), Some(tag(3, "c")));
    }

    #[test]
    fn filter_keeps_order() {
        let c = Collection::from_seed([tag(1, "a"), tag(2, "b"), tag(3, "c")]);
        let odd = c.filter(&|t: &Tag| t.id % 2 == 1);
        assert_eq!(odd, vec![tag(1, "a"), tag(3, "c")]);
    }
}
