// Path: crates/state/src/memory/mod.rs
//! An ordered, in-memory implementation of [`StateAccess`].
//!
//! Keys are kept in a `BTreeMap`, so scans walk the store in ascending byte
//! order, the same order every node observes.

use chainfix_api::state::{StateAccess, StateChangeSet, StateScanIter};
use chainfix_types::error::StateError;
use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

/// An in-memory key-value store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryState {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl MemoryState {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Applies a buffered change set: deletes first, then inserts, each in
    /// ascending key order.
    pub fn apply_changes(&mut self, changes: StateChangeSet) {
        let (inserts, deletes) = changes;
        for key in deletes {
            self.data.remove(&key);
        }
        for (key, value) in inserts {
            self.data.insert(key, value);
        }
    }

    /// Returns every key-value pair in ascending key order.
    ///
    /// Two stores are byte-identical exactly when their snapshots are equal.
    pub fn snapshot(&self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.data
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl StateAccess for MemoryState {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        Ok(self.data.get(key).cloned())
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.data.remove(key);
        Ok(())
    }

    fn range_scan(
        &self,
        start: &[u8],
        end: Option<&[u8]>,
    ) -> Result<StateScanIter<'_>, StateError> {
        if end.is_some_and(|end| end <= start) {
            return Ok(Box::new(std::iter::empty()));
        }
        let upper = match end {
            Some(end) => Bound::Excluded(end),
            None => Bound::Unbounded,
        };
        let iter = self
            .data
            .range::<[u8], _>((Bound::Included(start), upper))
            .map(|(key, value)| {
                Ok::<_, StateError>((Arc::from(key.as_slice()), Arc::from(value.as_slice())))
            });
        Ok(Box::new(iter))
    }
}
