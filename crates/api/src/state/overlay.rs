// Path: crates/api/src/state/overlay.rs

//! A copy-on-write state overlay that buffers a block's writes.

use crate::state::{key_in_range, StateAccess, StateScanIter};
use chainfix_types::error::StateError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// A batch of key-value pairs to be inserted or updated in the state.
pub type StateInserts = Vec<(Vec<u8>, Vec<u8>)>;

/// A batch of keys to be deleted from the state.
pub type StateDeletes = Vec<Vec<u8>>;

/// A complete set of state changes (inserts/updates and deletes).
pub type StateChangeSet = (StateInserts, StateDeletes);

/// An in-memory, copy-on-write overlay for any `StateAccess`.
///
/// Reads are first checked against the local `writes` cache. If a key is not
/// found, the read is passed through to the underlying `base` state.
/// All writes are captured in the local cache and do not affect the `base`
/// state until the host commits the change set. Dropping the overlay discards
/// every buffered write.
#[derive(Clone)]
pub struct StateOverlay<'a> {
    base: &'a dyn StateAccess,
    writes: BTreeMap<Vec<u8>, Option<Vec<u8>>>, // BTreeMap keeps commit order deterministic.
}

impl<'a> StateOverlay<'a> {
    /// Creates a new, empty overlay on top of a base state accessor.
    pub fn new(base: &'a dyn StateAccess) -> Self {
        Self {
            base,
            writes: BTreeMap::new(),
        }
    }

    /// Returns true if no write has been buffered.
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    /// Consumes the overlay and returns its writes in ascending key order.
    pub fn into_ordered_batch(self) -> StateChangeSet {
        let mut inserts = Vec::new();
        let mut deletes = Vec::new();

        for (key, value_opt) in self.writes {
            match value_opt {
                Some(value) => inserts.push((key, value)),
                None => deletes.push(key),
            }
        }
        (inserts, deletes)
    }
}

impl StateAccess for StateOverlay<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        match self.writes.get(key) {
            // A buffered write (or a buffered delete) shadows the base.
            Some(value_opt) => Ok(value_opt.clone()),
            None => self.base.get(key),
        }
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), Some(value.to_vec()));
        Ok(())
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        self.writes.insert(key.to_vec(), None);
        Ok(())
    }

    fn range_scan(
        &self,
        start: &[u8],
        end: Option<&[u8]>,
    ) -> Result<StateScanIter<'_>, StateError> {
        let mut merged: BTreeMap<Arc<[u8]>, Arc<[u8]>> = BTreeMap::new();
        for item in self.base.range_scan(start, end)? {
            let (key, value) = item?;
            merged.insert(key, value);
        }

        for (key, value_opt) in self.writes.range(start.to_vec()..) {
            if !key_in_range(key, start, end) {
                break;
            }
            match value_opt {
                Some(value) => {
                    merged.insert(Arc::from(key.as_slice()), Arc::from(value.as_slice()));
                }
                None => {
                    merged.remove(key.as_slice());
                }
            }
        }

        Ok(Box::new(merged.into_iter().map(Ok::<_, StateError>)))
    }
}
