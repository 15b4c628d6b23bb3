// Path: crates/api/src/state/accessor.rs
//! A dyn-safe trait for state access within services and lifecycle hooks.

use chainfix_types::error::StateError;
use std::sync::Arc;

/// A key-value pair yielded by a state scan.
pub type StateKVPair = (Arc<[u8]>, Arc<[u8]>);

/// An iterator over a range of state, in ascending key order.
///
/// The iterator borrows the state it scans. Dropping it releases the
/// underlying cursor, so a scan is always released on every exit path of the
/// scope that owns it.
pub type StateScanIter<'a> = Box<dyn Iterator<Item = Result<StateKVPair, StateError>> + 'a>;

/// A dyn-safe trait that erases the concrete store type, allowing services to
/// interact with state without knowing its implementation.
pub trait StateAccess {
    /// Gets a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError>;
    /// Inserts or overwrites a key-value pair.
    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError>;
    /// Deletes a key-value pair.
    fn delete(&mut self, key: &[u8]) -> Result<(), StateError>;

    /// Scans the half-open range `[start, end)` in ascending byte order of
    /// keys. `end = None` scans to the end of the key space.
    fn range_scan(&self, start: &[u8], end: Option<&[u8]>)
        -> Result<StateScanIter<'_>, StateError>;

    /// Scans all key-value pairs whose key starts with `prefix`.
    fn prefix_scan(&self, prefix: &[u8]) -> Result<StateScanIter<'_>, StateError> {
        let end = prefix_end_bytes(prefix);
        self.range_scan(prefix, end.as_deref())
    }
}

/// Returns the smallest key that sorts after every key starting with
/// `prefix`, or `None` if no such key exists (empty or all-`0xff` prefix).
pub fn prefix_end_bytes(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut end = prefix.to_vec();
    while let Some(last) = end.pop() {
        if last < u8::MAX {
            end.push(last + 1);
            return Some(end);
        }
    }
    None
}

/// Returns true if `key` falls within the half-open range `[start, end)`.
pub fn key_in_range(key: &[u8], start: &[u8], end: Option<&[u8]>) -> bool {
    key >= start && end.map_or(true, |end| key < end)
}
