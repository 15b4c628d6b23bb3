// Path: crates/api/src/state/namespaced.rs
//! A view over a state accessor that confines all keys to one namespace.
//!
//! Modules address their state with module-relative keys. The view prepends
//! the namespace prefix on the way in and strips it from scanned keys on the
//! way out, so callers observe keys verbatim relative to their namespace.

use crate::state::{prefix_end_bytes, StateAccess, StateScanIter};
use chainfix_types::error::StateError;
use std::sync::Arc;

/// Separator between a namespace name and module-relative keys.
const NAMESPACE_SEPARATOR: u8 = b'/';

/// Returns the raw key prefix of `namespace`.
pub fn namespace_prefix(namespace: &[u8]) -> Vec<u8> {
    let mut prefix = Vec::with_capacity(namespace.len() + 1);
    prefix.extend_from_slice(namespace);
    prefix.push(NAMESPACE_SEPARATOR);
    prefix
}

/// A writable, namespace-confined view over another [`StateAccess`].
pub struct NamespacedStateAccess<'a> {
    inner: &'a mut dyn StateAccess,
    prefix: Vec<u8>,
}

impl<'a> NamespacedStateAccess<'a> {
    /// Creates a view of `inner` confined to `namespace`.
    pub fn new(inner: &'a mut dyn StateAccess, namespace: &[u8]) -> Self {
        Self {
            inner,
            prefix: namespace_prefix(namespace),
        }
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        [self.prefix.as_slice(), key].concat()
    }
}

impl StateAccess for NamespacedStateAccess<'_> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StateError> {
        self.inner.get(&self.full_key(key))
    }

    fn insert(&mut self, key: &[u8], value: &[u8]) -> Result<(), StateError> {
        let full = self.full_key(key);
        self.inner.insert(&full, value)
    }

    fn delete(&mut self, key: &[u8]) -> Result<(), StateError> {
        let full = self.full_key(key);
        self.inner.delete(&full)
    }

    fn range_scan(
        &self,
        start: &[u8],
        end: Option<&[u8]>,
    ) -> Result<StateScanIter<'_>, StateError> {
        let full_start = self.full_key(start);
        // An unbounded scan stops at the end of the namespace, not the store.
        let full_end = match end {
            Some(end) => Some(self.full_key(end)),
            None => prefix_end_bytes(&self.prefix),
        };
        let prefix_len = self.prefix.len();
        let prefix = self.prefix.clone();
        let iter = self
            .inner
            .range_scan(&full_start, full_end.as_deref())?
            .map(move |item| {
                let (key, value) = item?;
                if !key.starts_with(&prefix) {
                    return Err(StateError::InvalidKey(format!(
                        "scanned key outside namespace: {}",
                        String::from_utf8_lossy(&key)
                    )));
                }
                Ok((Arc::from(&key[prefix_len..]), value))
            });
        Ok(Box::new(iter))
    }
}
