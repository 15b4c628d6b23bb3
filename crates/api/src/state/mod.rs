// Path: crates/api/src/state/mod.rs
//! Core traits and adapters for state access.

mod accessor;
pub mod namespaced;
mod overlay;

pub use accessor::*;
pub use namespaced::{namespace_prefix, NamespacedStateAccess};
pub use overlay::*;
