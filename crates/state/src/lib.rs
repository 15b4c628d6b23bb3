// Path: crates/state/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! # chainfix State
//!
//! State store implementations for the chainfix workspace.

/// An ordered, in-memory key-value store.
pub mod memory;

pub use memory::MemoryState;
