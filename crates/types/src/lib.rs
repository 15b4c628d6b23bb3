// Path: crates/types/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]

//! # chainfix Types
//!
//! The foundational crate of the workspace, containing the persisted record
//! schemas, well-known state keys, parameter structs and error enums shared by
//! every other crate.
//!
//! ## Architectural Role
//!
//! `chainfix-types` has no dependency on any other workspace crate. Keeping the
//! canonical definitions of the staking queue records and their key layout here
//! guarantees that every component reading or rewriting those records agrees on
//! the exact bytes that end up in state.

/// Persisted record schemas for the staking and upgrade modules.
pub mod app;
/// The canonical protobuf codec for consensus-critical state.
pub mod codec;
/// Parameter structs and compile-time fork constants.
pub mod config;
/// A unified set of all error types used across the workspace.
pub mod error;
/// Well-known namespaces, key prefixes and key builders.
pub mod keys;
/// Service capability flags.
pub mod service_configs;
