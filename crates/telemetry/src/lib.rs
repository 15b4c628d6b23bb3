// Path: crates/telemetry/src/lib.rs
//! Structured logging initialisation.

pub mod init;

pub use init::{init_test_tracing, init_tracing};
