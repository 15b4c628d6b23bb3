// Path: crates/types/src/app/mod.rs
//! Persisted application records.
//!
//! The staking records mirror the protobuf schemas the staking module writes
//! into its queues; the upgrade record mirrors the pending upgrade plan.

/// Staking queue records (`DvPairs`, `DvvTriplets`, `ValAddresses`).
pub mod staking;
/// Upgrade plan records.
pub mod upgrade;

pub use staking::*;
pub use upgrade::*;
