// Path: crates/services/src/lib.rs
#![forbid(unsafe_code)]
//! # chainfix Services
//!
//! Services that run inside block execution:
//!
//! - [`staking`] exposes the staking module's queue layout: iterator factories
//!   over the three maturity queues and the time-slice accessors the staking
//!   module writes through.
//! - [`forks`] holds the one-shot repair that deduplicates those queues at a
//!   fixed height, and the [`forks::ForkService`] that wires it into
//!   begin-block.
//! - [`upgrade`] schedules named upgrade plans ahead of known fork heights.

pub mod forks;
pub mod staking;
pub mod upgrade;
