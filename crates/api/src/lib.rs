// Path: crates/api/src/lib.rs
#![forbid(unsafe_code)]
#![deny(missing_docs)]
//! # chainfix API
//!
//! Core traits and interfaces for the chainfix workspace. This crate defines
//! the stable contract between a host node and the services it runs inside
//! block execution: how state is read, scanned and written, and how services
//! hook into the start of a block.

pub mod lifecycle;
pub mod services;
pub mod state;
