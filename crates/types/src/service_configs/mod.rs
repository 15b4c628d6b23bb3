// Path: crates/types/src/service_configs/mod.rs
//! Capability flags advertised by block lifecycle services.

use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// A bitmask representing the capabilities (hooks) a service exposes.
    #[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
    #[serde(transparent)]
    pub struct Capabilities: u32 {
        /// Implements the OnBeginBlock trait and its on_begin_block hook.
        const ON_BEGIN_BLOCK = 0b0001;
    }
}
