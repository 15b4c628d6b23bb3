// Path: crates/types/src/error/mod.rs
//! Core error types for the chainfix workspace.

use thiserror::Error;

/// Errors related to the key-value state store.
#[derive(Error, Debug)]
pub enum StateError {
    /// An error occurred while writing to the state.
    #[error("State write error: {0}")]
    WriteError(String),
    /// The provided key was invalid for the accessed namespace.
    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Errors raised while repairing the staking queues at the fork height.
///
/// Every variant is fatal: the begin-block hook propagates it and the node
/// halts instead of committing a divergent state.
#[derive(Error, Debug)]
pub enum ForkError {
    /// A queue entry could not be decoded with the queue's schema.
    #[error("Failed to decode {queue} entry at key {key}: {source}")]
    Decode {
        /// The name of the queue being swept.
        queue: &'static str,
        /// The hex-encoded key of the entry.
        key: String,
        /// The underlying protobuf error.
        #[source]
        source: prost::DecodeError,
    },
    /// Reading or writing the staking store failed.
    #[error("State access error: {0}")]
    State(#[from] StateError),
}

impl ForkError {
    /// Builds a decode error for the entry stored under `key`.
    pub fn decode(queue: &'static str, key: &[u8], source: prost::DecodeError) -> Self {
        Self::Decode {
            queue,
            key: hex::encode(key),
            source,
        }
    }
}

/// Errors related to scheduling and tracking software upgrades.
#[derive(Error, Debug)]
pub enum UpgradeError {
    /// The plan failed basic validation.
    #[error("Invalid upgrade plan: {0}")]
    InvalidPlan(String),
    /// The plan's height is not strictly after the current block.
    #[error("Upgrade cannot be scheduled in the past: plan height {plan_height}, current height {current_height}")]
    InThePast {
        /// The height requested by the plan.
        plan_height: i64,
        /// The height of the block being executed.
        current_height: u64,
    },
    /// An upgrade with the same name has already been applied.
    #[error("Upgrade with name '{name}' has already been completed at height {height}")]
    AlreadyCompleted {
        /// The upgrade name.
        name: String,
        /// The height at which it completed.
        height: u64,
    },
    /// A height does not fit the plan's signed 64-bit field.
    #[error("Upgrade height {0} is out of range")]
    HeightOutOfRange(u64),
    /// A stored upgrade record could not be decoded.
    #[error("Failed to decode stored upgrade record: {0}")]
    Decode(String),
    /// Reading or writing the upgrade store failed.
    #[error("State access error: {0}")]
    State(#[from] StateError),
}

/// Errors returned from block lifecycle hooks.
///
/// A hook error aborts block execution.
#[derive(Error, Debug)]
pub enum BlockError {
    /// The staking queue repair failed.
    #[error("Staking queue repair failed: {0}")]
    Fork(#[from] ForkError),
    /// Scheduling a fork upgrade failed.
    #[error("Fork upgrade scheduling failed: {0}")]
    Upgrade(#[from] UpgradeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn decode_error_carries_hex_key_and_queue() {
        let source = crate::app::DvPairs::decode(&[0xff][..]).unwrap_err();
        let err = ForkError::decode("unbonding", &[0x41, 0x01], source);
        let msg = err.to_string();
        assert!(msg.contains("unbonding"));
        assert!(msg.contains("4101"));
    }

    #[test]
    fn block_error_wraps_state_error_through_fork() {
        let err: BlockError = ForkError::from(StateError::WriteError("disk full".into())).into();
        assert!(matches!(err, BlockError::Fork(ForkError::State(_))));
        assert!(err.to_string().contains("disk full"));
    }
}
