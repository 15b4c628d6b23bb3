// Path: crates/api/src/lifecycle/mod.rs
//! Defines traits for services that hook into the block processing lifecycle.

use crate::services::{BlockchainService, ServiceDirectory};
use crate::state::StateAccess;
use chainfix_types::error::BlockError;

/// Read-only context handed to lifecycle hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockContext {
    /// The height of the block being executed.
    pub block_height: u64,
}

impl BlockContext {
    /// Creates a context for `block_height`.
    pub fn at_height(block_height: u64) -> Self {
        Self { block_height }
    }
}

/// A trait for services that need to act before a block's transactions run.
///
/// Hooks run synchronously inside block execution. An error aborts the block
/// and halts the node; a hook must never swallow a failure that could leave
/// its state diverged from other nodes.
pub trait OnBeginBlock: BlockchainService {
    /// Called once per block, before any transaction is processed.
    fn on_begin_block(
        &self,
        state: &mut dyn StateAccess,
        ctx: &BlockContext,
    ) -> Result<(), BlockError>;
}

/// Runs every registered begin-block hook in registration order.
///
/// The first failure is returned immediately; later hooks do not run.
pub fn run_begin_block(
    services: &ServiceDirectory,
    state: &mut dyn StateAccess,
    ctx: &BlockContext,
) -> Result<(), BlockError> {
    for service in services.services() {
        if let Some(hook) = service.as_on_begin_block() {
            if let Err(e) = hook.on_begin_block(state, ctx) {
                tracing::error!(
                    target: "lifecycle",
                    service = service.id(),
                    height = ctx.block_height,
                    error = %e,
                    "Begin-block hook failed; halting block execution"
                );
                return Err(e);
            }
        }
    }
    Ok(())
}
