// Path: crates/services/src/forks/mod.rs
//! Height-triggered state repairs.
//!
//! At [`STAKING_REPAIR_HEIGHT`] the staking module's three maturity queues are
//! swept once and every queue entry is rewritten without the duplicate
//! members an earlier release appended. The sweep depends only on the
//! pre-state and visits keys in ascending byte order, so every node replaying
//! the block computes byte-identical post-state.
//!
//! Nothing records that the repair ran. Exact-equality gating on the height is
//! what guarantees it mutates state at most once.

use crate::upgrade::ForkUpgradeScheduler;
use chainfix_api::lifecycle::{BlockContext, OnBeginBlock};
use chainfix_api::services::BlockchainService;
use chainfix_api::state::{NamespacedStateAccess, StateAccess};
use chainfix_types::config::StakingRepairParams;
use chainfix_types::error::{BlockError, ForkError};
use chainfix_types::keys::STAKING_NAMESPACE;
use chainfix_types::service_configs::Capabilities;
use std::any::Any;

pub mod dedup;
pub mod sweepers;

pub use chainfix_types::config::STAKING_REPAIR_HEIGHT;
pub use sweepers::{
    dedup_redelegation_queue, dedup_unbonding_queue, dedup_validator_queue, SweepStats,
};

/// The outcome of one run of the staking queue repair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepairReport {
    /// The height at which the repair ran.
    pub height: u64,
    /// Unbonding queue counters.
    pub unbonding: SweepStats,
    /// Redelegation queue counters.
    pub redelegation: SweepStats,
    /// Validator queue counters.
    pub validators: SweepStats,
}

impl RepairReport {
    /// Total duplicate members removed across all queues.
    pub fn duplicates_removed(&self) -> usize {
        self.unbonding.duplicates_removed
            + self.redelegation.duplicates_removed
            + self.validators.duplicates_removed
    }
}

/// The staking queue repair and its trigger.
#[derive(Debug, Clone, Default)]
pub struct StakingQueueRepair {
    params: StakingRepairParams,
}

impl StakingQueueRepair {
    /// Creates a repair with explicit parameters.
    pub fn new(params: StakingRepairParams) -> Self {
        Self { params }
    }

    /// The repair's parameters.
    pub fn params(&self) -> &StakingRepairParams {
        &self.params
    }

    /// Runs the repair if `height` is exactly the trigger height.
    ///
    /// Returns `None` without touching state at every other height.
    pub fn maybe_repair_at_height(
        &self,
        state: &mut dyn StateAccess,
        height: u64,
    ) -> Result<Option<RepairReport>, ForkError> {
        if height != self.params.trigger_height {
            return Ok(None);
        }
        tracing::info!(target: "forks", height, "Deduplicating staking queues at fork height");
        let report = self.repair(state, height)?;
        tracing::debug!(
            target: "forks",
            height,
            duplicates = report.duplicates_removed(),
            "Staking queue repair complete"
        );
        Ok(Some(report))
    }

    /// Runs the three sweepers unconditionally, in fixed order, against the
    /// staking namespace of `state`.
    pub fn repair(
        &self,
        state: &mut dyn StateAccess,
        height: u64,
    ) -> Result<RepairReport, ForkError> {
        let mut staking = NamespacedStateAccess::new(state, STAKING_NAMESPACE);
        let horizon = &self.params.queue_horizon;

        let unbonding = dedup_unbonding_queue(&mut staking, horizon)?;
        let redelegation = dedup_redelegation_queue(&mut staking, horizon)?;
        let validators =
            dedup_validator_queue(&mut staking, horizon, self.params.validator_queue_height_cap)?;

        Ok(RepairReport {
            height,
            unbonding,
            redelegation,
            validators,
        })
    }
}

/// Runs the staking queue repair with the compiled-in parameters if `height`
/// is [`STAKING_REPAIR_HEIGHT`].
pub fn maybe_repair_at_height(
    state: &mut dyn StateAccess,
    height: u64,
) -> Result<Option<RepairReport>, ForkError> {
    StakingQueueRepair::default().maybe_repair_at_height(state, height)
}

/// The begin-block service carrying every height-triggered fork action.
///
/// Each block it runs the staking queue repair and then the fork-upgrade
/// scheduler. Either failing aborts the block.
#[derive(Debug, Clone, Default)]
pub struct ForkService {
    repair: StakingQueueRepair,
    scheduler: ForkUpgradeScheduler,
}

impl ForkService {
    /// Creates the service from its two components.
    pub fn new(repair: StakingQueueRepair, scheduler: ForkUpgradeScheduler) -> Self {
        Self { repair, scheduler }
    }
}

impl BlockchainService for ForkService {
    fn id(&self) -> &'static str {
        "forks"
    }

    fn capabilities(&self) -> Capabilities {
        Capabilities::ON_BEGIN_BLOCK
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_on_begin_block(&self) -> Option<&dyn OnBeginBlock> {
        Some(self)
    }
}

impl OnBeginBlock for ForkService {
    fn on_begin_block(
        &self,
        state: &mut dyn StateAccess,
        ctx: &BlockContext,
    ) -> Result<(), BlockError> {
        self.repair.maybe_repair_at_height(state, ctx.block_height)?;
        self.scheduler.schedule_fork_upgrade(state, ctx)?;
        Ok(())
    }
}
