// Path: crates/services/src/upgrade/mod.rs
//! Upgrade plan bookkeeping and the fork-upgrade scheduler.
//!
//! A fork upgrade is a named upgrade whose plan is written into state a fixed
//! number of blocks before its height, so that a binary without a governance
//! proposal can still hand over to the upgrade handler at that height.

use chainfix_api::lifecycle::BlockContext;
use chainfix_api::state::{namespace_prefix, StateAccess};
use chainfix_types::app::Plan;
use chainfix_types::codec::{from_bytes_canonical, to_bytes_canonical};
use chainfix_types::config::ForkUpgradeParams;
use chainfix_types::error::UpgradeError;
use chainfix_types::keys::{upgrade_done_key, UPGRADE_NAMESPACE, UPGRADE_PLAN_KEY};

fn store_key(key: &[u8]) -> Vec<u8> {
    [namespace_prefix(UPGRADE_NAMESPACE).as_slice(), key].concat()
}

/// Reads and writes the upgrade module's plan and completion records.
pub struct UpgradeKeeper;

impl UpgradeKeeper {
    /// Schedules `plan`, replacing any pending plan.
    ///
    /// The plan must have a name, a positive height strictly after
    /// `current_height`, and must not name an upgrade that already completed.
    pub fn schedule_upgrade(
        state: &mut dyn StateAccess,
        plan: &Plan,
        current_height: u64,
    ) -> Result<(), UpgradeError> {
        if plan.name.is_empty() {
            return Err(UpgradeError::InvalidPlan("name cannot be empty".into()));
        }
        if plan.height <= 0 {
            return Err(UpgradeError::InvalidPlan(
                "height must be greater than 0".into(),
            ));
        }
        if u64::try_from(plan.height).map_or(true, |height| height <= current_height) {
            return Err(UpgradeError::InThePast {
                plan_height: plan.height,
                current_height,
            });
        }
        if let Some(height) = Self::done_height(&*state, &plan.name)? {
            return Err(UpgradeError::AlreadyCompleted {
                name: plan.name.clone(),
                height,
            });
        }

        state.insert(&store_key(UPGRADE_PLAN_KEY), &to_bytes_canonical(plan))?;
        Ok(())
    }

    /// Returns the pending upgrade plan, if any.
    pub fn upgrade_plan(state: &dyn StateAccess) -> Result<Option<Plan>, UpgradeError> {
        state
            .get(&store_key(UPGRADE_PLAN_KEY))?
            .map(|bytes| {
                from_bytes_canonical::<Plan>(&bytes)
                    .map_err(|e| UpgradeError::Decode(e.to_string()))
            })
            .transpose()
    }

    /// Removes the pending upgrade plan.
    pub fn clear_upgrade_plan(state: &mut dyn StateAccess) -> Result<(), UpgradeError> {
        state.delete(&store_key(UPGRADE_PLAN_KEY))?;
        Ok(())
    }

    /// Returns the height at which upgrade `name` completed, if it has.
    pub fn done_height(state: &dyn StateAccess, name: &str) -> Result<Option<u64>, UpgradeError> {
        state
            .get(&store_key(&upgrade_done_key(name)))?
            .map(|bytes| {
                <[u8; 8]>::try_from(bytes.as_slice())
                    .map(u64::from_be_bytes)
                    .map_err(|_| UpgradeError::Decode(format!("invalid done height for '{name}'")))
            })
            .transpose()
    }

    /// Records that upgrade `name` completed at `height`.
    pub fn mark_done(
        state: &mut dyn StateAccess,
        name: &str,
        height: u64,
    ) -> Result<(), UpgradeError> {
        state.insert(&store_key(&upgrade_done_key(name)), &height.to_be_bytes())?;
        Ok(())
    }
}

/// Writes the plan of a known fork upgrade when the chain is `lead_blocks`
/// away from its height.
#[derive(Debug, Clone, Default)]
pub struct ForkUpgradeScheduler {
    params: ForkUpgradeParams,
}

impl ForkUpgradeScheduler {
    /// Creates a scheduler for the given fork upgrades.
    pub fn new(params: ForkUpgradeParams) -> Self {
        Self { params }
    }

    /// Schedules the fork upgrade due at `ctx.block_height`, if there is one,
    /// and returns the plan written.
    pub fn schedule_fork_upgrade(
        &self,
        state: &mut dyn StateAccess,
        ctx: &BlockContext,
    ) -> Result<Option<Plan>, UpgradeError> {
        let Some(upgrade) = self.params.due_at(ctx.block_height) else {
            return Ok(None);
        };
        let height = i64::try_from(upgrade.height)
            .map_err(|_| UpgradeError::HeightOutOfRange(upgrade.height))?;
        let plan = Plan {
            name: upgrade.name.clone(),
            height,
            info: upgrade.info.clone(),
        };

        UpgradeKeeper::schedule_upgrade(state, &plan, ctx.block_height)?;
        tracing::info!(
            target: "upgrade",
            name = %plan.name,
            plan_height = plan.height,
            height = ctx.block_height,
            "Scheduled fork upgrade"
        );
        Ok(Some(plan))
    }
}
