// Path: crates/types/src/config/mod.rs
//! Parameter structures and compile-time fork constants.
//!
//! Fork heights are part of the binary's identity, not runtime configuration:
//! every node on the network must agree on them. The parameter structs below
//! default to these constants and exist so that the same code paths can be
//! exercised at other heights.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The block height at which the staking queues are deduplicated.
pub const STAKING_REPAIR_HEIGHT: u64 = 5_989_487;

/// Unix seconds of `9999-09-09T09:09:09Z`.
const QUEUE_HORIZON_SECS: i64 = 253_392_484_149;
/// Nanoseconds added to [`QUEUE_HORIZON_SECS`].
const QUEUE_HORIZON_NANOS: u32 = 9;

/// The per-entry height cap used when sweeping the validator queue.
pub const VALIDATOR_QUEUE_HEIGHT_CAP: u64 = 99_999_999_999_999;

/// The number of blocks ahead of a fork height at which its plan is scheduled.
pub const UPGRADE_LEAD_BLOCKS: u64 = 10;

/// The far-future timestamp that bounds every queue sweep, so that all
/// existing entries are visited regardless of their maturity time.
pub fn queue_horizon() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(QUEUE_HORIZON_SECS, QUEUE_HORIZON_NANOS)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Parameters of the one-shot staking queue repair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingRepairParams {
    /// The only block height at which the repair mutates state.
    pub trigger_height: u64,
    /// The inclusive time bound of every queue sweep.
    pub queue_horizon: DateTime<Utc>,
    /// The inclusive height bound of the validator queue sweep.
    pub validator_queue_height_cap: u64,
}

impl Default for StakingRepairParams {
    fn default() -> Self {
        Self {
            trigger_height: STAKING_REPAIR_HEIGHT,
            queue_horizon: queue_horizon(),
            validator_queue_height_cap: VALIDATOR_QUEUE_HEIGHT_CAP,
        }
    }
}

/// A named upgrade that is scheduled when the chain approaches its height.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkUpgrade {
    /// The upgrade handler name written into the plan.
    pub name: String,
    /// The height at which the upgrade applies.
    pub height: u64,
    /// Plan metadata.
    #[serde(default)]
    pub info: String,
}

/// Parameters of the fork-upgrade scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForkUpgradeParams {
    /// How many blocks before `height` the plan is written.
    pub lead_blocks: u64,
    /// The known fork upgrades.
    pub upgrades: Vec<ForkUpgrade>,
}

impl Default for ForkUpgradeParams {
    fn default() -> Self {
        Self {
            lead_blocks: UPGRADE_LEAD_BLOCKS,
            upgrades: vec![ForkUpgrade {
                name: "v2".to_string(),
                height: 7_302_000,
                info: String::new(),
            }],
        }
    }
}

impl ForkUpgradeParams {
    /// Returns the upgrade whose plan must be scheduled during `block_height`.
    pub fn due_at(&self, block_height: u64) -> Option<&ForkUpgrade> {
        let target = block_height.checked_add(self.lead_blocks)?;
        self.upgrades.iter().find(|upgrade| upgrade.height == target)
    }
}
