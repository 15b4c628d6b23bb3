// Path: crates/services/tests/fork_repair_e2e.rs
//! End-to-end runs of the staking queue repair through the begin-block hook.

use anyhow::Result;
use chainfix_api::lifecycle::{run_begin_block, BlockContext};
use chainfix_api::services::{BlockchainService, ServiceDirectory};
use chainfix_api::state::{NamespacedStateAccess, StateAccess, StateOverlay};
use chainfix_services::forks::{ForkService, StakingQueueRepair, STAKING_REPAIR_HEIGHT};
use chainfix_services::staking::{
    insert_redelegation_queue, insert_ubd_queue, insert_unbonding_validator,
    redelegation_queue_timeslice, ubd_queue_timeslice, unbonding_validators,
};
use chainfix_services::upgrade::{ForkUpgradeScheduler, UpgradeKeeper};
use chainfix_state::MemoryState;
use chainfix_types::app::{DvPair, DvvTriplet, Plan};
use chainfix_types::error::{BlockError, ForkError};
use chainfix_types::keys::{validator_queue_key, STAKING_NAMESPACE};
use chrono::{DateTime, TimeZone, Utc};
use std::sync::Arc;

fn at(month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, month, day, 14, 0, 0).unwrap()
}

fn services() -> ServiceDirectory {
    let forks: Arc<dyn BlockchainService> = Arc::new(ForkService::default());
    ServiceDirectory::new(vec![forks])
}

fn begin_block(state: &mut MemoryState, height: u64) -> Result<()> {
    chainfix_telemetry::init_test_tracing();
    run_begin_block(&services(), state, &BlockContext::at_height(height))?;
    Ok(())
}

/// Seeds all three queues with duplicate-bearing entries, in the shape the
/// faulty staking release left behind.
fn seeded_state() -> Result<MemoryState> {
    let mut state = MemoryState::new();
    let mut staking = NamespacedStateAccess::new(&mut state, STAKING_NAMESPACE);

    for (d, v) in [("d1", "v1"), ("d2", "v2"), ("d1", "v1"), ("d3", "v3")] {
        insert_ubd_queue(&mut staking, &at(3, 1), DvPair::new(d, v))?;
    }
    insert_ubd_queue(&mut staking, &at(3, 2), DvPair::new("d9", "v9"))?;

    for (d, s, t) in [("d1", "vA", "vB"), ("d1", "vA", "vC"), ("d1", "vA", "vB")] {
        insert_redelegation_queue(&mut staking, &at(4, 1), DvvTriplet::new(d, s, t))?;
    }
    insert_redelegation_queue(&mut staking, &at(4, 2), DvvTriplet::new("d1", "vA", "vB"))?;

    for addr in ["valB", "valA", "valB", "valC", "valA"] {
        insert_unbonding_validator(&mut staking, &at(5, 1), 1_000, addr)?;
    }
    drop(staking);
    Ok(state)
}

#[test]
fn scenario_unbonding_pairs_keep_first_occurrence_order() -> Result<()> {
    let mut state = seeded_state()?;
    begin_block(&mut state, STAKING_REPAIR_HEIGHT)?;

    let staking = NamespacedStateAccess::new(&mut state, STAKING_NAMESPACE);
    assert_eq!(
        ubd_queue_timeslice(&staking, &at(3, 1))?,
        vec![
            DvPair::new("d1", "v1"),
            DvPair::new("d2", "v2"),
            DvPair::new("d3", "v3"),
        ]
    );
    assert_eq!(ubd_queue_timeslice(&staking, &at(3, 2))?, vec![DvPair::new("d9", "v9")]);
    Ok(())
}

#[test]
fn scenario_redelegation_triplets_with_partial_overlap() -> Result<()> {
    let mut state = seeded_state()?;
    begin_block(&mut state, STAKING_REPAIR_HEIGHT)?;

    let staking = NamespacedStateAccess::new(&mut state, STAKING_NAMESPACE);
    assert_eq!(
        redelegation_queue_timeslice(&staking, &at(4, 1))?,
        vec![
            DvvTriplet::new("d1", "vA", "vB"),
            DvvTriplet::new("d1", "vA", "vC"),
        ]
    );
    // Already clean entry is structurally unchanged.
    assert_eq!(
        redelegation_queue_timeslice(&staking, &at(4, 2))?,
        vec![DvvTriplet::new("d1", "vA", "vB")]
    );
    Ok(())
}

#[test]
fn scenario_validator_queue_is_sorted() -> Result<()> {
    let mut state = seeded_state()?;
    begin_block(&mut state, STAKING_REPAIR_HEIGHT)?;

    let staking = NamespacedStateAccess::new(&mut state, STAKING_NAMESPACE);
    assert_eq!(
        unbonding_validators(&staking, &at(5, 1), 1_000)?,
        vec!["valA", "valB", "valC"]
    );
    Ok(())
}

#[test]
fn scenario_no_op_before_trigger_height() -> Result<()> {
    let mut state = seeded_state()?;
    let before = state.snapshot();
    begin_block(&mut state, STAKING_REPAIR_HEIGHT - 1)?;
    assert_eq!(state.snapshot(), before);
    Ok(())
}

#[test]
fn scenario_second_run_is_byte_identical() -> Result<()> {
    let mut state = seeded_state()?;
    let repair = StakingQueueRepair::default();

    repair.maybe_repair_at_height(&mut state, STAKING_REPAIR_HEIGHT)?;
    let once = state.snapshot();
    let second = repair
        .maybe_repair_at_height(&mut state, STAKING_REPAIR_HEIGHT)?
        .expect("repair ran");
    assert_eq!(state.snapshot(), once);
    assert_eq!(second.duplicates_removed(), 0);
    Ok(())
}

#[test]
fn buffered_block_commit_matches_direct_execution() -> Result<()> {
    let mut direct = seeded_state()?;
    begin_block(&mut direct, STAKING_REPAIR_HEIGHT)?;

    let mut committed = seeded_state()?;
    let changes = {
        let mut overlay = StateOverlay::new(&committed);
        begin_block_on(&mut overlay, STAKING_REPAIR_HEIGHT)?;
        overlay.into_ordered_batch()
    };
    // Rewrites never delete.
    assert!(changes.1.is_empty());
    committed.apply_changes(changes);

    assert_eq!(committed.snapshot(), direct.snapshot());
    Ok(())
}

fn begin_block_on(state: &mut dyn StateAccess, height: u64) -> Result<()> {
    run_begin_block(&services(), state, &BlockContext::at_height(height))?;
    Ok(())
}

#[test]
fn failed_validator_sweep_leaves_committed_state_untouched() -> Result<()> {
    let mut committed = MemoryState::new();
    {
        let mut staking = NamespacedStateAccess::new(&mut committed, STAKING_NAMESPACE);
        for (d, v) in [("d1", "v1"), ("d1", "v1")] {
            insert_ubd_queue(&mut staking, &at(3, 1), DvPair::new(d, v))?;
        }
        staking.insert(&validator_queue_key(&at(5, 1), 1), &[0xff])?;
    }
    let before = committed.snapshot();

    let result = {
        let mut overlay = StateOverlay::new(&committed);
        let result = run_begin_block(
            &services(),
            &mut overlay,
            &BlockContext::at_height(STAKING_REPAIR_HEIGHT),
        );
        // The unbonding sweep already ran, so its rewrite sits in the buffer.
        assert!(!overlay.is_empty());
        result
    };

    assert!(matches!(
        result,
        Err(BlockError::Fork(ForkError::Decode { queue: "validator", .. }))
    ));
    assert_eq!(committed.snapshot(), before);
    Ok(())
}

#[test]
fn fork_upgrade_plan_is_written_ahead_of_v2() -> Result<()> {
    let mut state = MemoryState::new();
    begin_block(&mut state, 7_301_989)?;
    assert_eq!(UpgradeKeeper::upgrade_plan(&state)?, None);

    begin_block(&mut state, 7_301_990)?;
    assert_eq!(UpgradeKeeper::upgrade_plan(&state)?, Some(Plan::new("v2", 7_302_000)));
    Ok(())
}

#[test]
fn repair_and_scheduler_coexist_in_one_service() -> Result<()> {
    let mut state = seeded_state()?;
    let service = ForkService::new(StakingQueueRepair::default(), ForkUpgradeScheduler::default());
    let services = ServiceDirectory::new(vec![Arc::new(service) as Arc<dyn BlockchainService>]);
    run_begin_block(
        &services,
        &mut state,
        &BlockContext::at_height(STAKING_REPAIR_HEIGHT),
    )?;
    // The repair height is not a fork-upgrade lead height.
    assert_eq!(UpgradeKeeper::upgrade_plan(&state)?, None);
    Ok(())
}
