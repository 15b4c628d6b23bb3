// Path: crates/services/src/forks/sweepers.rs
//! The three per-queue deduplication passes.
//!
//! Every sweeper has the same shape: drain the queue iterator while decoding,
//! deduplicating and re-encoding each entry, release the iterator, then write
//! every rewritten value back under its original key in ascending key order.
//! No key is ever created or removed.

use crate::forks::dedup::{dedup_first_occurrence, dedup_sorted};
use crate::staking::{
    redelegation_queue_iterator, ubd_queue_iterator, validator_queue_iterator,
    REDELEGATION_QUEUE, UNBONDING_QUEUE, VALIDATOR_QUEUE,
};
use chainfix_api::state::{StateAccess, StateScanIter};
use chainfix_types::app::{DvPairs, DvvTriplets, ValAddresses};
use chainfix_types::codec::{from_bytes_canonical, to_bytes_canonical};
use chainfix_types::error::ForkError;
use chrono::{DateTime, Utc};
use prost::Message;
use std::sync::Arc;

/// Counters collected by one sweeper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepStats {
    /// Queue entries visited (and rewritten).
    pub entries: usize,
    /// Entries whose stored bytes changed.
    pub entries_changed: usize,
    /// Duplicate members removed across all entries.
    pub duplicates_removed: usize,
}

/// A queue value whose member list can be deduplicated.
trait QueueRecord: Message + Default {
    const QUEUE: &'static str;

    fn member_count(&self) -> usize;

    fn deduplicated(self) -> Self;
}

impl QueueRecord for DvPairs {
    const QUEUE: &'static str = UNBONDING_QUEUE;

    fn member_count(&self) -> usize {
        self.pairs.len()
    }

    fn deduplicated(self) -> Self {
        Self {
            pairs: dedup_first_occurrence(self.pairs),
        }
    }
}

impl QueueRecord for DvvTriplets {
    const QUEUE: &'static str = REDELEGATION_QUEUE;

    fn member_count(&self) -> usize {
        self.triplets.len()
    }

    fn deduplicated(self) -> Self {
        Self {
            triplets: dedup_first_occurrence(self.triplets),
        }
    }
}

impl QueueRecord for ValAddresses {
    const QUEUE: &'static str = VALIDATOR_QUEUE;

    fn member_count(&self) -> usize {
        self.addresses.len()
    }

    // Sorting imposes the total order; input order is not preserved.
    fn deduplicated(self) -> Self {
        Self {
            addresses: dedup_sorted(self.addresses),
        }
    }
}

type Rewrites = Vec<(Arc<[u8]>, Vec<u8>)>;

/// Drains `iter`, returning the rewritten value of every entry.
///
/// The iterator is consumed and therefore released before this returns, on
/// success and on failure alike.
fn rewrite_entries<R: QueueRecord>(
    iter: StateScanIter<'_>,
) -> Result<(Rewrites, SweepStats), ForkError> {
    let mut stats = SweepStats::default();
    let mut rewrites = Vec::new();
    for item in iter {
        let (key, value) = item?;
        let record: R =
            from_bytes_canonical(&value).map_err(|e| ForkError::decode(R::QUEUE, &key, e))?;
        let before = record.member_count();
        let repaired = record.deduplicated();
        let bytes = to_bytes_canonical(&repaired);

        stats.entries += 1;
        stats.duplicates_removed += before - repaired.member_count();
        if bytes.as_slice() != value.as_ref() {
            stats.entries_changed += 1;
        }
        rewrites.push((key, bytes));
    }
    Ok((rewrites, stats))
}

fn write_back(staking: &mut dyn StateAccess, rewrites: Rewrites) -> Result<(), ForkError> {
    for (key, bytes) in rewrites {
        staking.insert(&key, &bytes)?;
    }
    Ok(())
}

fn log_sweep(queue: &'static str, stats: &SweepStats) {
    tracing::debug!(
        target: "forks",
        queue,
        entries = stats.entries,
        changed = stats.entries_changed,
        duplicates = stats.duplicates_removed,
        "Swept staking queue"
    );
}

/// Deduplicates the (delegator, validator) pairs of every unbonding queue
/// entry maturing at or before `horizon`, keeping first occurrences in order.
pub fn dedup_unbonding_queue(
    staking: &mut dyn StateAccess,
    horizon: &DateTime<Utc>,
) -> Result<SweepStats, ForkError> {
    let (rewrites, stats) = rewrite_entries::<DvPairs>(ubd_queue_iterator(&*staking, horizon)?)?;
    write_back(staking, rewrites)?;
    log_sweep(UNBONDING_QUEUE, &stats);
    Ok(stats)
}

/// Deduplicates the (delegator, source, destination) triplets of every
/// redelegation queue entry maturing at or before `horizon`, keeping first
/// occurrences in order.
pub fn dedup_redelegation_queue(
    staking: &mut dyn StateAccess,
    horizon: &DateTime<Utc>,
) -> Result<SweepStats, ForkError> {
    let (rewrites, stats) =
        rewrite_entries::<DvvTriplets>(redelegation_queue_iterator(&*staking, horizon)?)?;
    write_back(staking, rewrites)?;
    log_sweep(REDELEGATION_QUEUE, &stats);
    Ok(stats)
}

/// Replaces the address list of every validator queue entry up to
/// (`horizon`, `height_cap`) with its distinct addresses in ascending order.
pub fn dedup_validator_queue(
    staking: &mut dyn StateAccess,
    horizon: &DateTime<Utc>,
    height_cap: u64,
) -> Result<SweepStats, ForkError> {
    let (rewrites, stats) = rewrite_entries::<ValAddresses>(validator_queue_iterator(
        &*staking, horizon, height_cap,
    )?)?;
    write_back(staking, rewrites)?;
    log_sweep(VALIDATOR_QUEUE, &stats);
    Ok(stats)
}
