// Path: crates/services/src/staking/mod.rs
//! Access to the staking module's maturity queues.
//!
//! All functions operate on a state view already confined to the staking
//! namespace (see [`chainfix_api::state::NamespacedStateAccess`]). Queue
//! iterators walk keys in ascending byte order, which for these keys is
//! chronological order.

use chainfix_api::state::{StateAccess, StateScanIter};
use chainfix_types::app::{DvPair, DvPairs, DvvTriplet, DvvTriplets, ValAddresses};
use chainfix_types::codec::{from_bytes_canonical, to_bytes_canonical};
use chainfix_types::error::ForkError;
use chainfix_types::error::StateError;
use chainfix_types::keys::{
    inclusive_end_bytes, redelegation_time_key, unbonding_delegation_time_key,
    validator_queue_key, REDELEGATION_QUEUE_KEY, UNBONDING_QUEUE_KEY, VALIDATOR_QUEUE_KEY,
};
use chrono::{DateTime, Utc};
use prost::Message;

/// Queue name used in errors and logs for the unbonding queue.
pub const UNBONDING_QUEUE: &str = "unbonding";
/// Queue name used in errors and logs for the redelegation queue.
pub const REDELEGATION_QUEUE: &str = "redelegation";
/// Queue name used in errors and logs for the validator queue.
pub const VALIDATOR_QUEUE: &str = "validator";

/// Returns an iterator over all unbonding queue entries maturing at or
/// before `end_time`.
pub fn ubd_queue_iterator<'a>(
    staking: &'a dyn StateAccess,
    end_time: &DateTime<Utc>,
) -> Result<StateScanIter<'a>, StateError> {
    let end = inclusive_end_bytes(&unbonding_delegation_time_key(end_time));
    staking.range_scan(UNBONDING_QUEUE_KEY, Some(end.as_slice()))
}

/// Returns an iterator over all redelegation queue entries maturing at or
/// before `end_time`.
pub fn redelegation_queue_iterator<'a>(
    staking: &'a dyn StateAccess,
    end_time: &DateTime<Utc>,
) -> Result<StateScanIter<'a>, StateError> {
    let end = inclusive_end_bytes(&redelegation_time_key(end_time));
    staking.range_scan(REDELEGATION_QUEUE_KEY, Some(end.as_slice()))
}

/// Returns an iterator over all validator queue entries up to the key built
/// from `end_time` and `end_height`, inclusive.
pub fn validator_queue_iterator<'a>(
    staking: &'a dyn StateAccess,
    end_time: &DateTime<Utc>,
    end_height: u64,
) -> Result<StateScanIter<'a>, StateError> {
    let end = inclusive_end_bytes(&validator_queue_key(end_time, end_height));
    staking.range_scan(VALIDATOR_QUEUE_KEY, Some(end.as_slice()))
}

fn load<M: Message + Default>(
    staking: &dyn StateAccess,
    queue: &'static str,
    key: &[u8],
) -> Result<M, ForkError> {
    match staking.get(key)? {
        Some(bytes) => from_bytes_canonical(&bytes).map_err(|e| ForkError::decode(queue, key, e)),
        None => Ok(M::default()),
    }
}

/// Reads the unbonding time slice at `time`; a missing slice is empty.
pub fn ubd_queue_timeslice(
    staking: &dyn StateAccess,
    time: &DateTime<Utc>,
) -> Result<Vec<DvPair>, ForkError> {
    let slice: DvPairs = load(staking, UNBONDING_QUEUE, &unbonding_delegation_time_key(time))?;
    Ok(slice.pairs)
}

/// Overwrites the unbonding time slice at `time`.
pub fn set_ubd_queue_timeslice(
    staking: &mut dyn StateAccess,
    time: &DateTime<Utc>,
    pairs: Vec<DvPair>,
) -> Result<(), StateError> {
    staking.insert(
        &unbonding_delegation_time_key(time),
        &to_bytes_canonical(&DvPairs { pairs }),
    )
}

/// Appends a pair to the unbonding time slice at `time`.
///
/// The append does not check for an existing identical pair; repeated calls
/// for the same pair and time produce the duplicates the fork repair removes.
pub fn insert_ubd_queue(
    staking: &mut dyn StateAccess,
    time: &DateTime<Utc>,
    pair: DvPair,
) -> Result<(), ForkError> {
    let mut pairs = ubd_queue_timeslice(&*staking, time)?;
    pairs.push(pair);
    Ok(set_ubd_queue_timeslice(staking, time, pairs)?)
}

/// Reads the redelegation time slice at `time`; a missing slice is empty.
pub fn redelegation_queue_timeslice(
    staking: &dyn StateAccess,
    time: &DateTime<Utc>,
) -> Result<Vec<DvvTriplet>, ForkError> {
    let slice: DvvTriplets = load(staking, REDELEGATION_QUEUE, &redelegation_time_key(time))?;
    Ok(slice.triplets)
}

/// Overwrites the redelegation time slice at `time`.
pub fn set_redelegation_queue_timeslice(
    staking: &mut dyn StateAccess,
    time: &DateTime<Utc>,
    triplets: Vec<DvvTriplet>,
) -> Result<(), StateError> {
    staking.insert(
        &redelegation_time_key(time),
        &to_bytes_canonical(&DvvTriplets { triplets }),
    )
}

/// Appends a triplet to the redelegation time slice at `time`, without
/// checking for an existing identical triplet.
pub fn insert_redelegation_queue(
    staking: &mut dyn StateAccess,
    time: &DateTime<Utc>,
    triplet: DvvTriplet,
) -> Result<(), ForkError> {
    let mut triplets = redelegation_queue_timeslice(&*staking, time)?;
    triplets.push(triplet);
    Ok(set_redelegation_queue_timeslice(staking, time, triplets)?)
}

/// Reads the validators finishing unbonding at `time` and `height`.
pub fn unbonding_validators(
    staking: &dyn StateAccess,
    time: &DateTime<Utc>,
    height: u64,
) -> Result<Vec<String>, ForkError> {
    let slice: ValAddresses = load(staking, VALIDATOR_QUEUE, &validator_queue_key(time, height))?;
    Ok(slice.addresses)
}

/// Overwrites the validators finishing unbonding at `time` and `height`.
pub fn set_unbonding_validators(
    staking: &mut dyn StateAccess,
    time: &DateTime<Utc>,
    height: u64,
    addresses: Vec<String>,
) -> Result<(), StateError> {
    staking.insert(
        &validator_queue_key(time, height),
        &to_bytes_canonical(&ValAddresses { addresses }),
    )
}

/// Appends a validator to the queue entry at `time` and `height`, without
/// checking whether it is already present.
pub fn insert_unbonding_validator(
    staking: &mut dyn StateAccess,
    time: &DateTime<Utc>,
    height: u64,
    address: impl Into<String>,
) -> Result<(), ForkError> {
    let mut addresses = unbonding_validators(&*staking, time, height)?;
    addresses.push(address.into());
    Ok(set_unbonding_validators(staking, time, height, addresses)?)
}
