// Path: crates/types/src/keys/mod.rs
//! Well-known namespaces, key prefixes and key builders.
//!
//! Queue keys embed a sortable textual timestamp so that the store's
//! ascending byte order is also chronological order.

use chrono::{DateTime, Utc};

/// The namespace holding all staking module state.
pub const STAKING_NAMESPACE: &[u8] = b"staking";
/// The namespace holding all upgrade module state.
pub const UPGRADE_NAMESPACE: &[u8] = b"upgrade";

/// Key prefix of the unbonding delegation queue.
pub const UNBONDING_QUEUE_KEY: &[u8] = &[0x41];
/// Key prefix of the redelegation queue.
pub const REDELEGATION_QUEUE_KEY: &[u8] = &[0x42];
/// Key prefix of the validator unbonding queue.
pub const VALIDATOR_QUEUE_KEY: &[u8] = &[0x43];

/// The key of the single pending upgrade plan.
pub const UPGRADE_PLAN_KEY: &[u8] = &[0x00];
/// Key prefix of completed upgrade heights, keyed by upgrade name.
pub const UPGRADE_DONE_PREFIX: &[u8] = &[0x01];

/// The layout used by [`format_time_bytes`]. Nine fractional digits, no zone.
pub const SORTABLE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.9f";

/// Formats `time` (in UTC) as fixed-width, lexicographically sortable bytes.
pub fn format_time_bytes(time: &DateTime<Utc>) -> Vec<u8> {
    time.format(SORTABLE_TIME_FORMAT).to_string().into_bytes()
}

/// Returns the unbonding queue key for entries maturing at `time`.
pub fn unbonding_delegation_time_key(time: &DateTime<Utc>) -> Vec<u8> {
    [UNBONDING_QUEUE_KEY, &format_time_bytes(time)].concat()
}

/// Returns the redelegation queue key for entries maturing at `time`.
pub fn redelegation_time_key(time: &DateTime<Utc>) -> Vec<u8> {
    [REDELEGATION_QUEUE_KEY, &format_time_bytes(time)].concat()
}

/// Returns the validator queue key for validators finishing unbonding at
/// `time` and `height`.
///
/// Layout: prefix, the 8-byte big-endian length of the time bytes, the time
/// bytes, then the 8-byte big-endian height.
pub fn validator_queue_key(time: &DateTime<Utc>, height: u64) -> Vec<u8> {
    let time_bz = format_time_bytes(time);
    let mut key = Vec::with_capacity(VALIDATOR_QUEUE_KEY.len() + 8 + time_bz.len() + 8);
    key.extend_from_slice(VALIDATOR_QUEUE_KEY);
    key.extend_from_slice(&(time_bz.len() as u64).to_be_bytes());
    key.extend_from_slice(&time_bz);
    key.extend_from_slice(&height.to_be_bytes());
    key
}

/// Turns an inclusive upper bound into the exclusive end of a half-open range.
pub fn inclusive_end_bytes(key: &[u8]) -> Vec<u8> {
    let mut end = Vec::with_capacity(key.len() + 1);
    end.extend_from_slice(key);
    end.push(0x00);
    end
}

/// Returns the key recording the completion height of upgrade `name`.
pub fn upgrade_done_key(name: &str) -> Vec<u8> {
    [UPGRADE_DONE_PREFIX, name.as_bytes()].concat()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn time_bytes_are_fixed_width_and_sortable() {
        let early = Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2023, 11, 1, 0, 0, 0).unwrap();
        let a = format_time_bytes(&early);
        let b = format_time_bytes(&late);
        assert_eq!(a, b"2023-03-01T12:00:00.000000000".to_vec());
        assert_eq!(a.len(), b.len());
        assert!(a < b);
    }

    #[test]
    fn validator_queue_key_layout() {
        let t = Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap();
        let key = validator_queue_key(&t, 7);
        assert_eq!(key[0], 0x43);
        assert_eq!(&key[1..9], &29u64.to_be_bytes());
        assert_eq!(&key[9..38], b"2023-03-01T12:00:00.000000000");
        assert_eq!(&key[38..], &7u64.to_be_bytes());
    }

    #[test]
    fn inclusive_end_sorts_after_bound_and_before_successors() {
        let t = Utc.with_ymd_and_hms(2023, 3, 1, 12, 0, 0).unwrap();
        let bound = unbonding_delegation_time_key(&t);
        let end = inclusive_end_bytes(&bound);
        assert!(bound < end);
        let later = unbonding_delegation_time_key(&(t + chrono::Duration::nanoseconds(1)));
        assert!(end < later);
    }
}
