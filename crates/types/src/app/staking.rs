// Path: crates/types/src/app/staking.rs
//! Staking queue records.
//!
//! Each queue entry stores a list of members under a time-based key. The
//! members are identified by their address fields; two members with equal
//! identity are duplicates even if they appear at different positions.

/// A member of a staking queue list that has a structural identity.
///
/// The identity borrows from the member so that deduplication can track
/// already-seen members without cloning addresses.
pub trait QueueMember {
    /// The totally ordered identity tuple of a member.
    type Identity<'a>: Ord
    where
        Self: 'a;

    /// Returns the identity of this member.
    fn identity(&self) -> Self::Identity<'_>;
}

/// A (delegator, validator) pair stored in the unbonding queue.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct DvPair {
    /// The bech32 address of the delegator.
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    /// The bech32 operator address of the validator.
    #[prost(string, tag = "2")]
    pub validator_address: String,
}

impl DvPair {
    /// Creates a new pair.
    pub fn new(delegator_address: impl Into<String>, validator_address: impl Into<String>) -> Self {
        Self {
            delegator_address: delegator_address.into(),
            validator_address: validator_address.into(),
        }
    }
}

impl QueueMember for DvPair {
    type Identity<'a> = (&'a str, &'a str);

    fn identity(&self) -> Self::Identity<'_> {
        (&self.delegator_address, &self.validator_address)
    }
}

/// The value of one unbonding queue entry.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct DvPairs {
    /// The pairs whose unbonding delegations mature at the entry's time.
    #[prost(message, repeated, tag = "1")]
    pub pairs: Vec<DvPair>,
}

/// A (delegator, source validator, destination validator) triplet stored in
/// the redelegation queue.
#[derive(Clone, PartialEq, Eq, Hash, ::prost::Message)]
pub struct DvvTriplet {
    /// The bech32 address of the delegator.
    #[prost(string, tag = "1")]
    pub delegator_address: String,
    /// The operator address of the validator the stake moves away from.
    #[prost(string, tag = "2")]
    pub validator_src_address: String,
    /// The operator address of the validator the stake moves to.
    #[prost(string, tag = "3")]
    pub validator_dst_address: String,
}

impl DvvTriplet {
    /// Creates a new triplet.
    pub fn new(
        delegator_address: impl Into<String>,
        validator_src_address: impl Into<String>,
        validator_dst_address: impl Into<String>,
    ) -> Self {
        Self {
            delegator_address: delegator_address.into(),
            validator_src_address: validator_src_address.into(),
            validator_dst_address: validator_dst_address.into(),
        }
    }
}

impl QueueMember for DvvTriplet {
    type Identity<'a> = (&'a str, &'a str, &'a str);

    fn identity(&self) -> Self::Identity<'_> {
        (
            &self.delegator_address,
            &self.validator_src_address,
            &self.validator_dst_address,
        )
    }
}

/// The value of one redelegation queue entry.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct DvvTriplets {
    /// The triplets whose redelegations mature at the entry's time.
    #[prost(message, repeated, tag = "1")]
    pub triplets: Vec<DvvTriplet>,
}

/// The value of one validator unbonding queue entry.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct ValAddresses {
    /// Operator addresses of validators that finish unbonding at the entry's
    /// time and height.
    #[prost(string, repeated, tag = "1")]
    pub addresses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn pair_identity_ignores_nothing_but_addresses() {
        let a = DvPair::new("d1", "v1");
        let b = DvPair::new("d1", "v1");
        let c = DvPair::new("d1", "v2");
        assert_eq!(a.identity(), b.identity());
        assert_ne!(a.identity(), c.identity());
    }

    #[test]
    fn triplet_identity_covers_destination() {
        let a = DvvTriplet::new("d1", "vA", "vB");
        let b = DvvTriplet::new("d1", "vA", "vC");
        assert_ne!(a.identity(), b.identity());
        assert!(a.identity() < b.identity());
    }

    #[test]
    fn pairs_wire_layout_matches_staking_schema() {
        let pairs = DvPairs {
            pairs: vec![DvPair::new("d", "v")],
        };
        // field 1 (len-delimited) -> nested field 1 "d", field 2 "v"
        assert_eq!(
            pairs.encode_to_vec(),
            vec![0x0a, 0x06, 0x0a, 0x01, b'd', 0x12, 0x01, b'v']
        );
    }

    #[test]
    fn empty_list_encodes_to_empty_bytes() {
        assert!(ValAddresses::default().encode_to_vec().is_empty());
        assert_eq!(
            ValAddresses::decode(&[][..]).unwrap(),
            ValAddresses::default()
        );
    }
}
