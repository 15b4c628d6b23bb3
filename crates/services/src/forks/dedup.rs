// Path: crates/services/src/forks/dedup.rs
//! Deterministic deduplication of queue member lists.

use chainfix_types::app::QueueMember;
use std::collections::BTreeSet;

/// Removes members whose identity was already seen earlier in `items`.
///
/// The first occurrence wins and the relative order of the survivors is the
/// input order, so the output is always a subsequence of the input.
pub fn dedup_first_occurrence<T: QueueMember>(items: Vec<T>) -> Vec<T> {
    let keep: Vec<bool> = {
        let mut seen = BTreeSet::new();
        items.iter().map(|item| seen.insert(item.identity())).collect()
    };
    items
        .into_iter()
        .zip(keep)
        .filter_map(|(item, keep)| keep.then_some(item))
        .collect()
}

/// Returns the distinct values of `items` in ascending order.
///
/// `String` ordering is the lexicographic order of the UTF-8 bytes, which is
/// the total order every node agrees on.
pub fn dedup_sorted<T: Ord>(items: Vec<T>) -> Vec<T> {
    items
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainfix_types::app::{DvPair, DvvTriplet};

    #[test]
    fn first_occurrence_wins_and_order_is_kept() {
        let pairs = vec![
            DvPair::new("d1", "v1"),
            DvPair::new("d2", "v2"),
            DvPair::new("d1", "v1"),
            DvPair::new("d3", "v3"),
        ];
        assert_eq!(
            dedup_first_occurrence(pairs),
            vec![
                DvPair::new("d1", "v1"),
                DvPair::new("d2", "v2"),
                DvPair::new("d3", "v3"),
            ]
        );
    }

    #[test]
    fn triplets_differing_in_one_field_are_distinct() {
        let triplets = vec![
            DvvTriplet::new("d1", "vA", "vB"),
            DvvTriplet::new("d1", "vA", "vC"),
            DvvTriplet::new("d1", "vA", "vB"),
        ];
        assert_eq!(
            dedup_first_occurrence(triplets),
            vec![
                DvvTriplet::new("d1", "vA", "vB"),
                DvvTriplet::new("d1", "vA", "vC"),
            ]
        );
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(dedup_first_occurrence(Vec::<DvPair>::new()).is_empty());
        assert!(dedup_sorted(Vec::<String>::new()).is_empty());
    }

    #[test]
    fn sorted_dedup_uses_byte_order() {
        let addrs = vec!["valb", "valB", "valA", "valB"]
            .into_iter()
            .map(String::from)
            .collect();
        // Uppercase letters sort before lowercase ones.
        assert_eq!(dedup_sorted(addrs), vec!["valA", "valB", "valb"]);
    }
}
