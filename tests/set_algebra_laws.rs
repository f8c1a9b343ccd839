//! Property-based tests for the set-algebra laws.
//!
//! Each operation is checked against a `BTreeSet` oracle over arbitrary
//! digest multisets, alongside the algebraic laws the merge passes must
//! satisfy.

use std::collections::BTreeSet;

use digestvec::{DIGEST_SIZE, Digest, DigestVector, SortedDigestVector};
use proptest::prelude::*;

fn digest(byte: u8) -> Digest {
    Digest::new([byte; DIGEST_SIZE])
}

fn sorted(bytes: &[u8]) -> SortedDigestVector {
    let digests: Vec<Digest> = bytes.iter().copied().map(digest).collect();
    DigestVector::from_slice(&digests).unwrap().into_sorted()
}

fn oracle(bytes: &[u8]) -> BTreeSet<Digest> {
    bytes.iter().copied().map(digest).collect()
}

fn as_set(vector: &SortedDigestVector) -> BTreeSet<Digest> {
    vector.iter().copied().collect()
}

fn bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..60)
}

// =============================================================================
// Normalization laws
// Description: into_sorted yields the strictly ascending distinct values
// =============================================================================

proptest! {
    #[test]
    fn prop_into_sorted_matches_oracle(elements in bytes()) {
        let vector = sorted(&elements);
        prop_assert_eq!(as_set(&vector), oracle(&elements));
        for pair in vector.as_slice().windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }
}

proptest! {
    #[test]
    fn prop_normalization_is_idempotent(elements in bytes()) {
        let once = sorted(&elements);
        let twice = once.clone().into_raw().into_sorted();
        prop_assert_eq!(once, twice);
    }
}

// =============================================================================
// Idempotence laws
// Description: A ∪ A = A and A ∩ A = A
// =============================================================================

proptest! {
    #[test]
    fn prop_union_and_intersection_idempotence(elements in bytes()) {
        let a = sorted(&elements);
        prop_assert_eq!(a.union(&a).unwrap(), a.clone());
        prop_assert_eq!(a.intersection(&a).unwrap(), a);
    }
}

// =============================================================================
// Union law
// Description: A ∪ B contains every element of A and of B, and no others
// =============================================================================

proptest! {
    #[test]
    fn prop_union_matches_oracle(a in bytes(), b in bytes()) {
        let result = sorted(&a).union(&sorted(&b)).unwrap();
        let expected: BTreeSet<Digest> =
            oracle(&a).union(&oracle(&b)).copied().collect();
        prop_assert_eq!(as_set(&result), expected);
    }
}

// =============================================================================
// Intersection law
// Description: A ∩ B is a subset of both inputs and matches the oracle
// =============================================================================

proptest! {
    #[test]
    fn prop_intersection_matches_oracle(a in bytes(), b in bytes()) {
        let set_a = sorted(&a);
        let set_b = sorted(&b);
        let result = set_a.intersection(&set_b).unwrap();

        let expected: BTreeSet<Digest> =
            oracle(&a).intersection(&oracle(&b)).copied().collect();
        prop_assert_eq!(as_set(&result), expected);

        for element in result.iter() {
            prop_assert!(set_a.contains(element));
            prop_assert!(set_b.contains(element));
        }
    }
}

// =============================================================================
// Diff partition law
// Description: diff(A, B) = (X, Y) with X ∪ (A ∩ B) = A, Y ∪ (A ∩ B) = B,
// and X, Y, A ∩ B pairwise disjoint
// =============================================================================

proptest! {
    #[test]
    fn prop_diff_partitions_both_inputs(a in bytes(), b in bytes()) {
        let set_a = sorted(&a);
        let set_b = sorted(&b);
        let (a_only, b_only) = set_a.diff(&set_b).unwrap();
        let shared = set_a.intersection(&set_b).unwrap();

        prop_assert_eq!(a_only.union(&shared).unwrap(), set_a);
        prop_assert_eq!(b_only.union(&shared).unwrap(), set_b);

        prop_assert!(a_only.intersection(&b_only).unwrap().is_empty());
        prop_assert!(a_only.intersection(&shared).unwrap().is_empty());
        prop_assert!(b_only.intersection(&shared).unwrap().is_empty());
    }
}

// =============================================================================
// Complement law
// Description: complement(A, B) is the "B minus A" half of diff(A, B)
// =============================================================================

proptest! {
    #[test]
    fn prop_complement_equals_diff_second_half(a in bytes(), b in bytes()) {
        let set_a = sorted(&a);
        let set_b = sorted(&b);
        let (_, b_only) = set_a.diff(&set_b).unwrap();
        prop_assert_eq!(set_a.complement(&set_b).unwrap(), b_only);
    }
}

// =============================================================================
// Patch laws
// Description: patch(base, rem, add) = (base ∖ rem) ∪ add, addition winning
// on rem/add overlap; equals the two-step composition when rem and add are
// disjoint
// =============================================================================

proptest! {
    #[test]
    fn prop_patch_matches_oracle(
        base in bytes(),
        removals in bytes(),
        additions in bytes()
    ) {
        let result = sorted(&base)
            .patch(&sorted(&removals), &sorted(&additions))
            .unwrap();

        let mut expected = oracle(&base);
        for removal in oracle(&removals) {
            expected.remove(&removal);
        }
        expected.extend(oracle(&additions));

        prop_assert_eq!(as_set(&result), expected);
    }
}

proptest! {
    #[test]
    fn prop_patch_equals_composition_for_disjoint_delta(
        base in bytes(),
        removals in bytes(),
        additions in bytes()
    ) {
        let removals = sorted(&removals);
        let additions = sorted(&additions);
        // Force the unambiguous case by dropping the overlap from removals.
        let (removals, _) = removals.diff(&additions).unwrap();

        let base = sorted(&base);
        let single_pass = base.patch(&removals, &additions).unwrap();
        let two_step = additions
            .union(&removals.complement(&base).unwrap())
            .unwrap();
        prop_assert_eq!(single_pass, two_step);
    }
}

proptest! {
    #[test]
    fn prop_patch_on_empty_base_yields_additions(
        removals in bytes(),
        additions in bytes()
    ) {
        let empty = SortedDigestVector::new();
        let result = empty
            .patch(&sorted(&removals), &sorted(&additions))
            .unwrap();
        prop_assert_eq!(result, sorted(&additions));
    }
}
