//! Merge-join kernels shared by the set-algebra operations and patch.
//!
//! Every operation here is a single forward pass over already-sorted inputs,
//! O(n + m) with no auxiliary indexing structure. Inputs must be sorted in
//! non-decreasing order; adjacent duplicates are tolerated and skipped by a
//! single shared cursor-advancement rule, so outputs are always strictly
//! ascending and duplicate-free. Output buffers are allocation-checked up
//! front to their exact upper bound, so the per-element pushes never
//! reallocate.

use std::cmp::Ordering;

use crate::digest::Digest;
use crate::error::Error;

/// Message constant for panic when a kernel receives unsorted input.
const SORTED_INPUT_PANIC_MESSAGE: &str =
    "set operations require inputs sorted in ascending digest order";

#[inline]
fn is_sorted(slice: &[Digest]) -> bool {
    slice.windows(2).all(|window| window[0] <= window[1])
}

/// Allocates an output buffer of exactly `capacity` slots, surfacing
/// allocation failure instead of aborting.
fn try_vec(capacity: usize) -> Result<Vec<Digest>, Error> {
    let mut vec = Vec::new();
    vec.try_reserve_exact(capacity)?;
    Ok(vec)
}

/// Advances `index` past the current value and any immediately-following
/// entries equal to it.
///
/// This is the one duplicate-skipping rule used by every merge cursor: after
/// a cursor lands on a value, it must not see that value again before the
/// next distinct one. On duplicate-free input the inner loop never runs.
#[inline]
fn skip_run(slice: &[Digest], mut index: usize) -> usize {
    let current = slice[index];
    index += 1;
    while index < slice.len() && slice[index] == current {
        index += 1;
    }
    index
}

/// Appends `digest` to an output being built in ascending order.
///
/// The sort-free counterpart of a plain push: callers guarantee the global
/// append order is strictly ascending, so the output needs no sort pass.
#[inline]
fn push_ordered(out: &mut Vec<Digest>, digest: Digest) {
    debug_assert!(
        out.last().is_none_or(|last| *last < digest),
        "output must be built in strictly ascending order"
    );
    out.push(digest);
}

/// Appends the distinct values of `slice[from..]` to `out` in order.
#[inline]
fn push_tail(out: &mut Vec<Digest>, slice: &[Digest], mut from: usize) {
    while from < slice.len() {
        push_ordered(out, slice[from]);
        from = skip_run(slice, from);
    }
}

/// Computes the union of two sorted slices.
pub(crate) fn union_slices(left: &[Digest], right: &[Digest]) -> Result<Vec<Digest>, Error> {
    debug_assert!(is_sorted(left), "{}", SORTED_INPUT_PANIC_MESSAGE);
    debug_assert!(is_sorted(right), "{}", SORTED_INPUT_PANIC_MESSAGE);

    let mut result = try_vec(left.len() + right.len())?;
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                push_ordered(&mut result, left[left_index]);
                left_index = skip_run(left, left_index);
            }
            Ordering::Greater => {
                push_ordered(&mut result, right[right_index]);
                right_index = skip_run(right, right_index);
            }
            Ordering::Equal => {
                push_ordered(&mut result, left[left_index]);
                left_index = skip_run(left, left_index);
                right_index = skip_run(right, right_index);
            }
        }
    }

    push_tail(&mut result, left, left_index);
    push_tail(&mut result, right, right_index);
    Ok(result)
}

/// Computes the intersection of two sorted slices.
pub(crate) fn intersection_slices(
    left: &[Digest],
    right: &[Digest],
) -> Result<Vec<Digest>, Error> {
    debug_assert!(is_sorted(left), "{}", SORTED_INPUT_PANIC_MESSAGE);
    debug_assert!(is_sorted(right), "{}", SORTED_INPUT_PANIC_MESSAGE);

    if left.is_empty() || right.is_empty() {
        return Ok(Vec::new());
    }

    // Disjoint fast path: non-overlapping ranges intersect in nothing.
    // Correct even on duplicated input, unlike a bulk-copy fast path.
    if left.last() < right.first() || right.last() < left.first() {
        return Ok(Vec::new());
    }

    let mut result = try_vec(left.len().min(right.len()))?;
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                left_index = skip_run(left, left_index);
            }
            Ordering::Greater => {
                right_index = skip_run(right, right_index);
            }
            Ordering::Equal => {
                push_ordered(&mut result, left[left_index]);
                left_index = skip_run(left, left_index);
                right_index = skip_run(right, right_index);
            }
        }
    }

    Ok(result)
}

/// Computes both directed differences `(left ∖ right, right ∖ left)` in a
/// single pass. A value present in both inputs is dropped from both outputs.
pub(crate) fn diff_slices(
    left: &[Digest],
    right: &[Digest],
) -> Result<(Vec<Digest>, Vec<Digest>), Error> {
    debug_assert!(is_sorted(left), "{}", SORTED_INPUT_PANIC_MESSAGE);
    debug_assert!(is_sorted(right), "{}", SORTED_INPUT_PANIC_MESSAGE);

    let mut left_only = try_vec(left.len())?;
    let mut right_only = try_vec(right.len())?;
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                push_ordered(&mut left_only, left[left_index]);
                left_index = skip_run(left, left_index);
            }
            Ordering::Greater => {
                push_ordered(&mut right_only, right[right_index]);
                right_index = skip_run(right, right_index);
            }
            Ordering::Equal => {
                left_index = skip_run(left, left_index);
                right_index = skip_run(right, right_index);
            }
        }
    }

    push_tail(&mut left_only, left, left_index);
    push_tail(&mut right_only, right, right_index);
    Ok((left_only, right_only))
}

/// Computes the ordered complement `right ∖ left` — what `right` has that
/// `left` does not. The asymmetric half of [`diff_slices`], used on its own
/// for one-directional reconciliation and as the tail step of
/// [`patch_slices`].
pub(crate) fn complement_slices(
    left: &[Digest],
    right: &[Digest],
) -> Result<Vec<Digest>, Error> {
    debug_assert!(is_sorted(left), "{}", SORTED_INPUT_PANIC_MESSAGE);
    debug_assert!(is_sorted(right), "{}", SORTED_INPUT_PANIC_MESSAGE);

    let mut result = try_vec(right.len())?;
    let mut left_index = 0;
    let mut right_index = 0;

    while left_index < left.len() && right_index < right.len() {
        match left[left_index].cmp(&right[right_index]) {
            Ordering::Less => {
                left_index = skip_run(left, left_index);
            }
            Ordering::Greater => {
                push_ordered(&mut result, right[right_index]);
                right_index = skip_run(right, right_index);
            }
            Ordering::Equal => {
                left_index = skip_run(left, left_index);
                right_index = skip_run(right, right_index);
            }
        }
    }

    push_tail(&mut result, right, right_index);
    Ok(result)
}

/// Three-way reconciliation: value-equal to `(base ∖ removals) ∪ additions`,
/// computed in one interleaved pass over all three inputs.
///
/// On each step the candidate is the smaller of the current `base` and
/// `additions` values; the removals cursor is advanced past entries below
/// the candidate, then consulted for a match. A matching removal suppresses
/// a base-sourced candidate only — a candidate sourced from `additions`
/// always survives (the addition-wins policy for digests present in both
/// `removals` and `additions`). Once either `base` or `additions` is
/// exhausted the loop degenerates to the ordered complement of the removals
/// tail against the remaining input.
pub(crate) fn patch_slices(
    base: &[Digest],
    removals: &[Digest],
    additions: &[Digest],
) -> Result<Vec<Digest>, Error> {
    debug_assert!(is_sorted(base), "{}", SORTED_INPUT_PANIC_MESSAGE);
    debug_assert!(is_sorted(removals), "{}", SORTED_INPUT_PANIC_MESSAGE);
    debug_assert!(is_sorted(additions), "{}", SORTED_INPUT_PANIC_MESSAGE);

    let mut result = try_vec(base.len() + additions.len())?;
    let mut base_index = 0;
    let mut removal_index = 0;
    let mut addition_index = 0;

    while base_index < base.len() || addition_index < additions.len() {
        let take_addition = addition_index < additions.len()
            && (base_index >= base.len() || additions[addition_index] <= base[base_index]);
        let take_base = base_index < base.len()
            && (addition_index >= additions.len()
                || base[base_index] <= additions[addition_index]);
        let candidate = if take_addition {
            additions[addition_index]
        } else {
            base[base_index]
        };

        // Removal entries below the candidate can no longer match anything.
        while removal_index < removals.len() && removals[removal_index] < candidate {
            removal_index = skip_run(removals, removal_index);
        }
        let removed =
            removal_index < removals.len() && removals[removal_index] == candidate;
        if removed {
            removal_index = skip_run(removals, removal_index);
        }

        if take_addition || !removed {
            push_ordered(&mut result, candidate);
        }

        if take_base {
            base_index = skip_run(base, base_index);
        }
        if take_addition {
            addition_index = skip_run(additions, addition_index);
        }
    }

    Ok(result)
}
