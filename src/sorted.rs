//! The sorted/unique digest vector and its set-algebra surface.

use crate::digest::Digest;
use crate::error::Error;
use crate::ops;
use crate::vector::DigestVector;

/// A digest vector whose contents are strictly ascending and duplicate-free.
///
/// The invariant is held by construction: the only ways to obtain a
/// `SortedDigestVector` are [`DigestVector::into_sorted`] (which sorts and
/// deduplicates) and [`from_sorted_vec`](Self::from_sorted_vec) (whose
/// precondition is debug-asserted). The set-algebra and patch operations
/// exist only on this type, so calling them with unsorted input is a compile
/// error rather than a runtime contract violation.
///
/// Inputs to every operation are read-only; outputs are freshly built
/// vectors the caller owns. Nothing here mutates `self`.
///
/// # Examples
///
/// ```rust
/// use digestvec::{Digest, DigestVector, DIGEST_SIZE};
///
/// let digest = |byte: u8| Digest::new([byte; DIGEST_SIZE]);
///
/// let mine = DigestVector::from_slice(&[digest(1), digest(2)])?.into_sorted();
/// let theirs = DigestVector::from_slice(&[digest(2), digest(3)])?.into_sorted();
///
/// // What the peer has that I do not:
/// let missing = mine.complement(&theirs)?;
/// assert_eq!(missing.as_slice(), &[digest(3)]);
/// # Ok::<(), digestvec::Error>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SortedDigestVector {
    slots: Vec<Digest>,
}

/// Message constant for panic when `from_sorted_vec` receives invalid input.
const SORTED_INVARIANT_PANIC_MESSAGE: &str =
    "from_sorted_vec requires strictly increasing digests (sorted + deduplicated)";

#[cfg(debug_assertions)]
#[inline]
fn is_strictly_sorted(slice: &[Digest]) -> bool {
    slice.windows(2).all(|window| window[0] < window[1])
}

impl SortedDigestVector {
    /// Creates an empty sorted vector. Does not allocate.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Wraps an already sorted, deduplicated `Vec` without re-sorting.
    ///
    /// # Preconditions
    ///
    /// `vec` must be strictly ascending (sorted, no duplicates). Validated
    /// with `debug_assert!` in debug builds; in release builds invalid input
    /// yields incorrect query and merge results (a logic error, never memory
    /// unsafety). Callers that cannot guarantee the precondition should go
    /// through [`DigestVector::into_sorted`] instead.
    #[must_use]
    pub fn from_sorted_vec(vec: Vec<Digest>) -> Self {
        #[cfg(debug_assertions)]
        debug_assert!(
            is_strictly_sorted(&vec),
            "{}",
            SORTED_INVARIANT_PANIC_MESSAGE
        );
        Self { slots: vec }
    }

    /// Returns the number of digests held.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns `true` if the vector holds no digests.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the digests as a slice in ascending order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Digest] {
        &self.slots
    }

    /// Iterates over the digests in ascending order.
    ///
    /// The iterator is the lazy single-pass ordered traversal; early
    /// termination is the ordinary `Iterator` short-circuit (`find`, `any`,
    /// `take_while`).
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Digest> {
        self.slots.iter()
    }

    /// Reports whether `digest` is present. Binary search, O(log n).
    #[inline]
    #[must_use]
    pub fn contains(&self, digest: &Digest) -> bool {
        self.slots.binary_search(digest).is_ok()
    }

    /// Returns the position of `digest` in ascending order, if present.
    /// Binary search, O(log n).
    #[inline]
    #[must_use]
    pub fn index_of(&self, digest: &Digest) -> Option<usize> {
        self.slots.binary_search(digest).ok()
    }

    /// Returns the union `self ∪ other` as a new sorted vector.
    ///
    /// Single merge pass, O(n + m).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the output allocation fails.
    pub fn union(&self, other: &Self) -> Result<Self, Error> {
        Ok(Self {
            slots: ops::union_slices(&self.slots, &other.slots)?,
        })
    }

    /// Returns the intersection `self ∩ other` as a new sorted vector.
    ///
    /// Single merge pass, O(n + m).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the output allocation fails.
    pub fn intersection(&self, other: &Self) -> Result<Self, Error> {
        Ok(Self {
            slots: ops::intersection_slices(&self.slots, &other.slots)?,
        })
    }

    /// Returns both directed differences `(self ∖ other, other ∖ self)`,
    /// computed simultaneously in a single pass.
    ///
    /// A digest present in both inputs appears in neither output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when an output allocation fails.
    pub fn diff(&self, other: &Self) -> Result<(Self, Self), Error> {
        let (self_only, other_only) = ops::diff_slices(&self.slots, &other.slots)?;
        Ok((Self { slots: self_only }, Self { slots: other_only }))
    }

    /// Returns the ordered complement `other ∖ self` — what `other` has
    /// that `self` does not.
    ///
    /// The asymmetric reconciliation primitive: with `self` as the local
    /// state and `other` as the peer's manifest, the result is exactly what
    /// must be fetched. Equal to [`diff`](Self::diff)`.1` but skips building
    /// the unwanted half.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the output allocation fails.
    pub fn complement(&self, other: &Self) -> Result<Self, Error> {
        Ok(Self {
            slots: ops::complement_slices(&self.slots, &other.slots)?,
        })
    }

    /// Three-way reconciliation: applies a peer's delta to `self` as the
    /// base, producing `(self ∖ removals) ∪ additions` in one interleaved
    /// pass over all three inputs.
    ///
    /// A digest present in both `removals` and `additions` survives in the
    /// result: addition wins. This is a deliberate policy, not an artifact
    /// of cursor order — only base-sourced values can be suppressed by the
    /// removals cursor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the output allocation fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use digestvec::{Digest, DigestVector, DIGEST_SIZE};
    ///
    /// let digest = |byte: u8| Digest::new([byte; DIGEST_SIZE]);
    /// let sorted = |bytes: &[u8]| {
    ///     DigestVector::from_slice(
    ///         &bytes.iter().map(|&b| digest(b)).collect::<Vec<_>>(),
    ///     )
    ///     .unwrap()
    ///     .into_sorted()
    /// };
    ///
    /// let base = sorted(&[1, 2, 3]);
    /// let removals = sorted(&[2]);
    /// let additions = sorted(&[4]);
    ///
    /// let patched = base.patch(&removals, &additions)?;
    /// assert_eq!(patched, sorted(&[1, 3, 4]));
    /// # Ok::<(), digestvec::Error>(())
    /// ```
    pub fn patch(&self, removals: &Self, additions: &Self) -> Result<Self, Error> {
        Ok(Self {
            slots: ops::patch_slices(&self.slots, &removals.slots, &additions.slots)?,
        })
    }

    /// Converts back into a raw [`DigestVector`] for further appends.
    #[inline]
    #[must_use]
    pub fn into_raw(self) -> DigestVector {
        // Sorted contents are a valid (already sorted) raw sequence.
        DigestVector::from_vec(self.slots)
    }

    /// Consumes the vector, returning the strictly ascending backing `Vec`.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<Digest> {
        self.slots
    }
}

impl std::fmt::Debug for SortedDigestVector {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a SortedDigestVector {
    type Item = &'a Digest;
    type IntoIter = std::slice::Iter<'a, Digest>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<SortedDigestVector> for DigestVector {
    #[inline]
    fn from(sorted: SortedDigestVector) -> Self {
        sorted.into_raw()
    }
}
