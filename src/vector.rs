//! Raw digest storage: append-order vector with explicit growth control.

use crate::digest::Digest;
use crate::error::Error;
use crate::sorted::SortedDigestVector;

/// Additive floor applied on every capacity growth step.
const GROWTH_FLOOR: usize = 16;

/// A growable, owned vector of digests in append order.
///
/// `DigestVector` is the mutable accumulation side of the engine: a sync
/// engine appends raw digests as records are enumerated (in whatever order
/// they arrive, duplicates allowed), then normalizes the batch once with
/// [`into_sorted`](Self::into_sorted) before handing it to the set-algebra
/// operations on [`SortedDigestVector`].
///
/// # Growth contract
///
/// Storage grows geometrically by a 3/2 factor with a +16 slot floor
/// (`capacity + capacity/2 + 16`) whenever capacity is exceeded, and never
/// shrinks except through [`free`](Self::free). Growth is fallible: every
/// allocating operation returns [`Error::Allocation`] on failure with the
/// vector's previous contents intact, so the caller can abandon or retry a
/// sync round instead of aborting.
///
/// # Examples
///
/// ```rust
/// use digestvec::{Digest, DigestVector, DIGEST_SIZE};
///
/// let mut vector = DigestVector::new();
/// vector.append(Digest::new([3; DIGEST_SIZE]))?;
/// vector.append(Digest::new([1; DIGEST_SIZE]))?;
/// vector.append(Digest::new([3; DIGEST_SIZE]))?;
///
/// let sorted = vector.into_sorted();
/// assert_eq!(sorted.len(), 2); // sorted and deduplicated
/// # Ok::<(), digestvec::Error>(())
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct DigestVector {
    slots: Vec<Digest>,
}

impl DigestVector {
    /// Creates an empty vector. Does not allocate.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Creates an empty vector with at least `capacity` slots preallocated.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the allocation fails.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        let mut slots = Vec::new();
        slots.try_reserve_exact(capacity)?;
        Ok(Self { slots })
    }

    /// Builds a vector from a digest slice, preserving order and duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the allocation fails.
    pub fn from_slice(digests: &[Digest]) -> Result<Self, Error> {
        let mut vector = Self::with_capacity(digests.len())?;
        vector.slots.extend_from_slice(digests);
        Ok(vector)
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

    /// Returns the number of allocated slots (always >= [`len`](Self::len)).
    #[inline]
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Returns the digests as a slice in append order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Digest] {
        &self.slots
    }

    /// Returns the digest at `index`, if in bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Digest> {
        self.slots.get(index)
    }

    /// Iterates over the digests in append order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Digest> {
        self.slots.iter()
    }

    /// Ensures capacity for at least `required` slots, applying the 3/2 + 16
    /// growth step when the current capacity is exceeded.
    fn grow_for(&mut self, required: usize) -> Result<(), Error> {
        if required <= self.slots.capacity() {
            return Ok(());
        }
        let stepped = self.slots.capacity() + self.slots.capacity() / 2 + GROWTH_FLOOR;
        let target = stepped.max(required);
        self.slots.try_reserve_exact(target - self.slots.len())?;
        Ok(())
    }

    /// Appends a digest, growing storage as needed.
    ///
    /// No ordering is maintained; call [`into_sorted`](Self::into_sorted)
    /// (or [`sort`](Self::sort)) before any order-dependent query.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when growth fails; the vector keeps its
    /// previous contents.
    pub fn append(&mut self, digest: Digest) -> Result<(), Error> {
        self.grow_for(self.slots.len() + 1)?;
        self.slots.push(digest);
        Ok(())
    }

    /// Appends every digest in `digests`, growing storage once up front.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when growth fails.
    pub fn append_all(&mut self, digests: &[Digest]) -> Result<(), Error> {
        self.grow_for(self.slots.len() + digests.len())?;
        self.slots.extend_from_slice(digests);
        Ok(())
    }

    /// Writes `digest` at logical `index`, growing the vector to at least
    /// `index + 1` slots if necessary.
    ///
    /// An in-bounds index overwrites; an out-of-bounds index extends the
    /// vector, zero-filling ([`Digest::ZERO`]) any slots between the old
    /// length and `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when growth fails.
    pub fn replace_at(&mut self, index: usize, digest: Digest) -> Result<(), Error> {
        if index < self.slots.len() {
            self.slots[index] = digest;
            return Ok(());
        }
        self.grow_for(index + 1)?;
        // Within reserved capacity, so these cannot reallocate.
        self.slots.resize(index + 1, Digest::ZERO);
        self.slots[index] = digest;
        Ok(())
    }

    /// Exchanges the entire state of two vectors in O(1).
    ///
    /// Used to replace a vector's contents with newly computed output
    /// without copying either side.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(&mut self.slots, &mut other.slots);
    }

    /// Drops all contents but keeps the allocated capacity.
    #[inline]
    pub fn clear(&mut self) {
        self.slots.clear();
    }

    /// Releases the backing storage, resetting both length and capacity to 0.
    #[inline]
    pub fn free(&mut self) {
        self.slots = Vec::new();
    }

    /// Sorts the digests in place in ascending byte order. Idempotent;
    /// duplicates are kept adjacent.
    #[inline]
    pub fn sort(&mut self) {
        self.slots.sort_unstable();
    }

    /// Sorts in place, then compacts so each distinct digest appears exactly
    /// once. Reduces length, never shrinks capacity. Idempotent.
    pub fn sort_unique(&mut self) {
        self.slots.sort_unstable();
        self.slots.dedup();
    }

    /// Reports whether `digest` is present, sorting first.
    ///
    /// Convenience variant for callers that cannot guarantee sortedness;
    /// repeated queries should convert with [`into_sorted`](Self::into_sorted)
    /// instead of paying the sort on every call.
    pub fn contains(&mut self, digest: &Digest) -> bool {
        self.sort();
        self.slots.binary_search(digest).is_ok()
    }

    /// Returns the index of `digest` after sorting, if present.
    ///
    /// When duplicates of `digest` exist, the index of any one of them may
    /// be returned.
    pub fn index_of(&mut self, digest: &Digest) -> Option<usize> {
        self.sort();
        self.slots.binary_search(digest).ok()
    }

    /// Normalizes into the sorted/unique type-state: sorts in place, removes
    /// duplicates, and wraps the result as a [`SortedDigestVector`].
    ///
    /// This is the explicit once-per-batch step that makes the vector
    /// acceptable to the set-algebra and patch operations; those operations
    /// only exist on [`SortedDigestVector`], so an unsorted vector cannot
    /// reach them by construction.
    #[must_use]
    pub fn into_sorted(mut self) -> SortedDigestVector {
        self.sort_unique();
        SortedDigestVector::from_sorted_vec(self.slots)
    }

    /// Consumes the vector, returning the backing storage in append order.
    #[inline]
    #[must_use]
    pub fn into_vec(self) -> Vec<Digest> {
        self.slots
    }

    #[inline]
    pub(crate) fn from_vec(slots: Vec<Digest>) -> Self {
        Self { slots }
    }
}

/// Convenience set operations for callers that cannot statically guarantee
/// sorted inputs: each wrapper consumes its raw operands, normalizes them
/// with [`into_sorted`](DigestVector::into_sorted), and delegates to the
/// corresponding [`SortedDigestVector`] operation.
impl DigestVector {
    /// Sorts both operands, then returns their union.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the output allocation fails.
    pub fn union(self, other: Self) -> Result<SortedDigestVector, Error> {
        self.into_sorted().union(&other.into_sorted())
    }

    /// Sorts both operands, then returns their intersection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the output allocation fails.
    pub fn intersection(self, other: Self) -> Result<SortedDigestVector, Error> {
        self.into_sorted().intersection(&other.into_sorted())
    }

    /// Sorts both operands, then returns `(self ∖ other, other ∖ self)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when an output allocation fails.
    pub fn diff(
        self,
        other: Self,
    ) -> Result<(SortedDigestVector, SortedDigestVector), Error> {
        self.into_sorted().diff(&other.into_sorted())
    }

    /// Sorts both operands, then returns `other ∖ self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the output allocation fails.
    pub fn complement(self, other: Self) -> Result<SortedDigestVector, Error> {
        self.into_sorted().complement(&other.into_sorted())
    }

    /// Sorts all three operands, then applies the three-way patch with
    /// `self` as the base.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Allocation`] when the output allocation fails.
    pub fn patch(
        self,
        removals: Self,
        additions: Self,
    ) -> Result<SortedDigestVector, Error> {
        self.into_sorted()
            .patch(&removals.into_sorted(), &additions.into_sorted())
    }
}

impl std::fmt::Debug for DigestVector {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.debug_list().entries(self.iter()).finish()
    }
}

impl<'a> IntoIterator for &'a DigestVector {
    type Item = &'a Digest;
    type IntoIter = std::slice::Iter<'a, Digest>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::digest::DIGEST_SIZE;
    use rstest::rstest;

    fn digest(byte: u8) -> Digest {
        Digest::new([byte; DIGEST_SIZE])
    }

    #[rstest]
    fn test_new_is_empty_without_allocation() {
        let vector = DigestVector::new();
        assert!(vector.is_empty());
        assert_eq!(vector.capacity(), 0);
    }

    #[rstest]
    fn test_first_growth_step_reserves_the_floor() {
        let mut vector = DigestVector::new();
        vector.append(digest(1)).unwrap();
        assert_eq!(vector.capacity(), GROWTH_FLOOR);
    }

    #[rstest]
    fn test_growth_follows_three_halves_plus_floor_sequence() {
        let mut vector = DigestVector::new();
        let mut observed = Vec::new();
        for byte in 0..100u8 {
            vector.append(digest(byte)).unwrap();
            if observed.last() != Some(&vector.capacity()) {
                observed.push(vector.capacity());
            }
        }
        // 0 -> 16 -> 16+8+16=40 -> 40+20+16=76 -> 76+38+16=130
        assert_eq!(observed, vec![16, 40, 76, 130]);
    }

    #[rstest]
    fn test_replace_at_in_bounds_overwrites() {
        let mut vector = DigestVector::from_slice(&[digest(1), digest(2)]).unwrap();
        vector.replace_at(0, digest(9)).unwrap();
        assert_eq!(vector.as_slice(), &[digest(9), digest(2)]);
    }

    #[rstest]
    fn test_replace_at_beyond_len_zero_fills_gap() {
        let mut vector = DigestVector::new();
        vector.replace_at(2, digest(7)).unwrap();
        assert_eq!(vector.len(), 3);
        assert_eq!(vector.as_slice(), &[Digest::ZERO, Digest::ZERO, digest(7)]);
    }

    #[rstest]
    fn test_swap_exchanges_full_state() {
        let mut first = DigestVector::from_slice(&[digest(1)]).unwrap();
        let mut second = DigestVector::from_slice(&[digest(2), digest(3)]).unwrap();
        first.swap(&mut second);
        assert_eq!(first.as_slice(), &[digest(2), digest(3)]);
        assert_eq!(second.as_slice(), &[digest(1)]);
    }

    #[rstest]
    fn test_free_releases_capacity() {
        let mut vector = DigestVector::from_slice(&[digest(1)]).unwrap();
        vector.free();
        assert_eq!(vector.len(), 0);
        assert_eq!(vector.capacity(), 0);
    }

    #[rstest]
    fn test_clear_keeps_capacity() {
        let mut vector = DigestVector::from_slice(&[digest(1)]).unwrap();
        let capacity = vector.capacity();
        vector.clear();
        assert!(vector.is_empty());
        assert_eq!(vector.capacity(), capacity);
    }

    #[rstest]
    fn test_sort_is_idempotent_and_keeps_duplicates() {
        let mut vector =
            DigestVector::from_slice(&[digest(3), digest(1), digest(3)]).unwrap();
        vector.sort();
        let once = vector.clone();
        vector.sort();
        assert_eq!(vector, once);
        assert_eq!(vector.as_slice(), &[digest(1), digest(3), digest(3)]);
    }

    #[rstest]
    fn test_sort_unique_compacts_in_place() {
        let mut vector =
            DigestVector::from_slice(&[digest(2), digest(1), digest(2), digest(1)]).unwrap();
        let capacity = vector.capacity();
        vector.sort_unique();
        assert_eq!(vector.as_slice(), &[digest(1), digest(2)]);
        assert_eq!(vector.capacity(), capacity);
    }

    #[rstest]
    fn test_contains_sorts_first() {
        let mut vector =
            DigestVector::from_slice(&[digest(9), digest(3), digest(5)]).unwrap();
        assert!(vector.contains(&digest(5)));
        assert!(!vector.contains(&digest(4)));
        // The sort performed by contains is observable
        assert_eq!(vector.as_slice(), &[digest(3), digest(5), digest(9)]);
    }

    #[rstest]
    fn test_index_of_reports_sorted_position() {
        let mut vector =
            DigestVector::from_slice(&[digest(9), digest(3), digest(5)]).unwrap();
        assert_eq!(vector.index_of(&digest(9)), Some(2));
        assert_eq!(vector.index_of(&digest(1)), None);
    }
}
