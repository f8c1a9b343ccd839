//! # digestvec
//!
//! Sorted digest vectors with linear-time set algebra, the reconciliation
//! primitive of a peer-to-peer item-sync protocol.
//!
//! ## Overview
//!
//! Two syncing peers each describe their state as a set of fixed-size
//! content digests ("this is what I have"). Reconciliation is then pure set
//! algebra: what must be fetched is a complement, what both sides agree on
//! is an intersection, and applying a peer's delta is a three-way patch.
//! This crate provides exactly that engine:
//!
//! - [`Digest`]: an opaque [`DIGEST_SIZE`]-byte identifier, ordered
//!   byte-wise lexicographically.
//! - [`DigestVector`]: raw append-order accumulation with an explicit
//!   geometric growth contract and fallible allocation.
//! - [`SortedDigestVector`]: the sorted, duplicate-free type-state on which
//!   union, intersection, difference, complement, and patch are defined.
//!
//! Every set operation is a single forward merge pass over pre-sorted
//! inputs, O(n + m), with no auxiliary indexing structure; the three-operand
//! [`patch`](SortedDigestVector::patch) interleaves all three cursors in one
//! pass instead of composing two binary operations.
//!
//! ## The two-type split
//!
//! Mutation (append, replace) lives on [`DigestVector`], which makes no
//! ordering promise. Queries and set algebra live on [`SortedDigestVector`],
//! which is strictly ascending and unique by construction and can only be
//! obtained through the explicit normalization step
//! [`DigestVector::into_sorted`]. Passing unsorted input to a merge is
//! therefore a compile error, not a runtime contract violation.
//!
//! ## Example
//!
//! ```rust
//! use digestvec::{Digest, DigestVector, DIGEST_SIZE};
//!
//! let digest = |byte: u8| Digest::new([byte; DIGEST_SIZE]);
//!
//! // Accumulate in arrival order, duplicates and all.
//! let mut mine = DigestVector::new();
//! for byte in [3u8, 1, 2, 3] {
//!     mine.append(digest(byte))?;
//! }
//! let mine = mine.into_sorted();
//!
//! // The peer sends its delta: drop 2, add 4.
//! let removals = DigestVector::from_slice(&[digest(2)])?.into_sorted();
//! let additions = DigestVector::from_slice(&[digest(4)])?.into_sorted();
//!
//! let next = mine.patch(&removals, &additions)?;
//! assert_eq!(next.as_slice(), &[digest(1), digest(3), digest(4)]);
//! # Ok::<(), digestvec::Error>(())
//! ```
//!
//! ## Concurrency
//!
//! There is none: both vector types are plain owned values with no locks,
//! no interior mutability, and no async suspension points. Independent
//! reconciliation rounds may run in parallel over independent instances;
//! Rust's borrow rules exclude concurrent mutation of a single instance.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

mod digest;
mod error;
mod ops;
mod sorted;
mod vector;

pub use digest::{DIGEST_SIZE, Digest};
pub use error::Error;
pub use sorted::SortedDigestVector;
pub use vector::DigestVector;
