//! The fixed-size digest value type.
//!
//! A [`Digest`] is an opaque, fixed-length byte string acting as a
//! content-addressed identifier for a sync record. This crate never
//! interprets digest contents: digests are produced externally (by whatever
//! content-hash function the sync protocol uses) and compared here byte-wise.

use std::fmt;
use std::str::FromStr;

use static_assertions::const_assert;

use crate::error::Error;

/// Width in bytes of every digest handled by this crate (SHA-1-sized).
pub const DIGEST_SIZE: usize = 20;

const_assert!(DIGEST_SIZE > 0);

/// A fixed-length, opaque content digest.
///
/// Digests are ordered byte-wise lexicographically (`memcmp` semantics);
/// this is the canonical total order used by every sort, search, and merge
/// in the crate. The derived `Ord` on the inner byte array provides exactly
/// that order.
///
/// # Examples
///
/// ```rust
/// use digestvec::{Digest, DIGEST_SIZE};
///
/// let low = Digest::new([0x01; DIGEST_SIZE]);
/// let high = Digest::new([0xff; DIGEST_SIZE]);
/// assert!(low < high);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Digest([u8; DIGEST_SIZE]);

impl Digest {
    /// The all-zero digest. Fills gap slots created by sparse
    /// [`DigestVector::replace_at`](crate::DigestVector::replace_at) writes.
    pub const ZERO: Self = Self([0; DIGEST_SIZE]);

    /// Wraps a raw byte array as a digest.
    #[inline]
    #[must_use]
    pub const fn new(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }

    /// Returns the digest's raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; DIGEST_SIZE] {
        &self.0
    }

    /// Parses a digest from a lowercase or uppercase hex string.
    ///
    /// The string must decode to exactly [`DIGEST_SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Hex`] for invalid hex, [`Error::DigestLength`] when
    /// the decoded length is wrong.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use digestvec::Digest;
    ///
    /// let digest = Digest::from_hex("00112233445566778899aabbccddeeff00112233")?;
    /// assert_eq!(digest.to_hex(), "00112233445566778899aabbccddeeff00112233");
    /// # Ok::<(), digestvec::Error>(())
    /// ```
    pub fn from_hex(hex_str: &str) -> Result<Self, Error> {
        let bytes = hex::decode(hex_str)?;
        Self::try_from(bytes.as_slice())
    }

    /// Renders the digest as a lowercase hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl From<[u8; DIGEST_SIZE]> for Digest {
    #[inline]
    fn from(bytes: [u8; DIGEST_SIZE]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for Digest {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        let array: [u8; DIGEST_SIZE] =
            bytes.try_into().map_err(|_| Error::DigestLength {
                expected: DIGEST_SIZE,
                actual: bytes.len(),
            })?;
        Ok(Self(array))
    }
}

impl AsRef<[u8]> for Digest {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(hex_str: &str) -> Result<Self, Self::Err> {
        Self::from_hex(hex_str)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Digest({})", self.to_hex())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.to_hex())
    }
}
