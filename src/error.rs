//! Crate error type.

use std::collections::TryReserveError;

use thiserror::Error;

/// Errors returned by digest-vector operations.
///
/// Allocation failure is recoverable here: growing operations surface it as
/// [`Error::Allocation`] with the vector left valid (previous contents
/// intact), so a sync engine can retry the round or report sync failure
/// instead of aborting the process.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Growing a vector's backing storage failed.
    #[error("digest storage allocation failed: {0}")]
    Allocation(#[from] TryReserveError),

    /// A byte slice of the wrong length was offered as a digest.
    #[error("digest has length {actual}, expected {expected} bytes")]
    DigestLength {
        /// Required digest width, [`DIGEST_SIZE`](crate::DIGEST_SIZE).
        expected: usize,
        /// Length of the offered slice.
        actual: usize,
    },

    /// A hex string could not be decoded into digest bytes.
    #[error("invalid digest hex: {0}")]
    Hex(#[from] hex::FromHexError),
}
