//! Errors reported by the clustering engine.

use std::collections::TryReserveError;

/// The error ladder for all fallible operations in this crate.
///
/// Every public operation either succeeds or returns one of these variants
/// with all intermediate state torn down; no partial results are exposed.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The caller supplied input the engine cannot work with, e.g. an empty
    /// dataset, non-finite coordinates, an out-of-range index, or a size
    /// constraint below 2.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An allocation for one of the large working buffers failed.
    #[error("memory allocation failed")]
    OutOfMemory,

    /// The number of points or clusters does not fit in the configured id
    /// width. See the `large-ids` feature.
    #[error("problem size exceeds the configured id width")]
    ProblemTooLarge,

    /// A selector named a variant this build does not provide.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// A point had no admissible neighbors and could not be placed in any
    /// cluster.
    #[error("a point has no admissible neighbors")]
    NoNeighbors,
}

impl From<TryReserveError> for Error {
    fn from(_: TryReserveError) -> Self {
        Self::OutOfMemory
    }
}

/// A `Result` whose error type is this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;
