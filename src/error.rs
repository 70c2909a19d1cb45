//! Errors returned by the range query structures.
//!
//! Every failure here is an invalid argument supplied by the caller. The structures are
//! deterministic and in-memory, so nothing is retryable: fix the index arithmetic instead.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Can't build an index over an empty array")]
    EmptyInput,

    #[error("Invalid range {lo}..={hi} for length {len}")]
    InvalidRange { lo: usize, hi: usize, len: usize },

    #[error("Index {index} is out of bounds of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    #[error("Order statistic k={k} is outside 1..={len}")]
    InvalidRank { k: usize, len: usize },

    #[error("Coordinate is not a breakpoint: {0}")]
    UnknownCoordinate(String),

    #[error("Invalid interval: {0}")]
    InvalidInterval(String),

    #[error("Row {row} has length {found}, expected {expected}")]
    RaggedRows {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("Decrement would make a covering count negative in {lo}..={hi}")]
    NegativeCoverage { lo: usize, hi: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

/// Checks that `lo..=hi` is a non-empty range inside `0..len`.
pub(crate) fn check_range(lo: usize, hi: usize, len: usize) -> Result<()> {
    if lo > hi || hi >= len {
        return Err(Error::InvalidRange { lo, hi, len });
    }
    Ok(())
}

pub(crate) fn check_index(index: usize, len: usize) -> Result<()> {
    if index >= len {
        return Err(Error::IndexOutOfBounds { index, len });
    }
    Ok(())
}
