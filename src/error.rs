//! Error type for the fallible entry points.

use std::error::Error;
use std::fmt;

/// Errors surfaced by the sub-range and parallel entry points.
///
/// The sequential whole-slice entry points cannot fail: they validate nothing
/// and allocate nothing up front. Algorithmic degenerations (pathological
/// pivot choices, overly deep recursion) are recovered internally and never
/// reach the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// The requested bounds do not satisfy `low <= high <= len`.
    InvalidRange {
        /// Requested lower bound (inclusive).
        low: usize,
        /// Requested upper bound (exclusive).
        high: usize,
        /// Length of the sequence the bounds were checked against.
        len: usize,
    },
    /// The scratch buffer for a parallel sort could not be reserved.
    ///
    /// The region is untouched: reservation happens before any task is
    /// spawned.
    ScratchAlloc {
        /// Number of elements the reservation asked for.
        elements: usize,
    },
}

impl fmt::Display for SortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortError::InvalidRange { low, high, len } => write!(
                f,
                "invalid sort range: low {low}, high {high} on a sequence of length {len}"
            ),
            SortError::ScratchAlloc { elements } => {
                write!(f, "failed to reserve scratch buffer of {elements} elements")
            }
        }
    }
}

impl Error for SortError {}

/// Validates `low <= high <= len`.
pub(crate) fn check_range(low: usize, high: usize, len: usize) -> Result<(), SortError> {
    if low > high || high > len {
        return Err(SortError::InvalidRange { low, high, len });
    }
    Ok(())
}
