//! # Duosort
//!
//! `duosort` is a general-purpose, in-place comparison sorting library for
//! random-access sequences, built around Yaroslavskiy's dual-pivot quicksort.
//!
//! The engine is an adaptive hybrid: dual-pivot three-way partitioning for
//! the general case, a natural-run merger that sorts pre-ordered data in
//! near-linear time, insertion-sort base cases, a heap-sort fallback that
//! bounds the worst case, counting sort for 1- and 2-byte integer keys,
//! IEEE-754 normalisation around floats, and a work-stealing parallel engine
//! that splits large slices into quarters and merges them through a scratch
//! buffer without ever blocking a worker.
//!
//! ## Key Features
//!
//! - **Adaptive Strategy**: Every region picks the cheapest applicable
//!   algorithm (insertion sort for short regions, run merging for structured
//!   ones, dual-pivot partitioning otherwise, heap sort when recursion
//!   degenerates), so adversarial inputs stay O(n log n).
//! - **Type Specialisation**: Monomorphised dispatch through the [`Sortable`]
//!   trait gives narrow integers a histogram sort and floats a total order
//!   with NaNs compacted to the tail and `-0.0` ordered before `+0.0`.
//! - **Work-Stealing Parallelism**: [`par_sort`] decomposes large slices onto
//!   a pool of LIFO-deque workers; completion propagates through atomic
//!   pending counts, never through blocked threads.
//! - **Comparator Generic**: Every entry point has a `*_by` variant taking a
//!   strict-weak-ordering predicate; one comparator value is threaded through
//!   the whole call.
//! - **In-Place Mutation**: The slice is permuted in place; auxiliary memory
//!   is limited to the run-merge/parallel scratch buffer of region size.
//!
//! ## Usage
//!
//! ### Basic Usage
//!
//! ```rust
//! use duosort::sort;
//!
//! let mut data = vec![64, 34, 25, 12, 22, 11, 90];
//! sort(&mut data);
//!
//! assert_eq!(data, vec![11, 12, 22, 25, 34, 64, 90]);
//! ```
//!
//! ### Custom Orders
//!
//! ```rust
//! use duosort::sort_by;
//!
//! let mut words = vec!["banana", "fig", "kiwi"];
//! sort_by(&mut words, |a, b| a.len() < b.len());
//!
//! assert_eq!(words, vec!["fig", "kiwi", "banana"]);
//! ```
//!
//! ### Parallel Sorting
//!
//! ```rust
//! use duosort::par_sort;
//!
//! let mut data: Vec<i64> = (0..100_000).rev().collect();
//! par_sort(&mut data, 4)?;
//!
//! assert!(data.windows(2).all(|w| w[0] <= w[1]));
//! # Ok::<(), duosort::SortError>(())
//! ```
//!
//! ## Performance Characteristics
//!
//! - **Average Case**: ~1.9 n ln n comparisons and ~0.8 n ln n swaps on
//!   uniformly random input, the dual-pivot profile.
//! - **Structured Input**: Already-sorted, reverse-sorted and few-runs
//!   inputs are detected in one O(n) scan and merged instead of partitioned.
//! - **Worst Case**: O(n log n); a depth counter hands pathological regions
//!   to heap sort.
//! - **Memory Overhead**: One scratch buffer of region size for run merging
//!   and parallel merging; nothing otherwise.
//!
//! Sorting is **not stable**: equal elements may be reordered. Use the
//! standard library's stable sort when tie order matters.

pub mod access;
pub mod error;
pub mod order;

mod api;
mod counting;
mod driver;
mod float;
mod heap;
mod insertion;
mod merge;
mod parallel;
mod partition;
mod pool;
mod region;
mod tuning;

pub use api::{
    Sortable, par_sort, par_sort_by, par_sort_range, par_sort_range_by, sort, sort_by,
    sort_indexed, sort_indexed_by, sort_range, sort_range_by,
};
pub use error::SortError;
pub use order::{LessFn, Natural, Order, Reverse};

pub mod prelude {
    pub use crate::api::{
        Sortable, par_sort, par_sort_by, par_sort_range, par_sort_range_by, sort, sort_by,
        sort_indexed, sort_indexed_by, sort_range, sort_range_by,
    };
    pub use crate::error::SortError;
    pub use crate::order::{LessFn, Natural, Order, Reverse};
}
