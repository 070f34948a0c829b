//! Compile-time tuning constants.
//!
//! Every threshold that changes which algorithm handles a region lives here.
//! The values are the ones the engine was benchmarked with; they are not part
//! of the public API but they are part of the observable performance contract.

/// Regions shorter than this are handled by plain insertion sort.
pub(crate) const INSERTION_THRESHOLD: usize = 32;

/// Leftmost regions shorter than this are handled by mixed insertion sort.
pub(crate) const MIXED_INSERTION_THRESHOLD: usize = 48;

/// Minimum region length before the driver attempts natural-run merging.
pub(crate) const TRY_MERGE_RUNS_THRESHOLD: usize = 4096;

/// The first detected run must be at least this long or the scan is abandoned.
pub(crate) const MIN_FIRST_RUN_LENGTH: usize = 16;

/// Hard cap on the number of runs the scan will track.
pub(crate) const MAX_RUN_CAPACITY: usize = 1024;

/// Geometric density bound: the scan aborts once
/// `run_count > scanned_len >> MIN_FIRST_RUNS_FACTOR`.
pub(crate) const MIN_FIRST_RUNS_FACTOR: u32 = 7;

/// Regions shorter than this are never split across workers.
pub(crate) const MIN_PARALLEL_SORT_SIZE: usize = 4096;

/// Merges of fewer total elements than this run as a sequential two-pointer pass.
pub(crate) const MIN_PARALLEL_MERGE_SIZE: usize = 2048;

/// Run-merge windows at least this long fork their top tree levels onto the pool.
pub(crate) const PARALLEL_RUN_MERGE_THRESHOLD: usize = 4096;

/// Minimum length before 1-byte keys take the counting-sort path.
pub(crate) const MIN_BYTE_COUNTING_SORT_SIZE: usize = 64;

/// Minimum length before 2-byte keys take the counting-sort path. The 64 KiB
/// histogram has to be zeroed and walked, which only pays off past this size.
pub(crate) const MIN_SHORT_COUNTING_SORT_SIZE: usize = 1750;

/// Recursion-depth ceiling; beyond it the region is handed to heap sort.
pub(crate) const MAX_RECURSION_DEPTH: u32 = 64;

/// Amount added to the depth counter on every recursive driver entry.
pub(crate) const DEPTH_STEP: u32 = 3;

/// Granularity unit for the parallel depth budget:
/// `ceil(log2(parallelism * n / SPLIT_UNIT))` splits are allowed from the root.
pub(crate) const SPLIT_UNIT: usize = 4096;
