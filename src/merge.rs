//! Natural-run detection and merging.
//!
//! The scan walks the region once, reversing descending runs in place and
//! recording run boundaries. If the run structure is dense enough the region
//! is sorted by a divide-and-conquer merge that ping-pongs between the region
//! and a same-size scratch buffer, so the final merge level lands directly in
//! the region with no copy-back pass.

use crate::order::Order;
use crate::tuning::{MAX_RUN_CAPACITY, MIN_FIRST_RUNS_FACTOR, MIN_FIRST_RUN_LENGTH};

/// Result of the run-detection scan.
pub(crate) enum RunScan {
    /// The region is a single monotonic run (possibly after one reversal).
    Sorted,
    /// Run boundaries `runs[0] = low .. runs[count] = high`, `count >= 2`.
    Structured(Vec<usize>),
    /// The region is not structured enough; fall back to partitioning.
    Unstructured,
}

/// Scans `v[low..high)` for natural runs.
///
/// Descending runs are reversed in place as they are found, so a `Sorted` or
/// `Structured` result leaves every run ascending. Direction is decided per
/// boundary through the comparator: descending means `lt(a[k], a[k - 1])`.
/// Adjacent runs whose boundary is not a strict descent are glued into one.
pub(crate) fn scan_runs<T, O>(v: &mut [T], low: usize, high: usize, order: &O) -> RunScan
where
    O: Order<T>,
{
    let mut runs: Option<Vec<usize>> = None;
    let mut count = 1usize;
    let mut last = low;
    let mut k = low + 1;

    while k < high {
        if order.lt(&v[k - 1], &v[k]) {
            // Ascending: extend while non-decreasing.
            k += 1;
            while k < high && !order.lt(&v[k], &v[k - 1]) {
                k += 1;
            }
        } else if order.lt(&v[k], &v[k - 1]) {
            // Descending: extend while non-increasing, then reverse in place.
            k += 1;
            while k < high && !order.lt(&v[k - 1], &v[k]) {
                k += 1;
            }
            let (mut i, mut j) = (last, k - 1);
            while i < j {
                v.swap(i, j);
                i += 1;
                j -= 1;
            }
        } else {
            // Equal stretch: it belongs to whichever run encloses it.
            k += 1;
            while k < high && order.equiv(&v[k - 1], &v[k]) {
                k += 1;
            }
            if k < high {
                continue;
            }
        }

        match &mut runs {
            None => {
                if k == high {
                    // Monotonic region, already in order after the reversal.
                    return RunScan::Sorted;
                }
                if k - low < MIN_FIRST_RUN_LENGTH {
                    return RunScan::Unstructured;
                }
                let mut r = Vec::with_capacity(run_capacity(high - low));
                r.push(low);
                r.push(k);
                runs = Some(r);
            }
            Some(r) => {
                if order.lt(&v[last], &v[last - 1]) {
                    // Genuine boundary: a new run starts at `last`.
                    if count > (k - low) >> MIN_FIRST_RUNS_FACTOR {
                        return RunScan::Unstructured;
                    }
                    count += 1;
                    if count == MAX_RUN_CAPACITY {
                        return RunScan::Unstructured;
                    }
                    r.push(k);
                } else {
                    // The previous run flows into this one; extend it.
                    let end = r.len() - 1;
                    r[end] = k;
                }
            }
        }
        last = k;
    }

    match runs {
        Some(r) if r.len() > 2 => RunScan::Structured(r),
        _ => RunScan::Sorted,
    }
}

fn run_capacity(len: usize) -> usize {
    (((len >> 10) | 0x7F) & 0x3FF) + 1
}

/// Attempts to sort `v[low..high)` by merging its natural runs.
///
/// Returns `false` when the region is not structured enough or the scratch
/// buffer cannot be reserved; the caller then partitions as usual. Returns
/// `true` when the region is sorted.
pub(crate) fn try_merge_runs<T, O>(v: &mut [T], low: usize, high: usize, order: &O) -> bool
where
    T: Clone,
    O: Order<T>,
{
    match scan_runs(v, low, high, order) {
        RunScan::Sorted => true,
        RunScan::Unstructured => false,
        RunScan::Structured(runs) => {
            let mut scratch = Vec::new();
            if scratch.try_reserve_exact(high - low).is_err() {
                return false;
            }
            scratch.extend(v[low..high].iter().cloned());
            merge_runs(
                v,
                &mut scratch,
                low,
                &runs,
                0,
                runs.len() - 1,
                false,
                order,
            );
            true
        }
    }
}

/// Merges the runs `runs[lo..=hi]` so the result lands in the region
/// (`into_scratch == false`) or the scratch buffer (`into_scratch == true`).
///
/// `a` is indexed with the absolute run coordinates; `scratch` is the same
/// window shifted left by `offset`. The destination alternates per recursion
/// level, which is what makes the final level land in the region without a
/// dedicated copy-back: a single-run leaf only moves data when its level
/// requires the scratch side.
#[allow(clippy::too_many_arguments)]
pub(crate) fn merge_runs<T, O>(
    a: &mut [T],
    scratch: &mut [T],
    offset: usize,
    runs: &[usize],
    lo: usize,
    hi: usize,
    into_scratch: bool,
    order: &O,
) where
    T: Clone,
    O: Order<T>,
{
    if hi - lo == 1 {
        if into_scratch {
            scratch[runs[lo] - offset..runs[hi] - offset]
                .clone_from_slice(&a[runs[lo]..runs[hi]]);
        }
        return;
    }

    // Split the run index so the destination midpoint is bracketed.
    let mid = split_runs(runs, lo, hi);

    merge_runs(a, scratch, offset, runs, lo, mid, !into_scratch, order);
    merge_runs(a, scratch, offset, runs, mid, hi, !into_scratch, order);

    let (r_lo, r_mid, r_hi) = (runs[lo], runs[mid], runs[hi]);
    if into_scratch {
        merge_parts(
            order,
            scratch,
            r_lo - offset,
            a,
            r_lo..r_mid,
            a,
            r_mid..r_hi,
        );
    } else {
        merge_parts(
            order,
            a,
            r_lo,
            scratch,
            r_lo - offset..r_mid - offset,
            scratch,
            r_mid - offset..r_hi - offset,
        );
    }
}

/// Picks the run-index split whose boundary brackets the destination
/// midpoint `(runs[lo] + runs[hi]) >> 1`.
pub(crate) fn split_runs(runs: &[usize], lo: usize, hi: usize) -> usize {
    let target = (runs[lo] + runs[hi]) >> 1;
    let mut mid = lo + 1;
    while mid + 1 < hi && runs[mid + 1] <= target {
        mid += 1;
    }
    mid
}

/// Two-pointer merge of `src_a[ra]` and `src_b[rb]` into `dst` starting at
/// `k`. Ties select the left source, keeping the traversal deterministic.
pub(crate) fn merge_parts<T, O>(
    order: &O,
    dst: &mut [T],
    mut k: usize,
    src_a: &[T],
    ra: std::ops::Range<usize>,
    src_b: &[T],
    rb: std::ops::Range<usize>,
) where
    T: Clone,
    O: Order<T>,
{
    let (mut lo1, hi1) = (ra.start, ra.end);
    let (mut lo2, hi2) = (rb.start, rb.end);

    while lo1 < hi1 && lo2 < hi2 {
        if order.lt(&src_b[lo2], &src_a[lo1]) {
            dst[k] = src_b[lo2].clone();
            lo2 += 1;
        } else {
            dst[k] = src_a[lo1].clone();
            lo1 += 1;
        }
        k += 1;
    }
    while lo1 < hi1 {
        dst[k] = src_a[lo1].clone();
        lo1 += 1;
        k += 1;
    }
    while lo2 < hi2 {
        dst[k] = src_b[lo2].clone();
        lo2 += 1;
        k += 1;
    }
}

/// First index in `v[lo..hi)` whose element is not less than `key`.
pub(crate) fn lower_bound<T, O>(v: &[T], mut lo: usize, mut hi: usize, key: &T, order: &O) -> usize
where
    O: Order<T>,
{
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if order.lt(&v[mid], key) {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo
}
