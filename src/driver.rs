//! Sequential driver: per-region algorithm selection.

use crate::access::RandomAccess;
use crate::heap::heap_sort;
use crate::insertion::{insertion_sort, mixed_insertion_sort};
use crate::merge::try_merge_runs;
use crate::order::Order;
use crate::partition::{Split, dual_pivot_partition};
use crate::tuning::{
    DEPTH_STEP, INSERTION_THRESHOLD, MAX_RECURSION_DEPTH, MIXED_INSERTION_THRESHOLD,
    TRY_MERGE_RUNS_THRESHOLD,
};

/// Run-merger hook; the contiguous driver plugs in [`try_merge_runs`], the
/// indexed driver a stub (the scratch ping-pong wants a contiguous region to
/// clone from, so non-contiguous sequences sort through partitioning alone).
type MergeHook<A, O> = fn(&mut A, usize, usize, &O) -> bool;

/// Sorts `v[low..high)` with the full adaptive engine.
pub(crate) fn sort_slice<T, O>(v: &mut [T], low: usize, high: usize, order: &O)
where
    T: Clone,
    O: Order<T>,
{
    drive(v, low, high, 0, true, order, try_merge_runs::<T, O>);
}

/// Index-based variant of the driver for non-contiguous sequences.
pub(crate) fn sort_indexed_seq<A, O>(v: &mut A, low: usize, high: usize, order: &O)
where
    A: RandomAccess + ?Sized,
    A::Element: Clone,
    O: Order<A::Element>,
{
    drive(v, low, high, 0, true, order, |_, _, _, _| false);
}

/// The driver proper, written as a loop over `(low, high, depth, leftmost)`.
///
/// Decision order per region: insertion sort below `INSERTION_THRESHOLD`,
/// mixed insertion for leftmost regions below `MIXED_INSERTION_THRESHOLD`,
/// heap sort once the depth counter passes `MAX_RECURSION_DEPTH`, the run
/// merger from `TRY_MERGE_RUNS_THRESHOLD` upward, and otherwise a dual-pivot
/// partition. Each partition recurses only on its smaller sub-ranges and
/// reassigns the loop parameters to the largest one, which bounds the stack
/// to O(log n) frames regardless of input.
fn drive<A, O>(
    v: &mut A,
    mut low: usize,
    mut high: usize,
    mut depth: u32,
    mut leftmost: bool,
    order: &O,
    merge_hook: MergeHook<A, O>,
) where
    A: RandomAccess + ?Sized,
    A::Element: Clone,
    O: Order<A::Element>,
{
    loop {
        let n = high - low;

        if n < INSERTION_THRESHOLD {
            insertion_sort(v, low, high, order);
            return;
        }
        if leftmost && n < MIXED_INSERTION_THRESHOLD {
            mixed_insertion_sort(v, low, high, order);
            return;
        }
        if depth > MAX_RECURSION_DEPTH {
            heap_sort(v, low, high, order);
            return;
        }
        if n >= TRY_MERGE_RUNS_THRESHOLD && merge_hook(v, low, high, order) {
            return;
        }

        depth += DEPTH_STEP;

        let (sub, count) = match dual_pivot_partition(v, low, high, order) {
            Split::Three { left, mid, right } => ([left, mid, right], 3),
            Split::Two { left, right } => ([left, right, low..low], 2),
        };

        // Iterate on the largest sub-range, recurse on the rest.
        let mut largest = 0;
        for i in 1..count {
            if sub[i].len() > sub[largest].len() {
                largest = i;
            }
        }
        for (i, range) in sub.iter().enumerate().take(count) {
            if i != largest && range.len() > 1 {
                let child_leftmost = leftmost && range.start == low;
                drive(v, range.start, range.end, depth, child_leftmost, order, merge_hook);
            }
        }

        let next = sub[largest].clone();
        if next.len() <= 1 {
            return;
        }
        leftmost = leftmost && next.start == low;
        low = next.start;
        high = next.end;
    }
}
