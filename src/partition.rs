//! Dual-pivot three-way partitioning.

use std::ops::Range;

use crate::access::RandomAccess;
use crate::order::Order;

/// Outcome of partitioning a region.
///
/// The ranges are the sub-regions that still need sorting; elements outside
/// them (the pivot slots, and the whole equal zone in [`Split::Two`]) are
/// already in their final positions.
pub(crate) enum Split {
    /// Distinct pivots `p1 < p2`: `[< p1 | p1 <= x <= p2 | > p2]`.
    Three {
        left: Range<usize>,
        mid: Range<usize>,
        right: Range<usize>,
    },
    /// The sampled pivots were equivalent; single-pivot Dutch-flag split
    /// `[< p | = p | > p]` with the equal zone finalised.
    Two {
        left: Range<usize>,
        right: Range<usize>,
    },
}

/// Partitions `v[low..high)` around two sampled pivots.
///
/// Five candidates are taken at `low + (len/7) * {1, 2, 3, 5, 6}` and ordered
/// in place by a 9-exchange network; the candidates of rank 1 and 3 become the
/// pivots. The sampling offsets are part of the contract: they determine the
/// average swap count the driver is tuned for.
///
/// Precondition: `high - low >= 7` so the candidate offsets are distinct; the
/// driver guarantees this via its insertion-sort thresholds.
pub(crate) fn dual_pivot_partition<A, O>(v: &mut A, low: usize, high: usize, order: &O) -> Split
where
    A: RandomAccess + ?Sized,
    A::Element: Clone,
    O: Order<A::Element>,
{
    let delta = (high - low) / 7;
    let c = [
        low + delta,
        low + 2 * delta,
        low + 3 * delta,
        low + 5 * delta,
        low + 6 * delta,
    ];

    sort_candidates(v, &c, order);

    let equal = !order.lt(v.get(c[1]), v.get(c[3])) && !order.lt(v.get(c[3]), v.get(c[1]));
    if equal {
        partition_single(v, low, high, c[2], order)
    } else {
        partition_dual(v, low, high, c[1], c[3], order)
    }
}

/// Orders the five candidate slots with the minimal 9-exchange network.
fn sort_candidates<A, O>(v: &mut A, c: &[usize; 5], order: &O)
where
    A: RandomAccess + ?Sized,
    O: Order<A::Element>,
{
    const NETWORK: [(usize, usize); 9] = [
        (0, 1),
        (3, 4),
        (2, 4),
        (2, 3),
        (0, 3),
        (0, 2),
        (1, 4),
        (1, 3),
        (1, 2),
    ];
    for &(i, j) in &NETWORK {
        if order.lt(v.get(c[j]), v.get(c[i])) {
            v.swap(c[i], c[j]);
        }
    }
}

/// Two-pivot scan with the pivots parked at the region ends.
fn partition_dual<A, O>(
    v: &mut A,
    low: usize,
    high: usize,
    p1_at: usize,
    p2_at: usize,
    order: &O,
) -> Split
where
    A: RandomAccess + ?Sized,
    A::Element: Clone,
    O: Order<A::Element>,
{
    v.swap(low, p1_at);
    v.swap(high - 1, p2_at);
    let p1 = v.get(low).clone();
    let p2 = v.get(high - 1).clone();

    let mut less = low + 1;
    let mut great = high - 2;
    let mut k = less;

    while k <= great {
        if order.lt(v.get(k), &p1) {
            v.swap(k, less);
            less += 1;
        } else if order.lt(&p2, v.get(k)) {
            // Retreat past elements already in the right zone, bounded by k.
            while k < great && order.lt(&p2, v.get(great)) {
                great -= 1;
            }
            v.swap(k, great);
            great -= 1;
            if order.lt(v.get(k), &p1) {
                v.swap(k, less);
                less += 1;
            }
        }
        k += 1;
    }

    // Swap the pivots into their final slots.
    v.swap(low, less - 1);
    v.swap(high - 1, great + 1);

    Split::Three {
        left: low..less - 1,
        mid: less..great + 1,
        right: great + 2..high,
    }
}

/// Degenerate single-pivot mode: classical three-way Dutch-flag split, one
/// comparison cheaper per element in the common all-equal stretches.
fn partition_single<A, O>(
    v: &mut A,
    low: usize,
    high: usize,
    pivot_at: usize,
    order: &O,
) -> Split
where
    A: RandomAccess + ?Sized,
    A::Element: Clone,
    O: Order<A::Element>,
{
    let pivot = v.get(pivot_at).clone();

    let mut lt = low;
    let mut gt = high;
    let mut k = low;

    while k < gt {
        if order.lt(v.get(k), &pivot) {
            v.swap(k, lt);
            lt += 1;
            k += 1;
        } else if order.lt(&pivot, v.get(k)) {
            gt -= 1;
            v.swap(k, gt);
        } else {
            k += 1;
        }
    }

    Split::Two {
        left: low..lt,
        right: gt..high,
    }
}
