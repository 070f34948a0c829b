//! Insertion-sort base cases.

use crate::access::RandomAccess;
use crate::order::Order;

/// Plain insertion sort over `v[low..high)`.
///
/// Shift-based: the displaced element is held out while greater elements are
/// moved one slot right, so each misplaced element costs one write per shifted
/// slot instead of one swap. There is no sentinel; the inner loop stops at
/// `low` with an explicit bounds check, which keeps the routine correct on
/// sub-regions with `low > 0`.
pub(crate) fn insertion_sort<A, O>(v: &mut A, low: usize, high: usize, order: &O)
where
    A: RandomAccess + ?Sized,
    A::Element: Clone,
    O: Order<A::Element>,
{
    for k in low + 1..high {
        if order.lt(v.get(k), v.get(k - 1)) {
            let elem = v.get(k).clone();
            let mut j = k;
            while j > low && order.lt(&elem, v.get(j - 1)) {
                let shifted = v.get(j - 1).clone();
                v.set(j, shifted);
                j -= 1;
            }
            v.set(j, elem);
        }
    }
}

/// Mixed insertion sort for leftmost regions.
///
/// The last element of the region acts as a pin. One pass batches every
/// element greater than the pin to the tail: the tail cursor first retreats
/// past elements that already belong there, then a single pair swap moves the
/// offender. Both sides are finished with plain insertion sort. On uniformly
/// random input the batching removes roughly a third of the shift moves the
/// plain variant would perform on the large elements.
pub(crate) fn mixed_insertion_sort<A, O>(v: &mut A, low: usize, high: usize, order: &O)
where
    A: RandomAccess + ?Sized,
    A::Element: Clone,
    O: Order<A::Element>,
{
    if high - low < 2 {
        return;
    }

    let pin = v.get(high - 1).clone();

    // Partition greater-than-pin elements to [split, high).
    let mut split = high;
    let mut k = low;
    while k < split {
        if order.lt(&pin, v.get(k)) {
            split -= 1;
            while k < split && order.lt(&pin, v.get(split)) {
                split -= 1;
            }
            if k == split {
                break;
            }
            v.swap(k, split);
        }
        k += 1;
    }

    insertion_sort(v, low, split, order);
    insertion_sort(v, split, high, order);
}
