//! Heap-sort worst-case fallback.

use crate::access::RandomAccess;
use crate::order::Order;

/// Heap sort over `v[low..high)`.
///
/// Guarantees O(n log n) comparisons and moves for any input; the driver
/// dispatches here once its depth counter shows the partitioning is
/// degenerating. Classic binary max-heap: built from the last parent down,
/// then repeated extract-max into the tail.
pub(crate) fn heap_sort<A, O>(v: &mut A, low: usize, high: usize, order: &O)
where
    A: RandomAccess + ?Sized,
    O: Order<A::Element>,
{
    let n = high - low;
    if n < 2 {
        return;
    }

    for root in (0..n / 2).rev() {
        sift_down(v, low, root, n, order);
    }

    for end in (1..n).rev() {
        v.swap(low, low + end);
        sift_down(v, low, 0, end, order);
    }
}

/// Restores the max-heap property for the subtree rooted at `root`, within
/// the first `len` elements of the heap based at `low`.
fn sift_down<A, O>(v: &mut A, low: usize, mut root: usize, len: usize, order: &O)
where
    A: RandomAccess + ?Sized,
    O: Order<A::Element>,
{
    loop {
        let mut child = 2 * root + 1;
        if child >= len {
            return;
        }
        if child + 1 < len && order.lt(v.get(low + child), v.get(low + child + 1)) {
            child += 1;
        }
        if !order.lt(v.get(low + root), v.get(low + child)) {
            return;
        }
        v.swap(low + root, low + child);
        root = child;
    }
}
