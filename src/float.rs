//! IEEE-754 pre/post-processing.
//!
//! `PartialOrd` on floats is not a total order, so the engine brackets the
//! generic sort with two passes: the pre-pass compacts NaNs to the tail of
//! the region (shrinking the sortable range) and rewrites negative zeros to
//! `+0.0` while counting them; the post-pass restores the counted zeros as
//! `-0.0` at the front of the zero block. The result keeps the exact multiset
//! of input bit patterns modulo the legal zero-sign swap, with NaNs trailing.

use crate::merge::lower_bound;
use crate::order::Order;

/// Float types the engine can normalise around the generic sort.
pub(crate) trait FloatKey: Copy + PartialOrd {
    fn is_nan_key(self) -> bool;
    fn is_negative_zero(self) -> bool;
    fn positive_zero() -> Self;
    fn negative_zero() -> Self;
}

impl FloatKey for f32 {
    fn is_nan_key(self) -> bool {
        self.is_nan()
    }
    fn is_negative_zero(self) -> bool {
        self.to_bits() == (-0.0f32).to_bits()
    }
    fn positive_zero() -> Self {
        0.0
    }
    fn negative_zero() -> Self {
        -0.0
    }
}

impl FloatKey for f64 {
    fn is_nan_key(self) -> bool {
        self.is_nan()
    }
    fn is_negative_zero(self) -> bool {
        self.to_bits() == (-0.0f64).to_bits()
    }
    fn positive_zero() -> Self {
        0.0
    }
    fn negative_zero() -> Self {
        -0.0
    }
}

/// Pre-pass over `v[low..high)`.
///
/// Returns `(sortable_high, negative_zeros)`: NaNs now occupy
/// `[sortable_high, high)` and every zero left in the range is `+0.0`.
pub(crate) fn preprocess<F: FloatKey>(v: &mut [F], low: usize, high: usize) -> (usize, usize) {
    let mut end = high;
    let mut negative_zeros = 0;
    let mut k = low;

    while k < end {
        let x = v[k];
        if x.is_nan_key() {
            // Pull the next unexamined element in; do not advance.
            end -= 1;
            v.swap(k, end);
        } else {
            if x.is_negative_zero() {
                v[k] = F::positive_zero();
                negative_zeros += 1;
            }
            k += 1;
        }
    }

    (end, negative_zeros)
}

/// Post-pass: rewrites the first `negative_zeros` zeros of the sorted
/// `v[low..high)` back to `-0.0`.
pub(crate) fn postprocess<F: FloatKey>(
    v: &mut [F],
    low: usize,
    high: usize,
    negative_zeros: usize,
) {
    if negative_zeros == 0 {
        return;
    }
    // All zeros are contiguous after the sort; find where they start.
    let first = lower_bound(v, low, high, &F::positive_zero(), &FloatLowerOrder);
    for slot in &mut v[first..first + negative_zeros] {
        *slot = F::negative_zero();
    }
}

/// Order used only to locate the zero block boundary: everything strictly
/// negative sorts before zero.
#[derive(Clone, Copy)]
struct FloatLowerOrder;

impl<F: FloatKey> Order<F> for FloatLowerOrder {
    fn lt(&self, a: &F, b: &F) -> bool {
        a < b
    }
}
