//! Comparator abstraction.
//!
//! Every internal operation is threaded with a single [`Order`] value so one
//! sort call uses one comparator end-to-end. The engine never calls `==` on
//! elements; equivalence is always derived from two `lt` calls.

/// A strict weak ordering over `T`.
///
/// `lt(a, b)` answers "does `a` sort strictly before `b`?". Implementations
/// must be pure: the engine may call `lt` from several threads at once during
/// a parallel sort, and it derives equivalence as `!lt(a, b) && !lt(b, a)`.
///
/// Orders are cheap values; they are cloned into every sub-task rather than
/// shared behind a reference.
pub trait Order<T: ?Sized>: Clone {
    /// Returns `true` if `a` is strictly less than `b` under this order.
    fn lt(&self, a: &T, b: &T) -> bool;

    /// Returns `true` if `a` is less than or equal to `b` under this order.
    #[inline]
    fn le(&self, a: &T, b: &T) -> bool {
        !self.lt(b, a)
    }

    /// Returns `true` if `a` and `b` are equivalent under this order.
    #[inline]
    fn equiv(&self, a: &T, b: &T) -> bool {
        !self.lt(a, b) && !self.lt(b, a)
    }
}

/// The natural ascending order of `T`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T: Ord> Order<T> for Natural {
    #[inline]
    fn lt(&self, a: &T, b: &T) -> bool {
        a < b
    }
}

/// The reverse of the natural order (descending sort).
#[derive(Clone, Copy, Debug, Default)]
pub struct Reverse;

impl<T: Ord> Order<T> for Reverse {
    #[inline]
    fn lt(&self, a: &T, b: &T) -> bool {
        b < a
    }
}

/// Adapter turning a `Fn(&T, &T) -> bool` "is less" predicate into an
/// [`Order`].
///
/// This is what the `*_by` entry points wrap their closure argument in.
#[derive(Clone, Copy, Debug)]
pub struct LessFn<F>(pub F);

impl<T, F> Order<T> for LessFn<F>
where
    F: Fn(&T, &T) -> bool + Clone,
{
    #[inline]
    fn lt(&self, a: &T, b: &T) -> bool {
        (self.0)(a, b)
    }
}

/// Ascending order on floats via `PartialOrd`.
///
/// Only a total order on NaN-free input; the float entry points compact NaNs
/// out of the region before handing the rest to the generic engine with this
/// order.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NumericOrder;

impl Order<f32> for NumericOrder {
    #[inline]
    fn lt(&self, a: &f32, b: &f32) -> bool {
        a < b
    }
}

impl Order<f64> for NumericOrder {
    #[inline]
    fn lt(&self, a: &f64, b: &f64) -> bool {
        a < b
    }
}
