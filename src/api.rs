//! Public entry points and type dispatch.

use crate::access::RandomAccess;
use crate::counting::{counting_sort_i8, counting_sort_i16, counting_sort_u8, counting_sort_u16};
use crate::driver;
use crate::error::{SortError, check_range};
use crate::float::{postprocess, preprocess};
use crate::order::{LessFn, Natural, NumericOrder, Order};
use crate::parallel::parallel_sort;
use crate::tuning::{
    MIN_BYTE_COUNTING_SORT_SIZE, MIN_PARALLEL_SORT_SIZE, MIN_SHORT_COUNTING_SORT_SIZE,
};

/// Element types with a dedicated plan under the natural ascending order.
///
/// The natural-order entry points ([`sort`], [`par_sort`], [`sort_range`],
/// [`par_sort_range`]) dispatch through this trait so every element type
/// monomorphises to its best engine: narrow integers take the counting-sort
/// path past its engagement threshold, floats are bracketed by the IEEE-754
/// normalisation passes, everything else runs the generic adaptive engine.
/// Comparator-taking entry points bypass the trait entirely, because a
/// histogram or a NaN compaction cannot honour an arbitrary order.
///
/// Implementations for all primitive numeric types, `bool` and `char` are
/// provided. A custom `Ord` type can opt in by delegating both methods to
/// [`sort_range_by`] / [`par_sort_range_by`].
pub trait Sortable: Clone + Send + Sync + 'static {
    /// Sequentially sorts `v[low..high)` ascending. Bounds are
    /// caller-validated.
    fn sort_range(v: &mut [Self], low: usize, high: usize);

    /// Sorts `v[low..high)` ascending with up to `parallelism` workers.
    fn par_sort_range(
        v: &mut [Self],
        low: usize,
        high: usize,
        parallelism: usize,
    ) -> Result<(), SortError>;
}

/// Routes to the parallel engine or degrades to the sequential driver.
fn par_dispatch<T, O>(
    v: &mut [T],
    low: usize,
    high: usize,
    order: O,
    parallelism: usize,
) -> Result<(), SortError>
where
    T: Clone + Send + 'static,
    O: Order<T> + Send + 'static,
{
    if parallelism <= 1 || high - low < MIN_PARALLEL_SORT_SIZE {
        driver::sort_slice(v, low, high, &order);
        return Ok(());
    }
    parallel_sort(v, low, high, &order, parallelism)
}

macro_rules! sortable_via_generic_engine {
    ($($t:ty),* $(,)?) => {$(
        impl Sortable for $t {
            fn sort_range(v: &mut [Self], low: usize, high: usize) {
                driver::sort_slice(v, low, high, &Natural);
            }

            fn par_sort_range(
                v: &mut [Self],
                low: usize,
                high: usize,
                parallelism: usize,
            ) -> Result<(), SortError> {
                par_dispatch(v, low, high, Natural, parallelism)
            }
        }
    )*};
}

sortable_via_generic_engine!(u32, u64, u128, usize, i32, i64, i128, isize, bool, char);

macro_rules! sortable_via_counting_sort {
    ($($t:ty => ($counting:ident, $threshold:expr)),* $(,)?) => {$(
        impl Sortable for $t {
            fn sort_range(v: &mut [Self], low: usize, high: usize) {
                if high - low >= $threshold {
                    $counting(v, low, high);
                } else {
                    driver::sort_slice(v, low, high, &Natural);
                }
            }

            fn par_sort_range(
                v: &mut [Self],
                low: usize,
                high: usize,
                _parallelism: usize,
            ) -> Result<(), SortError> {
                // The histogram pass is O(n) and memory-bound; splitting it
                // across workers never pays off for 1- and 2-byte keys.
                Self::sort_range(v, low, high);
                Ok(())
            }
        }
    )*};
}

sortable_via_counting_sort!(
    u8 => (counting_sort_u8, MIN_BYTE_COUNTING_SORT_SIZE),
    i8 => (counting_sort_i8, MIN_BYTE_COUNTING_SORT_SIZE),
    u16 => (counting_sort_u16, MIN_SHORT_COUNTING_SORT_SIZE),
    i16 => (counting_sort_i16, MIN_SHORT_COUNTING_SORT_SIZE),
);

macro_rules! sortable_via_float_normalisation {
    ($($t:ty),* $(,)?) => {$(
        impl Sortable for $t {
            fn sort_range(v: &mut [Self], low: usize, high: usize) {
                let (sortable_high, negative_zeros) = preprocess(v, low, high);
                driver::sort_slice(v, low, sortable_high, &NumericOrder);
                postprocess(v, low, sortable_high, negative_zeros);
            }

            fn par_sort_range(
                v: &mut [Self],
                low: usize,
                high: usize,
                parallelism: usize,
            ) -> Result<(), SortError> {
                let (sortable_high, negative_zeros) = preprocess(v, low, high);
                par_dispatch(v, low, sortable_high, NumericOrder, parallelism)?;
                postprocess(v, low, sortable_high, negative_zeros);
                Ok(())
            }
        }
    )*};
}

sortable_via_float_normalisation!(f32, f64);

/// Sorts a slice ascending, in place.
///
/// # Examples
///
/// ```
/// use duosort::sort;
///
/// let mut data = vec![64, 34, 25, 12, 22, 11, 90];
/// sort(&mut data);
///
/// assert_eq!(data, vec![11, 12, 22, 25, 34, 64, 90]);
/// ```
pub fn sort<T: Sortable>(v: &mut [T]) {
    if v.len() > 1 {
        T::sort_range(v, 0, v.len());
    }
}

/// Sorts a slice in place with a caller-supplied "is less" predicate.
///
/// `is_less` must be a strict weak ordering; the engine derives equality from
/// it and never calls `==` on elements.
///
/// # Examples
///
/// ```
/// use duosort::sort_by;
///
/// let mut data = vec![3_i32, -1, 2, -4];
/// sort_by(&mut data, |a, b| a.abs() < b.abs());
///
/// assert_eq!(data, vec![-1, 2, 3, -4]);
/// ```
pub fn sort_by<T, F>(v: &mut [T], is_less: F)
where
    T: Clone,
    F: Fn(&T, &T) -> bool + Clone,
{
    if v.len() > 1 {
        driver::sort_slice(v, 0, v.len(), &LessFn(is_less));
    }
}

/// Sorts `v[low..high)` ascending, leaving the rest of the slice untouched.
///
/// # Errors
///
/// [`SortError::InvalidRange`] unless `low <= high <= v.len()`.
pub fn sort_range<T: Sortable>(v: &mut [T], low: usize, high: usize) -> Result<(), SortError> {
    check_range(low, high, v.len())?;
    if high - low > 1 {
        T::sort_range(v, low, high);
    }
    Ok(())
}

/// Sorts `v[low..high)` with a caller-supplied predicate.
///
/// # Errors
///
/// [`SortError::InvalidRange`] unless `low <= high <= v.len()`.
pub fn sort_range_by<T, F>(
    v: &mut [T],
    low: usize,
    high: usize,
    is_less: F,
) -> Result<(), SortError>
where
    T: Clone,
    F: Fn(&T, &T) -> bool + Clone,
{
    check_range(low, high, v.len())?;
    if high - low > 1 {
        driver::sort_slice(v, low, high, &LessFn(is_less));
    }
    Ok(())
}

/// Sorts a slice ascending using up to `parallelism` worker threads.
///
/// Degrees of 0 and 1 run the sequential engine, as do slices too short to
/// amortise the pool; the worker count is additionally capped at the number
/// of available cores. The scratch buffer is reserved before any worker
/// starts, so an allocation failure leaves the slice untouched.
///
/// # Examples
///
/// ```
/// use duosort::par_sort;
///
/// let mut data: Vec<u64> = (0..10_000).rev().collect();
/// par_sort(&mut data, 4).unwrap();
///
/// assert!(data.windows(2).all(|w| w[0] <= w[1]));
/// ```
///
/// # Errors
///
/// [`SortError::ScratchAlloc`] if the scratch buffer cannot be reserved.
pub fn par_sort<T: Sortable>(v: &mut [T], parallelism: usize) -> Result<(), SortError> {
    if v.len() > 1 {
        T::par_sort_range(v, 0, v.len(), parallelism)?;
    }
    Ok(())
}

/// Parallel variant of [`sort_by`].
///
/// The predicate is cloned into every task, so it must be `Send` and pure:
/// it will be called concurrently from several workers.
///
/// # Errors
///
/// [`SortError::ScratchAlloc`] if the scratch buffer cannot be reserved.
pub fn par_sort_by<T, F>(v: &mut [T], is_less: F, parallelism: usize) -> Result<(), SortError>
where
    T: Clone + Send + 'static,
    F: Fn(&T, &T) -> bool + Clone + Send + 'static,
{
    if v.len() > 1 {
        par_dispatch(v, 0, v.len(), LessFn(is_less), parallelism)?;
    }
    Ok(())
}

/// Parallel variant of [`sort_range`].
///
/// # Errors
///
/// [`SortError::InvalidRange`] for bad bounds, [`SortError::ScratchAlloc`]
/// on scratch reservation failure.
pub fn par_sort_range<T: Sortable>(
    v: &mut [T],
    low: usize,
    high: usize,
    parallelism: usize,
) -> Result<(), SortError> {
    check_range(low, high, v.len())?;
    if high - low > 1 {
        T::par_sort_range(v, low, high, parallelism)?;
    }
    Ok(())
}

/// Parallel variant of [`sort_range_by`].
///
/// # Errors
///
/// [`SortError::InvalidRange`] for bad bounds, [`SortError::ScratchAlloc`]
/// on scratch reservation failure.
pub fn par_sort_range_by<T, F>(
    v: &mut [T],
    low: usize,
    high: usize,
    is_less: F,
    parallelism: usize,
) -> Result<(), SortError>
where
    T: Clone + Send + 'static,
    F: Fn(&T, &T) -> bool + Clone + Send + 'static,
{
    check_range(low, high, v.len())?;
    if high - low > 1 {
        par_dispatch(v, low, high, LessFn(is_less), parallelism)?;
    }
    Ok(())
}

/// Sorts a non-contiguous random-access sequence ascending.
///
/// Runs the index-based sequential driver; see
/// [`RandomAccess`](crate::access::RandomAccess) for the sequence contract.
///
/// # Examples
///
/// ```
/// use std::collections::VecDeque;
/// use duosort::sort_indexed;
///
/// let mut data: VecDeque<i32> = VecDeque::from(vec![9, 8, 7, 6, 5, 4, 3, 2, 1, 0]);
/// sort_indexed(&mut data);
///
/// assert_eq!(data, VecDeque::from((0..10).collect::<Vec<_>>()));
/// ```
pub fn sort_indexed<A>(seq: &mut A)
where
    A: RandomAccess + ?Sized,
    A::Element: Ord + Clone,
{
    if seq.len() > 1 {
        driver::sort_indexed_seq(seq, 0, seq.len(), &Natural);
    }
}

/// Sorts a non-contiguous random-access sequence with a caller-supplied
/// predicate.
pub fn sort_indexed_by<A, F>(seq: &mut A, is_less: F)
where
    A: RandomAccess + ?Sized,
    A::Element: Clone,
    F: Fn(&A::Element, &A::Element) -> bool + Clone,
{
    if seq.len() > 1 {
        driver::sort_indexed_seq(seq, 0, seq.len(), &LessFn(is_less));
    }
}
