//! Parallel engine: counted completers over the work-stealing pool.
//!
//! No worker ever blocks on a child task. Every fork registers its children
//! with a [`Completer`] holding a pending count; the last child to decrement
//! the count runs the parent's completion action on its own thread and then
//! propagates upward. The calling thread is the only blocked party; it waits
//! on a latch the root completer fires.
//!
//! Decomposition: a sort task splits its region into four quarters and pushes
//! four child sort tasks; their completion launches two pair merges into the
//! scratch buffer and then one merge of the scratch halves back into the
//! region. Merge tasks split the longer source at its midpoint, binary-search
//! the split key in the shorter source, and fork; below
//! `MIN_PARALLEL_MERGE_SIZE` they run the sequential two-pointer merge.
//! Scratch sub-views always mirror the region split, so concurrent tasks own
//! disjoint slices of both buffers.

use std::panic::resume_unwind;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::driver;
use crate::error::SortError;
use crate::merge::{RunScan, lower_bound, merge_parts, merge_runs, scan_runs, split_runs};
use crate::order::Order;
use crate::pool::{Job, Latch, LatchState, Pool, WorkerHandle};
use crate::region::Region;
use crate::tuning::{
    MIN_PARALLEL_MERGE_SIZE, MIN_PARALLEL_SORT_SIZE, PARALLEL_RUN_MERGE_THRESHOLD, SPLIT_UNIT,
};

/// A task completion handle carrying an atomic pending-child count.
///
/// `complete` decrements with acquire/release semantics; the thread that
/// observes zero runs the action (at most once) and walks up the parent
/// chain iteratively. A node that hands its continuation to a freshly
/// spawned task instead of a parent simply captures the real parent in its
/// action and carries `parent: None`.
pub(crate) struct Completer {
    pending: AtomicUsize,
    parent: Option<Arc<Completer>>,
    action: Mutex<Option<Job>>,
}

impl Completer {
    pub(crate) fn new(
        pending: usize,
        parent: Option<Arc<Completer>>,
        action: Option<Job>,
    ) -> Arc<Completer> {
        Arc::new(Completer {
            pending: AtomicUsize::new(pending),
            parent,
            action: Mutex::new(action),
        })
    }

    pub(crate) fn complete(self: &Arc<Completer>, ctx: &WorkerHandle) {
        let mut node = Arc::clone(self);
        loop {
            if node.pending.fetch_sub(1, Ordering::AcqRel) != 1 {
                return;
            }
            let action = node
                .action
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .take();
            if let Some(run) = action {
                run(ctx);
            }
            let Some(parent) = &node.parent else { return };
            let parent = Arc::clone(parent);
            node = parent;
        }
    }
}

/// Splits allowed from the root: `ceil(log2(parallelism * n / SPLIT_UNIT))`.
fn depth_budget(parallelism: usize, n: usize) -> u32 {
    let units = parallelism.saturating_mul(n / SPLIT_UNIT).max(1);
    usize::BITS - (units - 1).leading_zeros()
}

/// Sorts `v[low..high)` on a freshly built pool of
/// `min(parallelism, available cores)` workers.
///
/// The scratch buffer is reserved up front (the only fallible step); the run
/// scan happens once on the calling thread so structured regions go straight
/// into a parallel run merge instead of quarter decomposition.
pub(crate) fn parallel_sort<T, O>(
    v: &mut [T],
    low: usize,
    high: usize,
    order: &O,
    parallelism: usize,
) -> Result<(), SortError>
where
    T: Clone + Send + 'static,
    O: Order<T> + Send + 'static,
{
    let n = high - low;

    let runs = match scan_runs(v, low, high, order) {
        RunScan::Sorted => return Ok(()),
        RunScan::Structured(runs) => Some(runs),
        RunScan::Unstructured => None,
    };

    let mut scratch = Vec::new();
    if scratch.try_reserve_exact(n).is_err() {
        return Err(SortError::ScratchAlloc { elements: n });
    }
    scratch.extend(v[low..high].iter().cloned());

    let workers = parallelism.min(num_cpus::get()).max(1);
    let latch = Latch::new();
    let pool = Pool::new(workers, Arc::clone(&latch));

    let a = Region::new(v);
    let b = Region::new(&mut scratch);

    let root = {
        let latch = Arc::clone(&latch);
        Completer::new(1, None, Some(Box::new(move |_ctx: &WorkerHandle| {
            latch.complete();
        })))
    };

    let order_task = order.clone();
    match runs {
        Some(runs) => {
            let runs = Arc::new(runs);
            let hi = runs.len() - 1;
            pool.inject(Box::new(move |ctx| {
                merge_runs_task(ctx, a, b, low, runs, 0, hi, false, order_task, root);
            }));
        }
        None => {
            let budget = depth_budget(workers, n);
            pool.inject(Box::new(move |ctx| {
                sort_task(ctx, a, b, low, high, low, budget, order_task, root);
            }));
        }
    }

    let (outcome, payload) = pool.finish();
    if outcome == LatchState::Poisoned {
        if let Some(payload) = payload {
            resume_unwind(payload);
        }
    }
    Ok(())
}

/// Sort task over the absolute range `[lo, hi)` of region `a`, with scratch
/// `b` shifted left by `offset`. Splits into quarters until the region is
/// small or the depth budget is spent, then runs the sequential driver.
#[allow(clippy::too_many_arguments)]
fn sort_task<T, O>(
    ctx: &WorkerHandle,
    a: Region<T>,
    b: Region<T>,
    lo: usize,
    hi: usize,
    offset: usize,
    budget: u32,
    order: O,
    done: Arc<Completer>,
) where
    T: Clone + Send + 'static,
    O: Order<T> + Send + 'static,
{
    let n = hi - lo;
    if n < MIN_PARALLEL_SORT_SIZE || budget == 0 {
        let slice = unsafe { a.sub(lo, hi).as_mut_slice() };
        driver::sort_slice(slice, 0, n, &order);
        done.complete(ctx);
        return;
    }

    let q = n / 4;
    let (q0, q1, q2, q3, q4) = (lo, lo + q, lo + 2 * q, lo + 3 * q, hi);

    // Stage 3: scratch halves -> region, completing `done`.
    let halves = {
        let order = order.clone();
        Completer::new(2, None, Some(Box::new(move |ctx: &WorkerHandle| {
            let (dst, s1, s2) = unsafe {
                (
                    a.sub(q0, q4),
                    b.sub(q0 - offset, q2 - offset),
                    b.sub(q2 - offset, q4 - offset),
                )
            };
            merge_task(ctx, dst, s1, s2, order, done);
        })))
    };

    // Stage 2: quarter pairs -> scratch, in parallel.
    let quarters = {
        let order = order.clone();
        Completer::new(4, None, Some(Box::new(move |ctx: &WorkerHandle| {
            let (d_low, s0, s1) = unsafe {
                (
                    b.sub(q0 - offset, q2 - offset),
                    a.sub(q0, q1),
                    a.sub(q1, q2),
                )
            };
            let (d_high, s2, s3) = unsafe {
                (
                    b.sub(q2 - offset, q4 - offset),
                    a.sub(q2, q3),
                    a.sub(q3, q4),
                )
            };
            let upper = {
                let order = order.clone();
                let halves = Arc::clone(&halves);
                Box::new(move |ctx: &WorkerHandle| {
                    merge_task(ctx, d_high, s2, s3, order, halves);
                })
            };
            ctx.spawn(upper);
            merge_task(ctx, d_low, s0, s1, order, halves);
        })))
    };

    // Stage 1: push the four child sort tasks; the owner pops them LIFO,
    // thieves take the older ones from the other end.
    for (start, end) in [(q0, q1), (q1, q2), (q2, q3), (q3, q4)] {
        let order = order.clone();
        let quarters = Arc::clone(&quarters);
        ctx.spawn(Box::new(move |ctx: &WorkerHandle| {
            sort_task(ctx, a, b, start, end, offset, budget - 1, order, quarters);
        }));
    }
}

/// Parallel merge of two sorted source regions into `dst`.
///
/// The longer source is split at its midpoint; the split key's lower bound in
/// the shorter source fixes the destination split. Children fork under a
/// pending-2 completer chained to `done`.
fn merge_task<T, O>(
    ctx: &WorkerHandle,
    dst: Region<T>,
    src1: Region<T>,
    src2: Region<T>,
    order: O,
    done: Arc<Completer>,
) where
    T: Clone + Send + 'static,
    O: Order<T> + Send + 'static,
{
    let total = src1.len() + src2.len();
    if total < MIN_PARALLEL_MERGE_SIZE {
        unsafe {
            let d = dst.as_mut_slice();
            let s1 = src1.as_slice();
            let s2 = src2.as_slice();
            merge_parts(&order, d, 0, s1, 0..s1.len(), s2, 0..s2.len());
        }
        done.complete(ctx);
        return;
    }

    let first_is_longer = src1.len() >= src2.len();
    let (long, short) = if first_is_longer {
        (src1, src2)
    } else {
        (src2, src1)
    };

    let mid = long.len() / 2;
    let cut = unsafe {
        let long_slice = long.as_slice();
        let short_slice = short.as_slice();
        lower_bound(short_slice, 0, short_slice.len(), &long_slice[mid], &order)
    };

    let (long_l, long_r, short_l, short_r, dst_l, dst_r) = unsafe {
        (
            long.sub(0, mid),
            long.sub(mid, long.len()),
            short.sub(0, cut),
            short.sub(cut, short.len()),
            dst.sub(0, mid + cut),
            dst.sub(mid + cut, dst.len()),
        )
    };

    // Keep the original left/right roles so ties stay with the first source.
    let (s1_l, s2_l, s1_r, s2_r) = if first_is_longer {
        (long_l, short_l, long_r, short_r)
    } else {
        (short_l, long_l, short_r, long_r)
    };

    let sub = Completer::new(2, Some(done), None);

    let right = {
        let order = order.clone();
        let sub = Arc::clone(&sub);
        Box::new(move |ctx: &WorkerHandle| {
            merge_task(ctx, dst_r, s1_r, s2_r, order, sub);
        })
    };
    ctx.spawn(right);
    merge_task(ctx, dst_l, s1_l, s2_l, order, sub);
}

/// Parallel levels of the run-merge tree.
///
/// `a` holds the runs at absolute coordinates, `b` is the scratch shifted by
/// `offset`; the destination buffer alternates per level exactly like the
/// sequential [`merge_runs`]. Windows below `PARALLEL_RUN_MERGE_THRESHOLD`
/// drop to the sequential recursion on their own sub-slices.
#[allow(clippy::too_many_arguments)]
fn merge_runs_task<T, O>(
    ctx: &WorkerHandle,
    a: Region<T>,
    b: Region<T>,
    offset: usize,
    runs: Arc<Vec<usize>>,
    lo: usize,
    hi: usize,
    into_scratch: bool,
    order: O,
    done: Arc<Completer>,
) where
    T: Clone + Send + 'static,
    O: Order<T> + Send + 'static,
{
    let window = runs[hi] - runs[lo];
    if hi - lo == 1 || window < PARALLEL_RUN_MERGE_THRESHOLD {
        unsafe {
            let a_win = a.sub(runs[lo], runs[hi]).as_mut_slice();
            let b_win = b.sub(runs[lo] - offset, runs[hi] - offset).as_mut_slice();
            let local: Vec<usize> = runs[lo..=hi].iter().map(|r| r - runs[lo]).collect();
            merge_runs(a_win, b_win, 0, &local, 0, hi - lo, into_scratch, &order);
        }
        done.complete(ctx);
        return;
    }

    let mid = split_runs(&runs, lo, hi);
    let (r_lo, r_mid, r_hi) = (runs[lo], runs[mid], runs[hi]);

    // Both halves land in the opposite buffer; merging them back is handed
    // off to a merge task chained to `done`.
    let after = {
        let order = order.clone();
        Completer::new(2, None, Some(Box::new(move |ctx: &WorkerHandle| {
            let (dst, s1, s2) = unsafe {
                if into_scratch {
                    (
                        b.sub(r_lo - offset, r_hi - offset),
                        a.sub(r_lo, r_mid),
                        a.sub(r_mid, r_hi),
                    )
                } else {
                    (
                        a.sub(r_lo, r_hi),
                        b.sub(r_lo - offset, r_mid - offset),
                        b.sub(r_mid - offset, r_hi - offset),
                    )
                }
            };
            merge_task(ctx, dst, s1, s2, order, done);
        })))
    };

    let right = {
        let order = order.clone();
        let after = Arc::clone(&after);
        let runs = Arc::clone(&runs);
        Box::new(move |ctx: &WorkerHandle| {
            merge_runs_task(ctx, a, b, offset, runs, mid, hi, !into_scratch, order, after);
        })
    };
    ctx.spawn(right);
    merge_runs_task(ctx, a, b, offset, runs, lo, mid, !into_scratch, order, after);
}
