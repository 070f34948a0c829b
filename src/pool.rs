//! Work-stealing worker pool.
//!
//! One pool is built per top-level parallel sort and joined before the entry
//! point returns. Each worker owns a LIFO deque: it pushes and pops freshly
//! split sub-tasks at the bottom for cache locality, while idle workers steal
//! older, larger tasks from the top. The root task arrives through a shared
//! injector. Locks appear only on the park/wake path; the owner push/pop and
//! the steals are the deque's lock-free operations.

use std::any::Any;
use std::iter;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard};
use std::thread::JoinHandle;
use std::time::Duration;

use crossbeam::deque::{Injector, Stealer, Worker};
use crossbeam::utils::Backoff;

/// A unit of work executed on a worker thread.
pub(crate) type Job = Box<dyn FnOnce(&WorkerHandle) + Send>;

/// How long a parked worker sleeps before re-checking the deques. The wake
/// protocol only takes the gate lock when a sleeper is registered, which
/// leaves a narrow window where a notification is skipped; the timeout turns
/// that lost wakeup into a bounded delay instead of a stall.
const PARK_TIMEOUT: Duration = Duration::from_millis(10);

struct Shared {
    injector: Injector<Job>,
    stealers: Vec<Stealer<Job>>,
    gate: Mutex<()>,
    wake: Condvar,
    sleepers: AtomicUsize,
    shutdown: AtomicBool,
    panic: Mutex<Option<Box<dyn Any + Send>>>,
}

impl Shared {
    fn lock_gate(&self) -> MutexGuard<'_, ()> {
        self.gate.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Steals one job, preferring the injector batch path.
    fn steal(&self, skip: usize, local: &Worker<Job>) -> Option<Job> {
        iter::repeat_with(|| {
            self.injector.steal_batch_and_pop(local).or_else(|| {
                self.stealers
                    .iter()
                    .enumerate()
                    .filter(|(i, _)| *i != skip)
                    .map(|(_, s)| s.steal())
                    .collect()
            })
        })
        .find(|s| !s.is_retry())
        .and_then(|s| s.success())
    }

    fn wake_one(&self) {
        if self.sleepers.load(Ordering::Acquire) > 0 {
            let _gate = self.lock_gate();
            self.wake.notify_one();
        }
    }

    fn wake_all(&self) {
        let _gate = self.lock_gate();
        self.wake.notify_all();
    }

    fn record_panic(&self, payload: Box<dyn Any + Send>) {
        let mut slot = self.panic.lock().unwrap_or_else(|e| e.into_inner());
        if slot.is_none() {
            *slot = Some(payload);
        }
    }
}

/// Per-worker execution context; tasks receive it to spawn follow-up tasks.
pub(crate) struct WorkerHandle {
    local: Worker<Job>,
    shared: Arc<Shared>,
    index: usize,
    latch: Arc<Latch>,
}

impl WorkerHandle {
    /// Pushes `job` onto the owner end of this worker's deque and wakes a
    /// parked worker to come stealing.
    pub(crate) fn spawn(&self, job: Job) {
        self.local.push(job);
        self.shared.wake_one();
    }

    fn find_job(&self) -> Option<Job> {
        self.local
            .pop()
            .or_else(|| self.shared.steal(self.index, &self.local))
    }

    fn run(&self, job: Job) {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| job(self))) {
            // First panic wins; the caller re-raises it after the pool
            // drains and joins.
            self.shared.record_panic(payload);
            self.latch.poison();
        }
    }
}

fn worker_loop(local: Worker<Job>, shared: Arc<Shared>, index: usize, latch: Arc<Latch>) {
    let handle = WorkerHandle {
        local,
        shared,
        index,
        latch,
    };
    let backoff = Backoff::new();

    loop {
        if let Some(job) = handle.find_job() {
            backoff.reset();
            handle.run(job);
            continue;
        }
        if handle.shared.shutdown.load(Ordering::Acquire) {
            return;
        }
        if !backoff.is_completed() {
            backoff.snooze();
            continue;
        }

        // Park. Producers notify under the same gate, so a job that was
        // pushed before this re-check is either found here or wakes us.
        let gate = handle.shared.lock_gate();
        if let Some(job) = handle.find_job() {
            drop(gate);
            backoff.reset();
            handle.run(job);
            continue;
        }
        if handle.shared.shutdown.load(Ordering::Acquire) {
            return;
        }
        handle.shared.sleepers.fetch_add(1, Ordering::AcqRel);
        let _unused = handle
            .shared
            .wake
            .wait_timeout(gate, PARK_TIMEOUT)
            .unwrap_or_else(|e| e.into_inner());
        handle.shared.sleepers.fetch_sub(1, Ordering::AcqRel);
        backoff.reset();
    }
}

/// Completion gate the calling thread blocks on while the workers run.
pub(crate) struct Latch {
    state: Mutex<LatchState>,
    cond: Condvar,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum LatchState {
    Pending,
    Done,
    Poisoned,
}

impl Latch {
    pub(crate) fn new() -> Arc<Latch> {
        Arc::new(Latch {
            state: Mutex::new(LatchState::Pending),
            cond: Condvar::new(),
        })
    }

    pub(crate) fn complete(&self) {
        self.transition(LatchState::Done);
    }

    pub(crate) fn poison(&self) {
        self.transition(LatchState::Poisoned);
    }

    fn transition(&self, to: LatchState) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if *state == LatchState::Pending {
            *state = to;
        }
        self.cond.notify_all();
    }

    /// Blocks until the root task graph completes or a worker panics.
    pub(crate) fn wait(&self) -> LatchState {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        while *state == LatchState::Pending {
            state = self
                .cond
                .wait(state)
                .unwrap_or_else(|e| e.into_inner());
        }
        *state
    }
}

/// Fixed-size worker pool for one parallel sort call.
pub(crate) struct Pool {
    shared: Arc<Shared>,
    latch: Arc<Latch>,
    threads: Vec<JoinHandle<()>>,
}

impl Pool {
    /// Spawns `workers` threads sharing one injector and each other's
    /// stealers.
    pub(crate) fn new(workers: usize, latch: Arc<Latch>) -> Pool {
        let deques: Vec<Worker<Job>> = (0..workers).map(|_| Worker::new_lifo()).collect();
        let stealers = deques.iter().map(Worker::stealer).collect();

        let shared = Arc::new(Shared {
            injector: Injector::new(),
            stealers,
            gate: Mutex::new(()),
            wake: Condvar::new(),
            sleepers: AtomicUsize::new(0),
            shutdown: AtomicBool::new(false),
            panic: Mutex::new(None),
        });

        let threads = deques
            .into_iter()
            .enumerate()
            .map(|(index, local)| {
                let shared = Arc::clone(&shared);
                let latch = Arc::clone(&latch);
                std::thread::spawn(move || worker_loop(local, shared, index, latch))
            })
            .collect();

        Pool {
            shared,
            latch,
            threads,
        }
    }

    /// Submits the root job from the calling thread.
    pub(crate) fn inject(&self, job: Job) {
        self.shared.injector.push(job);
        self.shared.wake_one();
    }

    /// Blocks until the latch fires, then drains and joins every worker.
    /// Returns the first captured panic payload, if any.
    pub(crate) fn finish(self) -> (LatchState, Option<Box<dyn Any + Send>>) {
        let outcome = self.latch.wait();

        self.shared.shutdown.store(true, Ordering::Release);
        self.shared.wake_all();
        for thread in self.threads {
            let _joined = thread.join();
        }

        let payload = self
            .shared
            .panic
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .take();
        (outcome, payload)
    }
}
