//! Fixed-size worker pool that runs both phases of a transform.
//!
//! Every worker owns the rows `i` with `i % threads == t` (see [`Stripe`]) in both
//! phases:
//!
//! 1. Multiply its rows of `C = A x B` into a private buffer, publish the buffer into
//!    the shared product, then arrive at the [`PhaseBarrier`].
//! 2. Once all workers have arrived, compute its rows of `F = DFT2(C)` straight into the
//!    shared transform matrix.
//!
//! Workers poll a stop signal before every output cell. The signal fires when the
//! [`CancellationFlag`] is set or when any worker has recorded an error, so a single
//! failing worker releases its peers from the barrier instead of stranding them.

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use log::{debug, info};
use mxdft_matrix::Stripe;
use parking_lot::Mutex;

use crate::barrier::{BarrierWait, DEFAULT_POLL_INTERVAL, PhaseBarrier};
use crate::cancel::{CancellationFlag, PhaseStatus, StopSignal};
use crate::dft::DftScratch;
use crate::errors::{MxdftError, Result};
use crate::logging::{format_duration, format_percent};
use crate::multiply::{allocate_partial, multiply_row, publish_partial};
use crate::progress::PhaseProgress;
use crate::store::MatrixStore;

/// Hooks invoked from worker threads at phase boundaries.
///
/// All methods default to doing nothing. Implementations run on the worker thread, so
/// anything slow here delays that worker. An error returned from a hook fails that
/// worker exactly like an allocation failure would: it is recorded as the run's error
/// and every other worker stops at its next poll.
pub trait PhaseObserver: Send + Sync {
    /// Called after `worker` has published its product rows, before the barrier.
    fn multiply_finished(&self, _worker: usize) -> Result<()> {
        Ok(())
    }

    /// Called after the barrier released `worker`, before its first transform cell.
    fn transform_started(&self, _worker: usize) -> Result<()> {
        Ok(())
    }

    /// Called after `worker` has written all of its transform rows.
    fn transform_finished(&self, _worker: usize) -> Result<()> {
        Ok(())
    }
}

/// Observer that ignores every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl PhaseObserver for NoopObserver {}

/// How one worker's run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// Both phases ran to completion.
    Completed,
    /// The worker saw the stop signal and abandoned its remaining cells.
    Cancelled,
}

/// Result of a pool run that did not fail.
#[derive(Debug, Clone)]
pub struct PoolOutcome {
    workers: Vec<WorkerOutcome>,
    elapsed: Duration,
}

impl PoolOutcome {
    /// True when every worker completed both phases.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.workers.iter().all(|&w| w == WorkerOutcome::Completed)
    }

    /// Per-worker outcomes, indexed by worker id.
    #[must_use]
    pub fn workers(&self) -> &[WorkerOutcome] {
        &self.workers
    }

    /// Ids of workers that reported cancellation.
    #[must_use]
    pub fn cancelled_workers(&self) -> Vec<usize> {
        self.workers
            .iter()
            .enumerate()
            .filter(|&(_, &w)| w == WorkerOutcome::Cancelled)
            .map(|(t, _)| t)
            .collect()
    }

    /// Wall time from the first spawn to the last join.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

/// State shared by every worker of one run.
struct RunState {
    store: Arc<MatrixStore>,
    barrier: PhaseBarrier,
    cancel: CancellationFlag,
    error_flag: AtomicBool,
    error: Mutex<Option<MxdftError>>,
    multiply_progress: PhaseProgress,
    transform_progress: PhaseProgress,
    observer: Arc<dyn PhaseObserver>,
    started: Instant,
}

impl RunState {
    /// Record an error and signal threads to stop. The first error wins.
    fn set_error(&self, error: MxdftError) {
        self.error_flag.store(true, Ordering::SeqCst);
        let mut guard = self.error.lock();
        if guard.is_none() {
            *guard = Some(error);
        }
    }

    fn has_error(&self) -> bool {
        self.error_flag.load(Ordering::Relaxed)
    }

    fn take_error(&self) -> Option<MxdftError> {
        self.error.lock().take()
    }
}

impl StopSignal for RunState {
    #[inline]
    fn should_stop(&self) -> bool {
        self.cancel.is_cancelled() || self.has_error()
    }
}

/// Render a panic payload as text.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Run both phases for one stripe.
fn run_worker(state: &RunState, stripe: Stripe) -> Result<WorkerOutcome> {
    let worker = stripe.worker();
    let store = &*state.store;
    let side = store.side();
    let row_cells = side as u64;

    let mut partial = allocate_partial(stripe, side)?;
    for (local, row) in stripe.rows(side).enumerate() {
        let out = &mut partial[local * side..(local + 1) * side];
        if multiply_row(store.a(), store.b(), row, state, out) == PhaseStatus::Stopped {
            debug!("Worker {worker} stopped during multiply at row {row}");
            return Ok(WorkerOutcome::Cancelled);
        }
        state.multiply_progress.add(row_cells);
    }
    publish_partial(&partial, stripe, store.product());
    drop(partial);
    debug!("Worker {worker} published {} product rows", stripe.count(side));
    state.observer.multiply_finished(worker)?;

    match state.barrier.wait(state)? {
        BarrierWait::Stopped => {
            debug!("Worker {worker} stopped while waiting at the phase barrier");
            return Ok(WorkerOutcome::Cancelled);
        }
        BarrierWait::Leader => {
            info!(
                "Multiply phase finished in {}; starting transform",
                format_duration(state.started.elapsed())
            );
        }
        BarrierWait::Follower => {}
    }
    state.observer.transform_started(worker)?;

    let scratch = DftScratch::new(side)?;
    let status = scratch.transform_stripe(stripe, store.product(), store.transform(), state, |_| {
        state.transform_progress.add(row_cells);
    });
    if status == PhaseStatus::Stopped {
        debug!("Worker {worker} stopped during transform");
        return Ok(WorkerOutcome::Cancelled);
    }
    state.observer.transform_finished(worker)?;
    debug!("Worker {worker} finished");
    Ok(WorkerOutcome::Completed)
}

/// A pool of `threads` workers, created fresh for each run.
pub struct WorkerPool {
    threads: usize,
    poll_interval: Duration,
    observer: Arc<dyn PhaseObserver>,
}

impl WorkerPool {
    /// Create a pool description for `threads` workers.
    ///
    /// # Errors
    /// Returns an error if `threads` is zero.
    pub fn new(threads: usize) -> Result<Self> {
        if threads == 0 {
            return Err(MxdftError::InvalidParameter {
                parameter: "threads".to_string(),
                reason: "Worker pool needs at least one thread".to_string(),
            });
        }
        Ok(Self { threads, poll_interval: DEFAULT_POLL_INTERVAL, observer: Arc::new(NoopObserver) })
    }

    /// Attach an observer that is told about phase boundaries.
    #[must_use]
    pub fn with_observer(mut self, observer: Arc<dyn PhaseObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// How often workers parked at the barrier re-check the stop signal.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Run both phases over `store` and join every worker.
    ///
    /// On success the store's product and transform hold complete results only if
    /// [`PoolOutcome::is_complete`] is true.
    ///
    /// # Errors
    /// Returns the first error any worker recorded: an allocation failure, a worker
    /// panic, a barrier overrun, or a failure to spawn a thread.
    pub fn run(&self, store: Arc<MatrixStore>, cancel: &CancellationFlag) -> Result<PoolOutcome> {
        let side = store.side();
        let cells = (side as u64) * (side as u64);
        info!("Starting {} workers on {side}x{side} matrices", self.threads);

        let state = Arc::new(RunState {
            store,
            barrier: PhaseBarrier::new(self.threads)?.with_poll_interval(self.poll_interval),
            cancel: cancel.clone(),
            error_flag: AtomicBool::new(false),
            error: Mutex::new(None),
            multiply_progress: PhaseProgress::new("Multiplied", cells),
            transform_progress: PhaseProgress::new("Transformed", cells),
            observer: Arc::clone(&self.observer),
            started: Instant::now(),
        });

        let mut handles = Vec::with_capacity(self.threads);
        for stripe in Stripe::all(self.threads) {
            let worker_state = Arc::clone(&state);
            let spawned = thread::Builder::new()
                .name(format!("mxdft-worker-{}", stripe.worker()))
                .spawn(move || {
                    let result =
                        panic::catch_unwind(AssertUnwindSafe(|| run_worker(&worker_state, stripe)));
                    match result {
                        Ok(Ok(outcome)) => Some(outcome),
                        Ok(Err(error)) => {
                            worker_state.set_error(error);
                            None
                        }
                        Err(payload) => {
                            worker_state.set_error(MxdftError::WorkerPanicked {
                                worker: stripe.worker(),
                                message: panic_message(payload.as_ref()),
                            });
                            None
                        }
                    }
                });
            match spawned {
                Ok(handle) => handles.push(handle),
                Err(source) => {
                    state.set_error(MxdftError::ThreadSpawn { worker: stripe.worker(), source });
                    break;
                }
            }
        }

        let mut workers = Vec::with_capacity(handles.len());
        for (worker, handle) in handles.into_iter().enumerate() {
            match handle.join() {
                Ok(Some(outcome)) => workers.push(outcome),
                Ok(None) => {}
                Err(payload) => state.set_error(MxdftError::WorkerPanicked {
                    worker,
                    message: panic_message(payload.as_ref()),
                }),
            }
        }

        if let Some(error) = state.take_error() {
            return Err(error);
        }

        let elapsed = state.started.elapsed();
        let outcome = PoolOutcome { workers, elapsed };
        if outcome.is_complete() {
            info!("Both phases finished in {}", format_duration(elapsed));
        } else {
            let done = state.multiply_progress.count() + state.transform_progress.count();
            info!(
                "Run cancelled after {} with {} of the work done; workers {:?} stopped early",
                format_duration(elapsed),
                format_percent(done as f64 / (2 * cells.max(1)) as f64, 1),
                outcome.cancelled_workers()
            );
        }
        Ok(outcome)
    }
}
