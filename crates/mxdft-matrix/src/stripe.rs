//! Round-robin row ownership.
//!
//! Worker `t` of `T` owns every index `i` with `i % T == t`. The partition is total and
//! non-overlapping for any `T >= 1`, whether or not `T` divides the number of rows, and
//! workers with `t >= len` simply own nothing.

use std::iter::StepBy;
use std::ops::Range;

use crate::{MatrixError, Result};

/// The set of rows owned by one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Stripe {
    worker: usize,
    workers: usize,
}

impl Stripe {
    /// Stripe for `worker` in a pool of `workers`.
    pub fn new(worker: usize, workers: usize) -> Result<Self> {
        if workers == 0 || worker >= workers {
            return Err(MatrixError::InvalidStripe { worker, workers });
        }
        Ok(Self { worker, workers })
    }

    /// All stripes of a pool, in worker order.
    pub fn all(workers: usize) -> impl Iterator<Item = Stripe> {
        (0..workers).map(move |worker| Stripe { worker, workers })
    }

    /// This stripe's worker id.
    #[must_use]
    pub fn worker(&self) -> usize {
        self.worker
    }

    /// Owned indices in `[0, len)`, ascending.
    #[must_use]
    pub fn rows(&self, len: usize) -> StepBy<Range<usize>> {
        (self.worker.min(len)..len).step_by(self.workers)
    }

    /// Number of owned indices in `[0, len)`.
    #[must_use]
    pub fn count(&self, len: usize) -> usize {
        if self.worker >= len { 0 } else { (len - self.worker).div_ceil(self.workers) }
    }
}
