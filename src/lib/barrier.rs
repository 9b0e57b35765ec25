//! Single-use rendezvous between the multiply and transform phases.
//!
//! [`PhaseBarrier`] counts arrivals against a fixed number of parties. The last arrival
//! releases everyone with a single broadcast; the barrier never resets. Waiters wake at
//! a bounded interval to poll a [`StopSignal`], so a peer that was cancelled or failed
//! before arriving cannot leave the rest of the pool blocked forever.

use std::time::Duration;

use parking_lot::{Condvar, Mutex};

use crate::cancel::StopSignal;
use crate::errors::{MxdftError, Result};

/// Default interval at which blocked waiters re-check their stop signal.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How a call to [`PhaseBarrier::wait`] ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierWait {
    /// This caller was the last to arrive and released the barrier.
    Leader,
    /// This caller waited and was released by the leader.
    Follower,
    /// The stop signal fired before the barrier released.
    Stopped,
}

#[derive(Debug, Default)]
struct BarrierState {
    arrived: usize,
    released: bool,
}

/// One-shot barrier for a fixed number of workers.
#[derive(Debug)]
pub struct PhaseBarrier {
    parties: usize,
    state: Mutex<BarrierState>,
    release: Condvar,
    poll_interval: Duration,
}

impl PhaseBarrier {
    /// Barrier that releases once `parties` workers have arrived.
    ///
    /// # Errors
    /// Returns an error if `parties` is zero.
    pub fn new(parties: usize) -> Result<Self> {
        if parties == 0 {
            return Err(MxdftError::InvalidParameter {
                parameter: "parties".to_string(),
                reason: "A barrier needs at least one party".to_string(),
            });
        }
        Ok(Self {
            parties,
            state: Mutex::new(BarrierState::default()),
            release: Condvar::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
        })
    }

    /// Change how often blocked waiters poll their stop signal.
    #[must_use]
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    #[cfg(test)]
    fn arrived(&self) -> usize {
        self.state.lock().arrived
    }

    #[cfg(test)]
    fn is_released(&self) -> bool {
        self.state.lock().released
    }

    /// Arrive and block until every party has arrived or `stop` fires.
    ///
    /// # Errors
    /// Returns [`MxdftError::BarrierOverrun`] if more than `parties` callers arrive.
    pub fn wait<S: StopSignal + ?Sized>(&self, stop: &S) -> Result<BarrierWait> {
        let mut state = self.state.lock();
        if state.arrived >= self.parties {
            return Err(MxdftError::BarrierOverrun { parties: self.parties });
        }
        state.arrived += 1;

        if state.arrived == self.parties {
            state.released = true;
            self.release.notify_all();
            return Ok(BarrierWait::Leader);
        }

        while !state.released {
            if stop.should_stop() {
                return Ok(BarrierWait::Stopped);
            }
            self.release.wait_for(&mut state, self.poll_interval);
        }
        Ok(BarrierWait::Follower)
    }
}
