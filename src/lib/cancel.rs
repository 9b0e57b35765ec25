//! Cooperative cancellation.
//!
//! A [`CancellationFlag`] is a cloneable handle to one shared, monotonic boolean. An
//! interrupt handler (or a test) sets it; workers poll it between output cells and
//! abandon their remaining work once it is set.

use std::ffi::c_int;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Whether a unit of phase work ran to completion or was abandoned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStatus {
    /// Every owned cell was computed.
    Completed,
    /// The stop signal fired; remaining cells were skipped.
    Stopped,
}

/// Something a worker polls to learn that it should stop early.
pub trait StopSignal {
    /// True once the run should be abandoned.
    fn should_stop(&self) -> bool;
}

/// Shared flag that transitions from "running" to "cancelled" at most once.
#[derive(Debug, Clone, Default)]
pub struct CancellationFlag {
    cancelled: Arc<AtomicBool>,
}

impl CancellationFlag {
    /// A fresh, unset flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// True once [`cancel`](Self::cancel) has been called or an interrupt arrived.
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Set this flag when the process receives SIGINT or SIGTERM.
    ///
    /// See [`register_signals`](Self::register_signals).
    ///
    /// # Errors
    /// Returns an error if a handler cannot be registered.
    pub fn register_interrupts(&self) -> io::Result<()> {
        self.register_signals(&[signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM])
    }

    /// Set this flag on the first delivery of any of `signals`. A delivery that finds
    /// the flag already set exits the process with status `128 + signal`.
    ///
    /// The handlers only load and store an atomic, so they are async-signal-safe.
    ///
    /// # Errors
    /// Returns an error if a handler cannot be registered.
    pub fn register_signals(&self, signals: &[c_int]) -> io::Result<()> {
        for &signal in signals {
            // Actions run in registration order: the shutdown check must see the flag
            // before this delivery sets it.
            signal_hook::flag::register_conditional_shutdown(
                signal,
                128 + signal,
                Arc::clone(&self.cancelled),
            )?;
            signal_hook::flag::register(signal, Arc::clone(&self.cancelled))?;
        }
        Ok(())
    }
}

impl StopSignal for CancellationFlag {
    #[inline]
    fn should_stop(&self) -> bool {
        self.is_cancelled()
    }
}
