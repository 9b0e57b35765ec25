//! Progress tracking utilities
//!
//! This module provides a thread-safe progress tracker for a phase with a known amount
//! of work. Workers report finished rows and the tracker logs each time the shared
//! total crosses a percentage milestone.

use log::info;

use crate::logging::format_count;
use std::sync::atomic::{AtomicU64, Ordering};

/// Number of milestones across a phase; 10 logs every 10%.
const MILESTONES: u64 = 10;

/// Thread-safe tracker that logs at fixed percentage milestones of a known total.
///
/// # Example
/// ```
/// use mxdft_lib::progress::PhaseProgress;
/// use std::sync::Arc;
///
/// let progress = Arc::new(PhaseProgress::new("Transformed rows", 64));
///
/// let p = Arc::clone(&progress);
/// std::thread::spawn(move || {
///     p.add(32); // logs "Transformed rows 32/64 (50%)" among others
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(progress.count(), 32);
/// ```
#[derive(Debug)]
pub struct PhaseProgress {
    /// Message prefix for log output.
    message: String,
    /// Units of work that make up 100%.
    total: u64,
    /// Units completed so far.
    count: AtomicU64,
}

impl PhaseProgress {
    /// Create a tracker for `total` units of work, logging every 10%.
    #[must_use]
    pub fn new(message: impl Into<String>, total: u64) -> Self {
        Self { message: message.into(), total, count: AtomicU64::new(0) }
    }

    /// Record `additional` finished units and log every milestone crossed.
    ///
    /// Returns the number of milestones crossed by this call. Safe to call from many
    /// threads; each milestone is logged exactly once.
    pub fn add(&self, additional: u64) -> u64 {
        if additional == 0 || self.total == 0 {
            return 0;
        }
        let prev = self.count.fetch_add(additional, Ordering::Relaxed);
        let new_count = (prev + additional).min(self.total);

        let prev_milestone = self.milestone_of(prev.min(self.total));
        let new_milestone = self.milestone_of(new_count);
        for milestone in (prev_milestone + 1)..=new_milestone {
            let done = (milestone * self.total).div_ceil(MILESTONES);
            let percent = milestone * 100 / MILESTONES;
            info!("{} {}/{} ({percent}%)", self.message, format_count(done), format_count(self.total));
        }
        new_milestone.saturating_sub(prev_milestone)
    }

    /// Units completed so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }

    fn milestone_of(&self, count: u64) -> u64 {
        count * MILESTONES / self.total
    }
}
