//! Enhanced logging utilities for formatted output.
//!
//! This module provides consistent, user-friendly logging helpers for timing,
//! throughput, and run summaries.

use std::time::{Duration, Instant};

/// Formats a percentage with specified decimal places.
///
/// # Examples
///
/// ```
/// use mxdft_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// assert_eq!(format_percent(1.0, 0), "100%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0, decimals = decimals)
}

/// Formats an integer with thousands separators.
///
/// # Examples
///
/// ```
/// use mxdft_lib::logging::format_count;
///
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// assert_eq!(format_count(12), "12");
/// ```
#[must_use]
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats a duration in human-readable form.
///
/// Sub-second durations are shown in milliseconds, since small matrices finish quickly.
///
/// # Examples
///
/// ```
/// use mxdft_lib::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(250)), "250ms");
/// assert_eq!(format_duration(Duration::from_secs(45)), "45s");
/// assert_eq!(format_duration(Duration::from_secs(135)), "2m 15s");
/// assert_eq!(format_duration(Duration::from_secs(5400)), "1h 30m");
/// ```
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs == 0 {
        format!("{}ms", duration.as_millis())
    } else if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        let mins = secs / 60;
        let remaining_secs = secs % 60;
        if remaining_secs == 0 { format!("{mins}m") } else { format!("{mins}m {remaining_secs}s") }
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins == 0 { format!("{hours}h") } else { format!("{hours}h {mins}m") }
    }
}

/// Formats a rate (cells per second).
///
/// # Examples
///
/// ```
/// use mxdft_lib::logging::format_rate;
/// use std::time::Duration;
///
/// assert_eq!(format_rate(1000, Duration::from_secs(1)), "1,000 cells/s");
/// assert_eq!(format_rate(30, Duration::from_secs(60)), "30.0 cells/min");
/// ```
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} cells/s", format_count(count));
    }

    let rate = count as f64 / secs;
    if rate >= 1.0 {
        format!("{} cells/s", format_count(rate as u64))
    } else {
        let per_min = count as f64 / (secs / 60.0);
        format!("{per_min:.1} cells/min")
    }
}

/// Operation timing helper.
///
/// Logs the start of an operation on creation and its duration and throughput on
/// completion.
///
/// # Examples
///
/// ```no_run
/// use mxdft_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Multiplying matrices");
/// // ... do work ...
/// timer.log_completion(64 * 64);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a new operation timer and logs the start.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Time elapsed since the timer started.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Logs the completion with cell count and rate.
    pub fn log_completion(&self, cells: u64) {
        let duration = self.start_time.elapsed();
        log::info!(
            "{} completed: {} cells in {} ({})",
            self.operation,
            format_count(cells),
            format_duration(duration),
            format_rate(cells, duration)
        );
    }

    /// Logs that the operation stopped early.
    pub fn log_abandoned(&self) {
        log::warn!(
            "{} abandoned after {}",
            self.operation,
            format_duration(self.start_time.elapsed())
        );
    }
}
