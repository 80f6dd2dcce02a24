//! Progress logging for long-running streams.
//!
//! [`ProgressTracker`] keeps a running count and emits an `info` message every time the
//! count crosses a multiple of its interval.

use std::cell::Cell;

use log::info;

/// Logs progress at regular record-count intervals.
///
/// # Example
/// ```
/// use umidedup_lib::progress::ProgressTracker;
///
/// let tracker = ProgressTracker::new("Processed records").with_interval(100);
/// for _ in 0..250 {
///     tracker.log_if_needed(1); // logs at 100 and 200
/// }
/// tracker.log_final(); // logs "Processed records 250 (complete)"
/// assert_eq!(tracker.count(), 250);
/// ```
pub struct ProgressTracker {
    interval: u64,
    message: String,
    count: Cell<u64>,
}

impl ProgressTracker {
    /// Creates a tracker with a count of 0 and an interval of 10,000.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self { interval: 10_000, message: message.into(), count: Cell::new(0) }
    }

    /// Sets the logging interval. An interval of 0 is treated as 1.
    #[must_use]
    pub fn with_interval(mut self, interval: u64) -> Self {
        self.interval = interval.max(1);
        self
    }

    /// Adds `additional` to the count, logging once per interval boundary crossed.
    ///
    /// Returns true if the count now sits exactly on an interval boundary.
    pub fn log_if_needed(&self, additional: u64) -> bool {
        let prev = self.count.get();
        let count = prev + additional;
        self.count.set(count);

        for milestone in (prev / self.interval + 1)..=(count / self.interval) {
            info!("{} {}", self.message, milestone * self.interval);
        }

        count > 0 && count.is_multiple_of(self.interval)
    }

    /// Logs the final count, unless it was already logged as an interval boundary.
    pub fn log_final(&self) {
        let count = self.count.get();
        if count > 0 && !count.is_multiple_of(self.interval) {
            info!("{} {} (complete)", self.message, count);
        }
    }

    /// The number of items counted so far.
    #[must_use]
    pub fn count(&self) -> u64 {
        self.count.get()
    }
}
