//! Formatting helpers and summaries for log output.

use std::time::{Duration, Instant};

use crate::dedup::DedupMetrics;

/// Formats an integer with thousands separators.
///
/// ```
/// use umidedup_lib::logging::format_count;
///
/// assert_eq!(format_count(0), "0");
/// assert_eq!(format_count(1_234_567), "1,234,567");
/// ```
#[must_use]
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Formats a fraction (0.0-1.0) as a percentage with `decimals` places.
///
/// ```
/// use umidedup_lib::logging::format_percent;
///
/// assert_eq!(format_percent(0.9543, 2), "95.43%");
/// ```
#[must_use]
pub fn format_percent(value: f64, decimals: usize) -> String {
    format!("{:.decimals$}%", value * 100.0)
}

/// Formats a duration as e.g. "45s", "2m 15s" or "1h 30m".
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    match (secs / 3600, (secs % 3600) / 60, secs % 60) {
        (0, 0, s) => format!("{s}s"),
        (0, m, 0) => format!("{m}m"),
        (0, m, s) => format!("{m}m {s}s"),
        (h, 0, _) => format!("{h}h"),
        (h, m, _) => format!("{h}h {m}m"),
    }
}

/// Formats a processing rate in records per second.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_rate(count: u64, duration: Duration) -> String {
    let secs = duration.as_secs_f64();
    if secs < 0.001 {
        return format!("{} records/s", format_count(count));
    }
    format!("{} records/s", format_count((count as f64 / secs) as u64))
}

/// Logs the end-of-run summary of a deduplication.
pub fn log_dedup_summary(metrics: &DedupMetrics) {
    log::info!("Deduplication Summary:");
    log::info!("  Alignment records: {}", format_count(metrics.total_records));
    log::info!("  Kept records: {}", format_count(metrics.kept_records));
    log::info!("  Removed for invalid UMI: {}", format_count(metrics.invalid_umi_records));
    log::info!("  Removed as PCR duplicates: {}", format_count(metrics.duplicate_records));
    if metrics.total_records > metrics.invalid_umi_records {
        log::info!("  Duplicate rate: {}", format_percent(metrics.duplicate_rate(), 2));
    }
}

/// Logs the start of an operation and, later, its completion with timing.
///
/// ```no_run
/// use umidedup_lib::logging::OperationTimer;
///
/// let timer = OperationTimer::new("Removing duplicates");
/// // ... do work ...
/// timer.log_completion(10_000);
/// ```
pub struct OperationTimer {
    operation: String,
    start_time: Instant,
}

impl OperationTimer {
    /// Creates a timer and logs that `operation` has started.
    #[must_use]
    pub fn new(operation: &str) -> Self {
        log::info!("{operation} ...");
        Self { operation: operation.to_string(), start_time: Instant::now() }
    }

    /// Logs completion with the number of records handled and the rate.
    pub fn log_completion(&self, count: u64) {
        let elapsed = self.start_time.elapsed();
        log::info!(
            "{} completed: {} records in {} ({})",
            self.operation,
            format_count(count),
            format_duration(elapsed),
            format_rate(count, elapsed)
        );
    }
}
