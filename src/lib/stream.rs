//! Line-level driver that filters a SAM text stream.

use std::io::{BufRead, Write};

use log::{debug, trace};

use crate::dedup::{Decision, DedupMetrics, DedupOptions, Deduplicator};
use crate::errors::{DedupError, Result};
use crate::progress::ProgressTracker;
use crate::record::{AlignmentRecord, is_header_line};
use crate::whitelist::UmiWhitelist;

/// Number of alignment records between progress log messages.
pub const PROGRESS_INTERVAL: u64 = 1_000_000;

/// Copies `reader` to `writer`, dropping records with an unknown UMI and PCR duplicates.
///
/// Header lines at the top of the input are copied unchanged. Every kept alignment line
/// is written byte-for-byte, including its line terminator, and in input
/// order. The input must be coordinate sorted; see [`crate::dedup`].
///
/// # Errors
///
/// Returns an error if reading or writing fails, if a record cannot be parsed, if a
/// header line follows an alignment record, or if sort order checking is enabled in
/// `options` and violated. Output written before the error is left in `writer`.
///
/// # Example
/// ```
/// use umidedup_lib::dedup::DedupOptions;
/// use umidedup_lib::stream::deduplicate_sam;
/// use umidedup_lib::whitelist::UmiWhitelist;
///
/// let sam = "@HD\tVN:1.6\n\
///            r1:ACGT\t0\t1\t100\t60\t10M\n\
///            r2:ACGT\t0\t1\t100\t60\t10M\n";
/// let whitelist: UmiWhitelist = ["ACGT"].into_iter().collect();
/// let mut out = Vec::new();
/// let metrics =
///     deduplicate_sam(sam.as_bytes(), &mut out, &whitelist, DedupOptions::default()).unwrap();
/// assert_eq!(metrics.duplicate_records, 1);
/// assert_eq!(String::from_utf8(out).unwrap(), "@HD\tVN:1.6\nr1:ACGT\t0\t1\t100\t60\t10M\n");
/// ```
pub fn deduplicate_sam<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
    whitelist: &UmiWhitelist,
    options: DedupOptions,
) -> Result<DedupMetrics> {
    let mut dedup = Deduplicator::with_options(whitelist, options);
    let progress = ProgressTracker::new("Processed records").with_interval(PROGRESS_INTERVAL);

    let mut line = String::new();
    let mut line_number: u64 = 0;
    let mut header_lines: u64 = 0;
    let mut in_header = true;

    loop {
        line.clear();
        if reader.read_line(&mut line)? == 0 {
            break;
        }
        line_number += 1;

        if is_header_line(&line) {
            if !in_header {
                return Err(DedupError::HeaderAfterRecords { line: line_number });
            }
            header_lines += 1;
            writer.write_all(line.as_bytes())?;
            continue;
        }
        in_header = false;

        let record = AlignmentRecord::parse(&line, line_number)?;
        match dedup.process(&record)? {
            Decision::Keep => writer.write_all(line.as_bytes())?,
            Decision::Drop(reason) => {
                trace!(
                    "Dropped {} on line {}: {}",
                    record.read_name,
                    line_number,
                    reason.description()
                );
            }
        }
        progress.log_if_needed(1);
    }

    writer.flush()?;
    progress.log_final();
    debug!("Copied {header_lines} header lines");

    Ok(dedup.into_metrics())
}
