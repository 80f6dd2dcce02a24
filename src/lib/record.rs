//! Parsing of SAM text lines.
//!
//! Only the columns needed for duplicate detection are extracted; the line itself is
//! never modified so kept records can be written back verbatim.

use crate::cigar::CigarSummary;
use crate::errors::{DedupError, Result};
use crate::position::{Strand, five_prime_from_summary};

/// Largest POS allowed by the SAM format (2^31 - 1).
pub const MAX_POSITION: i64 = i32::MAX as i64;

/// First byte of every SAM header line.
pub const HEADER_MARKER: char = '@';

/// Returns true if `line` is a SAM header line.
#[must_use]
pub fn is_header_line(line: &str) -> bool {
    line.starts_with(HEADER_MARKER)
}

/// Returns the UMI embedded at the end of a read name.
///
/// The UMI is the final `:`-delimited token, e.g. `CTAGAGGA` in
/// `NS500451:154:HWKTMBGXX:1:11101:69992:67325:CTAGAGGA`. A name with no `:` is
/// returned whole.
#[must_use]
pub fn umi_from_read_name(read_name: &str) -> &str {
    read_name.rsplit_once(':').map_or(read_name, |(_, umi)| umi)
}

/// Strips a trailing `\n` or `\r\n`.
#[must_use]
pub fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// The fields of one SAM alignment line used for deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord<'a> {
    /// QNAME
    pub read_name: &'a str,
    /// UMI taken from the end of QNAME
    pub umi: &'a str,
    /// FLAG
    pub flags: u16,
    /// RNAME
    pub reference_name: &'a str,
    /// POS (1-based leftmost position, 0 when unavailable)
    pub position: i64,
    /// CIGAR
    pub cigar: &'a str,
    /// Soft clips and reference span of the CIGAR
    pub cigar_summary: CigarSummary,
    /// 1-based line number in the input
    pub line_number: u64,
}

impl<'a> AlignmentRecord<'a> {
    /// Parses a SAM data line.
    ///
    /// `line` may still carry its line terminator.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::Format`] naming the line and the offending column if a
    /// required column is missing, FLAG is not a 16-bit unsigned integer, POS is not an
    /// integer in `0..=2^31-1`, or the CIGAR cannot be tokenized.
    pub fn parse(line: &'a str, line_number: u64) -> Result<Self> {
        let mut fields = trim_line_ending(line).split('\t');
        let mut next_field = |field: &'static str| {
            fields.next().filter(|f| !f.is_empty()).ok_or_else(|| DedupError::Format {
                line: line_number,
                field,
                reason: "missing field".to_string(),
            })
        };

        let read_name = next_field("QNAME")?;
        let flags = next_field("FLAG")?;
        let reference_name = next_field("RNAME")?;
        let position = next_field("POS")?;
        let _mapq = next_field("MAPQ")?;
        let cigar = next_field("CIGAR")?;

        let flags = flags.parse::<u16>().map_err(|_| DedupError::Format {
            line: line_number,
            field: "FLAG",
            reason: format!("'{flags}' is not an unsigned 16-bit integer"),
        })?;
        let position = position
            .parse::<i64>()
            .ok()
            .filter(|p| (0..=MAX_POSITION).contains(p))
            .ok_or_else(|| DedupError::Format {
                line: line_number,
                field: "POS",
                reason: format!("'{position}' is not an integer between 0 and {MAX_POSITION}"),
            })?;
        let cigar_summary = CigarSummary::parse(cigar).map_err(|e| DedupError::Format {
            line: line_number,
            field: "CIGAR",
            reason: e.to_string(),
        })?;

        Ok(Self {
            read_name,
            umi: umi_from_read_name(read_name),
            flags,
            reference_name,
            position,
            cigar,
            cigar_summary,
            line_number,
        })
    }

    /// The strand this record aligned to.
    #[must_use]
    pub fn strand(&self) -> Strand {
        Strand::from_flags(self.flags)
    }

    /// The soft-clip corrected 5' position of this record.
    #[must_use]
    pub fn five_prime_position(&self) -> i64 {
        five_prime_from_summary(self.position, self.strand(), &self.cigar_summary)
    }
}
