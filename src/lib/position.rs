//! Strand and 5' coordinate normalization.
//!
//! The POS column of a SAM record is the leftmost aligned base, which is the biological
//! 5' end only for plus-strand reads with no leading soft clip. The functions here
//! recover a coordinate that is identical for PCR copies of the same molecule.
//!
//! Positions stay 1-based and may land at or below zero after clip correction; only
//! equality between reads on the same reference matters.

use std::fmt;

use crate::cigar::CigarSummary;
use crate::errors::Result;

/// SAM flag bit marking SEQ as reverse complemented (0x10).
pub const REVERSE_FLAG: u16 = 0x10;

/// The strand a read aligned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strand {
    /// Forward strand
    Plus,
    /// Reverse-complemented strand
    Minus,
}

impl Strand {
    /// Derives the strand from a SAM bitwise flag.
    #[must_use]
    pub fn from_flags(flags: u16) -> Self {
        if flags & REVERSE_FLAG == 0 { Self::Plus } else { Self::Minus }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plus => f.write_str("+"),
            Self::Minus => f.write_str("-"),
        }
    }
}

/// Computes the 5' position of a read from an already summarized CIGAR.
///
/// - Plus strand: `position - leading_soft_clip`
/// - Minus strand: `position + reference_consumed + trailing_soft_clip`
///
/// The arithmetic saturates at the bounds of `i64`.
#[must_use]
pub fn five_prime_from_summary(position: i64, strand: Strand, summary: &CigarSummary) -> i64 {
    match strand {
        Strand::Plus => position.saturating_sub(i64::from(summary.leading_soft_clip)),
        Strand::Minus => {
            let consumed = i64::try_from(summary.reference_consumed).unwrap_or(i64::MAX);
            position.saturating_add(consumed).saturating_add(i64::from(summary.trailing_soft_clip))
        }
    }
}

/// Computes the soft-clip corrected 5' position of a read.
///
/// # Arguments
/// * `position` - The 1-based leftmost reported alignment position (SAM POS)
/// * `strand` - The strand derived from the SAM flag
/// * `cigar` - The CIGAR string
///
/// # Errors
///
/// Returns an error if the CIGAR cannot be tokenized.
///
/// # Example
/// ```
/// use umidedup_lib::position::{Strand, five_prime_position};
///
/// assert_eq!(five_prime_position(100, Strand::Plus, "5S95M").unwrap(), 95);
/// assert_eq!(five_prime_position(100, Strand::Minus, "95M5S").unwrap(), 200);
/// ```
pub fn five_prime_position(position: i64, strand: Strand, cigar: &str) -> Result<i64> {
    let summary = CigarSummary::parse(cigar)?;
    Ok(five_prime_from_summary(position, strand, &summary))
}
