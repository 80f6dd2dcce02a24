//! Tokenizer for SAM CIGAR strings.
//!
//! A CIGAR is a run-length encoded list of `<count><code>` tokens, e.g. `5S90M2D5M`.
//! [`CigarOps`] walks the string once without allocating, and [`CigarSummary`] folds
//! that walk into the three quantities needed for 5' position normalization:
//! the leading soft clip, the trailing soft clip, and the number of reference bases
//! consumed by `M`, `D` and `N` operations.

use crate::errors::{DedupError, Result};

/// The kind of a single CIGAR operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CigarKind {
    /// `M` - alignment match (sequence match or mismatch)
    Match,
    /// `I` - insertion to the reference
    Insertion,
    /// `D` - deletion from the reference
    Deletion,
    /// `N` - skipped region from the reference
    Skip,
    /// `S` - soft clip (bases present in the read)
    SoftClip,
    /// `H` - hard clip (bases absent from the read)
    HardClip,
    /// `P` - padding
    Pad,
    /// `=` - sequence match
    SequenceMatch,
    /// `X` - sequence mismatch
    SequenceMismatch,
}

impl CigarKind {
    /// Maps a SAM operation code to its kind.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            b'M' => Some(Self::Match),
            b'I' => Some(Self::Insertion),
            b'D' => Some(Self::Deletion),
            b'N' => Some(Self::Skip),
            b'S' => Some(Self::SoftClip),
            b'H' => Some(Self::HardClip),
            b'P' => Some(Self::Pad),
            b'=' => Some(Self::SequenceMatch),
            b'X' => Some(Self::SequenceMismatch),
            _ => None,
        }
    }

    /// The SAM operation code for this kind.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
            Self::Skip => 'N',
            Self::SoftClip => 'S',
            Self::HardClip => 'H',
            Self::Pad => 'P',
            Self::SequenceMatch => '=',
            Self::SequenceMismatch => 'X',
        }
    }

    /// True for the operations counted when walking a minus-strand read to its 5' end.
    ///
    /// Only `M`, `D` and `N` are counted; `=` and `X` are not.
    #[must_use]
    pub fn advances_five_prime(self) -> bool {
        matches!(self, Self::Match | Self::Deletion | Self::Skip)
    }
}

/// A single `<count><code>` CIGAR token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    /// Operation kind
    pub kind: CigarKind,
    /// Run length
    pub len: u32,
}

/// Iterator over the operations of a CIGAR string.
///
/// Yields an error and then stops at the first malformed token.
pub struct CigarOps<'a> {
    cigar: &'a str,
    bytes: &'a [u8],
    offset: usize,
    failed: bool,
}

impl<'a> CigarOps<'a> {
    /// Creates an iterator over `cigar`.
    #[must_use]
    pub fn new(cigar: &'a str) -> Self {
        Self { cigar, bytes: cigar.as_bytes(), offset: 0, failed: false }
    }

    fn error(&mut self, reason: String) -> Option<Result<CigarOp>> {
        self.failed = true;
        Some(Err(DedupError::Cigar { cigar: self.cigar.to_string(), reason }))
    }
}

impl Iterator for CigarOps<'_> {
    type Item = Result<CigarOp>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.offset >= self.bytes.len() {
            return None;
        }

        let start = self.offset;
        let mut len: u32 = 0;
        while let Some(&b) = self.bytes.get(self.offset) {
            if !b.is_ascii_digit() {
                break;
            }
            let Some(next) = len.checked_mul(10).and_then(|l| l.checked_add(u32::from(b - b'0')))
            else {
                return self.error(format!("operation length overflows at offset {start}"));
            };
            len = next;
            self.offset += 1;
        }

        if self.offset == start {
            return self.error(format!("expected an operation length at offset {start}"));
        }

        let Some(&code) = self.bytes.get(self.offset) else {
            return self.error("operation length without an operation code".to_string());
        };
        let Some(kind) = CigarKind::from_code(code) else {
            return self.error(format!(
                "unknown operation '{}' at offset {}",
                char::from(code),
                self.offset
            ));
        };
        self.offset += 1;

        Some(Ok(CigarOp { kind, len }))
    }
}

/// The quantities of a CIGAR needed to locate a read's 5' end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CigarSummary {
    /// Length of a soft clip that is the first operation, else 0
    pub leading_soft_clip: u32,
    /// Length of a soft clip that is the last operation, else 0
    pub trailing_soft_clip: u32,
    /// Sum of the lengths of all `M`, `D` and `N` operations
    pub reference_consumed: u64,
}

impl CigarSummary {
    /// Tokenizes `cigar` and summarizes it in a single pass.
    ///
    /// Clips are only recognized at the very ends of the string, so a soft clip hidden
    /// behind a hard clip (`5H3S...`) does not count as leading.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::Cigar`] if the string is empty or contains a malformed
    /// token. The SAM placeholder `*` (unavailable CIGAR) summarizes to all zeros.
    pub fn parse(cigar: &str) -> Result<Self> {
        if cigar == "*" {
            return Ok(Self::default());
        }
        if cigar.is_empty() {
            return Err(DedupError::Cigar {
                cigar: cigar.to_string(),
                reason: "no alignment operations".to_string(),
            });
        }

        let mut summary = Self::default();
        let mut last = None;
        for (i, op) in CigarOps::new(cigar).enumerate() {
            let op = op?;
            if i == 0 && op.kind == CigarKind::SoftClip {
                summary.leading_soft_clip = op.len;
            }
            if op.kind.advances_five_prime() {
                summary.reference_consumed += u64::from(op.len);
            }
            last = Some(op);
        }

        if let Some(CigarOp { kind: CigarKind::SoftClip, len }) = last {
            summary.trailing_soft_clip = len;
        }
        Ok(summary)
    }
}
