//! Streaming, reference-scoped PCR duplicate detection.
//!
//! Records are considered one at a time in input order. A record is a duplicate when an
//! earlier record on the same reference sequence had the same [`DuplicateKey`]: the same
//! UMI, strand, and soft-clip corrected 5' position. The first record seen for a key is
//! always the one kept.
//!
//! # Memory
//!
//! The reference name is not part of the key. Instead the set of seen keys is cleared
//! every time the reference name changes, which bounds memory by the number of distinct
//! keys on a single reference. This relies on the input being coordinate sorted. On
//! unsorted input, records of a reference that reappears later are compared against an
//! empty set and duplicates are under-counted. [`DedupOptions::check_sort_order`] turns
//! such input into a [`DedupError::SortOrder`] instead.

use ahash::AHashSet;
use log::debug;

use crate::errors::{DedupError, Result};
use crate::position::Strand;
use crate::record::AlignmentRecord;
use crate::whitelist::UmiWhitelist;

//////////////////////////////////////////////////////////////////////////////
// Keys and decisions
//////////////////////////////////////////////////////////////////////////////

/// Identity of a molecule within one reference sequence.
///
/// The UMI borrows from the [`UmiWhitelist`], so building a key never allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateKey<'w> {
    /// The read's UMI
    pub umi: &'w str,
    /// The strand the read aligned to
    pub strand: Strand,
    /// Soft-clip corrected 5' position
    pub five_prime: i64,
}

/// Why a record was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DropReason {
    /// The UMI is not in the whitelist
    InvalidUmi,
    /// An earlier record on the same reference had the same key
    Duplicate,
}

impl DropReason {
    /// Short human-readable description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::InvalidUmi => "UMI not in whitelist",
            Self::Duplicate => "PCR duplicate",
        }
    }
}

/// The outcome for a single record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Write the record to the output
    Keep,
    /// Omit the record from the output
    Drop(DropReason),
}

impl Decision {
    /// Returns true for [`Decision::Keep`].
    #[must_use]
    pub fn is_keep(self) -> bool {
        matches!(self, Self::Keep)
    }
}

//////////////////////////////////////////////////////////////////////////////
// Metrics
//////////////////////////////////////////////////////////////////////////////

/// Counts collected during deduplication.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DedupMetrics {
    /// Alignment records considered (header lines excluded)
    pub total_records: u64,
    /// Records written to the output
    pub kept_records: u64,
    /// Records dropped because their UMI is not in the whitelist
    pub invalid_umi_records: u64,
    /// Records dropped as PCR duplicates
    pub duplicate_records: u64,
}

impl DedupMetrics {
    /// Fraction of records with a valid UMI that were duplicates.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn duplicate_rate(&self) -> f64 {
        let valid = self.total_records - self.invalid_umi_records;
        if valid == 0 { 0.0 } else { self.duplicate_records as f64 / valid as f64 }
    }

    fn record(&mut self, decision: Decision) {
        self.total_records += 1;
        match decision {
            Decision::Keep => self.kept_records += 1,
            Decision::Drop(DropReason::InvalidUmi) => self.invalid_umi_records += 1,
            Decision::Drop(DropReason::Duplicate) => self.duplicate_records += 1,
        }
    }
}

//////////////////////////////////////////////////////////////////////////////
// Sort order validation
//////////////////////////////////////////////////////////////////////////////

/// Options controlling the [`Deduplicator`].
#[derive(Debug, Clone, Copy, Default)]
pub struct DedupOptions {
    /// Fail with [`DedupError::SortOrder`] when the input is not coordinate sorted
    pub check_sort_order: bool,
}

/// Detects regressions in reference name or position.
///
/// A reference name may only appear in one contiguous run, and within a run the
/// reported positions must not decrease. The order of the reference names themselves is
/// not checked.
#[derive(Debug, Default)]
pub struct SortOrderValidator {
    finished_references: AHashSet<String>,
    current: Option<(String, i64)>,
}

impl SortOrderValidator {
    /// Creates a validator that has seen no records.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks `record` against the records seen so far and remembers it.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::SortOrder`] if the record breaks coordinate order.
    pub fn check(&mut self, record: &AlignmentRecord<'_>) -> Result<()> {
        match &mut self.current {
            Some((reference, last_position)) if reference.as_str() == record.reference_name => {
                if record.position < *last_position {
                    return Err(DedupError::SortOrder {
                        line: record.line_number,
                        reason: format!(
                            "position {} on '{}' follows position {}",
                            record.position, record.reference_name, last_position
                        ),
                    });
                }
                *last_position = record.position;
            }
            current => {
                if self.finished_references.contains(record.reference_name) {
                    return Err(DedupError::SortOrder {
                        line: record.line_number,
                        reason: format!(
                            "reference '{}' appears again after other references",
                            record.reference_name
                        ),
                    });
                }
                if let Some((previous, _)) =
                    current.replace((record.reference_name.to_string(), record.position))
                {
                    self.finished_references.insert(previous);
                }
            }
        }
        Ok(())
    }
}

//////////////////////////////////////////////////////////////////////////////
// Deduplicator
//////////////////////////////////////////////////////////////////////////////

/// Decides, record by record, whether a record is the first copy of its molecule.
pub struct Deduplicator<'w> {
    whitelist: &'w UmiWhitelist,
    current_reference: Option<String>,
    seen: AHashSet<DuplicateKey<'w>>,
    metrics: DedupMetrics,
    sort_order: Option<SortOrderValidator>,
}

impl<'w> Deduplicator<'w> {
    /// Creates a deduplicator with default options.
    #[must_use]
    pub fn new(whitelist: &'w UmiWhitelist) -> Self {
        Self::with_options(whitelist, DedupOptions::default())
    }

    /// Creates a deduplicator with the given options.
    #[must_use]
    pub fn with_options(whitelist: &'w UmiWhitelist, options: DedupOptions) -> Self {
        Self {
            whitelist,
            current_reference: None,
            seen: AHashSet::new(),
            metrics: DedupMetrics::default(),
            sort_order: options.check_sort_order.then(SortOrderValidator::new),
        }
    }

    /// Decides whether `record` is kept or dropped and updates the counts.
    ///
    /// Records with a UMI outside the whitelist are dropped without touching the set of
    /// seen keys or the current reference.
    ///
    /// # Errors
    ///
    /// Returns [`DedupError::SortOrder`] if sort order checking is enabled and violated.
    pub fn process(&mut self, record: &AlignmentRecord<'_>) -> Result<Decision> {
        let whitelist: &'w UmiWhitelist = self.whitelist;
        let Some(umi) = whitelist.get(record.umi) else {
            let decision = Decision::Drop(DropReason::InvalidUmi);
            self.metrics.record(decision);
            return Ok(decision);
        };

        if let Some(validator) = &mut self.sort_order {
            validator.check(record)?;
        }

        if self.current_reference.as_deref() != Some(record.reference_name) {
            debug!(
                "Reference '{}' starts on line {}; clearing {} keys",
                record.reference_name,
                record.line_number,
                self.seen.len()
            );
            self.seen.clear();
            self.current_reference = Some(record.reference_name.to_string());
        }

        let key = DuplicateKey {
            umi,
            strand: record.strand(),
            five_prime: record.five_prime_position(),
        };

        let decision = if self.seen.insert(key) {
            Decision::Keep
        } else {
            Decision::Drop(DropReason::Duplicate)
        };
        self.metrics.record(decision);
        Ok(decision)
    }

    /// Counts accumulated so far.
    #[must_use]
    pub fn metrics(&self) -> &DedupMetrics {
        &self.metrics
    }

    /// Consumes the deduplicator, returning its counts.
    #[must_use]
    pub fn into_metrics(self) -> DedupMetrics {
        self.metrics
    }

    /// The reference whose keys are currently held, if any record has been accepted.
    #[must_use]
    pub fn current_reference(&self) -> Option<&str> {
        self.current_reference.as_deref()
    }

    /// Number of distinct keys held for the current reference.
    #[must_use]
    pub fn tracked_keys(&self) -> usize {
        self.seen.len()
    }
}
