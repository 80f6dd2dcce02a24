#![deny(unsafe_code)]
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::uninlined_format_args
)]

//! # umidedup - UMI-aware PCR duplicate removal for SAM files
//!
//! Removes PCR duplicates from a coordinate-sorted SAM text stream. Two records are
//! copies of the same molecule when they share a reference sequence, a UMI (the final
//! `:`-delimited token of the read name), a strand, and a soft-clip corrected 5' position.
//! Records whose UMI is missing from a whitelist are dropped as well.
//!
//! ## Modules
//!
//! - **[`cigar`]** - CIGAR tokenizer and the clip/reference-length summary
//! - **[`position`]** - strand and 5' coordinate normalization
//! - **[`record`]** - SAM line parsing
//! - **[`whitelist`]** - the set of valid UMIs
//! - **[`dedup`]** - the reference-scoped duplicate detector
//! - **[`stream`]** - the line-level filter tying the above together
//! - **[`io`]**, **[`validation`]**, **[`logging`]**, **[`progress`]** - supporting utilities
//!
//! ## Quick Start
//!
//! ```no_run
//! use umidedup_lib::dedup::DedupOptions;
//! use umidedup_lib::io::{create_output, open_input};
//! use umidedup_lib::stream::deduplicate_sam;
//! use umidedup_lib::whitelist::UmiWhitelist;
//!
//! # fn main() -> anyhow::Result<()> {
//! let whitelist = UmiWhitelist::from_path("umis.txt")?;
//! let metrics = deduplicate_sam(
//!     open_input("sorted.sam")?,
//!     create_output("deduped.sam")?,
//!     &whitelist,
//!     DedupOptions::default(),
//! )?;
//! println!("{} duplicates removed", metrics.duplicate_records);
//! # Ok(())
//! # }
//! ```

pub mod cigar;
pub mod dedup;
pub mod errors;
pub mod io;
pub mod logging;
pub mod position;
pub mod progress;
pub mod record;
pub mod stream;
pub mod validation;
pub mod whitelist;

pub use dedup::{Decision, DedupMetrics, DedupOptions, Deduplicator, DropReason, DuplicateKey};
pub use errors::{DedupError, Result};
