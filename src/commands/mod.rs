//! CLI command implementations for umidedup.
//!
//! - [`dedup`] - remove PCR duplicates and reads with invalid UMIs from a sorted SAM

#![allow(
    clippy::cast_possible_truncation,
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::uninlined_format_args
)]

pub mod command;
pub mod common;
pub mod dedup;
