//! Reference-based PCR duplicate removal.
//!
//! Reads a coordinate-sorted SAM file and writes the header plus every record that is
//! the first copy of its molecule. A molecule is identified by UMI, strand, and the
//! soft-clip corrected 5' position, within a single reference sequence. Records whose
//! UMI is not in the whitelist are removed.
//!
//! The counts of records removed for an invalid UMI and as PCR duplicates are logged
//! and, unless the SAM output itself goes to stdout, printed on stdout.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};

use umidedup_lib::dedup::DedupOptions;
use umidedup_lib::io::{create_output, open_input};
use umidedup_lib::logging::{OperationTimer, format_count, log_dedup_summary};
use umidedup_lib::stream::deduplicate_sam;
use umidedup_lib::validation::validate_file_exists;
use umidedup_lib::whitelist::UmiWhitelist;

use crate::commands::command::Command;
use crate::commands::common::SamIoOptions;

/// Remove PCR duplicates from a coordinate-sorted SAM file using UMIs.
#[derive(Parser, Debug)]
#[command(
    name = "umidedup",
    version,
    styles = crate::STYLES,
    long_about = "Reference-based PCR duplicate removal.\n\n\
        The input SAM must be sorted by reference sequence and position (e.g. `samtools \
        sort`), and each read name must end in `:<UMI>`. A record is removed when its UMI \
        is not listed in the UMI file, or when an earlier record on the same reference \
        had the same UMI, strand and soft-clip corrected 5' position."
)]
pub struct Dedup {
    /// Input and output SAM files
    #[command(flatten)]
    pub io: SamIoOptions,

    /// File of valid UMIs, one per line
    #[arg(short = 'u', long = "umi")]
    pub umi: PathBuf,
}

impl Command for Dedup {
    fn execute(&self, command_line: &str) -> Result<()> {
        self.io.validate()?;
        validate_file_exists(&self.umi, "UMI whitelist")?;

        let timer = OperationTimer::new("Removing PCR duplicates");

        info!("Command line: {command_line}");
        info!("Input: {}", self.io.input.display());
        info!("Output: {}", self.io.output.display());
        info!("UMI whitelist: {}", self.umi.display());

        let whitelist = UmiWhitelist::from_path(&self.umi)
            .with_context(|| format!("Failed to read UMI whitelist: {}", self.umi.display()))?;
        if whitelist.is_empty() {
            warn!(
                "UMI whitelist {} is empty; every record will be removed",
                self.umi.display()
            );
        }
        info!("Loaded {} UMIs", format_count(whitelist.len() as u64));

        let reader = open_input(&self.io.input)
            .with_context(|| format!("Failed to open input: {}", self.io.input.display()))?;
        let writer = create_output(&self.io.output)
            .with_context(|| format!("Failed to create output: {}", self.io.output.display()))?;

        let metrics = deduplicate_sam(reader, writer, &whitelist, DedupOptions::default())
            .with_context(|| format!("Failed to deduplicate {}", self.io.input.display()))?;

        log_dedup_summary(&metrics);
        timer.log_completion(metrics.total_records);

        if !self.io.writes_to_stdout() {
            println!(
                "Number of reads removed due to invalid UMI sequences: {}",
                metrics.invalid_umi_records
            );
            println!(
                "Number of reads removed due to PCR duplication: {}",
                metrics.duplicate_records
            );
        }

        Ok(())
    }
}
