//! CLI options shared by commands that read one SAM and write another.

use std::path::PathBuf;

use clap::Args;

use umidedup_lib::io::is_stdio_path;
use umidedup_lib::validation::{validate_file_exists, validate_output_differs};

/// Input and output SAM files.
#[derive(Debug, Clone, Args)]
pub struct SamIoOptions {
    /// Coordinate-sorted input SAM file, with header ("-" for stdin)
    #[arg(short = 'f', long = "input", short_alias = 'i')]
    pub input: PathBuf,

    /// Output SAM file ("-" for stdout)
    #[arg(short = 'o', long = "outfile", alias = "output")]
    pub output: PathBuf,
}

impl SamIoOptions {
    /// Validates that the input exists (skipped for stdin) and differs from the output.
    ///
    /// # Errors
    ///
    /// Returns an error if the input file does not exist or is also the output file.
    pub fn validate(&self) -> anyhow::Result<()> {
        if !is_stdio_path(&self.input) {
            validate_file_exists(&self.input, "Input SAM")?;
        }
        validate_output_differs(&self.input, &self.output)?;
        Ok(())
    }

    /// True when the output goes to standard output.
    #[must_use]
    pub fn writes_to_stdout(&self) -> bool {
        is_stdio_path(&self.output)
    }
}
