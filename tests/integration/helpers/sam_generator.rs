//! Builders for small SAM and UMI whitelist files used by the CLI tests.

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::process::{Command, Output};

/// UMIs written to the default whitelist.
pub const DEFAULT_UMIS: &[&str] = &["AACGCCAT", "AAGGTACG", "CTGTTCAC", "GAGAAGTC"];

/// Builds SAM text record by record.
#[derive(Debug, Default)]
pub struct SamBuilder {
    text: String,
}

impl SamBuilder {
    /// Starts a SAM with a coordinate-sorted `@HD` line and one `@SQ` line per reference.
    pub fn with_header(references: &[(&str, u32)]) -> Self {
        let mut builder = Self::default();
        builder.header_line("@HD\tVN:1.6\tSO:coordinate");
        for (name, length) in references {
            builder.header_line(&format!("@SQ\tSN:{name}\tLN:{length}"));
        }
        builder
    }

    /// Appends a raw header line.
    pub fn header_line(&mut self, line: &str) -> &mut Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    /// Appends a line exactly as given, e.g. a malformed alignment.
    pub fn raw_line(&mut self, line: &str) -> &mut Self {
        self.text.push_str(line);
        self.text.push('\n');
        self
    }

    /// Appends an alignment with a 10-base placeholder sequence.
    pub fn record(
        &mut self,
        name: &str,
        umi: &str,
        flag: u16,
        reference: &str,
        pos: i64,
        cigar: &str,
    ) -> &mut Self {
        writeln!(
            self.text,
            "{name}:{umi}\t{flag}\t{reference}\t{pos}\t60\t{cigar}\t*\t0\t0\tACGTACGTAC\tIIIIIIIIII"
        )
        .unwrap();
        self
    }

    /// The SAM text built so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Writes the SAM text to `path`.
    pub fn write(&self, path: &Path) {
        fs::write(path, &self.text).expect("Failed to write SAM file");
    }
}

/// Writes a whitelist containing `umis`, one per line.
pub fn write_whitelist(path: &Path, umis: &[&str]) {
    let mut text = umis.join("\n");
    text.push('\n');
    fs::write(path, text).expect("Failed to write UMI whitelist");
}

/// Runs the binary with `-f input -o output -u umis`.
pub fn run_dedup(input: &Path, output: &Path, umis: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_umidedup"))
        .args([
            "-f",
            input.to_str().unwrap(),
            "-o",
            output.to_str().unwrap(),
            "-u",
            umis.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to run umidedup")
}

/// Lines of `path` that are not header lines.
pub fn read_records(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .expect("Failed to read output SAM")
        .lines()
        .filter(|line| !line.starts_with('@'))
        .map(str::to_string)
        .collect()
}
