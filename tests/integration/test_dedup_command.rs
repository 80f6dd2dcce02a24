//! End-to-end CLI tests for PCR duplicate removal.
//!
//! These tests run the actual `umidedup` binary on small SAM files and check the
//! records written, the summary printed on stdout, and failure exit codes.

use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::helpers::{DEFAULT_UMIS, SamBuilder, read_records, run_dedup, write_whitelist};

/// Input with one kept read per molecule, one invalid UMI and one soft-clipped duplicate.
fn mixed_sam() -> SamBuilder {
    let mut sam = SamBuilder::with_header(&[("1", 1000), ("2", 1000)]);
    sam.record("r1", "AACGCCAT", 0, "1", 100, "10M")
        .record("r2", "NNNNNNNN", 0, "1", 100, "10M")
        .record("r3", "AACGCCAT", 0, "1", 103, "3S7M")
        .record("r4", "AACGCCAT", 16, "1", 100, "10M")
        .record("r5", "CTGTTCAC", 0, "1", 100, "10M");
    sam
}

#[test]
fn test_dedup_removes_invalid_umis_and_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("output.sam");
    let umis = temp_dir.path().join("umis.txt");
    mixed_sam().write(&input);
    write_whitelist(&umis, DEFAULT_UMIS);

    let result = run_dedup(&input, &output, &umis);
    assert!(
        result.status.success(),
        "umidedup failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );

    let names: Vec<String> = read_records(&output)
        .iter()
        .map(|line| line.split('\t').next().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["r1:AACGCCAT", "r4:AACGCCAT", "r5:CTGTTCAC"]);

    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("Number of reads removed due to invalid UMI sequences: 1"));
    assert!(stdout.contains("Number of reads removed due to PCR duplication: 1"));
}

#[test]
fn test_dedup_passes_header_through_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("output.sam");
    let umis = temp_dir.path().join("umis.txt");
    let mut sam = SamBuilder::with_header(&[("1", 1000)]);
    sam.header_line("@RG\tID:A\tSM:sample")
        .header_line("@PG\tID:aligner\tPN:aligner\tCL:aligner --in x.fq")
        .record("r1", "AACGCCAT", 0, "1", 100, "10M")
        .record("r2", "AACGCCAT", 0, "1", 100, "10M");
    sam.write(&input);
    write_whitelist(&umis, DEFAULT_UMIS);

    assert!(run_dedup(&input, &output, &umis).status.success());

    let header_in: Vec<String> =
        sam.text().lines().filter(|l| l.starts_with('@')).map(str::to_string).collect();
    let written = fs::read_to_string(&output).unwrap();
    let header_out: Vec<&str> = written.lines().filter(|l| l.starts_with('@')).collect();
    assert_eq!(header_out, header_in);
}

#[test]
fn test_dedup_resets_between_references() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("output.sam");
    let umis = temp_dir.path().join("umis.txt");

    let mut sam = SamBuilder::with_header(&[("1", 1000), ("2", 1000)]);
    sam.record("a", "AACGCCAT", 0, "1", 100, "10M")
        .record("b", "AACGCCAT", 0, "2", 100, "10M")
        .record("c", "AACGCCAT", 0, "2", 100, "10M");
    sam.write(&input);
    write_whitelist(&umis, DEFAULT_UMIS);

    let result = run_dedup(&input, &output, &umis);
    assert!(result.status.success());
    assert_eq!(read_records(&output).len(), 2);

    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("Number of reads removed due to PCR duplication: 1"));
}

#[test]
fn test_dedup_output_is_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let first = temp_dir.path().join("first.sam");
    let second = temp_dir.path().join("second.sam");
    let umis = temp_dir.path().join("umis.txt");
    mixed_sam().write(&input);
    write_whitelist(&umis, DEFAULT_UMIS);

    assert!(run_dedup(&input, &first, &umis).status.success());
    let result = run_dedup(&first, &second, &umis);
    assert!(result.status.success());

    assert_eq!(fs::read_to_string(&first).unwrap(), fs::read_to_string(&second).unwrap());
    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(stdout.contains("Number of reads removed due to invalid UMI sequences: 0"));
    assert!(stdout.contains("Number of reads removed due to PCR duplication: 0"));
}

#[test]
fn test_dedup_streams_stdin_to_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let umis = temp_dir.path().join("umis.txt");
    write_whitelist(&umis, DEFAULT_UMIS);
    let sam = mixed_sam();

    let mut child = Command::new(env!("CARGO_BIN_EXE_umidedup"))
        .args(["-f", "-", "-o", "-", "-u", umis.to_str().unwrap()])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn umidedup");
    child.stdin.take().unwrap().write_all(sam.text().as_bytes()).unwrap();
    let result = child.wait_with_output().unwrap();
    assert!(result.status.success());

    let stdout = String::from_utf8(result.stdout).unwrap();
    assert!(!stdout.contains("Number of reads removed"));
    let records: Vec<&str> = stdout.lines().filter(|l| !l.starts_with('@')).collect();
    assert_eq!(records.len(), 3);
}

#[test]
fn test_dedup_accepts_long_option_names() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let output = temp_dir.path().join("output.sam");
    let umis = temp_dir.path().join("umis.txt");
    mixed_sam().write(&input);
    write_whitelist(&umis, DEFAULT_UMIS);

    let status = Command::new(env!("CARGO_BIN_EXE_umidedup"))
        .args([
            "--input",
            input.to_str().unwrap(),
            "--outfile",
            output.to_str().unwrap(),
            "--umi",
            umis.to_str().unwrap(),
        ])
        .status()
        .expect("Failed to run umidedup");
    assert!(status.success());
    assert_eq!(read_records(&output).len(), 3);
}

#[test]
fn test_dedup_fails_on_missing_input() {
    let temp_dir = TempDir::new().unwrap();
    let umis = temp_dir.path().join("umis.txt");
    write_whitelist(&umis, DEFAULT_UMIS);

    let result = run_dedup(
        &temp_dir.path().join("missing.sam"),
        &temp_dir.path().join("output.sam"),
        &umis,
    );
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("File does not exist"));
}

#[test]
fn test_dedup_fails_on_missing_whitelist() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    mixed_sam().write(&input);

    let result = run_dedup(
        &input,
        &temp_dir.path().join("output.sam"),
        &temp_dir.path().join("missing.txt"),
    );
    assert!(!result.status.success());
}

#[test]
fn test_dedup_fails_on_malformed_record() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let umis = temp_dir.path().join("umis.txt");
    let mut sam = mixed_sam();
    sam.raw_line("r6:AACGCCAT\tnotaflag\t1\t200\t60\t10M");
    sam.write(&input);
    write_whitelist(&umis, DEFAULT_UMIS);

    let result = run_dedup(&input, &temp_dir.path().join("output.sam"), &umis);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("FLAG"));
}

#[test]
fn test_dedup_fails_on_bad_cigar_with_invalid_umi() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let umis = temp_dir.path().join("umis.txt");
    let mut sam = mixed_sam();
    sam.record("r6", "GGGGGGGG", 0, "1", 200, "5S4");
    sam.write(&input);
    write_whitelist(&umis, DEFAULT_UMIS);

    let result = run_dedup(&input, &temp_dir.path().join("output.sam"), &umis);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("CIGAR"));
}

#[test]
fn test_dedup_fails_on_out_of_range_position() {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("input.sam");
    let umis = temp_dir.path().join("umis.txt");
    let mut sam = mixed_sam();
    sam.record("r6", "AACGCCAT", 16, "1", i64::MAX, "10M");
    sam.write(&input);
    write_whitelist(&umis, DEFAULT_UMIS);

    let result = run_dedup(&input, &temp_dir.path().join("output.sam"), &umis);
    assert!(!result.status.success());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("POS"));
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_dedup_fails_on_missing_arguments() {
    let status = Command::new(env!("CARGO_BIN_EXE_umidedup"))
        .args(["-f", "input.sam"])
        .stderr(Stdio::null())
        .status()
        .expect("Failed to run umidedup");
    assert!(!status.success());
}
