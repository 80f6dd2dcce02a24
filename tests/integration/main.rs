//! Integration tests for umidedup.
//!
//! These tests run the compiled binary on SAM files written to temporary directories.

mod test_dedup_command;
