//! Input validation utilities
//!
//! Checks run on command-line paths before any file is opened, so that mistakes are
//! reported with a clear message instead of a bare I/O error.

use std::path::Path;

use crate::errors::{DedupError, Result};
use crate::io::is_stdio_path;

/// Validate that a file exists
///
/// # Arguments
/// * `path` - Path to validate
/// * `description` - Human-readable description of the file (e.g., "Input SAM")
///
/// # Errors
/// Returns an error if the file does not exist
///
/// # Example
/// ```
/// use umidedup_lib::validation::validate_file_exists;
///
/// let result = validate_file_exists("/nonexistent/file.sam", "Input SAM");
/// assert!(result.is_err());
/// ```
pub fn validate_file_exists<P: AsRef<Path>>(path: P, description: &str) -> Result<()> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        return Err(DedupError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "File does not exist".to_string(),
        });
    }
    if path_ref.is_dir() {
        return Err(DedupError::InvalidFileFormat {
            file_type: description.to_string(),
            path: path_ref.display().to_string(),
            reason: "Path is a directory".to_string(),
        });
    }
    Ok(())
}

/// Validate that the output path does not name the input file.
///
/// Writing the output over the input truncates it before it is read.
///
/// # Errors
/// Returns an error if both paths refer to the same existing file
pub fn validate_output_differs<P: AsRef<Path>, Q: AsRef<Path>>(input: P, output: Q) -> Result<()> {
    let (input, output) = (input.as_ref(), output.as_ref());
    if is_stdio_path(input) || is_stdio_path(output) {
        return Ok(());
    }
    let same = match (input.canonicalize(), output.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => input == output,
    };
    if same {
        return Err(DedupError::InvalidParameter {
            parameter: "output".to_string(),
            reason: format!("'{}' is also the input file", output.display()),
        });
    }
    Ok(())
}
