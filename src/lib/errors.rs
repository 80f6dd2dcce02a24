//! Custom error types for umidedup operations.

use thiserror::Error;

/// Result type alias for umidedup operations
pub type Result<T> = std::result::Result<T, DedupError>;

/// Error type for umidedup operations
#[derive(Error, Debug)]
pub enum DedupError {
    /// A data line could not be parsed
    #[error("Malformed record on line {line}: invalid {field}: {reason}")]
    Format {
        /// 1-based line number in the input stream
        line: u64,
        /// Name of the offending field (e.g. "POS", "CIGAR")
        field: &'static str,
        /// Explanation of the problem
        reason: String,
    },

    /// A CIGAR string could not be tokenized
    #[error("Invalid CIGAR '{cigar}': {reason}")]
    Cigar {
        /// The CIGAR string as given
        cigar: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Input is not sorted by reference sequence and position
    #[error("Input is not coordinate sorted at line {line}: {reason}")]
    SortOrder {
        /// 1-based line number of the out-of-order record
        line: u64,
        /// Explanation of the regression
        reason: String,
    },

    /// A header line appeared after the first alignment record
    #[error("Header line found on line {line} after the first alignment record")]
    HeaderAfterRecords {
        /// 1-based line number of the header line
        line: u64,
    },

    /// Invalid parameter value provided
    #[error("Invalid parameter '{parameter}': {reason}")]
    InvalidParameter {
        /// The parameter name
        parameter: String,
        /// Explanation of why it's invalid
        reason: String,
    },

    /// File format error
    #[error("Invalid {file_type} file '{path}': {reason}")]
    InvalidFileFormat {
        /// Type of file (e.g., "SAM", "UMI whitelist")
        file_type: String,
        /// Path to the file
        path: String,
        /// Explanation of the problem
        reason: String,
    },

    /// Underlying I/O failure
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
