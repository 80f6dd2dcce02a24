//! Opening SAM text inputs and outputs.
//!
//! Paths of `-` (or `/dev/stdin`, `/dev/stdout`) select the standard streams so the
//! tool can sit in a pipe, e.g. `samtools view -h in.bam | umidedup -f - ...`.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::errors::Result;

/// Buffer size used for both reading and writing.
pub const IO_BUFFER_SIZE: usize = 1 << 20;

/// Returns true if `path` names standard input or output.
///
/// # Example
/// ```
/// use umidedup_lib::io::is_stdio_path;
///
/// assert!(is_stdio_path("-"));
/// assert!(is_stdio_path("/dev/stdout"));
/// assert!(!is_stdio_path("input.sam"));
/// ```
pub fn is_stdio_path<P: AsRef<Path>>(path: P) -> bool {
    let path_str = path.as_ref().to_string_lossy();
    path_str == "-" || path_str == "/dev/stdin" || path_str == "/dev/stdout"
}

/// Opens `path` for buffered reading.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub fn open_input<P: AsRef<Path>>(path: P) -> Result<Box<dyn BufRead>> {
    let path = path.as_ref();
    if is_stdio_path(path) {
        Ok(Box::new(BufReader::with_capacity(IO_BUFFER_SIZE, io::stdin().lock())))
    } else {
        Ok(Box::new(BufReader::with_capacity(IO_BUFFER_SIZE, File::open(path)?)))
    }
}

/// Creates (or truncates) `path` for buffered writing.
///
/// # Errors
/// Returns an error if the file cannot be created.
pub fn create_output<P: AsRef<Path>>(path: P) -> Result<Box<dyn Write>> {
    let path = path.as_ref();
    if is_stdio_path(path) {
        Ok(Box::new(BufWriter::with_capacity(IO_BUFFER_SIZE, io::stdout().lock())))
    } else {
        Ok(Box::new(BufWriter::with_capacity(IO_BUFFER_SIZE, File::create(path)?)))
    }
}
