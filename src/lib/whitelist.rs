//! The fixed set of valid UMIs.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use ahash::AHashSet;
use log::debug;

use crate::errors::Result;

/// An immutable set of valid UMI sequences.
#[derive(Debug, Clone, Default)]
pub struct UmiWhitelist {
    umis: AHashSet<String>,
}

impl UmiWhitelist {
    /// Reads UMIs from `reader`, one per line.
    ///
    /// Surrounding whitespace is trimmed and reading stops at the first blank line, so
    /// anything after a blank line is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if reading fails.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut umis = AHashSet::new();
        for line in reader.lines() {
            let line = line?;
            let umi = line.trim();
            if umi.is_empty() {
                break;
            }
            umis.insert(umi.to_string());
        }
        Ok(Self { umis })
    }

    /// Reads UMIs from the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let whitelist = Self::from_reader(BufReader::new(File::open(path)?))?;
        debug!("Read {} UMIs from {}", whitelist.len(), path.display());
        Ok(whitelist)
    }

    /// Returns the whitelist's own copy of `umi`, if present.
    ///
    /// The returned slice lives as long as the whitelist, so it can be stored in
    /// per-record keys without allocating.
    #[must_use]
    pub fn get(&self, umi: &str) -> Option<&str> {
        self.umis.get(umi).map(String::as_str)
    }

    /// Number of distinct UMIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.umis.len()
    }

    /// Returns true if the whitelist holds no UMIs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.umis.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for UmiWhitelist {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self { umis: iter.into_iter().map(Into::into).collect() }
    }
}
