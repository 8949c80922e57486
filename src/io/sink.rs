//! Output destinations for FASTA serialization
//!
//! `DataSink` is the write counterpart to `DataSource`: it abstracts over
//! where FASTA text is going so the writer does not care whether it is a
//! plain file, a gzip-compressed file, or standard output.

use std::path::{Path, PathBuf};

/// Output destination for FASTA writes
///
/// Compression is auto-detected from the file extension for local sinks:
/// `.gz`, `.gzip` and `.bgz` select gzip output, everything else is written
/// uncompressed.
#[derive(Debug, Clone)]
pub enum DataSink {
    /// Write to a local file path
    Local(PathBuf),
    /// Write to standard output (always uncompressed)
    Stdout,
}

impl DataSink {
    /// Create a sink from a file path
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        Self::Local(path.as_ref().to_path_buf())
    }

    /// Create a sink for standard output
    pub fn stdout() -> Self {
        Self::Stdout
    }

    /// Get the file extension if this is a local file sink
    pub(crate) fn extension(&self) -> Option<&str> {
        match self {
            Self::Local(path) => path.extension().and_then(|ext| ext.to_str()),
            Self::Stdout => None,
        }
    }

    /// Check if this sink selects compressed output
    pub fn is_compressed(&self) -> bool {
        matches!(self.extension(), Some("gz") | Some("gzip") | Some("bgz"))
    }
}
