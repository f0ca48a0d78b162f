//! Error types for cmpi-io.

use std::path::PathBuf;

use cmpi_cells::CellError;
use cmpi_climate::ClimateError;
use cmpi_index::IndexError;

/// Error type for all fallible operations in the cmpi-io crate.
///
/// Covers file access, CSV parsing, provider configuration and records that
/// fail the domain checks of the lower crates.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Wraps an I/O failure while opening or writing a file.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        /// File being accessed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Wraps a CSV parse or write failure.
    #[error("csv error in {}: {source}", path.display())]
    Csv {
        /// File being read or written.
        path: PathBuf,
        /// Underlying error.
        source: csv::Error,
    },

    /// Returned when a provider configuration fails validation.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a CSV row parses but its content is unusable.
    #[error("invalid record at {} line {line}: {reason}", path.display())]
    InvalidRecord {
        /// File containing the row.
        path: PathBuf,
        /// 1-based line number, header included.
        line: u64,
        /// Description of the problem.
        reason: String,
    },

    /// Returned when a source yields no rows at all.
    #[error("no records in {}", path.display())]
    Empty {
        /// File that was read.
        path: PathBuf,
    },

    #[error(transparent)]
    Climate(#[from] ClimateError),

    #[error(transparent)]
    Cell(#[from] CellError),

    #[error(transparent)]
    Index(#[from] IndexError),
}

impl IoError {
    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        IoError::Csv {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_not_found_display() {
        let e = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.csv"),
        };
        assert_eq!(e.to_string(), "file not found: /tmp/missing.csv");
    }

    #[test]
    fn validation_display() {
        let e = IoError::Validation {
            count: 2,
            details: "a; b".into(),
        };
        assert_eq!(e.to_string(), "2 validation error(s): a; b");
    }

    #[test]
    fn invalid_record_display() {
        let e = IoError::InvalidRecord {
            path: PathBuf::from("wards.csv"),
            line: 4,
            reason: "latitude out of range".into(),
        };
        assert_eq!(
            e.to_string(),
            "invalid record at wards.csv line 4: latitude out of range"
        );
    }

    #[test]
    fn index_error_is_transparent() {
        let inner = IndexError::UnknownIndicator {
            name: "radio".into(),
        };
        let msg = inner.to_string();
        let e: IoError = inner.into();
        assert_eq!(e.to_string(), msg);
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<IoError>();
    }
}
