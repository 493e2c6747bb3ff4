//! Centralized error types for enronscan.

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the enronscan library.
#[derive(Error, Debug)]
pub enum ScanError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The input directory does not exist.
    #[error("Input directory not found: {0}")]
    InputNotFound(PathBuf),

    /// The Message-ID header does not match the expected
    /// `<digits.digits.word.word@word>` form.
    #[error("Malformed Message-ID: '{0}'")]
    MalformedMessageId(String),

    /// A date string matched none of the recognized formats.
    #[error("No recognized date format for '{0}'")]
    DateFormat(String),

    /// A database operation failed.
    #[error("Database error: {0}")]
    Sql(#[from] rusqlite::Error),

    /// The database file does not exist yet.
    #[error("Database not found: {0} (run an ingest first)")]
    DatabaseNotFound(PathBuf),
}

/// Convenience alias for `Result<T, ScanError>`.
pub type Result<T> = std::result::Result<T, ScanError>;

impl ScanError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` inside functions returning `ScanError`
/// when no path context is available (rare — prefer `ScanError::io`).
impl From<std::io::Error> for ScanError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<unknown>"),
            source,
        }
    }
}
