//! Error types for table loading.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for pydiff operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading a numeric table.
#[derive(Debug, Error)]
pub enum Error {
    /// The data file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A token is not a floating-point number.
    #[error("line {line}: could not parse '{token}' as a number")]
    Parse { line: usize, token: String },

    /// A row has a different column count than the first row.
    #[error("line {line}: expected {expected} columns, found {found}")]
    InconsistentColumns {
        line: usize,
        expected: usize,
        found: usize,
    },
}
