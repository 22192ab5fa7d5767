//! Data layer error types
//!
//! Errors raised while reading and normalizing the match and delivery tables.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the datasets
#[derive(Error, Debug)]
pub enum DataError {
    /// Input file could not be opened or inspected
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV reader failed outside of a single record (bad header, truncated file)
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("{table} table is missing required column '{column}'")]
    MissingColumn { table: &'static str, column: &'static str },

    /// Season value has no trailing 2-4 digit year token
    #[error("Invalid season value: '{0}'")]
    InvalidSeason(String),

    /// Background load task panicked or was cancelled
    #[error("Load task failed: {0}")]
    Task(String),
}

impl DataError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DataError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;
