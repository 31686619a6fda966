//! Error types for data operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur during ingestion or caching.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// A required column is absent from a source file. This is the
    /// systemic variant of a parse failure: the whole source is unusable.
    #[error("column '{column}' not found in {path}")]
    MissingColumn {
        /// Column that was expected.
        column: String,
        /// File that was read.
        path: PathBuf,
    },

    /// Every row of a source was dropped during date normalization.
    #[error("no rows with parseable dates in {path}")]
    EmptySource {
        /// File that was read.
        path: PathBuf,
    },

    /// Chunk size must be positive.
    #[error("invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(usize),

    /// A chunk set must contain at least one file to reassemble.
    #[error("no chunk files to reassemble")]
    EmptyChunkSet,
}
