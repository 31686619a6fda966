//! Error types for model estimation.

use thiserror::Error;

/// Result type for model operations.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors that can occur during estimation.
#[derive(Debug, Error)]
pub enum ModelError {
    /// A design column is absent from the panel.
    #[error("column '{column}' not found in regression panel")]
    MissingColumn {
        /// Column the design referenced.
        column: String,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Too few observations for the regressor count.
    #[error("insufficient observations: need at least {required}, got {actual}")]
    InsufficientObservations {
        /// Required number of observations.
        required: usize,
        /// Actual number of observations.
        actual: usize,
    },

    /// X'X is singular or numerically rank-deficient.
    #[error("regressor matrix is rank-deficient; check for collinear columns")]
    RankDeficient,

    /// Matrix dimensions do not agree.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Actual dimension.
        actual: usize,
    },

    /// A distribution or other numeric routine rejected its inputs.
    #[error("numeric error: {0}")]
    Numeric(String),
}
