//! Error types for panel construction.

use thiserror::Error;

/// Result type for panel operations.
pub type Result<T> = std::result::Result<T, PanelError>;

/// Errors that can occur while building the annual panels.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// An inner join produced zero rows, so every downstream result
    /// would be empty. Raised instead of handing an empty panel on.
    #[error("inner join of {left} with {right} produced zero rows")]
    EmptyJoin {
        /// Left side of the join.
        left: &'static str,
        /// Right side of the join.
        right: &'static str,
    },

    /// A column the panel stage needs is absent from its input.
    #[error("column '{column}' not found in {input}")]
    MissingColumn {
        /// Column that was expected.
        column: String,
        /// Which input frame lacked it.
        input: &'static str,
    },
}
