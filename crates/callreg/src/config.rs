//! Run configuration.
//!
//! The original analysis hardcoded its input filenames, date formats,
//! structural-break year and chunk size. Those all live here as named,
//! documented fields with the historical values as defaults, so the same
//! pipeline can run against revised data vintages or alternative
//! break-year hypotheses without code changes.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file could not be read.
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Configuration file was not valid JSON for [`RunConfig`].
    #[error("invalid config file {path}: {source}")]
    Parse {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// How a source's date column is formatted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DateFormat {
    /// Day-first `%d.%m.%Y`, as used by the call-report extract.
    DayFirst,
    /// ISO `%Y-%m-%d`, as used by the FRED series.
    Iso,
}

impl DateFormat {
    /// The strftime pattern for this format.
    pub const fn pattern(self) -> &'static str {
        match self {
            Self::DayFirst => "%d.%m.%Y",
            Self::Iso => "%Y-%m-%d",
        }
    }
}

/// One tabular input source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSpec {
    /// Path to the CSV file.
    pub path: PathBuf,
    /// Name of the date column in the file.
    pub date_column: String,
    /// Name of the single value column, for the macro sources.
    /// `None` for the bank source, which carries many metric columns.
    pub value_column: Option<String>,
    /// How the date column is formatted.
    pub date_format: DateFormat,
}

impl SourceSpec {
    /// A single-value macro source with ISO dates.
    pub fn macro_series(path: impl Into<PathBuf>, date_column: &str, value_column: &str) -> Self {
        Self {
            path: path.into(),
            date_column: date_column.to_string(),
            value_column: Some(value_column.to_string()),
            date_format: DateFormat::Iso,
        }
    }
}

/// Full configuration for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Bank call-report source (day-first dates, many metric columns).
    pub bank: SourceSpec,
    /// Short-term rate series.
    pub short_rate: SourceSpec,
    /// Long-term rate series.
    pub long_rate: SourceSpec,
    /// GDP growth series.
    pub gdp_growth: SourceSpec,
    /// First year of the near-zero-rate regime; years at or after it get
    /// the structural-break indicator.
    pub break_year: i32,
    /// Maximum rows per chunk when the bank panel is spilled to disk.
    pub chunk_rows: usize,
    /// Directory for intermediate chunk/panel files.
    pub work_dir: PathBuf,
    /// Directory for report artifacts (model summaries, exports).
    pub out_dir: PathBuf,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            bank: SourceSpec {
                path: PathBuf::from("20210303_FDIC.csv"),
                date_column: "repdte".to_string(),
                value_column: None,
                date_format: DateFormat::DayFirst,
            },
            short_rate: SourceSpec::macro_series("DGS3MO.csv", "DATE", "DGS3MO"),
            long_rate: SourceSpec::macro_series("DGS10.csv", "DATE", "DGS10"),
            gdp_growth: SourceSpec::macro_series("A191RL1Q225SBEA.csv", "DATE", "A191RL1Q225SBEA"),
            break_year: 2009,
            chunk_rows: 100_000,
            work_dir: PathBuf::from("."),
            out_dir: PathBuf::from("."),
        }
    }
}

impl RunConfig {
    /// Load a configuration from a JSON file.
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
