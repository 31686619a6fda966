//! Output surfaces for the callreg pipeline.
//!
//! Three concerns live here: persisting fitted-model text summaries to
//! disk, exporting coefficient tables as CSV or JSON, and rendering
//! descriptive statistics for the assembled panels.

#![forbid(unsafe_code)]

pub mod describe;
pub mod export;
pub mod report;

pub use describe::{ColumnSummary, DescribeError, describe, render_table};
pub use export::{CoefficientExport, ExportError, ExportFormat, Exporter, ModelFitExport};
pub use report::{ReportError, write_summaries, write_summary};
