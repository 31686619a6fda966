//! Persistence of fitted-model text summaries.

use callreg_model::FittedModel;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while writing report artifacts.
#[derive(Debug, Error)]
pub enum ReportError {
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Artifact filename for a model, `<name>_summary.txt`.
fn summary_file_name(model_name: &str) -> String {
    format!("{model_name}_summary.txt")
}

/// Write one model's text summary into `out_dir`, creating the
/// directory if needed. Returns the path written.
pub fn write_summary(model: &FittedModel, out_dir: &Path) -> Result<PathBuf, ReportError> {
    fs::create_dir_all(out_dir)?;
    let path = out_dir.join(summary_file_name(&model.design.name));
    fs::write(&path, model.summary())?;
    Ok(path)
}

/// Write summaries for every fitted model, returning the paths in the
/// same order.
pub fn write_summaries(
    models: &[FittedModel],
    out_dir: &Path,
) -> Result<Vec<PathBuf>, ReportError> {
    models
        .iter()
        .map(|model| write_summary(model, out_dir))
        .collect()
}
