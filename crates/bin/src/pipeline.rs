//! Stage-isolated pipeline orchestration.
//!
//! The run is a fixed sequence of stages. Each stage's outcome is
//! recorded independently; a failure is logged, and every downstream
//! stage that depends on the missing output records itself as skipped
//! instead of computing on absent data. The run itself always finishes
//! and always ends with a transcript covering every stage.

use callreg::columns::{GDP_GROWTH, LONG_RATE, NIM, ROA, SHORT_RATE, SLOPE};
use callreg::{RunConfig, StageOutcome};
use callreg_data::{DataError, load_bank_source, load_macro_source, read_chunks, read_panel, write_chunks, write_panel};
use callreg_model::{FittedModel, ModelDesign, fit};
use callreg_output::export::{CoefficientExport, ExportError, ExportFormat, Exporter, ModelFitExport};
use callreg_output::report::{ReportError, write_summaries};
use callreg_output::{describe, render_table};
use callreg_panel::{aggregate_bank_panel, assemble_panel, merge_macro_series};
use polars::prelude::DataFrame;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};

/// Errors specific to the report-persistence stage.
#[derive(Debug, Error)]
enum PipelineError {
    #[error(transparent)]
    Report(#[from] ReportError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Name and final status of one stage, for the transcript.
#[derive(Debug)]
pub struct StageRecord {
    /// Stage name.
    pub name: &'static str,
    /// Terminal status line.
    pub status: String,
}

/// Summary of a whole pipeline run.
#[derive(Debug)]
pub struct RunReport {
    /// Per-stage transcript, in execution order.
    pub stages: Vec<StageRecord>,
    /// Number of models that were estimated.
    pub models_fitted: usize,
}

impl RunReport {
    /// Whether every stage ran to completion.
    pub fn all_completed(&self) -> bool {
        self.stages.iter().all(|s| s.status == "completed")
    }
}

struct Sources {
    bank: DataFrame,
    short_rate: DataFrame,
    long_rate: DataFrame,
    gdp_growth: DataFrame,
}

fn load_sources(config: &RunConfig) -> Result<Sources, DataError> {
    let bank = load_bank_source(&config.bank)?;
    info!(rows = bank.height(), path = %config.bank.path.display(), "loaded bank source");
    let short_rate = load_macro_source(&config.short_rate, SHORT_RATE)?;
    let long_rate = load_macro_source(&config.long_rate, LONG_RATE)?;
    let gdp_growth = load_macro_source(&config.gdp_growth, GDP_GROWTH)?;
    Ok(Sources {
        bank,
        short_rate,
        long_rate,
        gdp_growth,
    })
}

/// Spill the bank panel through the chunked CSV cache and the macro
/// panel through the single-file cache, then reload both. Downstream
/// stages consume the reloaded frames, so any cache defect surfaces
/// here rather than in the regression results.
fn cache_roundtrip(
    config: &RunConfig,
    bank_panel: &DataFrame,
    macro_panel: &DataFrame,
) -> Result<(DataFrame, DataFrame), DataError> {
    std::fs::create_dir_all(&config.work_dir)?;

    let chunk_paths = write_chunks(bank_panel, &config.work_dir, "bank_panel", config.chunk_rows)?;
    let bank = read_chunks(&chunk_paths)?;

    let macro_path = config.work_dir.join("macro_panel.csv");
    write_panel(macro_panel, &macro_path)?;
    let macro_reloaded = read_panel(&macro_path)?;

    Ok((bank, macro_reloaded))
}

fn persist_reports(config: &RunConfig, models: &[FittedModel]) -> Result<Vec<PathBuf>, PipelineError> {
    let mut paths = write_summaries(models, &config.out_dir)?;

    let coefficients = CoefficientExport::from_models(models);
    let coef_path = config.out_dir.join("coefficients.csv");
    coefficients.export_to_file(&coef_path, ExportFormat::Csv)?;
    paths.push(coef_path);

    let fits: Vec<ModelFitExport> = models.iter().map(ModelFitExport::from).collect();
    let fit_path = config.out_dir.join("fit_statistics.json");
    fits.export_to_file(&fit_path, ExportFormat::PrettyJson)?;
    paths.push(fit_path);

    Ok(paths)
}

fn record<T>(
    stages: &mut Vec<StageRecord>,
    name: &'static str,
    outcome: StageOutcome<T>,
) -> StageOutcome<T> {
    match &outcome {
        StageOutcome::Completed(_) => info!(stage = name, "completed"),
        StageOutcome::Failed { reason } => error!(stage = name, %reason, "failed"),
        StageOutcome::Skipped { upstream } => warn!(stage = name, upstream, "skipped"),
    }
    stages.push(StageRecord {
        name,
        status: outcome.status_line(),
    });
    outcome
}

/// Run the full pipeline against one configuration.
pub fn run_pipeline(config: &RunConfig) -> RunReport {
    let mut stages = Vec::new();

    info!(
        break_year = config.break_year,
        chunk_rows = config.chunk_rows,
        "starting pipeline run"
    );

    let sources = record(
        &mut stages,
        "load-sources",
        StageOutcome::from_result(load_sources(config)),
    );

    let macro_panel = match sources.completed() {
        Some(s) => record(
            &mut stages,
            "macro-panel",
            StageOutcome::from_result(merge_macro_series(&s.short_rate, &s.long_rate, &s.gdp_growth)),
        ),
        None => record(&mut stages, "macro-panel", StageOutcome::Skipped { upstream: "load-sources" }),
    };

    let bank_panel = match sources.completed() {
        Some(s) => record(
            &mut stages,
            "bank-panel",
            StageOutcome::from_result(aggregate_bank_panel(&s.bank)),
        ),
        None => record(&mut stages, "bank-panel", StageOutcome::Skipped { upstream: "load-sources" }),
    };

    let cached = match (bank_panel.completed(), macro_panel.completed()) {
        (Some(bank), Some(macro_p)) => record(
            &mut stages,
            "cache-roundtrip",
            StageOutcome::from_result(cache_roundtrip(config, bank, macro_p)),
        ),
        (None, _) => record(&mut stages, "cache-roundtrip", StageOutcome::Skipped { upstream: "bank-panel" }),
        (_, None) => record(&mut stages, "cache-roundtrip", StageOutcome::Skipped { upstream: "macro-panel" }),
    };

    let assembled = match cached.completed() {
        Some((bank, macro_p)) => record(
            &mut stages,
            "assemble",
            StageOutcome::from_result(assemble_panel(bank, macro_p, config.break_year)),
        ),
        None => record(&mut stages, "assemble", StageOutcome::Skipped { upstream: "cache-roundtrip" }),
    };

    if let Some(panel) = assembled.completed() {
        match describe(panel, &[NIM, ROA, SHORT_RATE, LONG_RATE, GDP_GROWTH, SLOPE]) {
            Ok(summaries) => info!("regression panel statistics:\n{}", render_table(&summaries)),
            Err(e) => warn!(error = %e, "could not summarize regression panel"),
        }
    }

    let models = match assembled.completed() {
        Some(panel) => {
            let mut fitted = Vec::new();
            for design in ModelDesign::standard_set() {
                match fit(&design, panel) {
                    Ok(model) => {
                        info!(model = %design.name, r_squared = model.r_squared, "estimated");
                        info!("\n{}", model.summary());
                        fitted.push(model);
                    }
                    Err(e) => error!(model = %design.name, error = %e, "estimation failed"),
                }
            }
            let outcome = if fitted.is_empty() {
                StageOutcome::Failed {
                    reason: "no model could be estimated".to_string(),
                }
            } else {
                StageOutcome::Completed(fitted)
            };
            record(&mut stages, "fit-models", outcome)
        }
        None => record(&mut stages, "fit-models", StageOutcome::Skipped { upstream: "assemble" }),
    };

    let models_fitted = models.completed().map_or(0, Vec::len);

    match models.completed() {
        Some(fitted) => {
            let outcome = match persist_reports(config, fitted) {
                Ok(paths) => {
                    for path in &paths {
                        info!(path = %path.display(), "wrote artifact");
                    }
                    StageOutcome::Completed(paths)
                }
                Err(e) => StageOutcome::Failed {
                    reason: e.to_string(),
                },
            };
            record(&mut stages, "reports", outcome);
        }
        None => {
            record::<Vec<PathBuf>>(&mut stages, "reports", StageOutcome::Skipped { upstream: "fit-models" });
        }
    }

    info!("run transcript:");
    for stage in &stages {
        info!("  {:<16} {}", stage.name, stage.status);
    }

    RunReport {
        stages,
        models_fitted,
    }
}
