//! Coefficient-table and fit-statistics export.
//!
//! Fitted models are flattened into serde-friendly rows and written as
//! CSV or JSON, so the regression output can feed spreadsheets or other
//! downstream tooling without reparsing the text summaries.

use callreg_model::FittedModel;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values format.
    Csv,

    /// Compact JSON format.
    Json,

    /// Pretty-printed JSON format.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

/// One coefficient row of a fitted model, flattened for export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoefficientExport {
    /// Model identifier the row belongs to.
    pub model: String,

    /// Regressor name (`const` for the intercept).
    pub term: String,

    /// Point estimate.
    pub estimate: f64,

    /// Standard error.
    pub std_error: f64,

    /// t-statistic.
    pub t_value: f64,

    /// Two-sided p-value.
    pub p_value: f64,
}

impl CoefficientExport {
    /// Flatten a fitted model into one row per coefficient.
    pub fn from_model(model: &FittedModel) -> Vec<Self> {
        model
            .coefficients
            .iter()
            .map(|c| Self {
                model: model.design.name.clone(),
                term: c.name.clone(),
                estimate: c.estimate,
                std_error: c.std_error,
                t_value: c.t_value,
                p_value: c.p_value,
            })
            .collect()
    }

    /// Flatten several fitted models into a single table.
    pub fn from_models(models: &[FittedModel]) -> Vec<Self> {
        models.iter().flat_map(Self::from_model).collect()
    }
}

/// Headline fit statistics of one model, flattened for export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ModelFitExport {
    /// Model identifier.
    pub model: String,

    /// Dependent variable column.
    pub dependent: String,

    /// Number of observations used.
    pub nobs: usize,

    /// Residual degrees of freedom.
    pub df_resid: usize,

    /// Coefficient of determination.
    pub r_squared: f64,

    /// R² adjusted for the regressor count.
    pub adj_r_squared: f64,

    /// Overall F-statistic.
    pub f_statistic: f64,

    /// p-value of the F-statistic.
    pub f_pvalue: f64,

    /// Gaussian log-likelihood at the estimate.
    pub log_likelihood: f64,

    /// Akaike information criterion.
    pub aic: f64,

    /// Bayesian information criterion.
    pub bic: f64,
}

impl From<&FittedModel> for ModelFitExport {
    fn from(model: &FittedModel) -> Self {
        Self {
            model: model.design.name.clone(),
            dependent: model.design.dependent.clone(),
            nobs: model.nobs,
            df_resid: model.df_resid,
            r_squared: model.r_squared,
            adj_r_squared: model.adj_r_squared,
            f_statistic: model.f_statistic,
            f_pvalue: model.f_pvalue,
            log_likelihood: model.log_likelihood,
            aic: model.aic,
            bic: model.bic,
        }
    }
}

/// Trait for exporting data in various formats.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn records_to_csv<T: Serialize>(records: &[T]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for record in records {
        wtr.serialize(record)?;
    }
    let data = String::from_utf8(wtr.into_inner().map_err(|e| e.into_error())?)
        .map_err(|e| ExportError::Io(std::io::Error::other(e)))?;
    Ok(data)
}

impl Exporter for Vec<CoefficientExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for ModelFitExport {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(std::slice::from_ref(self)),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<ModelFitExport> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => records_to_csv(self),
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use callreg_model::{Coefficient, ModelDesign};

    fn fitted_fixture() -> FittedModel {
        FittedModel {
            design: ModelDesign::nim_base(),
            coefficients: vec![
                Coefficient {
                    name: "const".to_string(),
                    estimate: 2.0,
                    std_error: 0.1,
                    t_value: 20.0,
                    p_value: 0.0001,
                },
                Coefficient {
                    name: "gdp_growth".to_string(),
                    estimate: 0.5,
                    std_error: 0.05,
                    t_value: 10.0,
                    p_value: 0.001,
                },
            ],
            nobs: 16,
            df_resid: 12,
            r_squared: 0.91,
            adj_r_squared: 0.885,
            f_statistic: 40.4,
            f_pvalue: 1.2e-6,
            log_likelihood: -4.5,
            aic: 17.0,
            bic: 20.1,
        }
    }

    #[test]
    fn coefficient_rows_cover_every_term() {
        let rows = CoefficientExport::from_model(&fitted_fixture());
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].model, "model_base");
        assert_eq!(rows[0].term, "const");
        assert_eq!(rows[1].term, "gdp_growth");
        assert_eq!(rows[1].estimate, 0.5);
    }

    #[test]
    fn coefficient_export_csv() {
        let rows = CoefficientExport::from_model(&fitted_fixture());
        let csv = rows.export_to_string(ExportFormat::Csv).unwrap();
        assert!(csv.starts_with("model,term,estimate,std_error,t_value,p_value"));
        assert!(csv.contains("model_base,const,2.0"));
        assert!(csv.contains("gdp_growth"));
    }

    #[test]
    fn coefficient_export_json() {
        let rows = CoefficientExport::from_model(&fitted_fixture());
        let json = rows.export_to_string(ExportFormat::Json).unwrap();
        assert!(json.contains("\"model\":\"model_base\""));
        assert!(json.contains("\"term\":\"const\""));
    }

    #[test]
    fn fit_export_carries_headline_statistics() {
        let fit = ModelFitExport::from(&fitted_fixture());
        assert_eq!(fit.model, "model_base");
        assert_eq!(fit.dependent, "nimy");
        assert_eq!(fit.nobs, 16);
        assert_eq!(fit.r_squared, 0.91);

        let json = fit.export_to_string(ExportFormat::PrettyJson).unwrap();
        assert!(json.contains("\"r_squared\""));
        assert!(json.contains("  "));
    }

    #[test]
    fn from_models_concatenates_in_order() {
        let rows = CoefficientExport::from_models(&[fitted_fixture(), fitted_fixture()]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].term, "const");
        assert_eq!(rows[2].term, "const");
    }

    #[test]
    fn export_to_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!(
            "coefficients.{}",
            ExportFormat::Csv.extension()
        ));

        let rows = CoefficientExport::from_model(&fitted_fixture());
        rows.export_to_file(&path, ExportFormat::Csv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("model_base"));
    }

    #[test]
    fn export_format_extension() {
        assert_eq!(ExportFormat::Csv.extension(), "csv");
        assert_eq!(ExportFormat::Json.extension(), "json");
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }
}
