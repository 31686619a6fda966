//! Model designs: which column is explained by which regressors.

use callreg::columns::{GDP_GROWTH, NIM, POST_BREAK, ROA, SHORT_RATE, SLOPE, SLOPE_POST};
use serde::Serialize;

/// One regression specification: a dependent column and its regressors.
///
/// An intercept is not listed here; the engine always prepends one when
/// it builds the design matrix.
#[derive(Debug, Clone, Serialize)]
pub struct ModelDesign {
    /// Short identifier used for artifact filenames and logs.
    pub name: String,
    /// Dependent variable column.
    pub dependent: String,
    /// Regressor columns, in reporting order.
    pub regressors: Vec<String>,
}

impl ModelDesign {
    /// Build a design from explicit column names.
    pub fn new(name: &str, dependent: &str, regressors: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            dependent: dependent.to_string(),
            regressors: regressors.iter().map(|r| (*r).to_string()).collect(),
        }
    }

    /// Base model: net interest margin on GDP growth, slope and short rate.
    pub fn nim_base() -> Self {
        Self::new("model_base", NIM, &[GDP_GROWTH, SLOPE, SHORT_RATE])
    }

    /// Structural-break model: the base regressors plus the post-break
    /// indicator and the slope interaction.
    pub fn nim_structural_break() -> Self {
        Self::new(
            "model_interact",
            NIM,
            &[GDP_GROWTH, SLOPE, SHORT_RATE, POST_BREAK, SLOPE_POST],
        )
    }

    /// ROA model: the base regressor set with return on assets as the
    /// dependent variable.
    pub fn roa_base() -> Self {
        Self::new("model_roa", ROA, &[GDP_GROWTH, SLOPE, SHORT_RATE])
    }

    /// The three fits one pipeline run performs, in reporting order.
    pub fn standard_set() -> Vec<Self> {
        vec![Self::nim_base(), Self::nim_structural_break(), Self::roa_base()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_design_regressors() {
        let design = ModelDesign::nim_base();
        assert_eq!(design.dependent, NIM);
        assert_eq!(design.regressors, vec![GDP_GROWTH, SLOPE, SHORT_RATE]);
    }

    #[test]
    fn break_design_extends_the_base_set() {
        let base = ModelDesign::nim_base();
        let interact = ModelDesign::nim_structural_break();
        assert_eq!(interact.dependent, NIM);
        assert_eq!(&interact.regressors[..3], &base.regressors[..]);
        assert_eq!(&interact.regressors[3..], &[POST_BREAK, SLOPE_POST]);
    }

    #[test]
    fn roa_design_swaps_only_the_dependent() {
        let base = ModelDesign::nim_base();
        let roa = ModelDesign::roa_base();
        assert_eq!(roa.dependent, ROA);
        assert_eq!(roa.regressors, base.regressors);
    }

    #[test]
    fn standard_set_order() {
        let names: Vec<String> = ModelDesign::standard_set()
            .into_iter()
            .map(|d| d.name)
            .collect();
        assert_eq!(names, vec!["model_base", "model_interact", "model_roa"]);
    }
}
