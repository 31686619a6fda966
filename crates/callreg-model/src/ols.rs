//! OLS fitting and the fitted-model summary.

use crate::design::ModelDesign;
use crate::error::{ModelError, Result};
use crate::linalg::invert_symmetric;
use callreg::columns::INTERCEPT;
use ndarray::{Array1, Array2};
use polars::prelude::*;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};
use std::fmt;

/// Relative eigenvalue threshold below which X'X counts as singular.
const RANK_TOL: f64 = 1e-12;

/// One estimated coefficient with its inference statistics.
#[derive(Debug, Clone, Serialize)]
pub struct Coefficient {
    /// Regressor name (`const` for the intercept).
    pub name: String,
    /// Point estimate.
    pub estimate: f64,
    /// Standard error.
    pub std_error: f64,
    /// t-statistic.
    pub t_value: f64,
    /// Two-sided p-value.
    pub p_value: f64,
}

/// A fitted OLS model with coefficient and goodness-of-fit statistics.
#[derive(Debug, Clone, Serialize)]
pub struct FittedModel {
    /// The design that was estimated.
    pub design: ModelDesign,
    /// Coefficients in design order, intercept first.
    pub coefficients: Vec<Coefficient>,
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

/// Fit a design against the regression panel by ordinary least squares.
///
/// An intercept column is prepended to the regressor matrix. Estimation
/// fails outright, rather than degrading to NaN statistics, when a
/// design column is missing, when there are not enough observations to
/// leave residual degrees of freedom, or when the regressors are
/// collinear.
pub fn fit(design: &ModelDesign, panel: &DataFrame) -> Result<FittedModel> {
    for column in std::iter::once(design.dependent.as_str())
        .chain(design.regressors.iter().map(String::as_str))
    {
        if panel.column(column).is_err() {
            return Err(ModelError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    let mut select = vec![col(design.dependent.as_str()).cast(DataType::Float64)];
    select.extend(
        design
            .regressors
            .iter()
            .map(|r| col(r.as_str()).cast(DataType::Float64)),
    );
    let data = panel.clone().lazy().select(select).drop_nulls(None).collect()?;

    let n = data.height();
    let k = design.regressors.len() + 1;
    if n < k {
        return Err(ModelError::InsufficientObservations {
            required: k,
            actual: n,
        });
    }
    if n == k {
        // No residual degrees of freedom: standard errors would be
        // undefined, so the contract treats this as under-determined.
        return Err(ModelError::InsufficientObservations {
            required: k + 1,
            actual: n,
        });
    }

    let y = column_to_array(&data, &design.dependent)?;
    let mut x = Array2::<f64>::ones((n, k));
    for (j, name) in design.regressors.iter().enumerate() {
        let values = column_to_array(&data, name)?;
        x.column_mut(j + 1).assign(&values);
    }

    let xtx = x.t().dot(&x);
    let xtx_inv = invert_symmetric(&xtx, RANK_TOL)?;
    let beta = xtx_inv.dot(&x.t().dot(&y));

    let fitted = x.dot(&beta);
    let residuals = &y - &fitted;
    let ssr: f64 = residuals.dot(&residuals);
    let y_mean = y.sum() / n as f64;
    let sst: f64 = y.iter().map(|v| (v - y_mean).powi(2)).sum();

    let df_resid = n - k;
    let sigma2 = ssr / df_resid as f64;
    let r_squared = if sst > 0.0 { 1.0 - ssr / sst } else { 0.0 };
    let adj_r_squared = 1.0 - (1.0 - r_squared) * (n as f64 - 1.0) / df_resid as f64;

    let df_model = (k - 1) as f64;
    let f_statistic = if 1.0 - r_squared > 0.0 {
        (r_squared / df_model) / ((1.0 - r_squared) / df_resid as f64)
    } else {
        f64::INFINITY
    };
    let f_dist = FisherSnedecor::new(df_model, df_resid as f64)
        .map_err(|e| ModelError::Numeric(e.to_string()))?;
    let f_pvalue = if f_statistic.is_finite() {
        1.0 - f_dist.cdf(f_statistic)
    } else {
        0.0
    };

    let t_dist = StudentsT::new(0.0, 1.0, df_resid as f64)
        .map_err(|e| ModelError::Numeric(e.to_string()))?;
    let names = std::iter::once(INTERCEPT.to_string()).chain(design.regressors.iter().cloned());
    let coefficients = names
        .enumerate()
        .map(|(j, name)| {
            let estimate = beta[j];
            let std_error = (sigma2 * xtx_inv[[j, j]]).sqrt();
            let t_value = estimate / std_error;
            let p_value = if t_value.is_finite() {
                2.0 * (1.0 - t_dist.cdf(t_value.abs()))
            } else {
                0.0
            };
            Coefficient {
                name,
                estimate,
                std_error,
                t_value,
                p_value,
            }
        })
        .collect();

    // Gaussian log-likelihood; a perfect fit is clamped rather than sent
    // to -inf so the information criteria stay printable.
    let nf = n as f64;
    let log_likelihood =
        -0.5 * nf * ((2.0 * std::f64::consts::PI).ln() + (ssr.max(1e-300) / nf).ln() + 1.0);
    let aic = -2.0 * log_likelihood + 2.0 * k as f64;
    let bic = -2.0 * log_likelihood + k as f64 * nf.ln();

    Ok(FittedModel {
        design: design.clone(),
        coefficients,
        nobs: n,
        df_resid,
        r_squared,
        adj_r_squared,
        f_statistic,
        f_pvalue,
        log_likelihood,
        aic,
        bic,
    })
}

fn column_to_array(data: &DataFrame, name: &str) -> Result<Array1<f64>> {
    let values: Vec<f64> = data
        .column(name)?
        .f64()?
        .into_no_null_iter()
        .collect();
    Ok(Array1::from_vec(values))
}

impl FittedModel {
    /// Render the full statsmodels-flavoured text summary.
    pub fn summary(&self) -> String {
        let rule = "=".repeat(74);
        let thin = "-".repeat(74);
        let mut out = String::new();

        out.push_str(&format!(
            "{:^74}\n",
            format!("OLS Regression Results: {}", self.design.name)
        ));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "Dep. Variable:    {:<16} R-squared:           {:>12.4}\n",
            self.design.dependent, self.r_squared
        ));
        out.push_str(&format!(
            "No. Observations: {:<16} Adj. R-squared:      {:>12.4}\n",
            self.nobs, self.adj_r_squared
        ));
        out.push_str(&format!(
            "Df Residuals:     {:<16} F-statistic:         {:>12.4}\n",
            self.df_resid, self.f_statistic
        ));
        out.push_str(&format!(
            "Df Model:         {:<16} Prob (F-statistic):  {:>12.4e}\n",
            self.coefficients.len() - 1,
            self.f_pvalue
        ));
        out.push_str(&format!(
            "Log-Likelihood:   {:<16.4} AIC:                 {:>12.4}\n",
            self.log_likelihood, self.aic
        ));
        out.push_str(&format!(
            "{:34}BIC:                 {:>12.4}\n",
            "", self.bic
        ));
        out.push_str(&rule);
        out.push('\n');
        out.push_str(&format!(
            "{:<12} {:>12} {:>12} {:>12} {:>12}\n",
            "", "coef", "std err", "t", "P>|t|"
        ));
        out.push_str(&thin);
        out.push('\n');
        for c in &self.coefficients {
            out.push_str(&format!(
                "{:<12} {:>12.6} {:>12.6} {:>12.4} {:>12.4}\n",
                c.name, c.estimate, c.std_error, c.t_value, c.p_value
            ));
        }
        out.push_str(&rule);
        out.push('\n');
        out
    }
}

impl fmt::Display for FittedModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.summary())
    }
}
