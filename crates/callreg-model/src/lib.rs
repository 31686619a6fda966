//! Ordinary-least-squares estimation over the assembled annual panel.
//!
//! A [`ModelDesign`] names a dependent column and its regressors; the
//! engine builds the design matrix (intercept always included), solves
//! the normal equations through an eigendecomposition of X'X, and
//! reports coefficient and fit statistics in a statsmodels-flavoured
//! text summary.

#![forbid(unsafe_code)]

pub mod design;
pub mod error;
pub mod linalg;
pub mod ols;

pub use design::ModelDesign;
pub use error::{ModelError, Result};
pub use ols::{Coefficient, FittedModel, fit};
