//! Annual panel construction.
//!
//! Three transforms, applied in order: merge the macro rate/growth
//! series into one yearly panel, aggregate institution-level bank
//! records into annual means, and join the two into the analysis-ready
//! regression panel.

#![forbid(unsafe_code)]

pub mod assemble;
pub mod bank;
pub mod error;
pub mod macroecon;

pub use assemble::assemble_panel;
pub use bank::aggregate_bank_panel;
pub use error::{PanelError, Result};
pub use macroecon::merge_macro_series;
