//! Panel assembler.
//!
//! Inner-joins the Annual Bank Panel with the Annual Macro Panel on the
//! fiscal year and adds the structural-break columns: a binary
//! indicator for years at or after the break year and the
//! slope-times-indicator interaction. The result is the authoritative
//! regression dataset.

use crate::error::{PanelError, Result};
use callreg::columns::{POST_BREAK, SLOPE, SLOPE_POST, YEAR};
use polars::prelude::*;

/// Join the bank and macro panels into the regression panel.
///
/// Only years present in both panels survive. `break_year` parameterizes
/// the [`POST_BREAK`] indicator and thereby the [`SLOPE_POST`]
/// interaction column.
pub fn assemble_panel(
    bank: &DataFrame,
    macro_panel: &DataFrame,
    break_year: i32,
) -> Result<DataFrame> {
    // A panel that round-tripped through the CSV cache comes back with
    // an Int64 year key; normalize both sides before joining.
    let bank_lf = bank
        .clone()
        .lazy()
        .with_column(col(YEAR).cast(DataType::Int32));
    let macro_lf = macro_panel
        .clone()
        .lazy()
        .with_column(col(YEAR).cast(DataType::Int32));

    let joined = bank_lf
        .join(macro_lf, [col(YEAR)], [col(YEAR)], JoinArgs::new(JoinType::Inner))
        .collect()?;
    if joined.height() == 0 {
        return Err(PanelError::EmptyJoin {
            left: "bank panel",
            right: "macro panel",
        });
    }

    let panel = joined
        .lazy()
        .with_column(
            col(YEAR)
                .gt_eq(lit(break_year))
                .cast(DataType::Int32)
                .alias(POST_BREAK),
        )
        .with_column(
            (col(SLOPE) * col(POST_BREAK).cast(DataType::Float64)).alias(SLOPE_POST),
        )
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    Ok(panel)
}
