//! Macro series merger.
//!
//! Aligns the three independent economic series into one yearly panel:
//! each series is collapsed to its annual mean, the three are inner
//! joined on the calendar year, remaining gaps are linearly interpolated
//! along the year ordering, and the yield-curve slope is derived last so
//! it is never itself interpolated.

use crate::error::{PanelError, Result};
use callreg::columns::{DATE, GDP_GROWTH, LONG_RATE, SHORT_RATE, SLOPE, YEAR};
use polars::prelude::*;

/// Collapse a `[date, value]` series to one mean observation per year.
fn annualize(series: &DataFrame, value: &str) -> Result<LazyFrame> {
    if series.column(value).is_err() {
        return Err(PanelError::MissingColumn {
            column: value.to_string(),
            input: "macro series",
        });
    }
    Ok(series
        .clone()
        .lazy()
        .with_column(col(DATE).dt().year().alias(YEAR))
        .group_by([col(YEAR)])
        .agg([col(value).mean()])
        .sort([YEAR], SortMultipleOptions::default()))
}

fn inner_join_on_year(
    left: LazyFrame,
    right: LazyFrame,
    left_name: &'static str,
    right_name: &'static str,
) -> Result<DataFrame> {
    let joined = left
        .join(right, [col(YEAR)], [col(YEAR)], JoinArgs::new(JoinType::Inner))
        .collect()?;
    if joined.height() == 0 {
        return Err(PanelError::EmptyJoin {
            left: left_name,
            right: right_name,
        });
    }
    Ok(joined)
}

/// Merge the three macro series into the Annual Macro Panel.
///
/// Inputs are `[date, value]` frames named [`SHORT_RATE`], [`LONG_RATE`]
/// and [`GDP_GROWTH`]. The output has exactly one row per year present
/// in all three series, columns `[year, short_rate, long_rate,
/// gdp_growth, slope]`, with interior gaps interpolated before the slope
/// is computed.
pub fn merge_macro_series(
    short_rate: &DataFrame,
    long_rate: &DataFrame,
    gdp_growth: &DataFrame,
) -> Result<DataFrame> {
    let short = annualize(short_rate, SHORT_RATE)?;
    let long = annualize(long_rate, LONG_RATE)?;
    let gdp = annualize(gdp_growth, GDP_GROWTH)?;

    let rates = inner_join_on_year(short, long, "short-rate series", "long-rate series")?;
    let merged = inner_join_on_year(rates.lazy(), gdp, "rate panel", "GDP-growth series")?;

    // Column-wise interpolation along the year ordering; consecutive
    // available values interpolate regardless of the year gap between
    // them. Slope comes after, from the filled columns.
    let panel = merged
        .lazy()
        .sort([YEAR], SortMultipleOptions::default())
        .with_columns([
            col(SHORT_RATE).interpolate(InterpolationMethod::Linear),
            col(LONG_RATE).interpolate(InterpolationMethod::Linear),
            col(GDP_GROWTH).interpolate(InterpolationMethod::Linear),
        ])
        .with_column((col(LONG_RATE) - col(SHORT_RATE)).alias(SLOPE))
        .select([
            col(YEAR),
            col(SHORT_RATE),
            col(LONG_RATE),
            col(GDP_GROWTH),
            col(SLOPE),
        ])
        .collect()?;

    Ok(panel)
}
