//! Bank panel aggregator.
//!
//! Reduces many institution-period records per year into one annual mean
//! row per metric. Within each reporting year, numeric gaps are closed
//! by linear interpolation across the group's row order, then a
//! backward fill and a forward fill for the edge gaps interpolation
//! cannot reach. Rows still missing either target metric after the fill
//! are dropped before averaging, so a year whose whole group drops is
//! simply absent from the output.

use crate::error::{PanelError, Result};
use callreg::columns::{DATE, NIM, ROA, YEAR};
use polars::prelude::*;

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float32
            | DataType::Float64
            | DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
    )
}

/// Aggregate normalized bank records into the Annual Bank Panel.
///
/// Input is an ingested bank frame with a parsed [`DATE`] column and
/// numeric metric columns including [`NIM`] and [`ROA`]. The output has
/// one row per surviving year with the mean of every numeric metric,
/// sorted by year.
pub fn aggregate_bank_panel(records: &DataFrame) -> Result<DataFrame> {
    for required in [DATE, NIM, ROA] {
        if records.column(required).is_err() {
            return Err(PanelError::MissingColumn {
                column: required.to_string(),
                input: "bank records",
            });
        }
    }

    let schema = records.schema();
    let metrics: Vec<String> = schema
        .iter()
        .filter(|(name, dtype)| name.as_str() != DATE && is_numeric(dtype))
        .map(|(name, _)| name.to_string())
        .collect();

    // Per-year gap fill: interpolate along the group's row order, then
    // close edge gaps with a backward fill followed by a forward fill.
    let fill_exprs: Vec<Expr> = metrics
        .iter()
        .map(|name| {
            col(name.as_str())
                .cast(DataType::Float64)
                .interpolate(InterpolationMethod::Linear)
                .backward_fill(None)
                .forward_fill(None)
                .over([col(YEAR)])
                .alias(name.as_str())
        })
        .collect();

    let mean_exprs: Vec<Expr> = metrics.iter().map(|name| col(name.as_str()).mean()).collect();

    let panel = records
        .clone()
        .lazy()
        .with_column(col(DATE).dt().year().alias(YEAR))
        .with_columns(fill_exprs)
        .filter(col(NIM).is_not_null().and(col(ROA).is_not_null()))
        .group_by([col(YEAR)])
        .agg(mean_exprs)
        .sort([YEAR], SortMultipleOptions::default())
        .collect()?;

    Ok(panel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn records(dates: &[&str], nimy: Vec<Option<f64>>, roa: Vec<Option<f64>>) -> DataFrame {
        df![DATE => dates, NIM => nimy, ROA => roa]
            .unwrap()
            .lazy()
            .with_column(col(DATE).str().to_date(StrptimeOptions {
                format: Some("%Y-%m-%d".into()),
                strict: true,
                exact: true,
                cache: true,
            }))
            .collect()
            .unwrap()
    }

    #[test]
    fn yearly_means_across_institutions() {
        let df = records(
            &["2005-12-31", "2005-12-31", "2006-12-31", "2006-12-31"],
            vec![Some(3.0), Some(4.0), Some(3.2), Some(3.8)],
            vec![Some(1.0), Some(1.4), Some(0.9), Some(1.1)],
        );

        let panel = aggregate_bank_panel(&df).unwrap();
        assert_eq!(panel.height(), 2);
        let nimy = panel.column(NIM).unwrap().f64().unwrap();
        assert_abs_diff_eq!(nimy.get(0).unwrap(), 3.5, epsilon = 1e-12);
        assert_abs_diff_eq!(nimy.get(1).unwrap(), 3.5, epsilon = 1e-12);
    }

    #[test]
    fn interior_gap_fills_by_interpolation_within_the_year() {
        let df = records(
            &["2005-12-31", "2005-12-31", "2005-12-31"],
            vec![Some(3.0), None, Some(5.0)],
            vec![Some(1.0), Some(1.0), Some(1.0)],
        );

        let panel = aggregate_bank_panel(&df).unwrap();
        let nimy = panel.column(NIM).unwrap().f64().unwrap();
        // Gap interpolates to 4.0, so the year mean is (3 + 4 + 5) / 3.
        assert_abs_diff_eq!(nimy.get(0).unwrap(), 4.0, epsilon = 1e-12);
    }

    #[test]
    fn edge_gaps_fill_from_within_the_year_only() {
        // 2005's leading null backfills from 3.0; 2006 has its own values
        // and must not leak into 2005.
        let df = records(
            &["2005-12-31", "2005-12-31", "2006-12-31"],
            vec![None, Some(3.0), Some(9.0)],
            vec![Some(1.0), Some(1.0), Some(2.0)],
        );

        let panel = aggregate_bank_panel(&df).unwrap();
        let nimy = panel.column(NIM).unwrap().f64().unwrap();
        assert_abs_diff_eq!(nimy.get(0).unwrap(), 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(nimy.get(1).unwrap(), 9.0, epsilon = 1e-12);
    }

    #[test]
    fn fully_missing_year_is_absent_from_output() {
        // Every 2006 row is missing roa and the year group has nothing
        // to fill from, so 2006 must not appear at all.
        let df = records(
            &["2005-12-31", "2006-12-31", "2006-12-31", "2007-12-31"],
            vec![Some(3.0), Some(3.1), Some(3.2), Some(3.3)],
            vec![Some(1.0), None, None, Some(1.2)],
        );

        let panel = aggregate_bank_panel(&df).unwrap();
        let years: Vec<i32> = panel
            .column(YEAR)
            .unwrap()
            .i32()
            .unwrap()
            .into_no_null_iter()
            .collect();
        assert_eq!(years, vec![2005, 2007]);
    }

    #[test]
    fn missing_target_metric_column_is_reported() {
        let df = df![DATE => vec!["2005-12-31"], NIM => vec![3.0f64]]
            .unwrap()
            .lazy()
            .with_column(col(DATE).str().to_date(StrptimeOptions {
                format: Some("%Y-%m-%d".into()),
                strict: true,
                exact: true,
                cache: true,
            }))
            .collect()
            .unwrap();

        let err = aggregate_bank_panel(&df).unwrap_err();
        match err {
            PanelError::MissingColumn { column, .. } => assert_eq!(column, ROA),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }
}
