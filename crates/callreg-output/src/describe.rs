//! Descriptive statistics over panel columns.

use polars::prelude::*;
use thiserror::Error;

/// Errors that can occur while computing descriptive statistics.
#[derive(Debug, Error)]
pub enum DescribeError {
    /// DataFrame operation error.
    #[error("dataframe error: {0}")]
    Polars(#[from] PolarsError),

    /// A requested column is absent from the frame.
    #[error("column `{column}` not present in frame")]
    MissingColumn {
        /// The missing column name.
        column: String,
    },
}

/// Count, mean, sample standard deviation, minimum and maximum of one
/// numeric column. Null entries are excluded from every statistic.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSummary {
    /// Column name.
    pub name: String,
    /// Non-null observation count.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator).
    pub std: f64,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
}

/// Summarize the named columns of a frame.
///
/// # Errors
///
/// Returns [`DescribeError::MissingColumn`] when a requested column is
/// absent, or a polars error when a column cannot be read as floats.
pub fn describe(frame: &DataFrame, columns: &[&str]) -> Result<Vec<ColumnSummary>, DescribeError> {
    for column in columns {
        if frame.column(column).is_err() {
            return Err(DescribeError::MissingColumn {
                column: (*column).to_string(),
            });
        }
    }

    let select: Vec<Expr> = columns
        .iter()
        .map(|c| col(*c).cast(DataType::Float64))
        .collect();
    let data = frame.clone().lazy().select(select).collect()?;

    let mut summaries = Vec::with_capacity(columns.len());
    for column in columns {
        let values: Vec<f64> = data.column(column)?.f64()?.into_iter().flatten().collect();
        summaries.push(summarize(column, &values));
    }
    Ok(summaries)
}

fn summarize(name: &str, values: &[f64]) -> ColumnSummary {
    let count = values.len();
    if count == 0 {
        return ColumnSummary {
            name: name.to_string(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    let n = count as f64;
    let mean = values.iter().sum::<f64>() / n;
    let std = if count > 1 {
        (values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0)).sqrt()
    } else {
        f64::NAN
    };
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    ColumnSummary {
        name: name.to_string(),
        count,
        mean,
        std,
        min,
        max,
    }
}

/// Render summaries as a fixed-width text table.
pub fn render_table(summaries: &[ColumnSummary]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<12} {:>7} {:>12} {:>12} {:>12} {:>12}\n",
        "column", "count", "mean", "std", "min", "max"
    ));
    out.push_str(&"-".repeat(72));
    out.push('\n');
    for s in summaries {
        out.push_str(&format!(
            "{:<12} {:>7} {:>12.4} {:>12.4} {:>12.4} {:>12.4}\n",
            s.name, s.count, s.mean, s.std, s.min, s.max
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use callreg::columns::{NIM, SLOPE};

    fn frame() -> DataFrame {
        df![
            NIM => vec![3.0f64, 3.5, 4.0, 4.5],
            SLOPE => vec![Some(1.0f64), None, Some(2.0), Some(3.0)],
        ]
        .unwrap()
    }

    #[test]
    fn summarizes_each_requested_column() {
        let summaries = describe(&frame(), &[NIM, SLOPE]).unwrap();
        assert_eq!(summaries.len(), 2);

        let nim = &summaries[0];
        assert_eq!(nim.count, 4);
        assert_abs_diff_eq!(nim.mean, 3.75, epsilon = 1e-12);
        assert_abs_diff_eq!(nim.min, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(nim.max, 4.5, epsilon = 1e-12);
        // Sample std of [3.0, 3.5, 4.0, 4.5].
        assert_abs_diff_eq!(nim.std, (5.0f64 / 12.0).sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn nulls_are_excluded_from_every_statistic() {
        let summaries = describe(&frame(), &[SLOPE]).unwrap();
        let slope = &summaries[0];
        assert_eq!(slope.count, 3);
        assert_abs_diff_eq!(slope.mean, 2.0, epsilon = 1e-12);
    }

    #[test]
    fn missing_column_is_reported() {
        let err = describe(&frame(), &["not_here"]).unwrap_err();
        assert!(matches!(err, DescribeError::MissingColumn { .. }));
    }

    #[test]
    fn integer_columns_are_widened() {
        let df = df!["year" => vec![2005i64, 2006, 2007]].unwrap();
        let summaries = describe(&df, &["year"]).unwrap();
        assert_abs_diff_eq!(summaries[0].mean, 2006.0, epsilon = 1e-12);
    }

    #[test]
    fn table_rendering_lines_up() {
        let summaries = describe(&frame(), &[NIM, SLOPE]).unwrap();
        let table = render_table(&summaries);

        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("column"));
        assert!(lines[2].starts_with(NIM));
        assert!(lines[3].starts_with(SLOPE));
    }
}
