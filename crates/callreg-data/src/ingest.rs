//! CSV source ingestion and temporal normalization.
//!
//! Each source file is read with its header, validated for the columns
//! the pipeline needs, and date-normalized: the date column is parsed
//! with the source's own format, unparseable values become null, and
//! rows with null dates are dropped. Value columns in the macro series
//! are cast non-strictly so FRED's "." placeholders become nulls for
//! later interpolation.

use crate::error::{DataError, Result};
use callreg::config::{DateFormat, SourceSpec};
pub use callreg::columns::DATE;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

fn read_csv(path: &Path) -> Result<DataFrame> {
    // Infer over the whole file so a late "." in an otherwise numeric
    // column yields a string column instead of a read error.
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}

fn require_column(df: &DataFrame, column: &str, path: &Path) -> Result<()> {
    if df.get_column_names().iter().any(|name| name.as_str() == column) {
        Ok(())
    } else {
        Err(DataError::MissingColumn {
            column: column.to_string(),
            path: path.to_path_buf(),
        })
    }
}

/// Parse a date column with the source's format, coercing failures to null.
fn parse_date_expr(column: &str, format: DateFormat) -> Expr {
    col(column).cast(DataType::String).str().to_date(StrptimeOptions {
        format: Some(format.pattern().into()),
        strict: false,
        exact: true,
        cache: true,
    })
}

/// Load the bank call-report source.
///
/// Returns every column of the file, with the report-date column parsed
/// (day-first by default) and renamed to [`DATE`]. Rows whose date did
/// not parse are dropped.
pub fn load_bank_source(spec: &SourceSpec) -> Result<DataFrame> {
    let df = read_csv(&spec.path)?;
    require_column(&df, &spec.date_column, &spec.path)?;

    let mut exprs = vec![parse_date_expr(&spec.date_column, spec.date_format).alias(DATE)];
    exprs.extend(
        df.get_column_names()
            .iter()
            .filter(|name| name.as_str() != spec.date_column)
            .map(|name| col(name.as_str())),
    );

    let out = df
        .lazy()
        .select(exprs)
        .filter(col(DATE).is_not_null())
        .collect()?;

    if out.height() == 0 {
        return Err(DataError::EmptySource {
            path: spec.path.clone(),
        });
    }
    debug!(rows = out.height(), path = %spec.path.display(), "loaded bank source");
    Ok(out)
}

/// Load one macro series source.
///
/// Returns a two-column frame `[date, <rename_to>]` with the date parsed
/// (ISO by default, failures dropped) and the value cast to float with
/// placeholders coerced to null.
pub fn load_macro_source(spec: &SourceSpec, rename_to: &str) -> Result<DataFrame> {
    let df = read_csv(&spec.path)?;
    let value = spec
        .value_column
        .as_deref()
        .ok_or_else(|| DataError::MissingColumn {
            column: "<value column unset in config>".to_string(),
            path: spec.path.clone(),
        })?;
    require_column(&df, &spec.date_column, &spec.path)?;
    require_column(&df, value, &spec.path)?;

    let out = df
        .lazy()
        .select([
            parse_date_expr(&spec.date_column, spec.date_format).alias(DATE),
            col(value).cast(DataType::Float64).alias(rename_to),
        ])
        .filter(col(DATE).is_not_null())
        .collect()?;

    if out.height() == 0 {
        return Err(DataError::EmptySource {
            path: spec.path.clone(),
        });
    }
    debug!(rows = out.height(), path = %spec.path.display(), "loaded macro source");
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use callreg::config::DateFormat;
    use std::path::PathBuf;

    fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    fn bank_spec(path: PathBuf) -> SourceSpec {
        SourceSpec {
            path,
            date_column: "repdte".to_string(),
            value_column: None,
            date_format: DateFormat::DayFirst,
        }
    }

    #[test]
    fn bank_dates_parse_day_first_and_invalid_rows_drop() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "fdic.csv",
            "repdte,nimy,roa\n31.12.2005,3.5,1.1\nnot-a-date,3.6,1.2\n31.12.2006,3.7,1.3\n",
        );

        let df = load_bank_source(&bank_spec(path)).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column(DATE).unwrap().dtype(), &DataType::Date);
        // Metric columns survive untouched.
        let nimy = df.column("nimy").unwrap().f64().unwrap();
        assert_eq!(nimy.get(0), Some(3.5));
        assert_eq!(nimy.get(1), Some(3.7));
    }

    #[test]
    fn bank_missing_date_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "fdic.csv", "report_date,nimy\n31.12.2005,3.5\n");

        let err = load_bank_source(&bank_spec(path)).unwrap_err();
        match err {
            DataError::MissingColumn { column, .. } => assert_eq!(column, "repdte"),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }

    #[test]
    fn bank_source_with_no_parseable_dates_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "fdic.csv", "repdte,nimy\nbad,1.0\nworse,2.0\n");

        let err = load_bank_source(&bank_spec(path)).unwrap_err();
        assert!(matches!(err, DataError::EmptySource { .. }));
    }

    #[test]
    fn macro_source_parses_iso_dates_and_placeholder_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            &dir,
            "DGS3MO.csv",
            "DATE,DGS3MO\n2005-06-30,3.0\n2006-06-30,.\n2007-06-30,4.4\n",
        );
        let spec = SourceSpec::macro_series(path, "DATE", "DGS3MO");

        let df = load_macro_source(&spec, "short_rate").unwrap();
        assert_eq!(df.height(), 3);
        let rates = df.column("short_rate").unwrap().f64().unwrap();
        assert_eq!(rates.get(0), Some(3.0));
        // "." placeholder coerces to null, row kept for interpolation.
        assert_eq!(rates.get(1), None);
        assert_eq!(rates.get(2), Some(4.4));
    }

    #[test]
    fn macro_source_missing_value_column_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(&dir, "DGS10.csv", "DATE,WRONG\n2005-06-30,4.0\n");
        let spec = SourceSpec::macro_series(path, "DATE", "DGS10");

        let err = load_macro_source(&spec, "long_rate").unwrap_err();
        match err {
            DataError::MissingColumn { column, .. } => assert_eq!(column, "DGS10"),
            other => panic!("expected MissingColumn, got {other}"),
        }
    }
}
