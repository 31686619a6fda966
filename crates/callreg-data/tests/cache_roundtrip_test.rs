//! Disk round-trip tests for the chunked panel cache.

use callreg_data::{read_chunks, read_panel, write_chunks, write_panel};
use polars::prelude::*;

fn bank_panel() -> DataFrame {
    df![
        "year" => vec![2005i64, 2006, 2007, 2008, 2009, 2010, 2011],
        "nimy" => vec![3.5f64, 3.6, 3.4, 3.2, 3.1, 3.3, 3.2],
        "roa" => vec![1.1f64, 1.2, 1.0, 0.4, 0.2, 0.7, 0.9],
    ]
    .unwrap()
}

#[test]
fn chunked_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let df = bank_panel();

    let paths = write_chunks(&df, dir.path(), "bank_annual", 3).unwrap();
    assert_eq!(paths.len(), 3);
    assert!(paths[0].file_name().unwrap().to_str().unwrap().contains("chunk_0"));

    let loaded = read_chunks(&paths).unwrap();
    assert!(df.equals(&loaded), "round-trip altered the panel");
}

#[test]
fn round_trip_preserves_integer_columns_without_coercion() {
    // 2^53 + 1 is representable as i64 but not as f64; the cache must
    // hand it back unchanged, and only an explicit caller-side cast may
    // alter it.
    let dir = tempfile::tempdir().unwrap();
    let big: i64 = 9_007_199_254_740_993;
    let df = df!["year" => vec![2005i64, 2006], "assets" => vec![big, big + 2]].unwrap();

    let paths = write_chunks(&df, dir.path(), "assets", 1).unwrap();
    let loaded = read_chunks(&paths).unwrap();
    assert!(df.equals(&loaded));
    assert_eq!(loaded.column("assets").unwrap().i64().unwrap().get(0), Some(big));

    // The coercion the reload must NOT do implicitly: casting to float
    // rounds the value to the nearest representable f64.
    let coerced = loaded
        .lazy()
        .with_columns([col("assets").cast(DataType::Float64)])
        .collect()
        .unwrap();
    let as_float = coerced.column("assets").unwrap().f64().unwrap().get(0).unwrap();
    assert_ne!(as_float as i64, big);
}

#[test]
fn single_panel_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let df = df![
        "year" => vec![2005i64, 2006, 2007],
        "short_rate" => vec![3.0f64, 4.7, 4.4],
        "long_rate" => vec![4.3f64, 4.8, 4.6],
        "slope" => vec![1.3f64, 0.1, 0.2],
    ]
    .unwrap();

    let path = dir.path().join("macro_panel.csv");
    write_panel(&df, &path).unwrap();
    let loaded = read_panel(&path).unwrap();
    assert!(df.equals(&loaded));
}
