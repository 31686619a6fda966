//! Chunked on-disk panel cache.
//!
//! The aggregated bank panel can be large; to bound peak working-set
//! size it is partitioned into fixed-size row batches, each written to
//! its own CSV file, then re-read and concatenated before the join.
//! Batch size is configuration (`RunConfig::chunk_rows`), not derived
//! from the current row count, and the partitioning is exposed as an
//! iterator so callers can stream batches without materializing all of
//! them.

use crate::error::{DataError, Result};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Partition a frame into row batches of at most `chunk_rows` rows.
///
/// An empty frame yields a single empty batch, so a cache write always
/// produces at least one file.
pub fn chunk_batches(
    df: &DataFrame,
    chunk_rows: usize,
) -> Result<impl Iterator<Item = DataFrame> + '_> {
    if chunk_rows == 0 {
        return Err(DataError::InvalidChunkSize(chunk_rows));
    }
    let batches = df.height().div_ceil(chunk_rows).max(1);
    Ok((0..batches).map(move |i| df.slice((i * chunk_rows) as i64, chunk_rows)))
}

/// Write a frame to `<dir>/<prefix>_chunk_<i>.csv` partitions.
///
/// Returns the written paths in batch order.
pub fn write_chunks(
    df: &DataFrame,
    dir: &Path,
    prefix: &str,
    chunk_rows: usize,
) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for (i, mut batch) in chunk_batches(df, chunk_rows)?.enumerate() {
        let path = dir.join(format!("{prefix}_chunk_{i}.csv"));
        let file = std::fs::File::create(&path)?;
        CsvWriter::new(file).include_header(true).finish(&mut batch)?;
        paths.push(path);
    }
    debug!(chunks = paths.len(), rows = df.height(), "wrote panel chunks");
    Ok(paths)
}

/// Re-read chunk files and concatenate them into one frame.
///
/// Schemas are inferred over each whole file, so a round-trip through
/// `write_chunks` reproduces the original values exactly; any type
/// coercion is left to the caller, where it is visible.
pub fn read_chunks(paths: &[PathBuf]) -> Result<DataFrame> {
    if paths.is_empty() {
        return Err(DataError::EmptyChunkSet);
    }
    let mut frames = Vec::with_capacity(paths.len());
    for path in paths {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .try_into_reader_with_file_path(Some(path.clone()))?
            .finish()?;
        frames.push(df.lazy());
    }
    let combined = concat(frames, UnionArgs::default())?.collect()?;
    debug!(rows = combined.height(), "reassembled panel from chunks");
    Ok(combined)
}

/// Write a single-file panel cache (used for the macro panel).
pub fn write_panel(df: &DataFrame, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    let mut df = df.clone();
    CsvWriter::new(file).include_header(true).finish(&mut df)?;
    Ok(())
}

/// Re-read a single-file panel cache.
pub fn read_panel(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;
    Ok(df)
}
