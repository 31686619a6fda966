//! Data ingestion for the callreg pipeline.
//!
//! Reads the bank call-report extract and the macro rate/growth series
//! from CSV, normalizes their heterogeneous date formats, and provides
//! the chunked on-disk cache used to bound peak memory for large
//! intermediate panels.

#![forbid(unsafe_code)]

pub mod cache;
pub mod error;
pub mod ingest;

pub use cache::{chunk_batches, read_chunks, read_panel, write_chunks, write_panel};
pub use error::{DataError, Result};
pub use ingest::{DATE, load_bank_source, load_macro_source};
