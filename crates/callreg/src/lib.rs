//! Core types shared across the callreg pipeline.
//!
//! Holds the run configuration (input sources, break year, chunking),
//! the stable column names every crate agrees on, and the per-stage
//! outcome type the pipeline uses for error isolation.

#![forbid(unsafe_code)]

pub mod columns;
pub mod config;
pub mod stage;

pub use config::{ConfigError, DateFormat, RunConfig, SourceSpec};
pub use stage::StageOutcome;
