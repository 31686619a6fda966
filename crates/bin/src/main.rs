//! callreg CLI binary.
//!
//! Runs the call-report ingest, macro merge and regression pipeline
//! from the command line.

mod pipeline;

use callreg::RunConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process;
use tracing::info;
use tracing_subscriber::prelude::*;

#[derive(Parser)]
#[command(name = "callreg")]
#[command(about = "Bank margin regressions against the yield curve", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full ingest, merge and regression pipeline
    Run {
        /// JSON configuration file; defaults reproduce the historical run
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the structural-break year
        #[arg(long)]
        break_year: Option<i32>,

        /// Override the cache chunk size, in rows
        #[arg(long)]
        chunk_rows: Option<usize>,

        /// Directory for intermediate chunk and panel files
        #[arg(long)]
        work_dir: Option<PathBuf>,

        /// Directory for report artifacts
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            break_year,
            chunk_rows,
            work_dir,
            out_dir,
        } => {
            let mut run_config = match config {
                Some(path) => RunConfig::from_json_file(&path)?,
                None => RunConfig::default(),
            };
            if let Some(year) = break_year {
                run_config.break_year = year;
            }
            if let Some(rows) = chunk_rows {
                run_config.chunk_rows = rows;
            }
            if let Some(dir) = work_dir {
                run_config.work_dir = dir;
            }
            if let Some(dir) = out_dir {
                run_config.out_dir = dir;
            }

            init_logging(&run_config)?;

            let report = pipeline::run_pipeline(&run_config);
            if report.all_completed() {
                info!("pipeline run completed");
            } else {
                info!("pipeline run finished with failed or skipped stages");
            }
        }
    }

    Ok(())
}

/// Stdout plus a plain-text transcript file in the output directory.
fn init_logging(config: &RunConfig) -> Result<(), Box<dyn std::error::Error>> {
    std::fs::create_dir_all(&config.out_dir)?;
    let log_file = std::fs::File::create(config.out_dir.join("callreg_run.log"))?;

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false)
        .with_target(false);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with(stdout_layer)
        .with(file_layer)
        .init();

    Ok(())
}
