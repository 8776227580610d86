//! CLI entry point for the Cyclistic trip analysis tool.
//!
//! Provides subcommands for building the weekday and monthly ride summaries
//! and for printing descriptive statistics of the trip table.

use anyhow::Result;
use clap::{Parser, Subcommand};
use cyclistic_analysis::analyzers::analyzer::{load_enriched, run};
use cyclistic_analysis::analyzers::describe::log_descriptive_analysis;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "cyclistic_analysis")]
#[command(about = "Descriptive analysis of bike-share trips by membership type", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build weekday and monthly ride summaries and export them as CSV
    Summarize {
        /// Cleaned trip table (.parquet or .csv)
        #[arg(short, long, default_value = "ciclistic_clean_data.parquet")]
        input: PathBuf,

        /// Directory to write weekday_summary.csv and monthly_summary.csv into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Also log the summary tables as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print descriptive statistics without exporting anything
    Describe {
        /// Cleaned trip table (.parquet or .csv)
        #[arg(short, long, default_value = "ciclistic_clean_data.parquet")]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // Logging setup: colored stderr + JSON rolling log file
    let log_file_path = std::env::var("LOG_FILE_PATH")
        .unwrap_or_else(|_| "logs/cyclistic_analysis.log".to_string());
    let log_dir = Path::new(&log_file_path)
        .parent()
        .unwrap_or(Path::new("logs"));
    let log_file_name = Path::new(&log_file_path)
        .file_name()
        .unwrap_or(OsStr::new("cyclistic_analysis.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Summarize {
            input,
            output_dir,
            json,
        } => {
            let report = run(&input, &output_dir, json)?;
            info!(
                rows = report.total_rows,
                negative_durations = report.negative_durations,
                unknown_weekdays = report.unknown_weekdays,
                output_dir = %output_dir.display(),
                "Analysis complete"
            );
        }
        Commands::Describe { input } => {
            let trips = load_enriched(&input)?;
            log_descriptive_analysis(&trips);
        }
    }

    Ok(())
}
