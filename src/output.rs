//! Output formatting and persistence for the summary tables.
//!
//! Supports pretty-printing, JSON logging, and CSV export.

use anyhow::{Context, Result};
use serde::Serialize;
use tracing::{debug, info};

use crate::analyzers::types::SummaryRow;
use csv::WriterBuilder;
use std::path::Path;

/// File name of the weekday summary inside the output directory.
pub const WEEKDAY_SUMMARY_FILE: &str = "weekday_summary.csv";
/// File name of the monthly summary inside the output directory.
pub const MONTHLY_SUMMARY_FILE: &str = "monthly_summary.csv";

/// Logs a value using Rust's debug pretty-print format.
pub fn print_pretty<T: std::fmt::Debug>(value: &T) {
    debug!("{:#?}", value);
}

/// Logs a value as pretty-printed JSON.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Writes a summary table as CSV, replacing any existing file at `path`.
///
/// The header row is always written, even for an empty table.
pub fn write_summary<T: SummaryRow>(path: &Path, rows: &[T]) -> Result<()> {
    debug!(path = %path.display(), rows = rows.len(), "Writing summary CSV");

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    writer.write_record(T::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    Ok(())
}
