//! Loads the cleaned trip table from Parquet (or CSV) into [`TripRecord`]s.

use anyhow::{Context, Result, anyhow, bail};
use chrono::{DateTime, NaiveDateTime};
use polars::prelude::*;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

use crate::trips::TripRecord;

const TIMESTAMP_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Reads the file at `path` into a [`DataFrame`], picking the reader from the extension.
///
/// # Errors
///
/// Returns an error if the extension is neither `parquet` nor `csv`, or if the
/// file cannot be read.
pub fn read_frame(path: &Path) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|s| s.to_str())
        .ok_or_else(|| anyhow!("input file has no extension: {}", path.display()))?;

    let frame = match extension.to_lowercase().as_str() {
        "parquet" => LazyFrame::scan_parquet(path, Default::default())?,
        "csv" => LazyCsvReader::new(path)
            .with_has_header(true)
            .with_try_parse_dates(true)
            .finish()?,
        ext => bail!("unsupported input format: {ext}"),
    };

    frame
        .collect()
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Loads every trip in `path`, logging how long the read took.
#[tracing::instrument(skip_all, fields(path = %path.display()))]
pub fn load_trips(path: &Path) -> Result<Vec<TripRecord>> {
    let start = Instant::now();
    let df = read_frame(path)?;
    let trips = records_from_frame(&df)?;

    info!(
        rows = trips.len(),
        columns = df.width(),
        elapsed_secs = start.elapsed().as_secs_f64(),
        "Loaded trip table"
    );
    Ok(trips)
}

/// Converts a trip table into records, casting each column to its canonical type.
///
/// # Errors
///
/// Fails if a schema column is missing or a required column holds a null.
pub fn records_from_frame(df: &DataFrame) -> Result<Vec<TripRecord>> {
    debug!(columns = ?df.get_column_names(), "Converting trip table");

    let ride_id = strings(df, "ride_id")?;
    let rideable_type = strings(df, "rideable_type")?;
    let member_casual = strings(df, "member_casual")?;
    let started_at = timestamps(df, "started_at")?;
    let ended_at = timestamps(df, "ended_at")?;
    let start_lat = floats(df, "start_lat")?;
    let start_lng = floats(df, "start_lng")?;
    let end_lat = floats(df, "end_lat")?;
    let end_lng = floats(df, "end_lng")?;
    let distance_stations = floats(df, "distance_stations")?;
    let day_of_week = integers(df, "day_of_week")?;

    (0..df.height())
        .map(|i| {
            Ok(TripRecord {
                ride_id: required(&ride_id[i], "ride_id", i)?.clone(),
                rideable_type: required(&rideable_type[i], "rideable_type", i)?.clone(),
                member_casual: required(&member_casual[i], "member_casual", i)?.clone(),
                started_at: *required(&started_at[i], "started_at", i)?,
                ended_at: *required(&ended_at[i], "ended_at", i)?,
                start_lat: start_lat[i],
                start_lng: start_lng[i],
                end_lat: end_lat[i],
                end_lng: end_lng[i],
                distance_stations: distance_stations[i],
                day_of_week: *required(&day_of_week[i], "day_of_week", i)?,
            })
        })
        .collect()
}

fn required<'a, T>(value: &'a Option<T>, column: &str, row: usize) -> Result<&'a T> {
    match value {
        Some(v) => Ok(v),
        None => bail!("null value in required column '{column}' at row {row}"),
    }
}

fn series(df: &DataFrame, name: &str) -> Result<Series> {
    let column = df
        .column(name)
        .with_context(|| format!("missing column '{name}'"))?;
    Ok(column.as_materialized_series().clone())
}

fn strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let s = series(df, name)?
        .cast(&DataType::String)
        .with_context(|| format!("column '{name}' is not convertible to text"))?;
    let ca = s.str()?;
    Ok(ca.into_iter().map(|v| v.map(str::to_string)).collect())
}

fn floats(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let s = series(df, name)?
        .cast(&DataType::Float64)
        .with_context(|| format!("column '{name}' is not numeric"))?;
    let ca = s.f64()?;
    Ok(ca
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

fn integers(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    let s = series(df, name)?
        .cast(&DataType::Int64)
        .with_context(|| format!("column '{name}' is not an integer"))?;
    let ca = s.i64()?;
    Ok(ca.into_iter().collect())
}

fn timestamps(df: &DataFrame, name: &str) -> Result<Vec<Option<NaiveDateTime>>> {
    let s = series(df, name)?;

    if s.dtype() == &DataType::String {
        let ca = s.str()?;
        return ca
            .into_iter()
            .map(|v| v.map(parse_timestamp).transpose())
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("column '{name}' holds an unparseable timestamp"));
    }

    let s = s
        .cast(&DataType::Datetime(TimeUnit::Microseconds, None))
        .with_context(|| format!("column '{name}' is not a timestamp"))?;
    let ca = s.datetime()?;
    Ok(ca
        .into_iter()
        .map(|v| v.and_then(DateTime::from_timestamp_micros).map(|d| d.naive_utc()))
        .collect())
}

/// Parses `YYYY-MM-DD HH:MM:SS` with an optional `T` separator and fractional seconds.
pub fn parse_timestamp(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();
    TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .ok_or_else(|| anyhow!("invalid timestamp '{value}'"))
}
