//! Calendar and duration features derived from the trip timestamps.

use chrono::{Datelike, NaiveDateTime};

use crate::trips::TripRecord;
use crate::weekday::WeekdayBucket;

/// A trip together with the columns the pipeline adds to it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedTrip {
    pub record: TripRecord,
    /// Month of `started_at`, 1-12.
    pub month: u32,
    /// Day of month of `started_at`, 1-31.
    pub day: u32,
    /// `ended_at - started_at` in seconds. Negative when the end precedes the start.
    pub ride_time_length: f64,
    pub weekday: WeekdayBucket,
}

impl EnrichedTrip {
    pub fn from_record(record: TripRecord) -> Self {
        let started_at = record.started_at;
        EnrichedTrip {
            month: started_at.month(),
            day: started_at.day(),
            ride_time_length: elapsed_seconds(started_at, record.ended_at),
            weekday: WeekdayBucket::from_code(record.day_of_week),
            record,
        }
    }
}

/// Signed elapsed time between two timestamps, in seconds with microsecond precision.
pub fn elapsed_seconds(start: NaiveDateTime, end: NaiveDateTime) -> f64 {
    let delta = end - start;
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1_000.0,
    }
}

/// Adds month, day, ride length and weekday bucket to every record.
pub fn derive_features(records: Vec<TripRecord>) -> Vec<EnrichedTrip> {
    records.into_iter().map(EnrichedTrip::from_record).collect()
}

/// Number of trips whose end precedes their start. These rows are kept as-is.
pub fn count_negative_durations(trips: &[EnrichedTrip]) -> usize {
    trips.iter().filter(|t| t.ride_time_length < 0.0).count()
}

pub fn has_negative_durations(trips: &[EnrichedTrip]) -> bool {
    trips.iter().any(|t| t.ride_time_length < 0.0)
}

/// Number of trips whose weekday code falls outside 1..=7.
pub fn count_unknown_weekdays(trips: &[EnrichedTrip]) -> usize {
    trips
        .iter()
        .filter(|t| t.weekday == WeekdayBucket::Unknown)
        .count()
}
