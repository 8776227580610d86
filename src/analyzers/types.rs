//! Data types produced by the aggregation pipeline.

use serde::Serialize;

use crate::weekday::WeekdayBucket;

/// A summary table row whose CSV header is known up front, so empty tables
/// still export a header line.
pub trait SummaryRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

/// Ride statistics for one (membership type, weekday) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdaySummary {
    pub member_casual: String,
    pub day_of_week: WeekdayBucket,
    pub number_of_rides: usize,
    pub number_of_classic_bikes: usize,
    pub average_duration: f64,
    /// `None` when no ride in the group has a station distance.
    pub average_distance: Option<f64>,
    pub pct_classic_bikes: f64,
}

impl SummaryRow for WeekdaySummary {
    const COLUMNS: &'static [&'static str] = &[
        "member_casual",
        "day_of_week",
        "number_of_rides",
        "number_of_classic_bikes",
        "average_duration",
        "average_distance",
        "pct_classic_bikes",
    ];
}

/// Ride statistics for one (membership type, month) group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlySummary {
    pub member_casual: String,
    pub month: u32,
    pub number_of_rides: usize,
    pub number_of_classic_bikes: usize,
    pub average_duration: f64,
    pub average_distance: Option<f64>,
    pub pct_classic_bikes: f64,
}

impl SummaryRow for MonthlySummary {
    const COLUMNS: &'static [&'static str] = &[
        "member_casual",
        "month",
        "number_of_rides",
        "number_of_classic_bikes",
        "average_duration",
        "average_distance",
        "pct_classic_bikes",
    ];
}

/// `describe()`-style statistics for one numeric column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub p25: Option<f64>,
    pub p50: Option<f64>,
    pub p75: Option<f64>,
    pub max: Option<f64>,
}

/// Mean, median, max and min of a column within one membership type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterStats {
    pub mean: f64,
    pub median: f64,
    pub max: f64,
    pub min: f64,
}

/// Ride length and distance statistics for one membership type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MembershipStats {
    pub member_casual: String,
    pub ride_time_length: Option<CenterStats>,
    pub distance_stations: Option<CenterStats>,
}

/// Everything a pipeline run computed, returned to the caller after export.
#[derive(Debug, Serialize)]
pub struct PipelineReport {
    pub total_rows: usize,
    pub negative_durations: usize,
    pub unknown_weekdays: usize,
    pub weekday_summary: Vec<WeekdaySummary>,
    pub monthly_summary: Vec<MonthlySummary>,
}
