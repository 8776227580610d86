//! Descriptive statistics logged before the summaries are built.

use std::collections::{BTreeMap, HashMap};
use tracing::info;

use crate::analyzers::types::{CenterStats, MembershipStats, NumericSummary};
use crate::analyzers::utility::{mean, quantile_sorted, sample_stddev, sorted_finite};
use crate::features::EnrichedTrip;

impl NumericSummary {
    /// Count, mean, sample std, min, quartiles and max of the non-NaN values.
    pub fn from_values(values: &[f64]) -> Self {
        let sorted = sorted_finite(values);
        if sorted.is_empty() {
            return NumericSummary {
                count: 0,
                mean: None,
                std: None,
                min: None,
                p25: None,
                p50: None,
                p75: None,
                max: None,
            };
        }

        let avg = mean(&sorted);
        NumericSummary {
            count: sorted.len(),
            mean: Some(avg),
            std: sample_stddev(&sorted, avg),
            min: sorted.first().copied(),
            p25: quantile_sorted(&sorted, 0.25),
            p50: quantile_sorted(&sorted, 0.5),
            p75: quantile_sorted(&sorted, 0.75),
            max: sorted.last().copied(),
        }
    }
}

impl CenterStats {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        let sorted = sorted_finite(values);
        Some(CenterStats {
            mean: mean(&sorted),
            median: quantile_sorted(&sorted, 0.5)?,
            max: *sorted.last()?,
            min: *sorted.first()?,
        })
    }
}

/// Numeric column summaries, keyed by column name in table order.
pub fn describe_trips(trips: &[EnrichedTrip]) -> Vec<(&'static str, NumericSummary)> {
    let column = |f: fn(&EnrichedTrip) -> Option<f64>| -> Vec<f64> {
        trips.iter().filter_map(f).collect()
    };

    vec![
        ("start_lat", NumericSummary::from_values(&column(|t| t.record.start_lat))),
        ("start_lng", NumericSummary::from_values(&column(|t| t.record.start_lng))),
        ("end_lat", NumericSummary::from_values(&column(|t| t.record.end_lat))),
        ("end_lng", NumericSummary::from_values(&column(|t| t.record.end_lng))),
        (
            "distance_stations",
            NumericSummary::from_values(&column(|t| t.record.distance_stations)),
        ),
        ("month", NumericSummary::from_values(&column(|t| Some(t.month as f64)))),
        ("day", NumericSummary::from_values(&column(|t| Some(t.day as f64)))),
        (
            "ride_time_length",
            NumericSummary::from_values(&column(|t| Some(t.ride_time_length))),
        ),
    ]
}

/// Rides per membership type, most frequent first. Ties keep name order.
pub fn value_counts(trips: &[EnrichedTrip]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for trip in trips {
        *counts.entry(trip.record.member_casual.as_str()).or_default() += 1;
    }

    let mut counts: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(member, n)| (member.to_string(), n))
        .collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Ride length and distance centre statistics per membership type.
pub fn membership_stats(trips: &[EnrichedTrip]) -> Vec<MembershipStats> {
    let mut durations: HashMap<&str, Vec<f64>> = HashMap::new();
    let mut distances: HashMap<&str, Vec<f64>> = HashMap::new();

    for trip in trips {
        let member = trip.record.member_casual.as_str();
        durations.entry(member).or_default().push(trip.ride_time_length);
        let series = distances.entry(member).or_default();
        if let Some(d) = trip.record.distance_stations {
            series.push(d);
        }
    }

    let mut members: Vec<&str> = durations.keys().copied().collect();
    members.sort_unstable();

    members
        .into_iter()
        .map(|member| MembershipStats {
            member_casual: member.to_string(),
            ride_time_length: CenterStats::from_values(&durations[member]),
            distance_stations: CenterStats::from_values(&distances[member]),
        })
        .collect()
}

/// Logs the table overview and descriptive statistics.
pub fn log_descriptive_analysis(trips: &[EnrichedTrip]) {
    info!(rows = trips.len(), "Trip table overview");

    for trip in trips.iter().take(6) {
        info!(
            ride_id = %trip.record.ride_id,
            rideable_type = %trip.record.rideable_type,
            member_casual = %trip.record.member_casual,
            started_at = %trip.record.started_at,
            ended_at = %trip.record.ended_at,
            month = trip.month,
            day = trip.day,
            ride_time_length = trip.ride_time_length,
            day_of_week = %trip.weekday,
            "Sample row"
        );
    }

    for (column, s) in describe_trips(trips) {
        info!(
            column,
            count = s.count,
            mean = ?s.mean,
            std = ?s.std,
            min = ?s.min,
            p25 = ?s.p25,
            p50 = ?s.p50,
            p75 = ?s.p75,
            max = ?s.max,
            "Numeric summary"
        );
    }

    for (member, count) in value_counts(trips) {
        info!(member_casual = %member, count, "Rides by membership type");
    }

    for stats in membership_stats(trips) {
        info!(
            member_casual = %stats.member_casual,
            ride_time_length = ?stats.ride_time_length,
            distance_km = ?stats.distance_stations,
            "Ride length and distance by membership type"
        );
    }

    for (member, day, avg) in crate::analyzers::aggregate::average_duration_by_weekday(trips) {
        info!(member_casual = %member, day_of_week = %day, average_duration = avg, "Average ride length");
    }
}
