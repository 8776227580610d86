use chrono::NaiveDateTime;
use serde::Serialize;

/// `rideable_type` value counted as a classic bike in the summaries.
pub const CLASSIC_BIKE: &str = "classic_bike";

/// One bicycle ride as loaded from the cleaned trip table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TripRecord {
    pub ride_id: String,
    pub rideable_type: String,
    pub member_casual: String,
    pub started_at: NaiveDateTime,
    pub ended_at: NaiveDateTime,

    // coordinates
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub end_lat: Option<f64>,
    pub end_lng: Option<f64>,

    /// Distance between start and end station, in kilometres.
    pub distance_stations: Option<f64>,
    /// Raw weekday code, Sunday = 1 through Saturday = 7.
    pub day_of_week: i64,
}

impl TripRecord {
    pub fn is_classic_bike(&self) -> bool {
        self.rideable_type == CLASSIC_BIKE
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn ts(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").unwrap()
    }

    /// Builds a trip starting at `start` and lasting `secs` seconds.
    pub fn trip(member: &str, rideable: &str, code: i64, start: &str, secs: i64) -> TripRecord {
        let started_at = ts(start);
        TripRecord {
            ride_id: format!("{member}-{start}-{secs}"),
            rideable_type: rideable.to_string(),
            member_casual: member.to_string(),
            started_at,
            ended_at: started_at + chrono::Duration::seconds(secs),
            start_lat: Some(41.88),
            start_lng: Some(-87.63),
            end_lat: Some(41.89),
            end_lng: Some(-87.62),
            distance_stations: Some(1.5),
            day_of_week: code,
        }
    }
}
