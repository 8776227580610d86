use crate::analyzers::types::{MonthlySummary, WeekdaySummary};
use crate::analyzers::utility::pct;
use crate::features::EnrichedTrip;
use crate::weekday::WeekdayBucket;
use std::collections::BTreeMap;

/// Running totals for one group of trips.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct GroupAccumulator {
    pub rides: usize,
    pub classic_bikes: usize,
    pub duration_sum: f64,
    pub distance_sum: f64,
    pub distance_count: usize,
}

impl GroupAccumulator {
    pub fn push(&mut self, trip: &EnrichedTrip) {
        self.rides += 1;
        if trip.record.is_classic_bike() {
            self.classic_bikes += 1;
        }
        self.duration_sum += trip.ride_time_length;
        if let Some(distance) = trip.record.distance_stations {
            self.distance_sum += distance;
            self.distance_count += 1;
        }
    }

    /// Finalizes the totals into the shared summary columns.
    pub fn finish(&self) -> GroupStats {
        GroupStats {
            number_of_rides: self.rides,
            number_of_classic_bikes: self.classic_bikes,
            average_duration: self.duration_sum / self.rides as f64,
            average_distance: (self.distance_count > 0)
                .then(|| self.distance_sum / self.distance_count as f64),
            pct_classic_bikes: pct(self.classic_bikes, self.rides),
        }
    }
}

/// Summary columns common to every grouping.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupStats {
    pub number_of_rides: usize,
    pub number_of_classic_bikes: usize,
    pub average_duration: f64,
    pub average_distance: Option<f64>,
    pub pct_classic_bikes: f64,
}

/// Reduces trips into one accumulator per (membership type, `key`) pair.
///
/// Groups only exist once a trip lands in them, so every returned
/// accumulator has at least one ride. Output is ordered by membership type,
/// then by `key`.
pub fn group_by_member<K, F>(trips: &[EnrichedTrip], key: F) -> BTreeMap<(String, K), GroupAccumulator>
where
    K: Ord,
    F: Fn(&EnrichedTrip) -> K,
{
    let mut groups: BTreeMap<(String, K), GroupAccumulator> = BTreeMap::new();

    for trip in trips {
        groups
            .entry((trip.record.member_casual.clone(), key(trip)))
            .or_default()
            .push(trip);
    }

    groups
}

/// Ride statistics grouped by membership type and weekday.
pub fn summarize_by_weekday(trips: &[EnrichedTrip]) -> Vec<WeekdaySummary> {
    group_by_member(trips, |t| t.weekday)
        .into_iter()
        .map(|((member_casual, day_of_week), acc)| {
            let stats = acc.finish();
            WeekdaySummary {
                member_casual,
                day_of_week,
                number_of_rides: stats.number_of_rides,
                number_of_classic_bikes: stats.number_of_classic_bikes,
                average_duration: stats.average_duration,
                average_distance: stats.average_distance,
                pct_classic_bikes: stats.pct_classic_bikes,
            }
        })
        .collect()
}

/// Ride statistics grouped by membership type and month of the start time.
pub fn summarize_by_month(trips: &[EnrichedTrip]) -> Vec<MonthlySummary> {
    group_by_member(trips, |t| t.month)
        .into_iter()
        .map(|((member_casual, month), acc)| {
            let stats = acc.finish();
            MonthlySummary {
                member_casual,
                month,
                number_of_rides: stats.number_of_rides,
                number_of_classic_bikes: stats.number_of_classic_bikes,
                average_duration: stats.average_duration,
                average_distance: stats.average_distance,
                pct_classic_bikes: stats.pct_classic_bikes,
            }
        })
        .collect()
}

/// Mean ride length per membership type and weekday.
pub fn average_duration_by_weekday(trips: &[EnrichedTrip]) -> Vec<(String, WeekdayBucket, f64)> {
    group_by_member(trips, |t| t.weekday)
        .into_iter()
        .map(|((member, day), acc)| (member, day, acc.finish().average_duration))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::derive_features;
    use crate::trips::fixtures::{trip, ts};
    use crate::weekday::DayOfWeek;

    #[test]
    fn test_member_monday_scenario() {
        let trips = derive_features(vec![
            trip("member", "classic_bike", 2, "2024-03-04 08:00:00", 100),
            trip("member", "classic_bike", 2, "2024-03-04 09:00:00", 200),
            trip("member", "electric_bike", 2, "2024-03-04 10:00:00", 300),
        ]);

        let summary = summarize_by_weekday(&trips);

        assert_eq!(summary.len(), 1);
        let row = &summary[0];
        assert_eq!(row.member_casual, "member");
        assert_eq!(row.day_of_week, WeekdayBucket::Known(DayOfWeek::Monday));
        assert_eq!(row.number_of_rides, 3);
        assert_eq!(row.number_of_classic_bikes, 2);
        assert_eq!(row.average_duration, 200.0);
        assert_eq!(row.average_distance, Some(1.5));
        assert!((row.pct_classic_bikes - 66.666_666).abs() < 1e-3);
    }

    #[test]
    fn test_weekday_rows_follow_category_order() {
        let trips = derive_features(vec![
            trip("member", "classic_bike", 7, "2024-03-09 08:00:00", 60),
            trip("member", "classic_bike", 1, "2024-03-03 08:00:00", 60),
            trip("casual", "classic_bike", 4, "2024-03-06 08:00:00", 60),
            trip("member", "classic_bike", 3, "2024-03-05 08:00:00", 60),
        ]);

        let labels: Vec<_> = summarize_by_weekday(&trips)
            .iter()
            .map(|r| format!("{}/{}", r.member_casual, r.day_of_week))
            .collect();

        assert_eq!(
            labels,
            vec!["casual/Wednesday", "member/Sunday", "member/Tuesday", "member/Saturday"]
        );
    }

    #[test]
    fn test_weekday_counts_sum_to_member_totals() {
        let trips = derive_features(vec![
            trip("member", "classic_bike", 1, "2024-03-03 08:00:00", 60),
            trip("member", "electric_bike", 2, "2024-03-04 08:00:00", 60),
            trip("member", "classic_bike", 9, "2024-03-04 08:00:00", 60),
            trip("casual", "classic_bike", 2, "2024-03-04 08:00:00", 60),
            trip("casual", "electric_bike", 6, "2024-03-08 08:00:00", 60),
        ]);

        let summary = summarize_by_weekday(&trips);
        for member in ["member", "casual"] {
            let grouped: usize = summary
                .iter()
                .filter(|r| r.member_casual == member)
                .map(|r| r.number_of_rides)
                .sum();
            let total = trips.iter().filter(|t| t.record.member_casual == member).count();
            assert_eq!(grouped, total);
        }

        let unknown = summary.last().unwrap();
        assert_eq!(unknown.member_casual, "member");
        assert_eq!(unknown.day_of_week, WeekdayBucket::Unknown);
    }

    #[test]
    fn test_pct_classic_bikes_bounds() {
        let trips = derive_features(vec![
            trip("member", "classic_bike", 2, "2024-03-04 08:00:00", 60),
            trip("casual", "electric_bike", 2, "2024-03-04 08:00:00", 60),
            trip("casual", "docked_bike", 3, "2024-03-05 08:00:00", 60),
            trip("casual", "classic_bike", 3, "2024-03-05 08:00:00", 60),
        ]);

        for row in summarize_by_weekday(&trips) {
            assert!((0.0..=100.0).contains(&row.pct_classic_bikes));
            assert_eq!(
                row.pct_classic_bikes,
                row.number_of_classic_bikes as f64 / row.number_of_rides as f64 * 100.0
            );
        }
    }

    #[test]
    fn test_negative_duration_still_aggregated() {
        let mut backwards = trip("member", "classic_bike", 3, "2024-03-05 10:00:00", 0);
        backwards.ended_at = ts("2024-03-05 09:50:00");
        let trips = derive_features(vec![
            backwards,
            trip("member", "classic_bike", 3, "2024-03-05 11:00:00", 1_200),
        ]);

        let weekday = summarize_by_weekday(&trips);
        assert_eq!(weekday[0].number_of_rides, 2);
        assert_eq!(weekday[0].average_duration, 300.0);

        let monthly = summarize_by_month(&trips);
        assert_eq!(monthly[0].number_of_rides, 2);
        assert_eq!(monthly[0].average_duration, 300.0);
    }

    #[test]
    fn test_monthly_grouping() {
        let trips = derive_features(vec![
            trip("member", "classic_bike", 2, "2024-01-15 08:00:00", 100),
            trip("member", "classic_bike", 3, "2024-01-16 08:00:00", 300),
            trip("member", "electric_bike", 5, "2024-12-05 08:00:00", 50),
            trip("casual", "electric_bike", 5, "2024-02-01 08:00:00", 400),
        ]);

        let monthly = summarize_by_month(&trips);
        let keys: Vec<_> = monthly.iter().map(|r| (r.member_casual.as_str(), r.month)).collect();
        assert_eq!(keys, vec![("casual", 2), ("member", 1), ("member", 12)]);

        let january = &monthly[1];
        assert_eq!(january.number_of_rides, 2);
        assert_eq!(january.number_of_classic_bikes, 2);
        assert_eq!(january.average_duration, 200.0);
        assert_eq!(january.pct_classic_bikes, 100.0);

        assert_eq!(monthly[2].pct_classic_bikes, 0.0);
    }

    #[test]
    fn test_average_distance_skips_missing() {
        let mut no_distance = trip("member", "classic_bike", 2, "2024-03-04 08:00:00", 60);
        no_distance.distance_stations = None;
        let mut far = trip("member", "classic_bike", 2, "2024-03-04 09:00:00", 60);
        far.distance_stations = Some(3.5);

        let summary = summarize_by_weekday(&derive_features(vec![no_distance.clone(), far]));
        assert_eq!(summary[0].average_distance, Some(3.5));

        let summary = summarize_by_weekday(&derive_features(vec![no_distance]));
        assert_eq!(summary[0].average_distance, None);
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        assert!(summarize_by_weekday(&[]).is_empty());
        assert!(summarize_by_month(&[]).is_empty());
    }

    #[test]
    fn test_average_duration_by_weekday() {
        let trips = derive_features(vec![
            trip("casual", "classic_bike", 1, "2024-03-03 08:00:00", 600),
            trip("casual", "classic_bike", 1, "2024-03-03 09:00:00", 1_200),
        ]);
        let averages = average_duration_by_weekday(&trips);
        assert_eq!(
            averages,
            vec![("casual".to_string(), WeekdayBucket::Known(DayOfWeek::Sunday), 900.0)]
        );
    }
}
