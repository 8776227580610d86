//! Ordered weekday labels for the numeric `day_of_week` code.

use serde::{Serialize, Serializer};
use std::fmt;

/// Calendar weekday, ordered Sunday first to match the source encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DayOfWeek {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl DayOfWeek {
    /// All weekdays in category order.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    /// Maps a code in 1..=7 (Sunday = 1) to its weekday.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1..=7 => Some(Self::ALL[(code - 1) as usize]),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        self as i64 + 1
    }

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Weekday grouping key. Codes outside 1..=7 land in `Unknown`, which sorts
/// after Saturday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum WeekdayBucket {
    Known(DayOfWeek),
    Unknown,
}

impl WeekdayBucket {
    pub fn from_code(code: i64) -> Self {
        DayOfWeek::from_code(code).map_or(WeekdayBucket::Unknown, WeekdayBucket::Known)
    }

    pub fn label(self) -> &'static str {
        match self {
            WeekdayBucket::Known(day) => day.name(),
            WeekdayBucket::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for WeekdayBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for WeekdayBucket {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_code_mapping_table() {
        let expected = [
            (1, "Sunday"),
            (2, "Monday"),
            (3, "Tuesday"),
            (4, "Wednesday"),
            (5, "Thursday"),
            (6, "Friday"),
            (7, "Saturday"),
        ];
        for (code, name) in expected {
            assert_eq!(DayOfWeek::from_code(code).unwrap().name(), name);
        }
    }

    #[test]
    fn test_mapping_is_bijective() {
        let days: HashSet<_> = (1..=7).filter_map(DayOfWeek::from_code).collect();
        assert_eq!(days.len(), 7);
        for day in DayOfWeek::ALL {
            assert_eq!(DayOfWeek::from_code(day.code()), Some(day));
        }
    }

    #[test]
    fn test_out_of_range_codes() {
        assert_eq!(DayOfWeek::from_code(0), None);
        assert_eq!(DayOfWeek::from_code(8), None);
        assert_eq!(DayOfWeek::from_code(-1), None);
        assert_eq!(WeekdayBucket::from_code(9), WeekdayBucket::Unknown);
    }

    #[test]
    fn test_category_order() {
        let mut shuffled = vec![
            DayOfWeek::Saturday,
            DayOfWeek::Monday,
            DayOfWeek::Sunday,
            DayOfWeek::Friday,
            DayOfWeek::Wednesday,
            DayOfWeek::Thursday,
            DayOfWeek::Tuesday,
        ];
        shuffled.sort();
        assert_eq!(shuffled, DayOfWeek::ALL.to_vec());
    }

    #[test]
    fn test_unknown_bucket_sorts_last() {
        assert!(WeekdayBucket::Known(DayOfWeek::Saturday) < WeekdayBucket::Unknown);
        assert!(WeekdayBucket::Known(DayOfWeek::Sunday) < WeekdayBucket::Known(DayOfWeek::Monday));
        assert_eq!(WeekdayBucket::Unknown.to_string(), "Unknown");
        assert_eq!(WeekdayBucket::from_code(4).to_string(), "Wednesday");
    }
}
