//! Business-hours types.
//!
//! A shop's hours are always exactly 7 entries, one per calendar day, in
//! Monday-first order. The fixed count is an invariant of the canonical
//! model; raw documents that violate it are repaired by the normalizer.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

/// Canonical day order for the week (Monday-first).
pub const DAY_ORDER: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Default opening time for a fresh day entry.
pub const DEFAULT_OPEN: &str = "09:00";
/// Default closing time for a fresh day entry.
pub const DEFAULT_CLOSE: &str = "18:00";

/// Opening hours for a single day.
///
/// `open` and `close` are `HH:MM` strings; the derived open/closed status
/// treats unparsable times as closed rather than erroring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayHours {
    #[serde(with = "weekday_name")]
    pub day: Weekday,
    pub open: String,
    pub close: String,
    pub closed: bool,
}

impl DayHours {
    /// Default entry for the given day.
    #[must_use]
    pub fn for_day(day: Weekday) -> Self {
        Self {
            day,
            open: DEFAULT_OPEN.to_string(),
            close: DEFAULT_CLOSE.to_string(),
            closed: false,
        }
    }
}

/// The full week of opening hours, always exactly 7 entries in [`DAY_ORDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeekHours(pub [DayHours; 7]);

impl WeekHours {
    /// The entry for a given day.
    #[must_use]
    pub fn day(&self, day: Weekday) -> &DayHours {
        // DAY_ORDER is Monday-first, matching num_days_from_monday.
        &self.0[day.num_days_from_monday() as usize]
    }

    /// Mutable entry for a given day.
    pub fn day_mut(&mut self, day: Weekday) -> &mut DayHours {
        &mut self.0[day.num_days_from_monday() as usize]
    }

    /// Iterate entries in canonical day order.
    pub fn iter(&self) -> impl Iterator<Item = &DayHours> {
        self.0.iter()
    }
}

impl Default for WeekHours {
    fn default() -> Self {
        Self(DAY_ORDER.map(DayHours::for_day))
    }
}

impl<'a> IntoIterator for &'a WeekHours {
    type Item = &'a DayHours;
    type IntoIter = std::slice::Iter<'a, DayHours>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Serialize weekdays as their full English name ("Monday"), the shape all
/// document vintages use; parsing is case-insensitive and also accepts the
/// three-letter abbreviations `chrono` understands.
mod weekday_name {
    use chrono::Weekday;
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(day: &Weekday, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(super::day_name(*day))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Weekday, D::Error> {
        let name = String::deserialize(deserializer)?;
        name.parse()
            .map_err(|_| D::Error::custom(format!("invalid day name: {name}")))
    }
}

/// Full English name of a weekday, as written into documents.
#[must_use]
pub const fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_week_is_monday_first() {
        let week = WeekHours::default();
        let days: Vec<Weekday> = week.iter().map(|d| d.day).collect();
        assert_eq!(days, DAY_ORDER.to_vec());
    }

    #[test]
    fn test_day_lookup() {
        let mut week = WeekHours::default();
        week.day_mut(Weekday::Sun).closed = true;
        assert!(week.day(Weekday::Sun).closed);
        assert!(!week.day(Weekday::Mon).closed);
    }

    #[test]
    fn test_serde_day_names() {
        let week = WeekHours::default();
        let json = serde_json::to_value(&week).unwrap();
        assert_eq!(json[0]["day"], "Monday");
        assert_eq!(json[6]["day"], "Sunday");
    }

    #[test]
    fn test_deserialize_case_insensitive_day() {
        let entry: DayHours = serde_json::from_str(
            r#"{"day": "friday", "open": "10:00", "close": "20:00", "closed": false}"#,
        )
        .unwrap();
        assert_eq!(entry.day, Weekday::Fri);
    }

    #[test]
    fn test_deserialize_invalid_day_fails() {
        let result: Result<DayHours, _> = serde_json::from_str(
            r#"{"day": "Funday", "open": "10:00", "close": "20:00", "closed": false}"#,
        );
        assert!(result.is_err());
    }
}
