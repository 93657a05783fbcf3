//! Calendar day keys.
//!
//! A [`DayKey`] names one calendar day in the engine's local zone and is the
//! only key into the day log. It renders (and serializes) as `YYYY-MM-DD`.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

const DAY_KEY_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// The following calendar day, `None` past chrono's last representable date.
    pub fn succ(&self) -> Option<DayKey> {
        self.0.checked_add_days(Days::new(1)).map(DayKey)
    }

    pub fn pred(&self) -> Option<DayKey> {
        self.0.checked_sub_days(Days::new(1)).map(DayKey)
    }

    /// The Sunday-to-Saturday week containing this day.
    pub fn week(&self) -> Vec<DayKey> {
        let offset = u64::from(self.0.weekday().num_days_from_sunday());
        let Some(start) = self.0.checked_sub_days(Days::new(offset)) else {
            return vec![*self];
        };
        (0..7)
            .filter_map(|i| start.checked_add_days(Days::new(i)))
            .map(DayKey)
            .collect()
    }
}

/// Map an instant to its calendar day in `zone`.
///
/// Every caller sharing one engine must pass the same zone.
pub fn day_key<Tz: TimeZone>(instant: DateTime<Utc>, zone: &Tz) -> DayKey {
    DayKey(instant.with_timezone(zone).date_naive())
}

/// Whether two instants fall on the same calendar day in `zone`.
pub fn same_day<Tz: TimeZone>(a: DateTime<Utc>, b: DateTime<Utc>, zone: &Tz) -> bool {
    day_key(a, zone) == day_key(b, zone)
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // chrono accepts unpadded fields; the key format does not.
        if s.len() != 10 {
            return Err(ValidationError::InvalidDayKey(s.to_string()));
        }
        NaiveDate::parse_from_str(s, DAY_KEY_FORMAT)
            .map(DayKey)
            .map_err(|_| ValidationError::InvalidDayKey(s.to_string()))
    }
}

impl TryFrom<String> for DayKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DayKey> for String {
    fn from(key: DayKey) -> Self {
        key.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    #[test]
    fn formats_as_padded_iso_date() {
        let key = day_key(utc("2025-03-04T12:00:00Z"), &Utc);
        assert_eq!(key.to_string(), "2025-03-04");
    }

    #[test]
    fn uses_the_local_calendar_of_the_zone() {
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        let instant = utc("2025-10-27T22:30:00Z");
        assert_eq!(day_key(instant, &Utc).to_string(), "2025-10-27");
        assert_eq!(day_key(instant, &riyadh).to_string(), "2025-10-28");
    }

    #[test]
    fn same_day_respects_zone_boundaries() {
        let west = FixedOffset::west_opt(5 * 3600).unwrap();
        let a = utc("2025-01-01T04:00:00Z");
        let b = utc("2025-01-01T06:00:00Z");
        assert!(same_day(a, b, &Utc));
        assert!(!same_day(a, b, &west));
    }

    #[test]
    fn parse_rejects_malformed_keys() {
        assert!("2025-10-28".parse::<DayKey>().is_ok());
        assert!("2025-2-3".parse::<DayKey>().is_err());
        assert!("2025-02-30".parse::<DayKey>().is_err());
        assert!("yesterday".parse::<DayKey>().is_err());
    }

    #[test]
    fn serializes_as_string() {
        let key: DayKey = "2024-02-29".parse().unwrap();
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"2024-02-29\"");
        let back: DayKey = serde_json::from_str("\"2024-02-29\"").unwrap();
        assert_eq!(back, key);
        assert!(serde_json::from_str::<DayKey>("\"2024-13-01\"").is_err());
    }

    #[test]
    fn week_runs_sunday_to_saturday() {
        // 2025-10-29 is a Wednesday.
        let key: DayKey = "2025-10-29".parse().unwrap();
        let week: Vec<String> = key.week().iter().map(ToString::to_string).collect();
        assert_eq!(
            week,
            vec![
                "2025-10-26",
                "2025-10-27",
                "2025-10-28",
                "2025-10-29",
                "2025-10-30",
                "2025-10-31",
                "2025-11-01",
            ]
        );
    }

    #[test]
    fn succ_and_pred_cross_month_ends() {
        let key: DayKey = "2025-12-31".parse().unwrap();
        assert_eq!(key.succ().unwrap().to_string(), "2026-01-01");
        assert_eq!(key.succ().unwrap().pred().unwrap(), key);
    }
}
