//! Reset predicates for the streak engine.
//!
//! Nothing here owns a timer. Each check is a pure function of the current
//! instant and the last logging instant, so a host can evaluate them on app
//! resume, on an hourly tick, or both, and get the same answer.

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::day_key::{day_key, same_day};

/// Hours without a log after which the streak is forfeited.
pub const STREAK_ABANDONMENT_HOURS: u32 = 32;

/// Tunables for the time-driven resets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetPolicy {
    pub abandonment_hours: u32,
}

impl ResetPolicy {
    pub fn with_abandonment_hours(abandonment_hours: u32) -> Self {
        Self { abandonment_hours }
    }

    pub fn abandonment_window(&self) -> Duration {
        Duration::hours(i64::from(self.abandonment_hours))
    }
}

impl Default for ResetPolicy {
    fn default() -> Self {
        Self {
            abandonment_hours: STREAK_ABANDONMENT_HOURS,
        }
    }
}

/// True when the last log happened on a different local day than `now`.
///
/// An engine that never logged has nothing to re-arm.
pub fn needs_daily_reset<Tz: TimeZone>(
    now: DateTime<Utc>,
    last_logged_at: Option<DateTime<Utc>>,
    zone: &Tz,
) -> bool {
    match last_logged_at {
        Some(last) => !same_day(now, last, zone),
        None => false,
    }
}

/// True when strictly more than `window` has passed since the last log.
///
/// A goal that has not logged anything yet has not started its clock.
pub fn needs_streak_reset(
    now: DateTime<Utc>,
    last_logged_at: Option<DateTime<Utc>>,
    window: Duration,
) -> bool {
    match last_logged_at {
        Some(last) => now.signed_duration_since(last) > window,
        None => false,
    }
}

/// Instant of the next local midnight after `now`.
///
/// When midnight does not exist locally (a DST gap), the first valid hour of
/// that day is used instead.
pub fn next_daily_reset_at<Tz: TimeZone>(now: DateTime<Utc>, zone: &Tz) -> Option<DateTime<Utc>> {
    let tomorrow = day_key(now, zone).succ()?.date();
    (0..24).find_map(|hour| {
        let local = tomorrow.and_hms_opt(hour, 0, 0)?;
        zone.from_local_datetime(&local)
            .earliest()
            .map(|t| t.with_timezone(&Utc))
    })
}

/// Instant after which [`needs_streak_reset`] starts returning true.
pub fn streak_deadline(last_logged_at: Option<DateTime<Utc>>, window: Duration) -> Option<DateTime<Utc>> {
    last_logged_at?.checked_add_signed(window)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, LocalResult, NaiveDate, NaiveDateTime};

    fn utc(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn window() -> Duration {
        ResetPolicy::default().abandonment_window()
    }

    #[test]
    fn default_window_is_32_hours() {
        assert_eq!(window(), Duration::hours(32));
        assert_eq!(ResetPolicy::with_abandonment_hours(48).abandonment_window(), Duration::hours(48));
    }

    #[test]
    fn streak_reset_needs_a_last_log() {
        assert!(!needs_streak_reset(utc("2030-01-01T00:00:00Z"), None, window()));
    }

    #[test]
    fn streak_reset_is_strictly_after_the_window() {
        let last = utc("2025-10-27T09:00:00Z");
        assert!(!needs_streak_reset(utc("2025-10-28T16:59:59Z"), Some(last), window()));
        assert!(!needs_streak_reset(utc("2025-10-28T17:00:00Z"), Some(last), window()));
        assert!(needs_streak_reset(utc("2025-10-28T17:00:01Z"), Some(last), window()));
    }

    #[test]
    fn streak_reset_ignores_clock_going_backwards() {
        let last = utc("2025-10-27T09:00:00Z");
        assert!(!needs_streak_reset(utc("2025-10-20T09:00:00Z"), Some(last), window()));
    }

    #[test]
    fn daily_reset_false_on_same_local_day() {
        let last = utc("2025-10-27T00:30:00Z");
        assert!(!needs_daily_reset(utc("2025-10-27T23:59:00Z"), Some(last), &Utc));
        assert!(!needs_daily_reset(utc("2025-10-27T23:59:00Z"), None, &Utc));
    }

    #[test]
    fn daily_reset_true_after_local_midnight() {
        let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
        // 14:00 and 16:00 UTC straddle midnight in Tokyo.
        let last = utc("2025-10-27T14:00:00Z");
        let now = utc("2025-10-27T16:00:00Z");
        assert!(needs_daily_reset(now, Some(last), &tokyo));
        assert!(!needs_daily_reset(now, Some(last), &Utc));
    }

    #[test]
    fn next_midnight_in_zone() {
        let riyadh = FixedOffset::east_opt(3 * 3600).unwrap();
        let next = next_daily_reset_at(utc("2025-10-27T10:00:00Z"), &riyadh).unwrap();
        assert_eq!(next, utc("2025-10-27T21:00:00Z"));

        let next = next_daily_reset_at(utc("2025-10-27T23:59:59Z"), &Utc).unwrap();
        assert_eq!(next, utc("2025-10-28T00:00:00Z"));
    }

    /// Clocks jump from 00:00 (UTC-4) to 01:00 (UTC-3) on 2025-09-07, so that
    /// day has no local midnight.
    #[derive(Debug, Clone, Copy)]
    struct MidnightGap;

    impl MidnightGap {
        fn switch() -> NaiveDateTime {
            NaiveDate::from_ymd_opt(2025, 9, 7).unwrap().and_hms_opt(4, 0, 0).unwrap()
        }
    }

    impl TimeZone for MidnightGap {
        type Offset = FixedOffset;

        fn from_offset(_: &FixedOffset) -> Self {
            MidnightGap
        }

        fn offset_from_local_date(&self, local: &NaiveDate) -> LocalResult<FixedOffset> {
            self.offset_from_local_datetime(&local.and_hms_opt(12, 0, 0).unwrap())
        }

        fn offset_from_local_datetime(&self, local: &NaiveDateTime) -> LocalResult<FixedOffset> {
            let valid: Vec<FixedOffset> = [-4, -3]
                .into_iter()
                .filter_map(|hours| FixedOffset::east_opt(hours * 3600))
                .filter(|offset| {
                    let utc = *local - Duration::seconds(offset.local_minus_utc().into());
                    self.offset_from_utc_datetime(&utc) == *offset
                })
                .collect();
            match valid[..] {
                [] => LocalResult::None,
                [offset] => LocalResult::Single(offset),
                [a, b, ..] => LocalResult::Ambiguous(a, b),
            }
        }

        fn offset_from_utc_date(&self, utc: &NaiveDate) -> FixedOffset {
            self.offset_from_utc_datetime(&utc.and_hms_opt(0, 0, 0).unwrap())
        }

        fn offset_from_utc_datetime(&self, utc: &NaiveDateTime) -> FixedOffset {
            let hours = if *utc < Self::switch() { -4 } else { -3 };
            FixedOffset::east_opt(hours * 3600).unwrap()
        }
    }

    #[test]
    fn next_reset_skips_a_missing_midnight() {
        let midnight = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(MidnightGap.from_local_datetime(&midnight), LocalResult::None);

        // 11:00 local on the 6th; the next day starts at 01:00 UTC-3.
        let next = next_daily_reset_at(utc("2025-09-06T15:00:00Z"), &MidnightGap).unwrap();
        assert_eq!(next, utc("2025-09-07T04:00:00Z"));
        assert_eq!(day_key(next, &MidnightGap).to_string(), "2025-09-07");

        // An ordinary night after the switch.
        let next = next_daily_reset_at(utc("2025-09-07T15:00:00Z"), &MidnightGap).unwrap();
        assert_eq!(next, utc("2025-09-08T03:00:00Z"));
    }

    #[test]
    fn deadline_is_last_log_plus_window() {
        let last = utc("2025-10-27T09:00:00Z");
        assert_eq!(streak_deadline(Some(last), window()), Some(utc("2025-10-28T17:00:00Z")));
        assert_eq!(streak_deadline(None, window()), None);
    }
}
