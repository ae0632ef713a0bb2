//! Pure computations over the canonical model.
//!
//! These never mutate the model; presentation calls them on demand.

use chrono::{DateTime, Datelike, Local, NaiveTime, TimeZone, Utc};

use crate::model::{ShopConfig, Stats};
use crate::types::WeekHours;

/// Length of the free trial, in days from shop creation.
pub const TRIAL_DAYS: i64 = 14;
/// Additional days granted when an admin extends the trial.
pub const TRIAL_EXTENSION_DAYS: i64 = 14;

/// Billing state derived from the paid flag and the trial clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingState {
    /// Paid subscription; no trial accounting applies.
    Paid,
    /// Within the (possibly extended) trial window.
    Trial { days_left: i64 },
    /// Trial window elapsed and not paid.
    Expired,
}

/// Compute the billing state at `now`.
#[must_use]
pub fn billing_state(config: &ShopConfig, now: DateTime<Utc>) -> BillingState {
    if config.aux.paid {
        return BillingState::Paid;
    }
    let mut allowed = TRIAL_DAYS;
    if config.aux.trial_extended {
        allowed += TRIAL_EXTENSION_DAYS;
    }
    let used = (now - config.identity.created_at).num_days();
    let days_left = allowed - used;
    if days_left > 0 {
        BillingState::Trial { days_left }
    } else {
        BillingState::Expired
    }
}

/// Whether the shop is open at the given local time.
///
/// Unparsable `open`/`close` strings count as closed. A close time at or
/// before the open time is an overnight span (e.g. 22:00-02:00) and wraps
/// past midnight.
#[must_use]
pub fn is_open_at<Tz: TimeZone>(hours: &WeekHours, at: &DateTime<Tz>) -> bool {
    let entry = hours.day(at.weekday());
    if entry.closed {
        return false;
    }
    let (Some(open), Some(close)) = (parse_time(&entry.open), parse_time(&entry.close)) else {
        return false;
    };
    let now = at.time();
    if open < close {
        now >= open && now < close
    } else {
        // Overnight span.
        now >= open || now < close
    }
}

/// Whether the shop is open right now, in server-local time.
#[must_use]
pub fn is_open_now(hours: &WeekHours) -> bool {
    is_open_at(hours, &Local::now())
}

/// Click-through rate of the storefront, 0.0 when there are no visits.
#[must_use]
#[allow(clippy::cast_precision_loss)] // Counters will never exceed f64 precision
pub fn click_through_rate(stats: &Stats) -> f64 {
    if stats.visits == 0 {
        return 0.0;
    }
    stats.clicks as f64 / stats.visits as f64
}

fn parse_time(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s.trim(), "%H:%M").ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Timelike, Weekday};

    fn at(weekday_offset: i64, time: &str) -> DateTime<Utc> {
        // 2024-01-01 is a Monday.
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let t = NaiveTime::parse_from_str(time, "%H:%M").unwrap();
        base + Duration::days(weekday_offset)
            + Duration::seconds(i64::from(t.num_seconds_from_midnight()))
    }

    #[test]
    fn test_open_within_default_hours() {
        let hours = WeekHours::default();
        assert!(is_open_at(&hours, &at(0, "10:00")));
        assert!(!is_open_at(&hours, &at(0, "20:00")));
        assert!(!is_open_at(&hours, &at(0, "08:59")));
    }

    #[test]
    fn test_closed_day_wins() {
        let mut hours = WeekHours::default();
        hours.day_mut(Weekday::Mon).closed = true;
        assert!(!is_open_at(&hours, &at(0, "10:00")));
        assert!(is_open_at(&hours, &at(1, "10:00")));
    }

    #[test]
    fn test_overnight_span_wraps_midnight() {
        let mut hours = WeekHours::default();
        let fri = hours.day_mut(Weekday::Fri);
        fri.open = "22:00".to_string();
        fri.close = "02:00".to_string();
        assert!(is_open_at(&hours, &at(4, "23:30")));
        assert!(is_open_at(&hours, &at(4, "01:00")));
        assert!(!is_open_at(&hours, &at(4, "12:00")));
    }

    #[test]
    fn test_unparsable_times_count_as_closed() {
        let mut hours = WeekHours::default();
        hours.day_mut(Weekday::Mon).open = "9am".to_string();
        assert!(!is_open_at(&hours, &at(0, "10:00")));
    }

    #[test]
    fn test_billing_state_trial_countdown() {
        let mut config = crate::ShopConfig::defaults();
        config.identity.created_at = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();

        let day_3 = Utc.with_ymd_and_hms(2024, 1, 4, 0, 0, 0).unwrap();
        assert_eq!(
            billing_state(&config, day_3),
            BillingState::Trial { days_left: 11 }
        );

        let day_20 = Utc.with_ymd_and_hms(2024, 1, 21, 0, 0, 0).unwrap();
        assert_eq!(billing_state(&config, day_20), BillingState::Expired);

        config.aux.trial_extended = true;
        assert_eq!(
            billing_state(&config, day_20),
            BillingState::Trial { days_left: 8 }
        );

        config.aux.paid = true;
        assert_eq!(billing_state(&config, day_20), BillingState::Paid);
    }

    #[test]
    fn test_click_through_rate() {
        assert!(click_through_rate(&Stats::default()).abs() < f64::EPSILON);
        let stats = Stats {
            visits: 200,
            clicks: 30,
        };
        assert!((click_through_rate(&stats) - 0.15).abs() < 1e-9);
    }
}
