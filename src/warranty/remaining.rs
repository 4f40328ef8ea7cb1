use super::RemainingTime;
use super::expiration::millis_until;
use chrono::{DateTime, Utc};

const MS_PER_MINUTE: u64 = 60 * 1000;
const MS_PER_HOUR: u64 = MS_PER_MINUTE * 60;
const MS_PER_DAY: u64 = MS_PER_HOUR * 24;
// 30.44 and 365.25 days, both whole numbers of milliseconds
const MS_PER_MONTH: u64 = MS_PER_DAY * 3044 / 100;
const MS_PER_YEAR: u64 = MS_PER_DAY * 36525 / 100;

/// Break the time left until `expiration` into years, months, days, hours
/// and minutes, coarsest first. Past or equal expirations give all zeros.
pub fn remaining_time_at(expiration: DateTime<Utc>, now: DateTime<Utc>) -> RemainingTime {
    let total = millis_until(expiration, now);
    if total <= 0 {
        return RemainingTime::default();
    }

    let total = total.unsigned_abs();
    let mut remaining = total;
    let mut take = |unit: u64| {
        let count = remaining / unit;
        remaining -= count * unit;
        count
    };

    RemainingTime {
        years: take(MS_PER_YEAR),
        months: take(MS_PER_MONTH),
        days: take(MS_PER_DAY),
        hours: take(MS_PER_HOUR),
        minutes: take(MS_PER_MINUTE),
        total_milliseconds: total,
    }
}

pub fn remaining_time(expiration: DateTime<Utc>) -> RemainingTime {
    remaining_time_at(expiration, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, TimeZone};

    fn expiration() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_unit_lengths() {
        assert_eq!(MS_PER_MONTH, 2_630_016_000);
        assert_eq!(MS_PER_YEAR, 31_557_600_000);
    }

    #[test]
    fn test_ninety_minutes() {
        let exp = expiration();
        let rt = remaining_time_at(exp, exp - TimeDelta::minutes(90));
        assert_eq!(
            rt,
            RemainingTime {
                years: 0,
                months: 0,
                days: 0,
                hours: 1,
                minutes: 30,
                total_milliseconds: 5_400_000,
            }
        );
    }

    #[test]
    fn test_expired_is_all_zero() {
        let exp = expiration();
        assert_eq!(remaining_time_at(exp, exp), RemainingTime::default());
        assert_eq!(
            remaining_time_at(exp, exp + TimeDelta::days(400)),
            RemainingTime::default()
        );
    }

    #[test]
    fn test_uses_average_lengths_not_calendar() {
        // Exactly 365 calendar days is short of an average year
        let exp = expiration();
        let rt = remaining_time_at(exp, exp - TimeDelta::days(365));
        assert_eq!(rt.years, 0);
        assert_eq!(rt.months, 11);
        // 365d - 11 * 30.44d = 30.16d
        assert_eq!(rt.days, 30);
        assert_eq!(rt.hours, 3);
        assert_eq!(rt.minutes, 50);
    }

    #[test]
    fn test_seconds_are_dropped() {
        let exp = expiration();
        let rt = remaining_time_at(exp, exp - TimeDelta::seconds(59));
        assert_eq!(rt.minutes, 0);
        assert_eq!(rt.total_milliseconds, 59_000);
        assert!(!rt.is_expired());
    }

    #[test]
    fn test_idempotent_under_frozen_clock() {
        let exp = expiration();
        let now = exp - TimeDelta::days(1000) - TimeDelta::minutes(7);
        assert_eq!(remaining_time_at(exp, now), remaining_time_at(exp, now));
    }

    #[test]
    fn test_total_decreases_until_zero() {
        let exp = expiration();
        let mut previous = u64::MAX;
        for step in 0..50 {
            let now = exp - TimeDelta::hours(24) + TimeDelta::minutes(step * 37);
            let total = remaining_time_at(exp, now).total_milliseconds;
            if previous == 0 {
                assert_eq!(total, 0);
            } else {
                assert!(total < previous);
            }
            previous = total;
        }
        assert_eq!(previous, 0);
    }
}
