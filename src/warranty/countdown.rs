use super::RemainingTime;
use chrono::{DateTime, Utc};

fn plural(n: u64) -> &'static str {
    if n == 1 { "" } else { "s" }
}

fn push_part(parts: &mut Vec<String>, count: u64, label: &str) {
    if count > 0 {
        parts.push(format!("{} {}{}", count, label, plural(count)));
    }
}

/// Render a countdown such as `"1 Year, 2 Months, 4 Days, 3 Hours remaining"`.
///
/// Minutes only show once less than an hour is left. A fully elapsed
/// countdown renders as `"Expired"`.
pub fn format_countdown(remaining: &RemainingTime) -> String {
    let mut parts = Vec::new();
    push_part(&mut parts, remaining.years, "Year");
    push_part(&mut parts, remaining.months, "Month");
    push_part(&mut parts, remaining.days, "Day");
    push_part(&mut parts, remaining.hours, "Hour");

    if parts.is_empty() {
        push_part(&mut parts, remaining.minutes, "Minute");
    }

    if parts.is_empty() {
        return "Expired".to_string();
    }

    format!("{} remaining", parts.join(", "))
}

/// Long-form display date, e.g. `"January 1, 2025 at 12:00 AM"` (UTC).
pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%B %-d, %Y at %I:%M %p").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rt(years: u64, months: u64, days: u64, hours: u64, minutes: u64) -> RemainingTime {
        RemainingTime {
            years,
            months,
            days,
            hours,
            minutes,
            total_milliseconds: 1,
        }
    }

    #[test]
    fn test_full_countdown() {
        assert_eq!(
            format_countdown(&rt(1, 2, 4, 3, 59)),
            "1 Year, 2 Months, 4 Days, 3 Hours remaining"
        );
    }

    #[test]
    fn test_skips_zero_components() {
        assert_eq!(format_countdown(&rt(2, 0, 1, 0, 10)), "2 Years, 1 Day remaining");
    }

    #[test]
    fn test_minutes_suppressed_when_hours_present() {
        assert_eq!(format_countdown(&rt(0, 0, 0, 1, 30)), "1 Hour remaining");
    }

    #[test]
    fn test_minutes_fallback() {
        assert_eq!(format_countdown(&rt(0, 0, 0, 0, 30)), "30 Minutes remaining");
        assert_eq!(format_countdown(&rt(0, 0, 0, 0, 1)), "1 Minute remaining");
    }

    #[test]
    fn test_expired() {
        assert_eq!(format_countdown(&RemainingTime::default()), "Expired");
        // Under a minute left still reads as expired
        assert_eq!(format_countdown(&rt(0, 0, 0, 0, 0)), "Expired");
    }

    #[test]
    fn test_format_date() {
        let date = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_date(date), "January 1, 2025 at 12:00 AM");

        let date = Utc.with_ymd_and_hms(2024, 7, 14, 15, 5, 0).unwrap();
        assert_eq!(format_date(date), "July 14, 2024 at 03:05 PM");
    }
}
