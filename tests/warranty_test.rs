use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use warranty_countdown::error::WarrantyError;
use warranty_countdown::warranty::{
    DurationUnit, RemainingTime, WarrantyTerm, format_countdown, is_active, is_active_at,
    parse_purchase_date, remaining_time, remaining_time_at, resolve_expiration,
};

fn ts(s: &str) -> DateTime<Utc> {
    parse_purchase_date(s).unwrap()
}

#[test]
fn test_one_year_term() {
    let exp = resolve_expiration(ts("2024-01-01T00:00:00Z"), 1, DurationUnit::Years).unwrap();
    assert_eq!(exp, ts("2025-01-01T00:00:00Z"));
}

#[test]
fn test_january_31_plus_one_month_overflows_into_march() {
    let exp = resolve_expiration(ts("2024-01-31T00:00:00Z"), 1, DurationUnit::Months).unwrap();
    assert_eq!(exp, ts("2024-03-02T00:00:00Z"));
}

#[test]
fn test_ninety_minutes_left_shows_hours_only() {
    let exp = ts("2025-01-01T00:00:00Z");
    let rt = remaining_time_at(exp, exp - TimeDelta::minutes(90));

    assert_eq!((rt.years, rt.months, rt.days), (0, 0, 0));
    assert_eq!((rt.hours, rt.minutes), (1, 30));
    assert_eq!(format_countdown(&rt), "1 Hour remaining");
}

#[test]
fn test_thirty_minutes_left_shows_minutes() {
    let exp = ts("2025-01-01T00:00:00Z");
    let rt = remaining_time_at(exp, exp - TimeDelta::minutes(30));

    assert_eq!(
        rt,
        RemainingTime {
            minutes: 30,
            total_milliseconds: 1_800_000,
            ..RemainingTime::default()
        }
    );
    assert_eq!(format_countdown(&rt), "30 Minutes remaining");
}

#[test]
fn test_past_expiration_is_expired() {
    let exp = ts("2025-01-01T00:00:00Z");
    for late in [TimeDelta::milliseconds(1), TimeDelta::days(3650)] {
        let now = exp + late;
        let rt = remaining_time_at(exp, now);
        assert_eq!(rt, RemainingTime::default());
        assert_eq!(format_countdown(&rt), "Expired");
        assert!(!is_active_at(exp, now));
    }
}

#[test]
fn test_expiration_equal_to_now_is_expired() {
    let exp = ts("2025-01-01T00:00:00Z");
    let rt = remaining_time_at(exp, exp);
    assert!(rt.is_expired());
    assert_eq!(format_countdown(&rt), "Expired");
    assert!(!is_active_at(exp, exp));
}

#[test]
fn test_active_agrees_with_remaining() {
    let exp = ts("2025-01-01T00:00:00Z");
    let offsets = [
        TimeDelta::days(-800),
        TimeDelta::hours(-2),
        TimeDelta::milliseconds(-1),
        TimeDelta::zero(),
        TimeDelta::milliseconds(1),
        TimeDelta::days(45),
    ];
    for offset in offsets {
        let now = exp + offset;
        assert_eq!(
            is_active_at(exp, now),
            remaining_time_at(exp, now).total_milliseconds > 0,
            "offset {:?}",
            offset
        );
    }
}

#[test]
fn test_wall_clock_wrappers() {
    let future = Utc::now() + TimeDelta::days(30);
    assert!(is_active(future));
    assert!(remaining_time(future).total_milliseconds > 0);

    let past = Utc.with_ymd_and_hms(2001, 1, 1, 0, 0, 0).unwrap();
    assert!(!is_active(past));
    assert_eq!(format_countdown(&remaining_time(past)), "Expired");
}

#[test]
fn test_future_dated_purchase_is_not_an_error() {
    let term = WarrantyTerm::new(ts("2030-05-01"), 6, DurationUnit::Months).unwrap();
    let status = term.status_at(ts("2024-05-01")).unwrap();

    assert!(status.active);
    assert_eq!(status.expiration, ts("2030-11-01"));
    assert!(status.remaining.years >= 6);
}

#[test]
fn test_term_status_snapshot() {
    let term = WarrantyTerm::new(ts("2024-01-01"), 1, DurationUnit::Years).unwrap();
    let status = term.status_at(ts("2024-12-30T21:00:00Z")).unwrap();

    assert!(status.active);
    assert_eq!(status.expiration, ts("2025-01-01"));
    assert_eq!(status.countdown, "1 Day, 3 Hours remaining");
    assert_eq!(term.to_string(), "1 Years");
}

#[test]
fn test_invalid_terms_are_rejected() {
    let purchased = ts("2024-01-01");
    assert!(matches!(
        WarrantyTerm::new(purchased, 0, DurationUnit::Years),
        Err(WarrantyError::Validation(_))
    ));
    assert!(matches!(
        WarrantyTerm::new(purchased, -12, DurationUnit::Months),
        Err(WarrantyError::Validation(_))
    ));
    assert!(matches!(
        parse_purchase_date("not a date"),
        Err(WarrantyError::Validation(_))
    ));
}

#[test]
fn test_term_deserialization_is_validated() {
    let good: WarrantyTerm = serde_json::from_str(
        r#"{"purchase_date":"2024-01-01T00:00:00Z","duration_value":2,"duration_unit":"Years"}"#,
    )
    .unwrap();
    assert_eq!(good.expiration().unwrap(), ts("2026-01-01"));

    let zero = serde_json::from_str::<WarrantyTerm>(
        r#"{"purchase_date":"2024-01-01T00:00:00Z","duration_value":0,"duration_unit":"Days"}"#,
    );
    let err = zero.unwrap_err().to_string();
    assert!(err.contains("duration must be positive"), "{}", err);
}
