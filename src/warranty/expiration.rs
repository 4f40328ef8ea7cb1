use super::DurationUnit;
use crate::error::{Result, WarrantyError};
use chrono::{DateTime, Datelike, Days, NaiveDate, NaiveDateTime, TimeDelta, Utc};

const MS_PER_DAY: i64 = 86_400_000;

/// Parse a purchase date given as RFC 3339, `YYYY-MM-DDTHH:MM:SS` (UTC) or a
/// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_purchase_date(input: &str) -> Result<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S") {
        return Ok(naive.and_utc());
    }
    if let Some(midnight) = NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(WarrantyError::validation(format!(
        "invalid purchase date '{}', expected YYYY-MM-DD or RFC 3339",
        input
    )))
}

/// Parse a duration count from text. Fractions, zero and negatives are rejected.
pub fn parse_duration_value(input: &str) -> Result<u32> {
    let value: i64 = input.trim().parse().map_err(|_| {
        WarrantyError::validation(format!(
            "duration '{}' must be a positive whole number",
            input.trim()
        ))
    })?;
    validate_duration_value(value)
}

pub fn validate_duration_value(value: i64) -> Result<u32> {
    if value <= 0 {
        return Err(WarrantyError::validation(format!(
            "duration must be positive, got {}",
            value
        )));
    }
    u32::try_from(value)
        .map_err(|_| WarrantyError::validation(format!("duration {} is too large", value)))
}

/// Advance `purchase_date` by `duration_value` units.
///
/// Years and months move the calendar fields. A day-of-month that does not
/// exist in the target month spills into the next one, so Jan 31 + 1 month
/// lands on Mar 2 (or Mar 3 outside leap years) and Feb 29 + 1 year on Mar 1.
/// Days are a fixed 24h shift.
pub fn resolve_expiration(
    purchase_date: DateTime<Utc>,
    duration_value: i64,
    duration_unit: DurationUnit,
) -> Result<DateTime<Utc>> {
    let value = i64::from(validate_duration_value(duration_value)?);

    let expiration = match duration_unit {
        DurationUnit::Years => add_months_with_rollover(purchase_date, value * 12),
        DurationUnit::Months => add_months_with_rollover(purchase_date, value),
        DurationUnit::Days => TimeDelta::try_milliseconds(value * MS_PER_DAY)
            .and_then(|delta| purchase_date.checked_add_signed(delta)),
    };

    expiration.ok_or_else(|| {
        WarrantyError::validation(format!(
            "{} {} from {} is out of range",
            duration_value, duration_unit, purchase_date
        ))
    })
}

fn add_months_with_rollover(date: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = u32::try_from(total.rem_euclid(12)).ok()? + 1;

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let day = first_of_month.checked_add_days(Days::new(u64::from(date.day0())))?;
    Some(day.and_time(date.time()).and_utc())
}

/// Whole milliseconds from `now` until `expiration`; negative once past.
pub(crate) fn millis_until(expiration: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    expiration.timestamp_millis() - now.timestamp_millis()
}

/// `now < expiration`, compared at millisecond precision. Equality counts as expired.
pub fn is_active_at(expiration: DateTime<Utc>, now: DateTime<Utc>) -> bool {
    millis_until(expiration, now) > 0
}

pub fn is_active(expiration: DateTime<Utc>) -> bool {
    is_active_at(expiration, Utc::now())
}
