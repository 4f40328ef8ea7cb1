//! Warranty time calculations.
//!
//! Everything here is pure except the convenience wrappers that read
//! `Utc::now()` once per call. Times are UTC throughout.

mod countdown;
mod expiration;
mod models;
mod remaining;

pub use countdown::{format_countdown, format_date};
pub use expiration::{
    is_active, is_active_at, parse_duration_value, parse_purchase_date, resolve_expiration,
    validate_duration_value,
};
pub use models::{DurationUnit, RemainingTime, WarrantyStatus, WarrantyTerm};
pub use remaining::{remaining_time, remaining_time_at};
