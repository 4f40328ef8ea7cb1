use crate::error::{Result, WarrantyError};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum DurationUnit {
    Years,
    Months,
    Days,
}

impl fmt::Display for DurationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DurationUnit::Years => "Years",
            DurationUnit::Months => "Months",
            DurationUnit::Days => "Days",
        };
        f.write_str(s)
    }
}

/// Purchase date plus coverage length. Both construction and deserialization
/// go through [`WarrantyTerm::new`], so every `WarrantyTerm` resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawWarrantyTerm")]
pub struct WarrantyTerm {
    purchase_date: DateTime<Utc>,
    duration_value: u32,
    duration_unit: DurationUnit,
}

impl WarrantyTerm {
    pub fn new(
        purchase_date: DateTime<Utc>,
        duration_value: i64,
        duration_unit: DurationUnit,
    ) -> Result<Self> {
        let duration_value = super::validate_duration_value(duration_value)?;
        // Reject terms whose end falls outside the representable range up front
        super::resolve_expiration(purchase_date, duration_value.into(), duration_unit)?;
        Ok(Self {
            purchase_date,
            duration_value,
            duration_unit,
        })
    }

    pub fn purchase_date(&self) -> DateTime<Utc> {
        self.purchase_date
    }

    pub fn duration_value(&self) -> u32 {
        self.duration_value
    }

    pub fn duration_unit(&self) -> DurationUnit {
        self.duration_unit
    }

    pub fn expiration(&self) -> Result<DateTime<Utc>> {
        super::resolve_expiration(
            self.purchase_date,
            self.duration_value.into(),
            self.duration_unit,
        )
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> Result<WarrantyStatus> {
        let expiration = self.expiration()?;
        let remaining = super::remaining_time_at(expiration, now);
        Ok(WarrantyStatus {
            expiration,
            active: super::is_active_at(expiration, now),
            countdown: super::format_countdown(&remaining),
            remaining,
        })
    }

    /// Status against the current wall-clock time.
    pub fn status(&self) -> Result<WarrantyStatus> {
        self.status_at(Utc::now())
    }
}

/// Unchecked wire form of a [`WarrantyTerm`].
#[derive(Deserialize)]
struct RawWarrantyTerm {
    purchase_date: DateTime<Utc>,
    duration_value: i64,
    duration_unit: DurationUnit,
}

impl TryFrom<RawWarrantyTerm> for WarrantyTerm {
    type Error = WarrantyError;

    fn try_from(raw: RawWarrantyTerm) -> Result<Self> {
        WarrantyTerm::new(raw.purchase_date, raw.duration_value, raw.duration_unit)
    }
}

impl fmt::Display for WarrantyTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.duration_value, self.duration_unit)
    }
}

/// Countdown breakdown using average month and year lengths.
///
/// When `total_milliseconds` is zero every other field is zero too.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RemainingTime {
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub total_milliseconds: u64,
}

impl RemainingTime {
    pub fn is_expired(&self) -> bool {
        self.total_milliseconds == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarrantyStatus {
    pub expiration: DateTime<Utc>,
    pub active: bool,
    pub remaining: RemainingTime,
    pub countdown: String,
}
