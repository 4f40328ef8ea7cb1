use crate::OutputFormat;
use crate::warranty::{
    self, DurationUnit, WarrantyTerm, format_countdown, format_date, parse_purchase_date,
};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Where a countdown's expiration comes from.
pub enum CountdownTarget {
    Expires(String),
    Term {
        purchased: String,
        duration: u32,
        unit: DurationUnit,
    },
}

#[derive(Serialize)]
struct ExpiryReport {
    purchase_date: DateTime<Utc>,
    duration_value: u32,
    duration_unit: DurationUnit,
    #[serde(flatten)]
    status: warranty::WarrantyStatus,
}

fn term_from_args(purchased: &str, duration: u32, unit: DurationUnit) -> Result<WarrantyTerm> {
    let purchase_date = parse_purchase_date(purchased)?;
    Ok(WarrantyTerm::new(purchase_date, duration.into(), unit)?)
}

pub fn expiry(purchased: &str, duration: u32, unit: DurationUnit, format: OutputFormat) -> Result<()> {
    let term = term_from_args(purchased, duration, unit)?;
    let status = term.status()?;

    match format {
        OutputFormat::Json => {
            let report = ExpiryReport {
                purchase_date: term.purchase_date(),
                duration_value: term.duration_value(),
                duration_unit: term.duration_unit(),
                status,
            };
            println!(
                "{}",
                serde_json::to_string_pretty(&report).context("Failed to serialize expiry")?
            );
        }
        OutputFormat::Text => {
            println!("Purchased: {}", format_date(term.purchase_date()));
            println!("Warranty:  {}", term);
            println!("Expires:   {}", format_date(status.expiration));
            println!(
                "Status:    {}",
                if status.active { "Active" } else { "Expired" }
            );
        }
    }
    Ok(())
}

pub fn countdown(target: CountdownTarget, format: OutputFormat) -> Result<()> {
    let expiration = match target {
        CountdownTarget::Expires(ts) => parse_purchase_date(&ts)
            .with_context(|| format!("Invalid expiration '{}'", ts))?,
        CountdownTarget::Term {
            purchased,
            duration,
            unit,
        } => term_from_args(&purchased, duration, unit)?.expiration()?,
    };

    let remaining = warranty::remaining_time(expiration);
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&remaining).context("Failed to serialize countdown")?
        ),
        OutputFormat::Text => println!("{}", format_countdown(&remaining)),
    }
    Ok(())
}
