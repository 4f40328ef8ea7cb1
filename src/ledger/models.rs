use crate::warranty::{WarrantyStatus, WarrantyTerm};
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sale {
    pub id: u32,
    pub scooter_name: String,
    pub serial_number: String,
    pub motor_number: Option<String>,
    pub chassis_number: Option<String>,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub term: WarrantyTerm,
    pub recorded_at: DateTime<Utc>,
}

impl Sale {
    /// Exact match against the numbers stamped on the vehicle.
    pub fn has_identifier(&self, identifier: &str) -> bool {
        self.serial_number == identifier
            || self.motor_number.as_deref() == Some(identifier)
            || self.chassis_number.as_deref() == Some(identifier)
    }

    /// Case-insensitive substring match over vehicle and owner details.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        [
            Some(self.scooter_name.as_str()),
            Some(self.serial_number.as_str()),
            self.motor_number.as_deref(),
            self.chassis_number.as_deref(),
            Some(self.customer_name.as_str()),
            self.customer_phone.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(&term))
    }
}

/// Input for [`super::Ledger::record_sale`]; the ledger assigns the id.
#[derive(Debug, Clone)]
pub struct NewSale {
    pub scooter_name: String,
    pub serial_number: String,
    pub motor_number: Option<String>,
    pub chassis_number: Option<String>,
    pub customer_name: String,
    pub customer_email: Option<String>,
    pub customer_phone: Option<String>,
    pub term: WarrantyTerm,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleView {
    #[serde(flatten)]
    pub sale: Sale,
    pub warranty: WarrantyStatus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SaleFilter {
    #[default]
    All,
    Active,
    Expired,
}

impl SaleFilter {
    pub fn matches(self, status: &WarrantyStatus) -> bool {
        match self {
            SaleFilter::All => true,
            SaleFilter::Active => status.active,
            SaleFilter::Expired => !status.active,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SalesSummary {
    pub total: usize,
    pub active: usize,
    pub expired: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Completed,
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClaimStatus::Pending => "pending",
            ClaimStatus::Approved => "approved",
            ClaimStatus::Rejected => "rejected",
            ClaimStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub id: u32,
    pub sale_id: u32,
    pub claim_type: String,
    pub issue_description: String,
    pub status: ClaimStatus,
    pub admin_notes: Option<String>,
    pub claim_date: DateTime<Utc>,
    /// Set when the claim moves to `completed`
    pub resolution_date: Option<NaiveDate>,
}
