//! Local record of scooter sales and the warranty claims raised against them.

mod models;
mod store;

pub use models::{
    Claim, ClaimStatus, NewSale, Sale, SaleFilter, SaleView, SalesSummary,
};
pub use store::{LEDGER_VERSION, LedgerStore};

use crate::error::{Result, WarrantyError};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Ledger {
    pub version: u32,
    #[serde(default)]
    pub sales: Vec<Sale>,
    #[serde(default)]
    pub claims: Vec<Claim>,
}

impl Default for Ledger {
    fn default() -> Self {
        Self {
            version: LEDGER_VERSION,
            sales: Vec::new(),
            claims: Vec::new(),
        }
    }
}

fn require(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(WarrantyError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn next_id(kind: &str, ids: impl Iterator<Item = u32>) -> Result<u32> {
    ids.max()
        .unwrap_or(0)
        .checked_add(1)
        .ok_or_else(|| WarrantyError::validation(format!("{} ids exhausted", kind)))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl Ledger {
    fn next_sale_id(&self) -> Result<u32> {
        next_id("sale", self.sales.iter().map(|s| s.id))
    }

    fn next_claim_id(&self) -> Result<u32> {
        next_id("claim", self.claims.iter().map(|c| c.id))
    }

    pub fn record_sale(&mut self, new: NewSale, now: DateTime<Utc>) -> Result<Sale> {
        let sale = Sale {
            id: self.next_sale_id()?,
            scooter_name: require("scooter name", &new.scooter_name)?,
            serial_number: require("serial number", &new.serial_number)?,
            motor_number: non_blank(new.motor_number),
            chassis_number: non_blank(new.chassis_number),
            customer_name: require("customer name", &new.customer_name)?,
            customer_email: non_blank(new.customer_email),
            customer_phone: non_blank(new.customer_phone),
            term: new.term,
            recorded_at: now,
        };
        tracing::debug!(id = sale.id, serial = %sale.serial_number, term = %sale.term, "recording sale");
        self.sales.push(sale.clone());
        Ok(sale)
    }

    pub fn sale(&self, id: u32) -> Result<&Sale> {
        self.sales
            .iter()
            .find(|s| s.id == id)
            .ok_or(WarrantyError::NotFound { kind: "sale", id })
    }

    pub fn sale_view(&self, id: u32, now: DateTime<Utc>) -> Result<SaleView> {
        let sale = self.sale(id)?;
        Ok(SaleView {
            sale: sale.clone(),
            warranty: sale.term.status_at(now)?,
        })
    }

    /// Warranty lookup by a number stamped on the vehicle: exact match on
    /// serial, motor or chassis number.
    pub fn find_by_identifier(&self, identifier: &str) -> Result<&Sale> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(WarrantyError::validation(
                "enter a serial number, motor number, or chassis number",
            ));
        }
        self.sales
            .iter()
            .rev()
            .find(|s| s.has_identifier(identifier))
            .ok_or_else(|| WarrantyError::UnknownVehicle(identifier.to_string()))
    }

    /// Sales matching `filter` and, when given, the `search` text at `now`,
    /// newest sale first.
    pub fn sales(
        &self,
        filter: SaleFilter,
        search: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Vec<SaleView>> {
        let needle = search.map(str::trim).filter(|s| !s.is_empty());
        let mut views = Vec::new();
        for sale in self.sales.iter().rev() {
            if needle.is_some_and(|n| !sale.matches_search(n)) {
                continue;
            }
            let warranty = sale.term.status_at(now)?;
            if filter.matches(&warranty) {
                views.push(SaleView {
                    sale: sale.clone(),
                    warranty,
                });
            }
        }
        Ok(views)
    }

    pub fn summary(&self, now: DateTime<Utc>) -> Result<SalesSummary> {
        let mut summary = SalesSummary {
            total: self.sales.len(),
            ..SalesSummary::default()
        };
        for sale in &self.sales {
            if sale.term.status_at(now)?.active {
                summary.active += 1;
            } else {
                summary.expired += 1;
            }
        }
        Ok(summary)
    }

    /// Raise a claim against a sale whose warranty is still running at `now`.
    pub fn open_claim(
        &mut self,
        sale_id: u32,
        claim_type: &str,
        issue_description: &str,
        now: DateTime<Utc>,
    ) -> Result<Claim> {
        let status = self.sale(sale_id)?.term.status_at(now)?;
        if !status.active {
            return Err(WarrantyError::WarrantyExpired {
                sale_id,
                expired_at: status.expiration,
            });
        }

        let claim = Claim {
            id: self.next_claim_id()?,
            sale_id,
            claim_type: require("claim type", claim_type)?,
            issue_description: require("issue description", issue_description)?,
            status: ClaimStatus::Pending,
            admin_notes: None,
            claim_date: now,
            resolution_date: None,
        };
        tracing::debug!(id = claim.id, sale_id, "opening claim");
        self.claims.push(claim.clone());
        Ok(claim)
    }

    /// Change a claim's status. Completing it stamps `today` as the resolution date.
    pub fn update_claim(
        &mut self,
        id: u32,
        status: ClaimStatus,
        admin_notes: Option<String>,
        today: NaiveDate,
    ) -> Result<Claim> {
        let claim = self
            .claims
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(WarrantyError::NotFound { kind: "claim", id })?;

        claim.status = status;
        if let Some(notes) = admin_notes {
            claim.admin_notes = non_blank(Some(notes));
        }
        if status == ClaimStatus::Completed {
            claim.resolution_date = Some(today);
        }
        tracing::debug!(id, %status, "updated claim");
        Ok(claim.clone())
    }

    /// All claims, most recent claim date first.
    pub fn claims(&self) -> Vec<&Claim> {
        let mut claims: Vec<&Claim> = self.claims.iter().collect();
        claims.sort_by(|a, b| b.claim_date.cmp(&a.claim_date).then(b.id.cmp(&a.id)));
        claims
    }
}
