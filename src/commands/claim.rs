use crate::OutputFormat;
use crate::config::Config;
use crate::ledger::{ClaimStatus, LedgerStore};
use crate::warranty::format_date;
use anyhow::{Context, Result};
use chrono::Utc;
use serde::Serialize;

pub fn open(
    config: &Config,
    sale_id: u32,
    claim_type: &str,
    description: &str,
    format: OutputFormat,
) -> Result<()> {
    let store = LedgerStore::open(config.state.state_dir_override.as_deref())?;

    let claim = store.update(|ledger| {
        Ok(ledger.open_claim(sale_id, claim_type, description, Utc::now())?)
    })?;

    match format {
        OutputFormat::Json => print_json(&claim)?,
        OutputFormat::Text => println!(
            "✓ Opened claim #{} for sale #{} ({})",
            claim.id, claim.sale_id, claim.claim_type
        ),
    }
    Ok(())
}

pub fn list(config: &Config, format: OutputFormat) -> Result<()> {
    let ledger = LedgerStore::open(config.state.state_dir_override.as_deref())?.read()?;
    let claims = ledger.claims();

    if let OutputFormat::Json = format {
        return print_json(&claims);
    }

    if claims.is_empty() {
        println!("No warranty claims found.");
        return Ok(());
    }

    for claim in claims {
        let customer = ledger
            .sale(claim.sale_id)
            .map(|s| s.customer_name.as_str())
            .unwrap_or("Unknown");
        println!(
            "#{} [{}] sale #{} - {} - {}",
            claim.id,
            claim.status.to_string().to_uppercase(),
            claim.sale_id,
            customer,
            claim.claim_type
        );
        println!("    Claimed:  {}", format_date(claim.claim_date));
        println!("    Issue:    {}", claim.issue_description);
        if let Some(resolved) = claim.resolution_date {
            println!("    Resolved: {}", resolved.format("%B %-d, %Y"));
        }
        if let Some(notes) = &claim.admin_notes {
            println!("    Notes:    {}", notes);
        }
    }
    Ok(())
}

pub fn update(
    config: &Config,
    id: u32,
    status: ClaimStatus,
    notes: Option<String>,
    format: OutputFormat,
) -> Result<()> {
    let store = LedgerStore::open(config.state.state_dir_override.as_deref())?;
    let today = Utc::now().date_naive();

    let claim = store.update(|ledger| {
        Ok(ledger.update_claim(id, status, notes, today)?)
    })?;

    match format {
        OutputFormat::Json => print_json(&claim)?,
        OutputFormat::Text => println!("✓ Claim #{} is now {}", claim.id, claim.status),
    }
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(value).context("Failed to serialize claims")?
    );
    Ok(())
}
