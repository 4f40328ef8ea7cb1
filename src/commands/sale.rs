use crate::OutputFormat;
use crate::config::Config;
use crate::ledger::{LedgerStore, NewSale, SaleFilter, SaleView};
use crate::warranty::{DurationUnit, WarrantyTerm, format_date, parse_purchase_date};
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::json;

/// CLI arguments for `sale record`, before defaults are applied.
pub struct RecordArgs {
    pub scooter: String,
    pub serial: String,
    pub motor: Option<String>,
    pub chassis: Option<String>,
    pub customer: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub purchased: Option<String>,
    pub duration: Option<u32>,
    pub unit: Option<DurationUnit>,
}

pub fn record(config: &Config, args: RecordArgs, format: OutputFormat) -> Result<()> {
    let store = LedgerStore::open(config.state.state_dir_override.as_deref())?;
    let now = Utc::now();

    let purchase_date = match &args.purchased {
        Some(p) => parse_purchase_date(p)?,
        None => now,
    };
    let term = WarrantyTerm::new(
        purchase_date,
        args.duration
            .unwrap_or(config.warranty.default_duration_value)
            .into(),
        args.unit.unwrap_or(config.warranty.default_duration_unit),
    )?;

    let new_sale = NewSale {
        scooter_name: args.scooter,
        serial_number: args.serial,
        motor_number: args.motor,
        chassis_number: args.chassis,
        customer_name: args.customer,
        customer_email: args.email,
        customer_phone: args.phone,
        term,
    };

    let view = store.update(|ledger| {
        let sale = ledger.record_sale(new_sale, now)?;
        Ok(ledger.sale_view(sale.id, now)?)
    })?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Text => {
            println!("✓ Warranty started for sale #{}", view.sale.id);
            println!("  Customer: {}", view.sale.customer_name);
            println!("  Scooter:  {} ({})", view.sale.scooter_name, view.sale.serial_number);
            println!("  Purchase: {}", format_date(view.sale.term.purchase_date()));
            println!("  Period:   {}", view.sale.term);
            println!("  Expires:  {}", format_date(view.warranty.expiration));
        }
    }
    Ok(())
}

pub fn list(
    config: &Config,
    filter: SaleFilter,
    search: Option<&str>,
    format: OutputFormat,
) -> Result<()> {
    let ledger = LedgerStore::open(config.state.state_dir_override.as_deref())?.read()?;
    let now = Utc::now();

    let sales = ledger.sales(filter, search, now)?;
    let summary = ledger.summary(now)?;

    if let OutputFormat::Json = format {
        let body = json!({ "summary": summary, "sales": sales });
        println!(
            "{}",
            serde_json::to_string_pretty(&body).context("Failed to serialize sales")?
        );
        return Ok(());
    }

    println!(
        "Total: {}  Active: {}  Expired: {}",
        summary.total, summary.active, summary.expired
    );
    if sales.is_empty() {
        println!("No sales found.");
        return Ok(());
    }

    println!(
        "{:<6} {:<20} {:<16} {:<20} {:<8}",
        "ID", "Customer", "Serial", "Scooter", "Warranty"
    );
    println!("{}", "-".repeat(74));
    for view in &sales {
        println!(
            "{:<6} {:<20} {:<16} {:<20} {:<8}",
            view.sale.id,
            truncate(&view.sale.customer_name, 20),
            truncate(&view.sale.serial_number, 16),
            truncate(&view.sale.scooter_name, 20),
            if view.warranty.active { "Active" } else { "Expired" }
        );
    }
    Ok(())
}

pub fn show(config: &Config, id: u32, format: OutputFormat) -> Result<()> {
    let ledger = LedgerStore::open(config.state.state_dir_override.as_deref())?.read()?;
    let view = ledger.sale_view(id, Utc::now())?;

    match format {
        OutputFormat::Json => print_json(&view)?,
        OutputFormat::Text => {
            let sale = &view.sale;
            println!("Sale #{} - {}", sale.id, sale.scooter_name);
            println!("  Serial:   {}", sale.serial_number);
            if let Some(motor) = &sale.motor_number {
                println!("  Motor:    {}", motor);
            }
            if let Some(chassis) = &sale.chassis_number {
                println!("  Chassis:  {}", chassis);
            }
            println!("  Customer: {}", sale.customer_name);
            if let Some(email) = &sale.customer_email {
                println!("  Email:    {}", email);
            }
            if let Some(phone) = &sale.customer_phone {
                println!("  Phone:    {}", phone);
            }
            println!("  Sold on:  {}", format_date(sale.term.purchase_date()));
            println!("  Period:   {}", sale.term);
            println!("  Expires:  {}", format_date(view.warranty.expiration));
            println!("  Status:   {}", view.warranty.countdown);
        }
    }
    Ok(())
}

/// Customer-facing lookup by serial, motor or chassis number. Owner
/// details stay out of the output.
pub fn check(config: &Config, identifier: &str, format: OutputFormat) -> Result<()> {
    let ledger = LedgerStore::open(config.state.state_dir_override.as_deref())?.read()?;
    let sale = ledger.find_by_identifier(identifier)?;
    let warranty = sale.term.status()?;

    match format {
        OutputFormat::Json => {
            let body = json!({
                "scooter_name": sale.scooter_name,
                "serial_number": sale.serial_number,
                "motor_number": sale.motor_number,
                "chassis_number": sale.chassis_number,
                "purchase_date": sale.term.purchase_date(),
                "warranty": warranty,
            });
            println!(
                "{}",
                serde_json::to_string_pretty(&body).context("Failed to serialize warranty")?
            );
        }
        OutputFormat::Text => {
            println!("{} ({})", sale.scooter_name, sale.serial_number);
            println!("  Purchased: {}", format_date(sale.term.purchase_date()));
            println!("  Period:    {}", sale.term);
            println!("  Expires:   {}", format_date(warranty.expiration));
            println!(
                "  Warranty:  {}",
                if warranty.active { "Active" } else { "Expired" }
            );
            println!("  {}", warranty.countdown);
        }
    }
    Ok(())
}

fn print_json(view: &SaleView) -> Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(view).context("Failed to serialize sale")?
    );
    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
