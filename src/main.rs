use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warranty_countdown::commands;
use warranty_countdown::commands::calc::CountdownTarget;
use warranty_countdown::commands::sale::RecordArgs;
use warranty_countdown::config;
use warranty_countdown::ledger::{ClaimStatus, SaleFilter};
use warranty_countdown::warranty::{DurationUnit, parse_duration_value};
use warranty_countdown::OutputFormat;

#[derive(Parser)]
#[command(name = "wty")]
#[command(about = "Scooter warranty expirations, countdowns and claims")]
#[command(version)]
struct Cli {
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute when a warranty expires
    Expiry {
        #[arg(long, help = "Purchase date (YYYY-MM-DD or RFC 3339)")]
        purchased: String,
        #[arg(long, value_parser = parse_duration_value, help = "Warranty length")]
        duration: u32,
        #[arg(long, value_enum, help = "Unit of the warranty length")]
        unit: DurationUnit,
    },

    /// Show the time left on a warranty
    Countdown {
        #[arg(long, conflicts_with = "purchased", help = "Expiration timestamp")]
        expires: Option<String>,
        #[arg(long, requires_all = ["duration", "unit"], help = "Purchase date")]
        purchased: Option<String>,
        #[arg(long, value_parser = parse_duration_value)]
        duration: Option<u32>,
        #[arg(long, value_enum)]
        unit: Option<DurationUnit>,
    },

    /// Record sales and inspect their warranties
    Sale(SaleArgs),

    /// Open, list and resolve warranty claims
    Claim(ClaimArgs),

    /// Inspect or change configuration
    Config(ConfigArgs),
}

#[derive(Args)]
struct SaleArgs {
    #[command(subcommand)]
    action: SaleAction,
}

#[derive(Subcommand)]
enum SaleAction {
    /// Register a sale and start its warranty
    Record {
        #[arg(long, help = "Scooter model name")]
        scooter: String,
        #[arg(long, help = "Serial number")]
        serial: String,
        #[arg(long, help = "Customer full name")]
        customer: String,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, help = "Motor number")]
        motor: Option<String>,
        #[arg(long, help = "Chassis number")]
        chassis: Option<String>,
        #[arg(long, help = "Purchase date, defaults to now")]
        purchased: Option<String>,
        #[arg(long, value_parser = parse_duration_value, requires = "unit")]
        duration: Option<u32>,
        #[arg(long, value_enum, requires = "duration")]
        unit: Option<DurationUnit>,
    },
    /// List recorded sales
    List {
        #[arg(long, value_enum, default_value_t = SaleFilter::All)]
        status: SaleFilter,
        #[arg(long, help = "Match scooter, serial, motor, chassis, owner or phone")]
        search: Option<String>,
    },
    /// Look up a warranty by serial, motor or chassis number
    Check {
        #[arg(help = "Serial, motor or chassis number")]
        identifier: String,
    },
    /// Show one sale with its warranty countdown
    Show {
        #[arg(help = "Sale ID")]
        id: u32,
    },
}

#[derive(Args)]
struct ClaimArgs {
    #[command(subcommand)]
    action: ClaimAction,
}

#[derive(Subcommand)]
enum ClaimAction {
    /// File a claim against a sale under warranty
    Open {
        #[arg(help = "Sale ID")]
        sale_id: u32,
        #[arg(long = "type", help = "Claim type, e.g. Battery")]
        claim_type: String,
        #[arg(long, help = "What went wrong")]
        description: String,
    },
    /// List claims, newest first
    List,
    /// Change a claim's status
    Update {
        #[arg(help = "Claim ID")]
        id: u32,
        #[arg(long, value_enum)]
        status: ClaimStatus,
        #[arg(long, help = "Admin notes")]
        notes: Option<String>,
    },
}

#[derive(Parser)]
struct ConfigArgs {
    #[command(subcommand)]
    action: ConfigAction,
}

#[derive(Subcommand)]
enum ConfigAction {
    List,
    Get { key: String },
    Set { key: String, value: String },
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warranty_countdown=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let format = cli.format;

    let config = config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "could not load config, using defaults");
        config::Config::default()
    });

    match cli.command {
        Commands::Expiry {
            purchased,
            duration,
            unit,
        } => commands::calc::expiry(&purchased, duration, unit, format)?,
        Commands::Countdown {
            expires,
            purchased,
            duration,
            unit,
        } => {
            let target = match (expires, purchased, duration, unit) {
                (Some(ts), _, _, _) => CountdownTarget::Expires(ts),
                (None, Some(purchased), Some(duration), Some(unit)) => CountdownTarget::Term {
                    purchased,
                    duration,
                    unit,
                },
                _ => anyhow::bail!("Provide --expires or --purchased with --duration and --unit"),
            };
            commands::calc::countdown(target, format)?;
        }
        Commands::Sale(args) => match args.action {
            SaleAction::Record {
                scooter,
                serial,
                customer,
                email,
                phone,
                motor,
                chassis,
                purchased,
                duration,
                unit,
            } => commands::sale::record(
                &config,
                RecordArgs {
                    scooter,
                    serial,
                    motor,
                    chassis,
                    customer,
                    email,
                    phone,
                    purchased,
                    duration,
                    unit,
                },
                format,
            )?,
            SaleAction::List { status, search } => {
                commands::sale::list(&config, status, search.as_deref(), format)?
            }
            SaleAction::Check { identifier } => {
                commands::sale::check(&config, &identifier, format)?
            }
            SaleAction::Show { id } => commands::sale::show(&config, id, format)?,
        },
        Commands::Claim(args) => match args.action {
            ClaimAction::Open {
                sale_id,
                claim_type,
                description,
            } => commands::claim::open(&config, sale_id, &claim_type, &description, format)?,
            ClaimAction::List => commands::claim::list(&config, format)?,
            ClaimAction::Update { id, status, notes } => {
                commands::claim::update(&config, id, status, notes, format)?
            }
        },
        Commands::Config(args) => match args.action {
            ConfigAction::List => commands::config::list(&config)?,
            ConfigAction::Get { key } => commands::config::get(&key, &config)?,
            ConfigAction::Set { key, value } => commands::config::set(&key, &value)?,
        },
    }

    Ok(())
}
