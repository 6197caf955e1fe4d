use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use slot_engine::time::{parse_calendar_date, parse_wall_clock_datetime};
use slot_engine::{availability, is_date_disabled, Booking, Provider, Slot};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "slots",
    about = "Print the bookable slots of a provider for one day",
    version
)]
struct Cli {
    /// Snapshot JSON `{ "provider": ..., "bookings": [...] }` (use - for stdin)
    #[arg(short, long)]
    input: PathBuf,

    /// Calendar date to compute (YYYY-MM-DD)
    #[arg(short, long, value_parser = parse_date_arg)]
    date: NaiveDate,

    /// Service id (defaults to the provider's first active service)
    #[arg(short, long)]
    service: Option<u64>,

    /// Current wall-clock time (YYYY-MM-DDTHH:MM[:SS]); defaults to the local clock
    #[arg(long, value_parser = parse_now_arg)]
    now: Option<NaiveDateTime>,

    /// Only print slots that can still be booked
    #[arg(long)]
    available_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Log engine decisions to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Table,
}

#[derive(Debug, Deserialize)]
struct Snapshot {
    provider: Provider,
    #[serde(default)]
    bookings: Vec<Booking>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let snapshot = read_snapshot(&cli.input)?;
    let provider = &snapshot.provider;

    let service = match cli.service {
        Some(id) => provider
            .service(id)
            .with_context(|| format!("provider {} has no service {id}", provider.id))?,
        None => match provider.default_service() {
            Some(service) => service,
            None => bail!("provider {} has no active service", provider.id),
        },
    };

    let now = cli.now.unwrap_or_else(|| Local::now().naive_local());
    if is_date_disabled(cli.date, now.date()) {
        bail!("date {} is in the past (today is {})", cli.date, now.date());
    }
    debug!(date = %cli.date, service = service.id, %now, "computing slots");

    let mut slots = availability(cli.date, provider, service, &snapshot.bookings, now)
        .with_context(|| format!("failed to compute slots for {}", cli.date))?;
    if cli.available_only {
        slots.retain(|s| s.available);
    }

    match cli.format {
        Format::Json => {
            let output =
                serde_json::to_string_pretty(&slots).context("failed to serialize slots")?;
            println!("{output}");
        }
        Format::Table => print!("{}", render_table(&slots)),
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("slot_engine=debug,slots=debug,warn"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn read_snapshot(path: &Path) -> Result<Snapshot> {
    let raw = if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?
    };
    serde_json::from_str(&raw).context("invalid snapshot JSON")
}

fn render_table(slots: &[Slot]) -> String {
    let mut out = String::new();
    for slot in slots {
        let state = if slot.available { "free" } else { "busy" };
        out.push_str(&format!("{}-{}  {state}", slot.start, slot.end));
        if slot.is_booked() {
            if let Some(client) = slot.client_label.as_deref().filter(|c| !c.is_empty()) {
                out.push_str(&format!("  {client}"));
            }
        }
        out.push('\n');
    }
    out
}

fn parse_date_arg(s: &str) -> std::result::Result<NaiveDate, String> {
    parse_calendar_date(s).map_err(|e| e.to_string())
}

fn parse_now_arg(s: &str) -> std::result::Result<NaiveDateTime, String> {
    parse_wall_clock_datetime(s).map_err(|e| e.to_string())
}
