//! `stay` CLI — query reserved and available periods of an apartment.
//!
//! ## Usage
//!
//! ```sh
//! # Who stays in apartment 7 during January (trimmed to the window)
//! stay reserved -i reservations.json --apartment 7 --from 2024-01-01 --to 2024-02-01
//!
//! # Free periods of the same window
//! stay available -i reservations.json --apartment 7 --from 2024-01-01 --to 2024-02-01
//!
//! # First free stretch of at least 3 nights, reservations piped on stdin
//! cat reservations.json | stay first-free --apartment 7 --from 2024-01-01 --to 2024-02-01 --min-nights 3
//!
//! # Booked/free night counts
//! STAY_RESERVATIONS=reservations.json stay occupancy --apartment 7 --from 2024-01-01 --to 2024-02-01
//!
//! # Report double bookings
//! stay conflicts -i reservations.json
//! ```
//!
//! Bad dates or a reversed window exit with status 2; other failures with 1.

use std::io::{self, Read};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Serialize;
use stay_engine::{
    find_double_bookings, occupancy, InMemoryStore, QueryWindow, ReservationStore, ResourceId,
    StayError,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "stay",
    version,
    about = "Reserved and available periods of bookable apartments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Reservations JSON file (reads stdin if omitted)
    #[arg(short, long, global = true, env = "STAY_RESERVATIONS")]
    input: Option<String>,

    /// Pretty-print the JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Log more to stderr (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Args)]
struct WindowArgs {
    /// Apartment (resource) id
    #[arg(long)]
    apartment: ResourceId,
    /// First night of the window (YYYY-MM-DD)
    #[arg(long)]
    from: String,
    /// Day after the last night of the window (YYYY-MM-DD)
    #[arg(long)]
    to: String,
}

impl WindowArgs {
    fn window(&self) -> Result<QueryWindow> {
        QueryWindow::parse(self.apartment, &self.from, &self.to)
            .with_context(|| format!("Invalid query window {}..{}", self.from, self.to))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Reservations overlapping the window, trimmed to it
    Reserved {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Free periods within the window
    Available {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// First free period of at least the given number of nights
    FirstFree {
        #[command(flatten)]
        window: WindowArgs,
        /// Minimum number of consecutive free nights
        #[arg(long, default_value_t = 1)]
        min_nights: u32,
    },
    /// Reserved and free periods plus night counts
    Occupancy {
        #[command(flatten)]
        window: WindowArgs,
    },
    /// Report reservations that book the same apartment on the same night
    Conflicts {
        /// Only check this apartment
        #[arg(long)]
        apartment: Option<ResourceId>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            let client_error = err
                .downcast_ref::<StayError>()
                .is_some_and(StayError::is_client_error);
            ExitCode::from(if client_error { 2 } else { 1 })
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    // Validate the window before touching the data source so that bad
    // parameters are reported as such even when the input is also broken.
    let window = match &cli.command {
        Commands::Reserved { window }
        | Commands::Available { window }
        | Commands::FirstFree { window, .. }
        | Commands::Occupancy { window } => Some(window.window()?),
        Commands::Conflicts { .. } => None,
    };

    let store = load_store(cli.input.as_deref())?;

    match (cli.command, window) {
        (Commands::Reserved { .. }, Some(window)) => {
            let reserved = stay_engine::reserved_periods(&store, &window)?;
            debug!(count = reserved.len(), "reserved periods");
            write_json(&reserved, cli.pretty)
        }
        (Commands::Available { .. }, Some(window)) => {
            let available = stay_engine::available_periods(&store, &window)?;
            debug!(count = available.len(), "available periods");
            write_json(&available, cli.pretty)
        }
        (Commands::FirstFree { min_nights, .. }, Some(window)) => {
            let reservations = store.list_reservations_for_resource(window.resource_id)?;
            let gap = stay_engine::first_available_gap(&reservations, &window, min_nights)?;
            write_json(&gap, cli.pretty)
        }
        (Commands::Occupancy { .. }, Some(window)) => {
            let reservations = store.list_reservations_for_resource(window.resource_id)?;
            let summary = occupancy(&reservations, &window)?;
            write_json(&summary, cli.pretty)
        }
        (Commands::Conflicts { apartment }, _) => {
            let reservations = match apartment {
                Some(id) => store.list_reservations_for_resource(id)?,
                None => store.all().cloned().collect(),
            };
            let conflicts = find_double_bookings(&reservations);
            for c in &conflicts {
                warn!(
                    apartment = %c.resource_id,
                    first = %c.first,
                    second = %c.second,
                    nights = c.shared_nights,
                    "double booking"
                );
            }
            write_json(&conflicts, cli.pretty)
        }
        (_, None) => anyhow::bail!("query window missing"),
    }
}

/// Load reservations from a file or stdin. Blank input means no reservations.
fn load_store(path: Option<&str>) -> Result<InMemoryStore> {
    let json = read_input(path)?;
    if json.trim().is_empty() {
        debug!("no reservation data, using an empty store");
        return Ok(InMemoryStore::new());
    }
    let source = path.unwrap_or("stdin");
    InMemoryStore::from_json(&json)
        .with_context(|| format!("Failed to load reservations from {}", source))
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}

fn write_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let out = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    println!("{}", out);
    Ok(())
}
