//! # fleet - Fleet management CLI
//!
//! This is the entry point that wires everything together.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  main.rs (this file) - Wiring                                │
//! │    │                                                         │
//! │    ├── Resolves: FleetConfig (--db > --config > DB_PATH)     │
//! │    ├── Creates: SqliteFleetDatabase (adapter)                │
//! │    ├── Creates: StorageFleetRepository (adapter)             │
//! │    └── Runs: one Command through its use case handler        │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage:
//!   fleet create <userId>
//!   fleet register-vehicle <fleetId> <plateNumber> <vehicleType>
//!   fleet localize-vehicle <fleetId> <plateNumber> <lat> <lng> [altitude]
//!   fleet info <fleetId>
//!   fleet locate <fleetId> <plateNumber>
//!   fleet fleets <userId>

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console::style;
use fleet_adapter::{SqliteFleetDatabase, StorageFleetRepository};
use fleet_app::{Command, FleetConfig};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fleet")]
#[command(about = "Fleet management CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// SQLite database file (`:memory:` for a throwaway one)
    #[arg(long, global = true, value_name = "PATH")]
    db: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {}", style("Error:").red().bold().for_stderr(), describe(&err));
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = FleetConfig::resolve(cli.db, cli.config.as_deref())?;
    debug!(db_path = %config.db_path.display(), "configuration resolved");

    let database = SqliteFleetDatabase::open(&config.db_path).with_context(|| {
        format!(
            "failed to open fleet database at {}",
            config.db_path.display()
        )
    })?;
    let mut repository = StorageFleetRepository::new(database);

    let report = cli.command.run(&mut repository)?;
    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report);
    }
    Ok(())
}

/// One-line message: the error followed by causes it does not already spell out
fn describe(err: &anyhow::Error) -> String {
    let mut message = err.to_string();
    for cause in err.chain().skip(1) {
        let cause = cause.to_string();
        if !message.contains(&cause) {
            message.push_str(": ");
            message.push_str(&cause);
        }
    }
    message
}
