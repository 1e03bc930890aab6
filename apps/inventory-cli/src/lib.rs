//! # Inventory CLI Library
//!
//! Argument parsing, startup and command dispatch for the `inventory` binary.
//!
//! ## Module Organization
//! ```text
//! inventory_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── config.rs       ◄─── Database path resolution
//! ├── commands/       ◄─── list, show, add, edit, sell, delete, watch, seed
//! └── error.rs        ◄─── CLI error type and exit codes
//! ```
//!
//! ## Startup Sequence
//! 1. Initialize tracing (stderr)
//! 2. Parse arguments
//! 3. Resolve the database path
//! 4. Build the container; the first repository access opens the database
//! 5. Run the command
//! 6. Close the pool

pub mod commands;
pub mod config;
pub mod error;

use clap::Parser;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use inventory_db::{AppContainer, AppDataContainer};

use commands::{Command, Printer};
use config::CliConfig;
use error::CliResult;

/// Track items, prices and stock in a local database.
#[derive(Debug, Parser)]
#[command(name = "inventory", version, about)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, global = true, env = config::DB_PATH_ENV)]
    pub db: Option<PathBuf>,

    /// Print JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Runs the CLI and maps the outcome to an exit code.
pub async fn run() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let stdout = std::io::stdout().lock();

    match execute_cli(cli, stdout, shutdown_signal()).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "Command failed");
            eprintln!("error: {err}");
            ExitCode::from(err.code() as u8)
        }
    }
}

/// Opens the configured database, runs one command and closes the pool.
///
/// Returns the writer so callers (and tests) can inspect the output.
pub async fn execute_cli<W: Write>(
    cli: Cli,
    out: W,
    shutdown: impl std::future::Future<Output = ()>,
) -> CliResult<W> {
    let config = CliConfig::resolve(cli.db, cli.json)?;
    info!(path = %config.database_path.display(), "Using database");

    let container = AppDataContainer::new(config.db_config());
    let repo = container.items_repository().await?;

    let mut printer = Printer::new(out, config.json);
    let result = commands::execute(cli.command, repo.as_ref(), &mut printer, shutdown).await;

    if let Ok(db) = container.database().await {
        db.close().await;
    }

    result?;
    printer.flush()?;
    Ok(printer.into_inner())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=inventory=trace` - Trace the inventory crates only
/// - Default: warnings only, so command output stays clean
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves on Ctrl-C. If the handler cannot be installed, never resolves.
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
