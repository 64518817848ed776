use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod commands;
mod output;
mod search_store;

use commands::Command;
use veranda_db::{Database, DbError};

/// Environment variable name for the database path
const VRD_DB_PATH_ENV: &str = "VRD_DB_PATH";

/// Veranda - A property listings CLI tool
#[derive(Parser)]
#[command(name = "vrd")]
#[command(version = "0.1.0")]
#[command(about = "A property listings CLI tool", long_about = None)]
struct Args {
    /// Path to the database directory (can also be set via VRD_DB_PATH env var)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Get the database path from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --db argument
/// 2. VRD_DB_PATH environment variable (if non-empty)
/// 3. Default path (~/.vrd/data)
fn resolve_db_path(cli_db: Option<PathBuf>) -> DbResult<PathBuf> {
    // First priority: explicit command line argument
    if let Some(path) = cli_db {
        return Ok(path);
    }

    // Second priority: environment variable (if set and non-empty)
    if let Ok(env_path) = std::env::var(VRD_DB_PATH_ENV)
        && !env_path.is_empty()
    {
        return Ok(PathBuf::from(env_path));
    }

    // Third priority: default path
    Database::default_path()
}

use veranda_db::DbResult;

/// Initialize logging based on DEBUGGING environment variable
///
/// Examples:
/// - `DEBUGGING=trace` - show all trace logs
/// - `DEBUGGING=debug` - show debug and above
/// - `DEBUGGING=info` - show info and above
/// - `DEBUGGING=warn` - show warn and above
/// - `DEBUGGING=error` - show error only
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .init();
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run_app().await {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
async fn run_app() -> Result<(), DbError> {
    let args = Args::parse();
    run_with_args(&args).await
}

/// Run the application with the given arguments
async fn run_with_args(args: &Args) -> Result<(), DbError> {
    // Determine database path using priority: CLI arg > env var > default
    let db_path = resolve_db_path(args.db.clone())?;

    // Initialize database connection
    let db = Database::connect(&db_path).await?;

    // Initialize database schema
    db.init().await?;

    // Run the command or show welcome message
    match &args.command {
        Some(cmd) => {
            let result = cmd.execute(&db).await?;
            println!("{}", result);
        }
        None => {
            println!("Welcome to Veranda!");
            println!("Use 'vrd --help' for usage information.");
        }
    }

    Ok(())
}
