use clap::Parser;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

mod catalog;
mod commands;
mod output;

use catalog::{CatalogError, CatalogFile};
use commands::Command;

/// Environment variable name for the catalog path
const TLF_CATALOG_ENV: &str = "TLF_CATALOG";

/// tlf - Filters for remote task lists
#[derive(Parser)]
#[command(name = "tlf")]
#[command(version = "0.1.0")]
#[command(about = "Filters for remote task lists", long_about = None)]
struct Args {
    /// Path to the catalog file (can also be set via TLF_CATALOG env var)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Option<Command>,
}

/// Get the catalog path from command line, environment variable, or default.
///
/// Priority:
/// 1. Command line --catalog argument
/// 2. TLF_CATALOG environment variable (if non-empty)
/// 3. Default path (<config dir>/tasklists/catalog.json)
fn resolve_catalog_path(cli_catalog: Option<PathBuf>) -> PathBuf {
    if let Some(path) = cli_catalog {
        return path;
    }

    if let Ok(env_path) = std::env::var(TLF_CATALOG_ENV)
        && !env_path.is_empty()
    {
        return PathBuf::from(env_path);
    }

    CatalogFile::default_path()
}

/// Initialize logging from the RUST_LOG environment variable
///
/// Examples:
/// - `RUST_LOG=trace` - show all trace logs
/// - `RUST_LOG=tasklists_core=debug` - show core debug logs
/// - unset - show warnings and errors only
fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_logging();

    if let Err(e) = run_app() {
        eprintln!("error: {}", e.full_message());
        process::exit(1);
    }
}

/// Main application logic - separated for testability
fn run_app() -> Result<(), CatalogError> {
    let args = Args::parse();
    let output = run_with_args(&args)?;
    println!("{}", output);
    Ok(())
}

/// Run the application with the given arguments, returning what to print
fn run_with_args(args: &Args) -> Result<String, CatalogError> {
    let catalog_path = resolve_catalog_path(args.catalog.clone());
    let service = CatalogFile::load(&catalog_path)?.into_service();

    match &args.command {
        Some(cmd) => cmd.execute(&service),
        None => Ok("Welcome to tlf!\nUse 'tlf --help' for usage information.".to_string()),
    }
}
