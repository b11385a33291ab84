//! `listing-audit` reports how many active property listings have photos.
//!
//! It reads the listing database once, prints the coverage report on stdout
//! and exits 0. A failed fetch prints an error and exits 1; bad arguments
//! exit 2.

mod config;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use config::{AppConfig, SnapshotSource};
use listing_audit_adapters::{
    load_migration_snapshot, present_coverage_report, SqlitePropertyRepository,
};
use listing_audit_application::{ApplicationError, AuditImagesCommand, AuditService};
use listing_audit_domain::{MigrationSnapshot, DEFAULT_SAMPLE_LIMIT};
use tracing::{debug, error, warn, Level};

#[derive(Debug, Parser)]
#[command(name = "listing-audit")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Report image coverage of active property listings", long_about = None)]
pub struct Cli {
    /// Listing database file (a `file:` URL is accepted)
    #[arg(long, env = "LISTING_AUDIT_DATABASE")]
    database: Option<String>,

    #[arg(long, env = "DATABASE_URL", hide = true)]
    database_url: Option<String>,

    /// Abort on the first property whose image data cannot be parsed
    #[arg(long)]
    strict: bool,

    /// How many properties without images to list
    #[arg(long, default_value_t = DEFAULT_SAMPLE_LIMIT)]
    sample_size: usize,

    /// JSON file with recorded migration progress figures
    #[arg(long, conflicts_with = "legacy_snapshot")]
    snapshot: Option<PathBuf>,

    /// Show the frozen migration figures from the last manual count
    #[arg(long)]
    legacy_snapshot: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long)]
    json_logs: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = match AppConfig::from_cli(cli) {
        Ok(config) => config,
        Err(error) => {
            eprintln!("Error: {error}");
            return ExitCode::from(2);
        }
    };
    logging::init_logging(config.json_logs, config.log_level());

    match run(&config) {
        Ok(lines) => {
            for line in lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            log_failure(&config, &error);
            eprintln!("Error: {error}");
            if error.is_usage() {
                ExitCode::from(2)
            } else {
                ExitCode::from(1)
            }
        }
    }
}

/// Runs one audit and returns the report lines.
///
/// Nothing is returned for printing unless the whole audit succeeded.
fn run(config: &AppConfig) -> Result<Vec<String>, ApplicationError> {
    let snapshot = match &config.snapshot {
        SnapshotSource::None => None,
        SnapshotSource::Legacy => Some(MigrationSnapshot::legacy()),
        SnapshotSource::File(path) => Some(load_migration_snapshot(path)?),
    };

    let repository = SqlitePropertyRepository::connect(&config.database_path)?;
    let outcome = AuditService::new(&repository).audit_images(AuditImagesCommand {
        policy: config.policy,
        sample_limit: config.sample_limit,
    });
    if let Err(error) = repository.close() {
        warn!(%error, "listing database was not released cleanly");
    }
    let report = outcome?;

    Ok(present_coverage_report(&report, snapshot.as_ref()))
}

/// The `Error:` line on stderr is what operators read; the tracing event
/// only surfaces as an error when logs are collected as JSON.
fn failure_log_level(config: &AppConfig) -> Level {
    if config.json_logs {
        Level::ERROR
    } else {
        Level::DEBUG
    }
}

fn log_failure(config: &AppConfig, error: &ApplicationError) {
    if failure_log_level(config) == Level::ERROR {
        error!(%error, "image audit failed");
    } else {
        debug!(%error, "image audit failed");
    }
}
