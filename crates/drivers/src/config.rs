use std::path::PathBuf;

use listing_audit_adapters::resolve_database_path;
use listing_audit_application::ApplicationError;
use listing_audit_domain::{MalformedImagePolicy, DEFAULT_SAMPLE_LIMIT};
use tracing::Level;

use crate::Cli;

pub const DEFAULT_DATABASE_PATH: &str = "listings.sqlite3";

/// Where the migration progress figures come from, if anywhere.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SnapshotSource {
    #[default]
    None,
    Legacy,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub policy: MalformedImagePolicy,
    pub sample_limit: usize,
    pub snapshot: SnapshotSource,
    pub verbose: bool,
    pub json_logs: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            policy: MalformedImagePolicy::Skip,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
            snapshot: SnapshotSource::None,
            verbose: false,
            json_logs: false,
        }
    }
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Result<Self, ApplicationError> {
        if cli.sample_size == 0 {
            return Err(ApplicationError::InvalidInput(
                "--sample-size must be at least 1".to_string(),
            ));
        }

        let database_path = cli
            .database
            .or(cli.database_url)
            .map(|raw| resolve_database_path(&raw))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE_PATH));

        let snapshot = match (cli.snapshot, cli.legacy_snapshot) {
            (Some(path), _) => SnapshotSource::File(path),
            (None, true) => SnapshotSource::Legacy,
            (None, false) => SnapshotSource::None,
        };

        Ok(Self {
            database_path,
            policy: if cli.strict {
                MalformedImagePolicy::FailFast
            } else {
                MalformedImagePolicy::Skip
            },
            sample_limit: cli.sample_size,
            snapshot,
            verbose: cli.verbose,
            json_logs: cli.json_logs,
        })
    }

    pub fn log_level(&self) -> Level {
        if self.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        }
    }
}
