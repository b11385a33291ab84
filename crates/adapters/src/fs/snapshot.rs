use std::fs;
use std::path::Path;

use listing_audit_application::ApplicationError;
use listing_audit_domain::{DomainError, MigrationSnapshot};

/// Reads a migration snapshot from a JSON file and checks it is consistent.
pub fn load_migration_snapshot(path: &Path) -> Result<MigrationSnapshot, ApplicationError> {
    let raw = fs::read_to_string(path).map_err(|error| {
        ApplicationError::Io(format!(
            "failed to read snapshot {}: {error}",
            path.display()
        ))
    })?;

    let snapshot: MigrationSnapshot = serde_json::from_str(&raw).map_err(|error| {
        DomainError::InvalidSnapshot(format!("{}: {error}", path.display()))
    })?;
    snapshot.validate()?;

    Ok(snapshot)
}
