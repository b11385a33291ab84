use serde::{Deserialize, Serialize};

use crate::DomainError;

/// Folder counts from the photo-folder migration as they stood when the
/// migration tracking was last done by hand. These never change with the
/// database and are only shown when explicitly requested.
pub const LEGACY_RECORDED_AT: &str = "legacy (frozen, not derived from the database)";
pub const LEGACY_EXPECTED_FOLDERS: u64 = 348;
pub const LEGACY_DOWNLOADED_FOLDERS: u64 = 115;
pub const LEGACY_MAPPED_FOLDERS: u64 = 92;
pub const LEGACY_LAST_MIGRATION_UPDATES: u64 = 38;

/// Progress figures of the out-of-band image migration, supplied by the
/// operator together with the moment they were recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationSnapshot {
    pub recorded_at: String,
    pub expected_folders: u64,
    pub downloaded_folders: u64,
    pub mapped_folders: u64,
    pub last_migration_updates: u64,
}

impl MigrationSnapshot {
    pub fn legacy() -> Self {
        Self {
            recorded_at: LEGACY_RECORDED_AT.to_string(),
            expected_folders: LEGACY_EXPECTED_FOLDERS,
            downloaded_folders: LEGACY_DOWNLOADED_FOLDERS,
            mapped_folders: LEGACY_MAPPED_FOLDERS,
            last_migration_updates: LEGACY_LAST_MIGRATION_UPDATES,
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.recorded_at.trim().is_empty() {
            return Err(DomainError::InvalidSnapshot(
                "recorded_at must not be empty".to_string(),
            ));
        }
        if self.downloaded_folders > self.expected_folders {
            return Err(DomainError::InvalidSnapshot(format!(
                "downloaded folders ({}) exceed expected folders ({})",
                self.downloaded_folders, self.expected_folders
            )));
        }
        if self.mapped_folders > self.downloaded_folders {
            return Err(DomainError::InvalidSnapshot(format!(
                "mapped folders ({}) exceed downloaded folders ({})",
                self.mapped_folders, self.downloaded_folders
            )));
        }
        Ok(())
    }

    pub fn missing_folders(&self) -> u64 {
        self.expected_folders.saturating_sub(self.downloaded_folders)
    }

    pub fn unmapped_folders(&self) -> u64 {
        self.downloaded_folders.saturating_sub(self.mapped_folders)
    }

    /// Properties with images that predate the last migration run.
    pub fn already_had_images(&self, with_images: usize) -> u64 {
        (with_images as u64).saturating_sub(self.last_migration_updates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_snapshot_keeps_the_frozen_figures() {
        let legacy = MigrationSnapshot::legacy();
        assert!(legacy.validate().is_ok());
        assert_eq!(legacy.missing_folders(), 233);
        assert_eq!(legacy.unmapped_folders(), 23);
        assert_eq!(legacy.already_had_images(50), 12);
        assert_eq!(legacy.already_had_images(10), 0);
    }

    #[test]
    fn validate_rejects_inconsistent_counts() {
        let snapshot = MigrationSnapshot {
            recorded_at: "2026-10-01".to_string(),
            expected_folders: 10,
            downloaded_folders: 12,
            mapped_folders: 0,
            last_migration_updates: 0,
        };
        assert!(matches!(
            snapshot.validate(),
            Err(DomainError::InvalidSnapshot(_))
        ));

        let snapshot = MigrationSnapshot {
            downloaded_folders: 5,
            mapped_folders: 6,
            ..snapshot
        };
        assert!(matches!(
            snapshot.validate(),
            Err(DomainError::InvalidSnapshot(_))
        ));
    }

    #[test]
    fn validate_requires_a_timestamp() {
        let snapshot = MigrationSnapshot {
            recorded_at: " ".to_string(),
            ..MigrationSnapshot::legacy()
        };
        assert!(snapshot.validate().is_err());
    }
}
