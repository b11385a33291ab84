mod coverage;
mod error;
mod property;
mod snapshot;

pub use coverage::{
    completion_percent, CoverageReport, ImageCoverage, MalformedImagePolicy, OneDecimal,
    DEFAULT_SAMPLE_LIMIT,
};
pub use error::DomainError;
pub use property::{
    parse_image_list, ClassifiedProperty, ImagePayload, ImagePayloadError, PropertyId,
    PropertyRecord,
};
pub use snapshot::{
    MigrationSnapshot, LEGACY_DOWNLOADED_FOLDERS, LEGACY_EXPECTED_FOLDERS,
    LEGACY_LAST_MIGRATION_UPDATES, LEGACY_MAPPED_FOLDERS, LEGACY_RECORDED_AT,
};
