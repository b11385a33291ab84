use listing_audit_domain::{CoverageReport, ImageCoverage};
use tracing::{info, warn};

use crate::{ApplicationError, AuditImagesCommand, PropertyRepository};

/// Runs audits against a repository the caller keeps ownership of, so the
/// caller decides when the underlying connection is closed.
pub struct AuditService<'a> {
    properties: &'a dyn PropertyRepository,
}

impl<'a> AuditService<'a> {
    pub fn new(properties: &'a dyn PropertyRepository) -> Self {
        Self { properties }
    }

    /// Fetches the active listings once and summarises their image coverage.
    pub fn audit_images(
        &self,
        command: AuditImagesCommand,
    ) -> Result<CoverageReport, ApplicationError> {
        if command.sample_limit == 0 {
            return Err(ApplicationError::InvalidInput(
                "sample size must be at least 1".to_string(),
            ));
        }

        let records = self.properties.fetch_active_properties()?;
        info!(count = records.len(), "fetched active properties");

        let coverage = ImageCoverage::classify(records, command.policy)?;
        for property in coverage.malformed() {
            if let Some(reason) = &property.malformed_images {
                warn!(
                    property_id = %property.record.id,
                    slug = %property.record.slug,
                    %reason,
                    "unreadable image data, counting property as having no images"
                );
            }
        }

        let report = coverage.aggregate(command.sample_limit)?;
        info!(
            total = report.total_count,
            with_images = report.with_images_count,
            without_images = report.without_images_count,
            completion_percent = report.completion_percent,
            malformed = report.malformed_records,
            "image coverage computed"
        );

        Ok(report)
    }
}
