use listing_audit_domain::{CoverageReport, MigrationSnapshot};

const RULE_WIDTH: usize = 80;

/// Lays out the coverage report as console lines.
///
/// Migration figures only appear when a snapshot is supplied, labelled with
/// the time they were recorded.
pub fn present_coverage_report(
    report: &CoverageReport,
    snapshot: Option<&MigrationSnapshot>,
) -> Vec<String> {
    let mut lines = vec![
        "PROPERTY IMAGE STATUS ANALYSIS".to_string(),
        "=".repeat(RULE_WIDTH),
        format!("TOTAL PROPERTIES: {}", report.total_count),
        format!("WITH IMAGES: {}", report.with_images_count),
        format!("WITHOUT IMAGES: {}", report.without_images_count),
        format!("COMPLETION: {}%", report.completion_percent),
    ];

    section(&mut lines, "FEATURED PROPERTIES:");
    lines.push(format!(
        "Featured with images: {} of {}",
        report.featured_with_images, report.total_featured
    ));
    lines.push(format!(
        "Featured without images: {} of {}",
        report.featured_without_images, report.total_featured
    ));

    section(&mut lines, "IMAGE STATISTICS:");
    lines.push(format!("Total images uploaded: {}", report.total_images));
    lines.push(format!(
        "Average images per property: {}",
        present_average(report)
    ));

    if report.malformed_records > 0 {
        section(&mut lines, "DATA QUALITY:");
        lines.push(format!(
            "Properties with unreadable image data (counted as no images): {}",
            report.malformed_records
        ));
    }

    if let Some(snapshot) = snapshot {
        section(
            &mut lines,
            &format!("MIGRATION STATUS (recorded {}):", snapshot.recorded_at),
        );
        lines.push(format!(
            "Folders downloaded: {} of {} expected",
            snapshot.downloaded_folders, snapshot.expected_folders
        ));
        lines.push(format!(
            "Missing folders: {} folders",
            snapshot.missing_folders()
        ));
        lines.push(format!(
            "Properties mapped: {} of {} folders",
            snapshot.mapped_folders, snapshot.downloaded_folders
        ));
        lines.push(format!(
            "Unmapped folders: {} folders",
            snapshot.unmapped_folders()
        ));
    }

    section(&mut lines, "BREAKDOWN:");
    if let Some(snapshot) = snapshot {
        lines.push(format!(
            "- Properties updated in last migration: {}",
            snapshot.last_migration_updates
        ));
        lines.push(format!(
            "- Properties that already had images: {}",
            snapshot.already_had_images(report.with_images_count)
        ));
    }
    lines.push(format!(
        "- Properties still needing images: {}",
        report.without_images_count
    ));
    if let Some(snapshot) = snapshot {
        lines.push(format!(
            "- Folders not yet downloaded: {}",
            snapshot.missing_folders()
        ));
    }

    section(&mut lines, "SAMPLE PROPERTIES WITHOUT IMAGES:");
    if report.sample_without_images.is_empty() {
        lines.push("  (none)".to_string());
    }
    for (index, property) in report.sample_without_images.iter().enumerate() {
        lines.push(format!(
            "  {}. {} ({})",
            index + 1,
            property.title,
            property.slug
        ));
    }
    if report.remaining_without_images > 0 {
        lines.push(format!(
            "  ... and {} more properties",
            report.remaining_without_images
        ));
    }

    section(&mut lines, "NEXT STEPS:");
    if report.without_images_count == 0 {
        lines.push("All properties have images! Migration complete!".to_string());
        return lines;
    }

    let mut steps = Vec::new();
    if let Some(snapshot) = snapshot {
        steps.push(format!(
            "Download remaining {} folders",
            snapshot.missing_folders()
        ));
        steps.push("Run migration again for new folders".to_string());
    }
    steps.push(format!(
        "{} properties still need images",
        report.without_images_count
    ));
    for (index, step) in steps.into_iter().enumerate() {
        lines.push(format!("{}. {step}", index + 1));
    }

    lines
}

/// One decimal place, or a bare `0` when no property has images.
fn present_average(report: &CoverageReport) -> String {
    report
        .average_images
        .map_or_else(|| "0".to_string(), |average| average.to_string())
}

fn section(lines: &mut Vec<String>, heading: &str) {
    lines.push(String::new());
    lines.push(heading.to_string());
}
