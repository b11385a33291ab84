use std::fmt::{Display, Formatter};

use crate::{ClassifiedProperty, DomainError, PropertyRecord};

pub const DEFAULT_SAMPLE_LIMIT: usize = 10;

/// What to do with a record whose image payload cannot be parsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedImagePolicy {
    /// Count the record as having no images and keep going.
    #[default]
    Skip,
    /// Abort the whole audit on the first unreadable payload.
    FailFast,
}

/// Records split by whether they carry at least one image, input order kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCoverage {
    pub with_images: Vec<ClassifiedProperty>,
    pub without_images: Vec<ClassifiedProperty>,
}

impl ImageCoverage {
    pub fn classify(
        records: Vec<PropertyRecord>,
        policy: MalformedImagePolicy,
    ) -> Result<Self, DomainError> {
        let mut coverage = Self::default();

        for record in records {
            let classified = ClassifiedProperty::from_record(record);
            if let (MalformedImagePolicy::FailFast, Some(error)) =
                (policy, &classified.malformed_images)
            {
                return Err(DomainError::MalformedImageData {
                    property_id: classified.record.id.to_string(),
                    reason: error.to_string(),
                });
            }

            if classified.has_images() {
                coverage.with_images.push(classified);
            } else {
                coverage.without_images.push(classified);
            }
        }

        Ok(coverage)
    }

    /// Records whose payload was unreadable. They only ever land in
    /// `without_images`.
    pub fn malformed(&self) -> impl Iterator<Item = &ClassifiedProperty> {
        self.without_images
            .iter()
            .filter(|property| property.malformed_images.is_some())
    }

    pub fn aggregate(&self, sample_limit: usize) -> Result<CoverageReport, DomainError> {
        if sample_limit == 0 {
            return Err(DomainError::InvalidSampleLimit(sample_limit));
        }

        let with_count = self.with_images.len();
        let without_count = self.without_images.len();
        let total_count = with_count + without_count;
        let total_images: usize = self
            .with_images
            .iter()
            .map(|property| property.image_count)
            .sum();

        let featured_with_images = count_featured(&self.with_images);
        let featured_without_images = count_featured(&self.without_images);

        Ok(CoverageReport {
            total_count,
            with_images_count: with_count,
            without_images_count: without_count,
            completion_percent: completion_percent(with_count, total_count),
            featured_with_images,
            featured_without_images,
            total_featured: featured_with_images + featured_without_images,
            total_images,
            average_images: OneDecimal::ratio(total_images, with_count),
            sample_without_images: self
                .without_images
                .iter()
                .take(sample_limit)
                .map(|property| property.record.clone())
                .collect(),
            remaining_without_images: without_count.saturating_sub(sample_limit),
            malformed_records: self.malformed().count(),
        })
    }
}

fn count_featured(properties: &[ClassifiedProperty]) -> usize {
    properties
        .iter()
        .filter(|property| property.record.featured)
        .count()
}

/// Share of `part` in `total` as a whole percentage, rounded half up.
/// An empty total is 0%.
pub fn completion_percent(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let part = part.min(total) as u64;
    let total = total as u64;
    ((200 * part + total) / (2 * total)) as u8
}

/// A non-negative value rounded half up to one decimal place, held as tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OneDecimal(u64);

impl OneDecimal {
    pub fn from_tenths(tenths: u64) -> Self {
        Self(tenths)
    }

    /// `numerator / denominator`, or `None` when the denominator is zero.
    pub fn ratio(numerator: usize, denominator: usize) -> Option<Self> {
        if denominator == 0 {
            return None;
        }
        let numerator = numerator as u64;
        let denominator = denominator as u64;
        Some(Self((20 * numerator + denominator) / (2 * denominator)))
    }
}

impl Display for OneDecimal {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

/// Image coverage statistics for one audit run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverageReport {
    pub total_count: usize,
    pub with_images_count: usize,
    pub without_images_count: usize,
    pub completion_percent: u8,
    pub featured_with_images: usize,
    pub featured_without_images: usize,
    pub total_featured: usize,
    pub total_images: usize,
    /// `None` when no property has images.
    pub average_images: Option<OneDecimal>,
    pub sample_without_images: Vec<PropertyRecord>,
    pub remaining_without_images: usize,
    pub malformed_records: usize,
}
