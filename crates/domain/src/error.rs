use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("property id must not be blank")]
    InvalidPropertyId,
    #[error("malformed image data for property {property_id}: {reason}")]
    MalformedImageData { property_id: String, reason: String },
    #[error("sample limit must be at least 1, got {0}")]
    InvalidSampleLimit(usize),
    #[error("invalid migration snapshot: {0}")]
    InvalidSnapshot(String),
}
