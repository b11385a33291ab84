use listing_audit_domain::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("data access error: {0}")]
    DataAccess(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("io error: {0}")]
    Io(String),
}

impl ApplicationError {
    /// Errors caused by what the operator asked for rather than by the data.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_) | Self::Domain(DomainError::InvalidSampleLimit(_))
        )
    }
}
