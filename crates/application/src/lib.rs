mod error;
mod ports;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::PropertyRepository;
pub use service::AuditService;
pub use use_cases::AuditImagesCommand;
