use listing_audit_domain::{MalformedImagePolicy, DEFAULT_SAMPLE_LIMIT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditImagesCommand {
    pub policy: MalformedImagePolicy,
    pub sample_limit: usize,
}

impl Default for AuditImagesCommand {
    fn default() -> Self {
        Self {
            policy: MalformedImagePolicy::Skip,
            sample_limit: DEFAULT_SAMPLE_LIMIT,
        }
    }
}
