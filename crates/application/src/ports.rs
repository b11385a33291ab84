use listing_audit_domain::PropertyRecord;

use crate::ApplicationError;

/// Read side of the listing store.
pub trait PropertyRepository {
    /// Every property whose `active` flag is set, in storage order.
    fn fetch_active_properties(&self) -> Result<Vec<PropertyRecord>, ApplicationError>;
}
