//! Errors surfaced by slot configuration services.

use thiserror::Error;

use crate::configuration::ValidationError;
use crate::types::{PageType, StoreId};

/// Failure of a configuration service call.
///
/// Every implementation (memory, database, HTTP) reports through this type so
/// callers can react the same way regardless of the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ServiceError {
    /// The request never produced a usable response (network, timeout, 5xx gateway).
    #[error("transport error: {0}")]
    Transport(String),

    /// The requested draft, version, store or default does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The document failed structural checks.
    #[error("invalid configuration: {0}")]
    Validation(String),

    /// The backing store failed.
    #[error("storage error: {0}")]
    Storage(String),
}

impl ServiceError {
    /// No draft exists for the given page.
    #[must_use]
    pub fn no_draft(store_id: StoreId, page_type: PageType) -> Self {
        Self::NotFound(format!("no draft for {page_type} in store {store_id}"))
    }

    /// The given published version does not exist.
    #[must_use]
    pub fn no_version(store_id: StoreId, page_type: PageType, version: u32) -> Self {
        Self::NotFound(format!(
            "no version {version} of {page_type} in store {store_id}"
        ))
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

/// Result type alias for service calls.
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_error_display() {
        let err = ServiceError::NotFound("draft".to_owned());
        assert_eq!(err.to_string(), "not found: draft");
    }

    #[test]
    fn test_validation_error_converts() {
        let err: ServiceError = ValidationError::EmptySlotKey.into();
        assert_eq!(
            err,
            ServiceError::Validation("slot key must not be empty".to_owned())
        );
    }
}
