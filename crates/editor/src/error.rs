//! Editor session errors.

use pagecraft_core::ServiceError;
use thiserror::Error;

/// Errors returned by editor session handlers.
///
/// Every handler also records a flash message, so callers may ignore the
/// error and render the flash instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditorError {
    /// The configuration service call failed.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// The operation needs a loaded document.
    #[error("no configuration loaded")]
    NotLoaded,

    /// The edited slot does not exist in the document.
    #[error("unknown slot: {0}")]
    UnknownSlot(String),
}

/// Result type alias for editor handlers.
pub type EditorResult<T> = Result<T, EditorError>;
