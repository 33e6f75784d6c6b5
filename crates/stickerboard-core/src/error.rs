//! Error types for editing and payload handling.

use crate::element::ElementId;
use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors raised by the document model and the serialization gateway.
#[derive(Debug, Error)]
pub enum EditorError {
    /// An operation addressed an element that is not in the document.
    #[error("Element not found: {0}")]
    InvalidElementReference(ElementId),

    /// A design payload could not be turned into a document.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

impl EditorError {
    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedPayload(msg.into())
    }
}

impl From<serde_json::Error> for EditorError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
