//! Creation stores: where saved designs live between sessions.

mod file;
mod memory;

pub use file::FileStorage;
pub use memory::MemoryStorage;

use crate::persistence::{CreationId, InvalidRequest, SaveRequest, StoredCreation};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Creation not found: {0}")]
    NotFound(CreationId),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),
    #[error("Storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A backend holding stored creations.
///
/// The store assigns ids, counters and timestamps; callers only ever hand
/// it a [`SaveRequest`].
pub trait Storage: Send + Sync {
    /// Validate and store a request on behalf of `author`.
    fn save(
        &self,
        author: &str,
        request: SaveRequest,
    ) -> BoxFuture<'_, StorageResult<StoredCreation>>;

    /// Load a stored creation.
    fn load(&self, id: CreationId) -> BoxFuture<'_, StorageResult<StoredCreation>>;

    /// Delete a creation. Deleting a missing id is not an error.
    fn delete(&self, id: CreationId) -> BoxFuture<'_, StorageResult<()>>;

    /// List all creation ids, sorted.
    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<CreationId>>>;

    /// Check if a creation exists.
    fn exists(&self, id: CreationId) -> BoxFuture<'_, StorageResult<bool>>;
}

/// Shared checks and record construction for every backend.
fn new_record(author: &str, request: SaveRequest) -> StorageResult<StoredCreation> {
    request.validate()?;
    StoredCreation::from_request(author, request)
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

#[cfg(test)]
pub(crate) fn sample_request(title: &str) -> SaveRequest {
    let mut editor = crate::editor::Editor::new();
    editor.add_emoji("🎈");
    editor.save_request(title, Some("party card".to_string()), "data:image/png;base64,AAAA", true)
}
