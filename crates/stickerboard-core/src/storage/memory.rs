//! In-memory creation store.

use super::{BoxFuture, Storage, StorageError, StorageResult, new_record};
use crate::persistence::{CreationId, SaveRequest, StoredCreation};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for testing and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    creations: RwLock<HashMap<CreationId, StoredCreation>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {e}"))
}

impl Storage for MemoryStorage {
    fn save(
        &self,
        author: &str,
        request: SaveRequest,
    ) -> BoxFuture<'_, StorageResult<StoredCreation>> {
        let record = new_record(author, request);
        Box::pin(async move {
            let record = record?;
            let mut creations = self.creations.write().map_err(lock_error)?;
            creations.insert(record.id, record.clone());
            log::debug!("stored creation {} in memory", record.id);
            Ok(record)
        })
    }

    fn load(&self, id: CreationId) -> BoxFuture<'_, StorageResult<StoredCreation>> {
        Box::pin(async move {
            let creations = self.creations.read().map_err(lock_error)?;
            creations.get(&id).cloned().ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: CreationId) -> BoxFuture<'_, StorageResult<()>> {
        Box::pin(async move {
            let mut creations = self.creations.write().map_err(lock_error)?;
            creations.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<CreationId>>> {
        Box::pin(async move {
            let creations = self.creations.read().map_err(lock_error)?;
            let mut ids: Vec<_> = creations.keys().copied().collect();
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: CreationId) -> BoxFuture<'_, StorageResult<bool>> {
        Box::pin(async move {
            let creations = self.creations.read().map_err(lock_error)?;
            Ok(creations.contains_key(&id))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::InvalidRequest;
    use crate::storage::sample_request;
    use pollster::block_on;
    use uuid::Uuid;

    #[test]
    fn test_save_and_load() {
        let storage = MemoryStorage::new();
        let saved = block_on(storage.save("ana", sample_request("Balloons"))).unwrap();
        let loaded = block_on(storage.load(saved.id)).unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.title, "Balloons");
        assert_eq!(loaded.like_count, 0);
    }

    #[test]
    fn test_not_found() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load(Uuid::new_v4()));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_rejects_missing_title() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.save("ana", sample_request("")));
        assert!(matches!(
            result,
            Err(StorageError::InvalidRequest(InvalidRequest::MissingTitle))
        ));
        assert!(block_on(storage.list()).unwrap().is_empty());
    }

    #[test]
    fn test_exists_and_delete() {
        let storage = MemoryStorage::new();
        let saved = block_on(storage.save("ana", sample_request("One"))).unwrap();

        assert!(block_on(storage.exists(saved.id)).unwrap());
        block_on(storage.delete(saved.id)).unwrap();
        assert!(!block_on(storage.exists(saved.id)).unwrap());
        block_on(storage.delete(saved.id)).unwrap();
    }

    #[test]
    fn test_list() {
        let storage = MemoryStorage::new();
        let a = block_on(storage.save("ana", sample_request("A"))).unwrap();
        let b = block_on(storage.save("ben", sample_request("B"))).unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&a.id));
        assert!(list.contains(&b.id));
    }
}
