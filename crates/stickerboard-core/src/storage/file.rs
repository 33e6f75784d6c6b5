//! File-based creation store.

use super::{BoxFuture, Storage, StorageError, StorageResult, new_record};
use crate::persistence::{CreationId, SaveRequest, StoredCreation};
use std::fs;
use std::path::{Path, PathBuf};

/// Stores each creation as `<id>.json` in a directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Open a store rooted at `base_path`, creating the directory if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                StorageError::Io(format!("Failed to create storage directory: {e}"))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Open the store in the default location.
    ///
    /// On Linux: `~/.local/share/stickerboard/creations/`
    /// On Windows: `%LOCALAPPDATA%\stickerboard\creations\`
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("Could not determine home directory".to_string()))?;
        Self::new(base.join("stickerboard").join("creations"))
    }

    fn creation_path(&self, id: CreationId) -> PathBuf {
        self.base_path.join(format!("{id}.json"))
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for FileStorage {
    fn save(
        &self,
        author: &str,
        request: SaveRequest,
    ) -> BoxFuture<'_, StorageResult<StoredCreation>> {
        let record = new_record(author, request);
        Box::pin(async move {
            let record = record?;
            let path = self.creation_path(record.id);
            let json = serde_json::to_string_pretty(&record)
                .map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json).map_err(|e| {
                StorageError::Io(format!("Failed to write {}: {e}", path.display()))
            })?;
            log::debug!("stored creation {} at {}", record.id, path.display());
            Ok(record)
        })
    }

    fn load(&self, id: CreationId) -> BoxFuture<'_, StorageResult<StoredCreation>> {
        let path = self.creation_path(id);
        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(id));
            }
            let json = fs::read_to_string(&path).map_err(|e| {
                StorageError::Io(format!("Failed to read {}: {e}", path.display()))
            })?;
            serde_json::from_str(&json).map_err(|e| {
                StorageError::Serialization(format!("Failed to parse {}: {e}", path.display()))
            })
        })
    }

    fn delete(&self, id: CreationId) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.creation_path(id);
        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path).map_err(|e| {
                    StorageError::Io(format!("Failed to delete {}: {e}", path.display()))
                })?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<CreationId>>> {
        let base = self.base_path.clone();
        Box::pin(async move {
            if !base.exists() {
                return Ok(vec![]);
            }
            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("Failed to read directory: {e}")))?;

            let mut ids = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_none_or(|ext| ext != "json") {
                    continue;
                }
                // Foreign files in the directory are skipped.
                match path.file_stem().and_then(|s| s.to_str()).map(str::parse::<CreationId>) {
                    Some(Ok(id)) => ids.push(id),
                    _ => log::debug!("skipping {}", path.display()),
                }
            }
            ids.sort();
            Ok(ids)
        })
    }

    fn exists(&self, id: CreationId) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.creation_path(id);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::serialize::deserialize;
    use crate::persistence::InvalidRequest;
    use crate::storage::sample_request;
    use pollster::block_on;
    use tempfile::tempdir;
    use uuid::Uuid;

    #[test]
    fn test_file_storage_save_load() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let request = sample_request("Birthday");
        let expected = request.design_data.clone().into_document().unwrap();
        let saved = block_on(storage.save("ana", request)).unwrap();
        let loaded = block_on(storage.load(saved.id)).unwrap();

        assert_eq!(loaded, saved);
        assert_eq!(loaded.description.as_deref(), Some("party card"));
        assert_eq!(deserialize(&loaded.design_data).unwrap(), expected);
    }

    #[test]
    fn test_file_storage_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let result = block_on(storage.load(Uuid::new_v4()));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_file_storage_rejects_invalid_request() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let mut request = sample_request("Title");
        request.data_url.clear();
        let result = block_on(storage.save("ana", request));
        assert!(matches!(
            result,
            Err(StorageError::InvalidRequest(InvalidRequest::MissingDataUrl))
        ));
        assert!(block_on(storage.list()).unwrap().is_empty());
    }

    #[test]
    fn test_file_storage_list_skips_foreign_files() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let a = block_on(storage.save("ana", sample_request("A"))).unwrap();
        let b = block_on(storage.save("ana", sample_request("B"))).unwrap();
        fs::write(dir.path().join("notes.json"), "{}").unwrap();
        fs::write(dir.path().join("readme.txt"), "hi").unwrap();

        let list = block_on(storage.list()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains(&a.id));
        assert!(list.contains(&b.id));
    }

    #[test]
    fn test_file_storage_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let saved = block_on(storage.save("ana", sample_request("Gone"))).unwrap();
        assert!(block_on(storage.exists(saved.id)).unwrap());

        block_on(storage.delete(saved.id)).unwrap();
        assert!(!block_on(storage.exists(saved.id)).unwrap());
    }

    #[test]
    fn test_creates_missing_directory() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let storage = FileStorage::new(nested.clone()).unwrap();
        assert!(nested.is_dir());
        assert_eq!(storage.base_path(), nested.as_path());
    }
}
