//! File-based store implementation for native platforms.

use super::{BoxFuture, RemoteStore, StoreError, StoreResult, StoredDocument};
use std::fs;
use std::path::PathBuf;

/// File-based store keeping one JSON file per document key.
pub struct FileStore {
    /// Base directory for document storage.
    base_path: PathBuf,
}

impl FileStore {
    /// Create a file store with the given base directory.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> StoreResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(|e| StoreError::Io(format!("Failed to create store directory: {}", e)))?;
        }
        Ok(Self { base_path })
    }

    /// Create a file store in the default location.
    ///
    /// On Unix: `~/.local/share/inkpad/documents/`
    /// On Windows: `%LOCALAPPDATA%\inkpad\documents\`
    pub fn default_location() -> StoreResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StoreError::Io("Could not determine home directory".to_string()))?;

        let path = base.join("inkpad").join("documents");
        Self::new(path)
    }

    /// Get the file path for a document key.
    fn document_path(&self, key: &str) -> PathBuf {
        // Keys contain path separators ("drawings/<name>"); sanitize them
        // into safe filenames.
        let safe_key: String = key
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path.join(format!("{}.json", safe_key))
    }

    /// Get the base path.
    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }
}

impl RemoteStore for FileStore {
    fn save(&self, key: &str, document: &StoredDocument) -> BoxFuture<'_, StoreResult<()>> {
        let path = self.document_path(key);
        let key = key.to_string();
        let document = document.clone();

        Box::pin(async move {
            if path.exists() {
                let json = fs::read_to_string(&path).map_err(|e| {
                    StoreError::Io(format!("Failed to read {}: {}", path.display(), e))
                })?;
                let existing: StoredDocument = serde_json::from_str(&json).map_err(|e| {
                    StoreError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                if existing.revision >= document.revision {
                    return Err(StoreError::Stale {
                        key,
                        revision: document.revision,
                        stored: existing.revision,
                    });
                }
            }

            let json = serde_json::to_string(&document)
                .map_err(|e| StoreError::Serialization(e.to_string()))?;
            fs::write(&path, json)
                .map_err(|e| StoreError::Io(format!("Failed to write {}: {}", path.display(), e)))
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StoreResult<StoredDocument>> {
        let path = self.document_path(key);
        let key = key.to_string();

        Box::pin(async move {
            if !path.exists() {
                return Err(StoreError::NotFound(key));
            }

            let json = fs::read_to_string(&path)
                .map_err(|e| StoreError::Io(format!("Failed to read {}: {}", path.display(), e)))?;

            serde_json::from_str(&json).map_err(|e| {
                StoreError::Serialization(format!("Failed to parse {}: {}", path.display(), e))
            })
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StoreResult<bool>> {
        let path = self.document_path(key);
        Box::pin(async move { Ok(path.exists()) })
    }
}
