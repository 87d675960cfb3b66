//! In-memory store implementation.

use super::{BoxFuture, RemoteStore, StoreError, StoreResult, StoredDocument};
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    documents: RwLock<HashMap<String, StoredDocument>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl RemoteStore for MemoryStore {
    fn save(&self, key: &str, document: &StoredDocument) -> BoxFuture<'_, StoreResult<()>> {
        let key = key.to_string();
        let document = document.clone();
        Box::pin(async move {
            let mut docs = self
                .documents
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            if let Some(existing) = docs.get(&key) {
                if existing.revision >= document.revision {
                    return Err(StoreError::Stale {
                        key,
                        revision: document.revision,
                        stored: existing.revision,
                    });
                }
            }
            docs.insert(key, document);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StoreResult<StoredDocument>> {
        let key = key.to_string();
        Box::pin(async move {
            let docs = self
                .documents
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            docs.get(&key)
                .cloned()
                .ok_or_else(|| StoreError::NotFound(key))
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StoreResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let docs = self
                .documents
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(docs.contains_key(&key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::App;
    use crate::test_util::block_on;

    fn doc(revision: u64) -> StoredDocument {
        StoredDocument {
            revision,
            state: App::default(),
        }
    }

    #[test]
    fn test_save_and_load() {
        let store = MemoryStore::new();
        block_on(store.save("drawings/test", &doc(1))).unwrap();

        let loaded = block_on(store.load("drawings/test")).unwrap();
        assert_eq!(loaded.revision, 1);
    }

    #[test]
    fn test_not_found() {
        let store = MemoryStore::new();
        let result = block_on(store.load("drawings/nonexistent"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }

    #[test]
    fn test_exists() {
        let store = MemoryStore::new();
        assert!(!block_on(store.exists("drawings/test")).unwrap());
        block_on(store.save("drawings/test", &doc(1))).unwrap();
        assert!(block_on(store.exists("drawings/test")).unwrap());
    }

    #[test]
    fn test_stale_write_refused() {
        let store = MemoryStore::new();
        block_on(store.save("drawings/test", &doc(3))).unwrap();

        let result = block_on(store.save("drawings/test", &doc(2)));
        assert!(matches!(result, Err(StoreError::Stale { .. })));

        // Equal revisions are refused as well.
        let result = block_on(store.save("drawings/test", &doc(3)));
        assert!(matches!(result, Err(StoreError::Stale { .. })));

        // The stored document is untouched.
        assert_eq!(block_on(store.load("drawings/test")).unwrap().revision, 3);
    }

    #[test]
    fn test_newer_revision_wins() {
        let store = MemoryStore::new();
        block_on(store.save("drawings/test", &doc(1))).unwrap();
        block_on(store.save("drawings/test", &doc(2))).unwrap();
        assert_eq!(block_on(store.load("drawings/test")).unwrap().revision, 2);
    }
}
