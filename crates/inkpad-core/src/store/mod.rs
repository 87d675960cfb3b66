//! Remote store abstraction for document mirroring.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

use crate::state::App;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document not found: {0}")]
    NotFound(String),
    #[error("Stale write for {key}: revision {revision} <= stored {stored}")]
    Stale {
        key: String,
        revision: u64,
        stored: u64,
    },
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Store error: {0}")]
    Other(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Boxed future for async operations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// A drawing document as stored remotely: the whole `App` value plus the
/// write-sequence revision guarding against out-of-order saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    pub revision: u64,
    pub state: App,
}

/// Trait for remote store backends.
///
/// Implementations must refuse a save whose `revision` is not strictly
/// greater than the stored one (returning [`StoreError::Stale`]), so a save
/// that lands late over the network cannot overwrite a newer state.
pub trait RemoteStore: Send + Sync {
    /// Write a document under the given key.
    fn save(&self, key: &str, document: &StoredDocument) -> BoxFuture<'_, StoreResult<()>>;

    /// Read the document stored under the given key.
    fn load(&self, key: &str) -> BoxFuture<'_, StoreResult<StoredDocument>>;

    /// Check whether a document exists under the given key.
    fn exists(&self, key: &str) -> BoxFuture<'_, StoreResult<bool>>;
}
