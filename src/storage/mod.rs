//! Client-side persistence: the cookie jar and the client-persistent store.
//!
//! Both locations share one small key/value contract. Writes are whole-value
//! replacements, so there are no partial-update races between readers.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use std::{path::Path, sync::Arc};
use thiserror::Error;

/// Cookie file inside a profile directory.
pub const COOKIES_FILE: &str = "cookies.json";
/// Client-persistent store file inside a profile directory.
pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// A string key/value store.
///
/// `remove` on an absent key is a no-op, not an error.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;

    /// # Errors
    /// Returns an error if the value cannot be persisted.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// # Errors
    /// Returns an error if the removal cannot be persisted.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// The two client-side locations a browser profile offers.
#[derive(Clone)]
pub struct Profile {
    pub cookies: Arc<dyn KeyValueStore>,
    pub local_storage: Arc<dyn KeyValueStore>,
}

impl Profile {
    /// Opens a file-backed profile rooted at `dir`.
    pub fn open(dir: &Path) -> Self {
        Self {
            cookies: Arc::new(FileStore::new(dir.join(COOKIES_FILE))),
            local_storage: Arc::new(FileStore::new(dir.join(LOCAL_STORAGE_FILE))),
        }
    }

    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            cookies: Arc::new(MemoryStore::new()),
            local_storage: Arc::new(MemoryStore::new()),
        }
    }
}
