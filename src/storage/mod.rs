//! Key-value persistence backends for the recipe collections.
//!
//! Backends store raw strings. Encoding the collection is the store's job,
//! not the backend's.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StorageError;

/// Asynchronous string key-value store shared by every collection.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Short backend name used in log lines
    fn backend_name(&self) -> &str;

    /// Read the value stored under `key`, `None` if nothing was ever written.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
