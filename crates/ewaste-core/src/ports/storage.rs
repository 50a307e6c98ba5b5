use async_trait::async_trait;

use crate::domain::StorageKey;

/// Local storage trait - the client's persistent key/value slots
/// (session token, pending emails, theme).
#[async_trait]
pub trait LocalStore: Send + Sync {
    /// Get a value from the store.
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError>;

    /// Set a value, replacing any previous one.
    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: StorageKey) -> Result<(), StoreError>;

    /// Check if a key holds a value.
    async fn contains(&self, key: StorageKey) -> Result<bool, StoreError> {
        Ok(self.get(key).await?.is_some())
    }
}

/// Store operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O failed: {0}")]
    Io(String),

    #[error("Storage file is corrupt: {0}")]
    Serialization(String),
}
