//! In-memory store for tests and embedders that keep nothing between runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use ewaste_core::domain::StorageKey;
use ewaste_core::ports::{LocalStore, StoreError};

/// In-memory store using a HashMap behind an async RwLock.
///
/// Note: Data is lost when the process exits.
#[derive(Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<StorageKey, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStore for InMemoryStore {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(&key).cloned())
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        self.entries.write().await.insert(key, value.to_string());
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        self.entries.write().await.remove(&key);
        Ok(())
    }
}
