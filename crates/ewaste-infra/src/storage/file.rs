//! JSON file store - the CLI's stand-in for browser local storage.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use ewaste_core::domain::StorageKey;
use ewaste_core::ports::{LocalStore, StoreError};

type Entries = BTreeMap<String, String>;

/// Keeps every key in one flat JSON object on disk.
///
/// The whole file is rewritten on each change: written to a sibling temp
/// file, then renamed over the original.
pub struct JsonFileStore {
    path: PathBuf,
    lock: RwLock<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: RwLock::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Entries, StoreError> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Entries::new());
        }
        serde_json::from_slice(&raw).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn persist(&self, entries: &Entries) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let raw = serde_json::to_vec_pretty(entries)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StoreError::Io(e.to_string()))
    }

    async fn modify(&self, apply: impl FnOnce(&mut Entries) + Send) -> Result<(), StoreError> {
        let _guard = self.lock.write().await;
        let mut entries = self.load().await?;
        apply(&mut entries);
        self.persist(&entries).await
    }
}

#[async_trait]
impl LocalStore for JsonFileStore {
    async fn get(&self, key: StorageKey) -> Result<Option<String>, StoreError> {
        let _guard = self.lock.read().await;
        Ok(self.load().await?.remove(key.as_str()))
    }

    async fn set(&self, key: StorageKey, value: &str) -> Result<(), StoreError> {
        let value = value.to_string();
        self.modify(move |entries| {
            entries.insert(key.as_str().to_string(), value);
        })
        .await?;
        tracing::debug!(key = key.as_str(), "Stored value");
        Ok(())
    }

    async fn remove(&self, key: StorageKey) -> Result<(), StoreError> {
        self.modify(move |entries| {
            entries.remove(key.as_str());
        })
        .await?;
        tracing::debug!(key = key.as_str(), "Removed value");
        Ok(())
    }
}
