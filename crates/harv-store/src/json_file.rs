//! File-backed key/value store.
//!
//! The whole store is one JSON object on disk. Writes are
//! read-modify-write under a lock so concurrent saves from
//! fire-and-forget tasks cannot interleave.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::{KeyValueStore, Record, StoreError};

pub struct JsonFileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store at the platform default location
    /// (`<data dir>/harv/session.json`).
    pub fn at_default_path() -> Result<Self, StoreError> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            StoreError::Serialize("could not determine data directory".into())
        })?;
        Ok(Self::new(data_dir.join("harv").join("session.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(&self) -> Result<Record, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| StoreError::Serialize(format!("corrupt store file: {e}"))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Record::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, record: &Record) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(record)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;
        tokio::fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, keys: &[&str]) -> Result<Record, StoreError> {
        let _guard = self.lock.lock().await;
        let all = self.read_all().await?;
        let mut record = Record::new();
        for key in keys {
            if let Some(value) = all.get(*key) {
                record.insert((*key).to_string(), value.clone());
            }
        }
        Ok(record)
    }

    async fn set(&self, record: Record) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut all = self.read_all().await?;
        for (key, value) in record {
            all.insert(key, value);
        }
        self.write_all(&all).await?;
        debug!(path = %self.path.display(), keys = all.len(), "store written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn get_from_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("session.json"));
        let record = store.get(&["summary"]).await.unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn set_creates_parent_dirs_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("session.json");
        let store = JsonFileStore::new(&path);

        store
            .set(Record::from([("darkMode".to_string(), json!(true))]))
            .await
            .unwrap();
        assert!(path.exists());

        let record = store.get(&["darkMode"]).await.unwrap();
        assert_eq!(record.get("darkMode"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn survives_reopen_on_same_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        {
            let store = JsonFileStore::new(&path);
            store
                .set(Record::from([
                    ("summary".to_string(), json!("a page summary")),
                    ("searchResults".to_string(), json!([])),
                ]))
                .await
                .unwrap();
        }

        let reopened = JsonFileStore::new(&path);
        let record = reopened.get(&["summary", "searchResults"]).await.unwrap();
        assert_eq!(record.get("summary"), Some(&json!("a page summary")));
        assert_eq!(record.get("searchResults"), Some(&json!([])));
    }

    #[tokio::test]
    async fn set_merges_with_existing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("session.json"));

        store
            .set(Record::from([("answer".to_string(), json!("first"))]))
            .await
            .unwrap();
        store
            .set(Record::from([("darkMode".to_string(), json!(true))]))
            .await
            .unwrap();

        let record = store.get(&["answer", "darkMode"]).await.unwrap();
        assert_eq!(record.len(), 2);
    }

    #[tokio::test]
    async fn corrupt_file_reports_serialize_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        let result = store.get(&["summary"]).await;
        assert!(matches!(result, Err(StoreError::Serialize(_))));
    }
}
