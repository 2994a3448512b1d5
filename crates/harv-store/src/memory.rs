//! In-memory key/value store.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{KeyValueStore, Record, StoreError};

/// Process-local store. State is lost when the process exits.
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, keys: &[&str]) -> Result<Record, StoreError> {
        let entries = self.entries.lock().await;
        let mut record = Record::new();
        for key in keys {
            if let Some(value) = entries.get(*key) {
                record.insert((*key).to_string(), value.clone());
            }
        }
        Ok(record)
    }

    async fn set(&self, record: Record) -> Result<(), StoreError> {
        let mut entries = self.entries.lock().await;
        for (key, value) in record {
            entries.insert(key, value);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn set_then_get() {
        let store = MemoryStore::new();
        store
            .set(Record::from([("darkMode".to_string(), json!(true))]))
            .await
            .unwrap();

        let record = store.get(&["darkMode"]).await.unwrap();
        assert_eq!(record.get("darkMode"), Some(&json!(true)));
    }

    #[tokio::test]
    async fn missing_keys_are_absent_not_errors() {
        let store = MemoryStore::new();
        let record = store.get(&["summary", "answer"]).await.unwrap();
        assert!(record.is_empty());
    }

    #[tokio::test]
    async fn set_merges_and_overwrites() {
        let store = MemoryStore::new();
        store
            .set(Record::from([
                ("summary".to_string(), json!("old")),
                ("darkMode".to_string(), json!(false)),
            ]))
            .await
            .unwrap();
        store
            .set(Record::from([("summary".to_string(), json!("new"))]))
            .await
            .unwrap();

        let record = store.get(&["summary", "darkMode"]).await.unwrap();
        assert_eq!(record.get("summary"), Some(&json!("new")));
        assert_eq!(record.get("darkMode"), Some(&json!(false)));
    }

    #[tokio::test]
    async fn partial_get_returns_only_requested_keys() {
        let store = MemoryStore::new();
        store
            .set(Record::from([
                ("summary".to_string(), json!("s")),
                ("answer".to_string(), json!("a")),
            ]))
            .await
            .unwrap();

        let record = store.get(&["answer"]).await.unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("answer"), Some(&json!("a")));
    }
}
