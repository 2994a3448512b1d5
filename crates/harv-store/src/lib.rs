//! Durable key/value storage for panel session state.
//!
//! Models the host browser's extension storage: string keys mapped to
//! JSON values, partial reads, best-effort writes. Two implementations:
//! - [`MemoryStore`] for tests and ephemeral sessions
//! - [`JsonFileStore`] backed by a single JSON document on disk

pub mod json_file;
pub mod memory;

use std::collections::HashMap;

use async_trait::async_trait;

pub use harv_common::StoreError;
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

/// A record of key/value pairs, as stored.
pub type Record = HashMap<String, serde_json::Value>;

/// Async key/value store with partial reads.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch the requested keys. Keys with no stored value are simply
    /// absent from the returned record, never an error.
    async fn get(&self, keys: &[&str]) -> Result<Record, StoreError>;

    /// Merge the record into the store, overwriting existing keys.
    async fn set(&self, record: Record) -> Result<(), StoreError>;
}
