//! Append-only search result log.
//!
//! Insertion order is display order. Entries are never mutated or
//! removed in this core; deletion, if any, is a presentation concern.

use harv_common::new_id;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub content: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

#[derive(Debug, Default)]
pub struct SearchLog {
    results: Vec<SearchResult>,
    last_timestamp: i64,
}

impl SearchLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the log from persisted results, keeping their order.
    pub fn from_results(results: Vec<SearchResult>) -> Self {
        let last_timestamp = results.iter().map(|r| r.timestamp).max().unwrap_or(0);
        Self {
            results,
            last_timestamp,
        }
    }

    /// Append a completed search answer.
    ///
    /// Timestamps are strictly increasing even when two appends land in
    /// the same millisecond.
    pub fn append(&mut self, content: impl Into<String>) -> &SearchResult {
        let now = chrono::Utc::now().timestamp_millis();
        let timestamp = now.max(self.last_timestamp + 1);
        self.last_timestamp = timestamp;

        self.results.push(SearchResult {
            id: new_id(),
            content: content.into(),
            timestamp,
        });
        self.results.last().expect("just pushed")
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}
