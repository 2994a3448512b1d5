//! Session state persistence.
//!
//! The full durable projection of the panel: summary, last answer,
//! search log, theme flag. Loaded once at activation; written back
//! after each committed transition as a fire-and-forget task.
//! Persistence is advisory: a failed write is logged and the in-memory
//! session continues unchanged.

use std::sync::Arc;

use harv_store::{KeyValueStore, Record, StoreError};
use tracing::warn;

use crate::search::SearchResult;

// Storage keys, kept identical to the browser extension's record.
pub const KEY_SUMMARY: &str = "summary";
pub const KEY_ANSWER: &str = "answer";
pub const KEY_SEARCH_RESULTS: &str = "searchResults";
pub const KEY_DARK_MODE: &str = "darkMode";

const ALL_KEYS: [&str; 4] = [KEY_SUMMARY, KEY_ANSWER, KEY_SEARCH_RESULTS, KEY_DARK_MODE];

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub summary: Option<String>,
    pub last_answer: Option<String>,
    pub search_results: Vec<SearchResult>,
    pub theme_dark: bool,
}

impl SessionState {
    /// Build session state from a stored record. Every missing or
    /// malformed key takes its documented default; the theme default
    /// comes from config so a fresh install can start dark.
    pub fn from_record(record: &Record, dark_default: bool) -> Self {
        let summary = record
            .get(KEY_SUMMARY)
            .and_then(|v| v.as_str())
            .map(String::from);
        let last_answer = record
            .get(KEY_ANSWER)
            .and_then(|v| v.as_str())
            .map(String::from);
        let search_results = record
            .get(KEY_SEARCH_RESULTS)
            .and_then(|v| serde_json::from_value(v.clone()).ok())
            .unwrap_or_default();
        let theme_dark = record
            .get(KEY_DARK_MODE)
            .and_then(|v| v.as_bool())
            .unwrap_or(dark_default);

        Self {
            summary,
            last_answer,
            search_results,
            theme_dark,
        }
    }

    /// Project session state into a storage record.
    ///
    /// Absent summary/answer are stored as null rather than dropped so
    /// a save after a reset actually clears the old value.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert(
            KEY_SUMMARY.to_string(),
            self.summary
                .as_deref()
                .map(serde_json::Value::from)
                .unwrap_or(serde_json::Value::Null),
        );
        record.insert(
            KEY_ANSWER.to_string(),
            self.last_answer
                .as_deref()
                .map(serde_json::Value::from)
                .unwrap_or(serde_json::Value::Null),
        );
        record.insert(
            KEY_SEARCH_RESULTS.to_string(),
            serde_json::to_value(&self.search_results).unwrap_or(serde_json::Value::Null),
        );
        record.insert(
            KEY_DARK_MODE.to_string(),
            serde_json::Value::from(self.theme_dark),
        );
        record
    }
}

pub struct PersistedSessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl PersistedSessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Load the persisted session. Read failures degrade to defaults.
    pub async fn load(&self, dark_default: bool) -> SessionState {
        match self.store.get(&ALL_KEYS).await {
            Ok(record) => SessionState::from_record(&record, dark_default),
            Err(e) => {
                warn!(error = %e, "session load failed, starting fresh");
                SessionState {
                    theme_dark: dark_default,
                    ..SessionState::default()
                }
            }
        }
    }

    /// Persist the session without blocking the interaction path.
    /// Failures are logged and otherwise ignored.
    pub fn save(&self, state: &SessionState) {
        let store = Arc::clone(&self.store);
        let record = state.to_record();
        tokio::spawn(async move {
            if let Err(e) = store.set(record).await {
                warn!(error = %e, "session save failed, continuing in memory");
            }
        });
    }

    /// Persist and wait for the write. Used at shutdown and in tests.
    pub async fn save_now(&self, state: &SessionState) -> Result<(), StoreError> {
        self.store.set(state.to_record()).await
    }
}
