//! Host adapters for running the panel without a live browser.
//!
//! A real embedding implements `ActiveDocumentHost` and `TabHost` over
//! its document; these stand-ins let the binary boot and exercise the
//! full command surface headlessly.

use std::sync::Mutex;

use async_trait::async_trait;
use harv_panel::{ActiveDocumentHost, RawSelection, TabHost};

/// Document host with an externally settable selection.
#[derive(Default)]
pub struct HeadlessDocument {
    selection: Mutex<Option<RawSelection>>,
}

impl HeadlessDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_selection(&self, selection: Option<RawSelection>) {
        if let Ok(mut guard) = self.selection.lock() {
            *guard = selection;
        }
    }
}

impl ActiveDocumentHost for HeadlessDocument {
    fn query_selection(&self) -> Option<RawSelection> {
        self.selection.lock().ok().and_then(|guard| guard.clone())
    }
}

/// Tab host that reports a fixed URL, if one was given.
pub struct StaticTabs {
    url: Option<String>,
}

impl StaticTabs {
    pub fn new(url: Option<String>) -> Self {
        Self { url }
    }
}

#[async_trait]
impl TabHost for StaticTabs {
    async fn current_url(&self) -> Option<String> {
        self.url.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use harv_common::Rect;

    #[test]
    fn headless_document_round_trips_selection() {
        let doc = HeadlessDocument::new();
        assert!(doc.query_selection().is_none());

        doc.set_selection(Some(RawSelection {
            text: "term".into(),
            rect: Rect::from_ltwh(10.0, 10.0, 40.0, 16.0),
        }));
        assert_eq!(doc.query_selection().unwrap().text, "term");

        doc.set_selection(None);
        assert!(doc.query_selection().is_none());
    }

    #[tokio::test]
    async fn static_tabs_reports_configured_url() {
        let tabs = StaticTabs::new(Some("https://example.com".into()));
        assert_eq!(tabs.current_url().await.as_deref(), Some("https://example.com"));
        assert!(StaticTabs::new(None).current_url().await.is_none());
    }
}
