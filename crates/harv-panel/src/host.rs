//! Seams to the hosting browser.
//!
//! The core never touches a real document; it only sees these traits.
//! Tests inject synthetic implementations.

use async_trait::async_trait;
use harv_common::Rect;

/// A text selection as reported by the host document.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSelection {
    /// Selected text, untrimmed.
    pub text: String,
    /// Bounding box of the selection range, viewport coordinates.
    pub rect: Rect,
}

/// Read access to the hosted document's current selection.
///
/// Selection reads are synchronous and either succeed or yield nothing;
/// there is no distinguished error.
pub trait ActiveDocumentHost: Send + Sync {
    fn query_selection(&self) -> Option<RawSelection>;
}

/// Access to the host browser's active tab.
#[async_trait]
pub trait TabHost: Send + Sync {
    async fn current_url(&self) -> Option<String>;
}
