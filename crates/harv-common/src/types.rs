use serde::{Deserialize, Serialize};
use std::fmt;

/// Bounding box of a text selection, in viewport coordinates.
///
/// Stored with redundant `right`/`bottom`/`width`/`height` because the
/// host delivers all six and downstream consumers use different pairs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Build a rect from its left/top corner and dimensions.
    pub fn from_ltwh(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            right: left + width,
            bottom: top + height,
            width,
            height,
        }
    }

    /// Horizontal center of the rect.
    pub fn center_x(&self) -> f64 {
        self.left + self.width / 2.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// Visible dimensions of the hosted document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Opaque handle to a rendered element in the host document.
///
/// Used for "is this press inside the popup" checks without any global
/// document lookup: the host assigns handles, the core only compares them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub u64);

impl fmt::Display for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element-{}", self.0)
    }
}

/// Breadth of context used when answering a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionScope {
    All,
    Domain,
    Page,
}

impl Default for QuestionScope {
    fn default() -> Self {
        Self::Page
    }
}

impl QuestionScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Domain => "domain",
            Self::Page => "page",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_from_ltwh_fills_derived_fields() {
        let r = Rect::from_ltwh(100.0, 5.0, 60.0, 20.0);
        assert_eq!(r.right, 160.0);
        assert_eq!(r.bottom, 25.0);
        assert_eq!(r.center_x(), 130.0);
    }

    #[test]
    fn rect_serialization() {
        let r = Rect::from_ltwh(0.0, 0.0, 375.0, 600.0);
        let json = serde_json::to_string(&r).unwrap();
        let deserialized: Rect = serde_json::from_str(&json).unwrap();
        assert_eq!(r, deserialized);
    }

    #[test]
    fn element_handle_display_and_eq() {
        let h = ElementHandle(7);
        assert_eq!(h.to_string(), "element-7");
        assert_eq!(h, ElementHandle(7));
        assert_ne!(h, ElementHandle(8));
    }

    #[test]
    fn question_scope_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&QuestionScope::Domain).unwrap(),
            "\"domain\""
        );
        let parsed: QuestionScope = serde_json::from_str("\"all\"").unwrap();
        assert_eq!(parsed, QuestionScope::All);
    }

    #[test]
    fn question_scope_default_is_page() {
        assert_eq!(QuestionScope::default(), QuestionScope::Page);
        assert_eq!(QuestionScope::default().as_str(), "page");
    }
}
