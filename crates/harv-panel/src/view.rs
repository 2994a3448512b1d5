//! Render-ready view model.

use harv_common::QuestionScope;
use serde::Serialize;

use crate::popup::PopupState;
use crate::search::SearchResult;

/// Which action produced the answer currently loading or shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnswerKind {
    Question,
    Define,
    Elaborate,
    Search,
}

/// Read-only snapshot for the presentation layer.
///
/// Published on every committed transition; the renderer replaces its
/// whole model rather than diffing.
#[derive(Debug, Clone, Serialize)]
pub struct PanelView {
    pub popup: PopupState,

    pub summary: Option<String>,
    pub summarizing: bool,
    /// A summary fetch succeeded during this activation.
    pub summarized: bool,

    pub answer: Option<String>,
    pub answering: bool,
    pub answer_kind: Option<AnswerKind>,

    pub search_results: Vec<SearchResult>,
    /// At least one search request is still in flight.
    pub searching: bool,

    pub theme_dark: bool,
    pub scope: QuestionScope,
    pub url: Option<String>,
}

impl Default for PanelView {
    fn default() -> Self {
        Self {
            popup: PopupState::default(),
            summary: None,
            summarizing: false,
            summarized: false,
            answer: None,
            answering: false,
            answer_kind: None,
            search_results: Vec::new(),
            searching: false,
            theme_dark: false,
            scope: QuestionScope::default(),
            url: None,
        }
    }
}
