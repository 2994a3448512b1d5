//! Answer oracle client for the HARV panel.
//!
//! The panel core treats answer generation as an opaque call: page in,
//! summary out; question in, answer out. This crate provides the
//! [`AnswerService`] seam plus an HTTP client implementation.

pub mod oracle;

use async_trait::async_trait;

pub use harv_common::QuestionScope;
pub use oracle::{OracleClient, OracleConfig};

/// The kinds of requests the panel can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerTask {
    Summarize,
    Ask,
    Define,
    Elaborate,
}

impl AnswerTask {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Ask => "ask",
            Self::Define => "define",
            Self::Elaborate => "elaborate",
        }
    }
}

/// External answer-generation service.
///
/// Every call is async and may fail; the panel degrades to "no new
/// answer shown" on any error.
#[async_trait]
pub trait AnswerService: Send + Sync {
    /// Summarize the currently hosted page.
    async fn summarize_page(&self) -> Result<String, AiError>;

    /// Answer a free-form question within the given scope.
    async fn ask_question(&self, question: &str, scope: QuestionScope)
        -> Result<String, AiError>;

    /// Define the selected text.
    async fn define(&self, text: &str) -> Result<String, AiError>;

    /// Elaborate on the selected text.
    async fn elaborate(&self, text: &str) -> Result<String, AiError>;
}

#[derive(Debug, thiserror::Error)]
pub enum AiError {
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Rate limited")]
    RateLimited,
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("Timeout")]
    Timeout,
}
