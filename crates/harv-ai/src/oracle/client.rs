//! Oracle client struct, request building, and response parsing.

use crate::{AiError, AnswerTask, QuestionScope};

use super::config::OracleConfig;

/// HTTP client for the answer-generation service.
pub struct OracleClient {
    pub(crate) config: OracleConfig,
    pub(crate) http: reqwest::Client,
}

impl OracleClient {
    pub fn new(config: OracleConfig) -> Result<Self, AiError> {
        let http = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .timeout(config.timeout)
            .build()
            .map_err(|e| AiError::NetworkError(e.to_string()))?;
        Ok(Self { config, http })
    }

    /// URL for the single answer endpoint.
    pub(crate) fn answer_url(&self) -> String {
        format!("{}/v1/answer", self.config.endpoint)
    }

    /// Build the JSON request body for an answer request.
    pub(crate) fn build_request_body(
        &self,
        task: AnswerTask,
        text: Option<&str>,
        scope: Option<QuestionScope>,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "task": task.as_str(),
        });
        if let Some(text) = text {
            body["text"] = serde_json::json!(text);
        }
        if let Some(scope) = scope {
            body["scope"] = serde_json::json!(scope.as_str());
        }
        body
    }

    /// Parse the service response, expecting `{"answer": "..."}`.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<String, AiError> {
        json["answer"]
            .as_str()
            .map(String::from)
            .ok_or_else(|| AiError::ParseError("response missing 'answer' field".into()))
    }
}
