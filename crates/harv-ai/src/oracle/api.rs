//! AnswerService trait implementation for OracleClient.

use async_trait::async_trait;
use tracing::debug;

use crate::{AiError, AnswerService, AnswerTask, QuestionScope};

use super::client::OracleClient;

impl OracleClient {
    async fn request(
        &self,
        task: AnswerTask,
        text: Option<&str>,
        scope: Option<QuestionScope>,
    ) -> Result<String, AiError> {
        let body = self.build_request_body(task, text, scope);

        debug!(task = task.as_str(), "oracle request");

        let mut request = self.http.post(self.answer_url()).json(&body);
        if let Some(ref token) = self.config.token {
            request = request.header("Authorization", format!("Bearer {token}"));
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout
            } else {
                AiError::NetworkError(e.to_string())
            }
        })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }
}

#[async_trait]
impl AnswerService for OracleClient {
    async fn summarize_page(&self) -> Result<String, AiError> {
        self.request(AnswerTask::Summarize, None, None).await
    }

    async fn ask_question(
        &self,
        question: &str,
        scope: QuestionScope,
    ) -> Result<String, AiError> {
        self.request(AnswerTask::Ask, Some(question), Some(scope))
            .await
    }

    async fn define(&self, text: &str) -> Result<String, AiError> {
        self.request(AnswerTask::Define, Some(text), None).await
    }

    async fn elaborate(&self, text: &str) -> Result<String, AiError> {
        self.request(AnswerTask::Elaborate, Some(text), None).await
    }
}
