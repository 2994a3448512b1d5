//! Oracle client configuration.

use std::fmt;

use crate::AiError;

/// Answer service client configuration.
#[derive(Clone)]
pub struct OracleConfig {
    /// Base URL of the answer service, no trailing slash.
    pub endpoint: String,
    /// Bearer token, if the service requires one.
    pub token: Option<String>,
    /// Per-request timeout.
    pub timeout: std::time::Duration,
}

impl fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OracleConfig")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl OracleConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        let endpoint = endpoint.into();
        Self {
            endpoint: endpoint.trim_end_matches('/').to_string(),
            token: None,
            timeout: std::time::Duration::from_secs(60),
        }
    }

    /// Create config from the environment.
    ///
    /// `HARV_ORACLE_URL` is required; `HARV_ORACLE_TOKEN` is optional.
    pub fn from_env() -> Result<Self, AiError> {
        let endpoint = std::env::var("HARV_ORACLE_URL").map_err(|_| {
            AiError::ApiError("answer service not configured. Set HARV_ORACLE_URL.".into())
        })?;
        let mut config = Self::new(endpoint);
        if let Ok(token) = std::env::var("HARV_ORACLE_TOKEN") {
            config.token = Some(token);
        }
        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
