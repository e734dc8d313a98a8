use std::time::Duration;

use tracing::{debug, instrument};

use crate::convert::{build_request_body, parse_response};
use crate::error::OpenRouterError;
use crate::types::{Completion, OpenRouterRequest};

const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Client for the OpenRouter API.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenRouterClient {
    /// Creates a new client with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Rebuilds the HTTP client so every request is bounded by `timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self, OpenRouterError> {
        self.http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Executes a completion request and returns the assistant reply.
    #[instrument(skip(self, request), fields(model = %request.model))]
    pub async fn complete(&self, request: &OpenRouterRequest) -> Result<Completion, OpenRouterError> {
        let body = build_request_body(request);

        debug!("Sending request to OpenRouter");

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        let response_body: serde_json::Value = serde_json::from_str(&text)?;

        if !status.is_success() {
            let message = response_body
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|m| m.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            return Err(OpenRouterError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let completion = parse_response(&response_body)?;
        debug!(
            stop_reason = ?completion.stop_reason,
            output_tokens = ?completion.usage.as_ref().and_then(|u| u.output_tokens),
            "Received successful response"
        );
        Ok(completion)
    }
}
