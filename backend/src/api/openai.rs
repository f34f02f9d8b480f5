use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use crate::error::RelayError;

/// Messages are kept as raw JSON so any chat-completions shape reaches upstream intact.
#[derive(Clone, Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Value>,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Upstream chat-completions service. The response body is passed through untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, api_key: &str, request: CompletionRequest) -> Result<Value, RelayError>;
}

pub struct OpenAiClient {
    http: Client,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, api_key: &str, request: CompletionRequest) -> Result<Value, RelayError> {
        tracing::debug!(
            "Forwarding {} messages to {} ({})",
            request.messages.len(),
            self.endpoint,
            request.model
        );
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        // Non-2xx upstream bodies are forwarded as well; only unreadable JSON is an error.
        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Upstream chat completion returned {}", status);
        }
        let body = response.json::<Value>().await?;
        Ok(body)
    }
}
