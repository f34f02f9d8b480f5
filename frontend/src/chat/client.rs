use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use super::session::ChatMessage;
use crate::utils::api::Api;

pub const CHAT_PATH: &str = "/api/chat";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("network error: {0}")]
    Network(String),
    #[error("unreadable response: {0}")]
    Malformed(String),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [ChatMessage],
}

/// Posts the conversation to the relay and returns whatever JSON it answered,
/// error payloads included.
pub async fn send_history(history: &[ChatMessage]) -> Result<Value, ChatError> {
    let response = Api::post(CHAT_PATH)
        .json(&ChatRequest { messages: history })
        .map_err(|e| ChatError::Malformed(e.to_string()))?
        .send()
        .await
        .map_err(|e| ChatError::Network(e.to_string()))?;
    response
        .json::<Value>()
        .await
        .map_err(|e| ChatError::Malformed(e.to_string()))
}
