use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::api::openai::CompletionRequest;
use crate::error::RelayError;
use crate::AppState;

/// Operator persona placed ahead of every conversation. Never user controlled.
pub const NAZBOT_PERSONA: &str = "Eres NAZBOT, el asistente inteligente de NAZBOT.
Tu objetivo es ayudar a los usuarios interesados en automatización e IA Generativa.
NAZBOT ofrece:
1. Automatización de procesos (n8n, flujos comerciales, CRM).
2. IA Generativa para Media (Media IA, Avatares, Contenido Visual).

Debes ser profesional, futurista y eficiente.
IMPORTANTE: Si el usuario muestra interés real o pregunta por precios/contratación, debes pedirle amablemente su EMAIL o TELÉFONO para que David Masegosa pueda contactarle personalmente.
No inventes servicios. Mantente en el contexto de NAZBOT.";

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<Value>,
}

pub async fn chat(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let request: ChatRequest = serde_json::from_slice(&body)
        .map_err(|e| RelayError::InvalidRequest(e.to_string()))?;

    let api_key = state
        .config
        .openai_api_key
        .as_deref()
        .ok_or(RelayError::MissingApiKey)?;

    let completion = build_completion(&state, request.messages);
    let response = state
        .completions
        .complete(api_key, completion)
        .await
        .map_err(|e| {
            tracing::error!("Chat relay upstream call failed: {}", e);
            e
        })?;

    Ok(Json(response))
}

fn build_completion(state: &AppState, messages: Vec<Value>) -> CompletionRequest {
    let mut all = Vec::with_capacity(messages.len() + 1);
    all.push(json!({"role": "system", "content": NAZBOT_PERSONA}));
    all.extend(messages);
    CompletionRequest {
        model: state.config.chat_model.clone(),
        messages: all,
        temperature: state.config.temperature,
        max_tokens: state.config.max_tokens,
    }
}

pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({"error": "Method not allowed"})),
    )
}
