use axum::{http::StatusCode, Json};
use serde_json::{json, Value};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("OpenAI API Key not configured")]
    MissingApiKey,
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    InvalidRequest(String),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        // Every relay failure is reported as 500, including bad request bodies.
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(e: reqwest::Error) -> Self {
        RelayError::Upstream(e.to_string())
    }
}

impl From<RelayError> for (StatusCode, Json<Value>) {
    fn from(e: RelayError) -> Self {
        (e.status(), Json(json!({"error": e.to_string()})))
    }
}
