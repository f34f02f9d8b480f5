use std::sync::{Arc, Mutex};

use axum::{
    body::{self, Body},
    extract::State,
    http::{header, HeaderMap, Request, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower::ServiceExt;

use crate::api::openai::{CompletionClient, CompletionRequest, OpenAiClient};
use crate::config::RelayConfig;
use crate::error::RelayError;
use crate::{build_router, AppState};

#[derive(Debug, Clone)]
struct Received {
    authorization: Option<String>,
    body: Value,
}

#[derive(Clone)]
struct FakeUpstream {
    status: StatusCode,
    content_type: &'static str,
    reply: String,
    received: Arc<Mutex<Vec<Received>>>,
}

async fn fake_completions(
    State(fake): State<FakeUpstream>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.received
        .lock()
        .expect("lock")
        .push(Received { authorization, body });
    (
        fake.status,
        [(header::CONTENT_TYPE, fake.content_type)],
        fake.reply.clone(),
    )
}

/// Serves a canned chat-completions reply on an ephemeral local port.
async fn spawn_upstream(
    status: StatusCode,
    content_type: &'static str,
    reply: impl Into<String>,
) -> (String, Arc<Mutex<Vec<Received>>>) {
    let received = Arc::new(Mutex::new(Vec::new()));
    let fake = FakeUpstream {
        status,
        content_type,
        reply: reply.into(),
        received: Arc::clone(&received),
    };
    let app = Router::new()
        .route("/v1/chat/completions", post(fake_completions))
        .with_state(fake);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move {
        axum::serve(listener, app.into_make_service())
            .await
            .expect("fake upstream");
    });
    (format!("http://{}/v1/chat/completions", addr), received)
}

fn sample_request() -> CompletionRequest {
    CompletionRequest {
        model: "gpt-4o-mini".to_string(),
        messages: vec![
            json!({"role": "system", "content": "persona"}),
            json!({"role": "user", "content": "hola"}),
        ],
        temperature: 0.7,
        max_tokens: 500,
    }
}

fn relay_app(endpoint: String) -> Router {
    let config = RelayConfig {
        openai_api_key: Some("sk-test".to_string()),
        openai_api_url: endpoint.clone(),
        frontend_dist: "does-not-exist".to_string(),
        ..RelayConfig::default()
    };
    build_router(Arc::new(AppState {
        config,
        completions: Arc::new(OpenAiClient::new(endpoint)),
    }))
}

async fn relay_chat(app: Router) -> (StatusCode, Value) {
    let request = Request::post("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"messages": [{"role": "user", "content": "hola"}]}).to_string(),
        ))
        .expect("request");
    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    (status, serde_json::from_slice(&bytes).expect("json"))
}

#[tokio::test]
async fn sends_bearer_key_and_completion_fields() {
    let (endpoint, received) =
        spawn_upstream(StatusCode::OK, "application/json", json!({"choices": []}).to_string()).await;
    let client = OpenAiClient::new(endpoint);

    let reply = client
        .complete("sk-test", sample_request())
        .await
        .expect("reply");

    assert_eq!(reply, json!({"choices": []}));
    let received = received.lock().expect("lock");
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].authorization.as_deref(), Some("Bearer sk-test"));
    let body = &received[0].body;
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["max_tokens"], 500);
    assert!((body["temperature"].as_f64().expect("temperature") - 0.7).abs() < 1e-6);
    assert_eq!(body["messages"][1], json!({"role": "user", "content": "hola"}));
    let mut keys: Vec<&str> = body
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    keys.sort_unstable();
    assert_eq!(keys, ["max_tokens", "messages", "model", "temperature"]);
}

#[tokio::test]
async fn error_status_with_json_body_is_returned_as_payload() {
    let quota = json!({"error": {"message": "Rate limit reached", "type": "requests"}});
    let (endpoint, _) =
        spawn_upstream(StatusCode::TOO_MANY_REQUESTS, "application/json", quota.to_string()).await;

    let reply = OpenAiClient::new(endpoint.clone())
        .complete("sk-test", sample_request())
        .await
        .expect("reply");
    assert_eq!(reply, quota);

    let (status, body) = relay_chat(relay_app(endpoint)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, quota);
}

#[tokio::test]
async fn plain_text_upstream_body_is_an_upstream_error() {
    let (endpoint, _) =
        spawn_upstream(StatusCode::BAD_GATEWAY, "text/plain", "upstream unavailable").await;

    let result = OpenAiClient::new(endpoint.clone())
        .complete("sk-test", sample_request())
        .await;
    assert!(matches!(result, Err(RelayError::Upstream(_))));

    let (status, body) = relay_chat(relay_app(endpoint)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unreachable_upstream_is_an_upstream_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let result = OpenAiClient::new(format!("http://{}/v1/chat/completions", addr))
        .complete("sk-test", sample_request())
        .await;
    assert!(matches!(result, Err(RelayError::Upstream(_))));
}
