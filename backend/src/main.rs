use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use dotenvy::dotenv;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

mod api {
    pub mod openai;
}
mod config;
mod error;
mod handlers {
    pub mod chat_handlers;
}

use api::openai::{CompletionClient, OpenAiClient};
use config::RelayConfig;
use handlers::chat_handlers;

pub struct AppState {
    config: RelayConfig,
    completions: Arc<dyn CompletionClient>,
}

async fn health_check() -> &'static str {
    "OK"
}

fn cors_layer(config: &RelayConfig) -> CorsLayer {
    let origin = config.frontend_url.parse::<HeaderValue>().unwrap_or_else(|_| {
        tracing::warn!("Invalid FRONTEND_URL {:?}, allowing localhost only", config.frontend_url);
        HeaderValue::from_static("http://localhost:8080")
    });
    CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_origin(AllowOrigin::exact(origin))
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
        .expose_headers([header::CONTENT_TYPE, header::CONTENT_LENGTH])
}

fn build_router(state: Arc<AppState>) -> Router {
    // The compiled site is a single page, unknown paths get index.html.
    let index = format!("{}/index.html", state.config.frontend_dist);
    let site = ServeDir::new(&state.config.frontend_dist).fallback(ServeFile::new(index));

    Router::new()
        .route("/api/health", get(health_check))
        .route(
            "/api/chat",
            post(chat_handlers::chat).fallback(chat_handlers::method_not_allowed),
        )
        .fallback_service(site)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(cors_layer(&state.config))
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let _guard = std::env::var("SENTRY_DSN").ok().map(|dsn| {
        sentry::init((
            dsn.as_str(),
            sentry::ClientOptions {
                release: sentry::release_name!(),
                ..Default::default()
            },
        ))
    });

    use tracing_subscriber::{fmt, EnvFilter};
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,nazbot_backend=debug,tower_http=info"));
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let config = RelayConfig::from_env();
    let port = config.port;
    let completions = Arc::new(OpenAiClient::new(config.openai_api_url.clone()));
    let state = Arc::new(AppState {
        config,
        completions,
    });
    let app = build_router(state);

    tracing::info!("Starting server on port {}", port);
    let listener = TcpListener::bind(format!("0.0.0.0:{}", port)).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    mod chat_tests;
    mod openai_tests;
}
