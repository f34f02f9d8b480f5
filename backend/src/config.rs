use std::env;

pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";

/// Settings read from the environment (and `.env`) at startup.
#[derive(Clone, Debug)]
pub struct RelayConfig {
    /// Upstream credential. `None` disables the chat relay but not the server.
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,
    pub chat_model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub port: u16,
    pub frontend_url: String,
    pub frontend_dist: String,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
            chat_model: DEFAULT_CHAT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 500,
            port: 3000,
            frontend_url: "http://localhost:8080".to_string(),
            frontend_dist: "../frontend/dist".to_string(),
        }
    }
}

impl RelayConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let openai_api_key = env::var("OPENAI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty());
        if openai_api_key.is_none() {
            tracing::warn!("OPENAI_API_KEY is not set, /api/chat will answer 500");
        }
        let port = match env::var("PORT") {
            Ok(raw) => raw.parse().unwrap_or_else(|_| {
                tracing::warn!("Invalid PORT value {:?}, using {}", raw, defaults.port);
                defaults.port
            }),
            Err(_) => defaults.port,
        };
        Self {
            openai_api_key,
            openai_api_url: env::var("OPENAI_API_URL").unwrap_or(defaults.openai_api_url),
            chat_model: env::var("CHAT_MODEL").unwrap_or(defaults.chat_model),
            port,
            frontend_url: env::var("FRONTEND_URL").unwrap_or(defaults.frontend_url),
            frontend_dist: env::var("FRONTEND_DIST").unwrap_or(defaults.frontend_dist),
            ..defaults
        }
    }
}
