use gloo_net::http::{Request, Response};
use gloo_net::Error as GlooError;
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::config;

/// Entry point for calls to the site's own backend.
pub struct Api;

pub struct RequestWrapper {
    request: Request,
    path: String,
}

impl RequestWrapper {
    fn new(path: &str, method: &str) -> Self {
        let full_url = format!("{}{}", config::get_backend_url(), path);
        let request = match method {
            "POST" => Request::post(&full_url),
            _ => Request::get(&full_url),
        }
        .credentials(RequestCredentials::SameOrigin);

        Self {
            request,
            path: path.to_string(),
        }
    }

    /// Set the request body as JSON
    pub fn json<T: Serialize>(mut self, data: &T) -> Result<Self, serde_json::Error> {
        let body_string = serde_json::to_string(data)?;
        self.request = self
            .request
            .header("Content-Type", "application/json")
            .body(body_string);
        Ok(self)
    }

    pub async fn send(self) -> Result<Response, GlooError> {
        let response = self.request.send().await?;
        if !response.ok() {
            gloo_console::log!(format!("{} answered {}", self.path, response.status()));
        }
        Ok(response)
    }
}

impl Api {
    pub fn post(path: &str) -> RequestWrapper {
        RequestWrapper::new(path, "POST")
    }
}
