//! Optional text-assist service: asks a Gemini model for suggested body
//! text. Irrelevant to rendering correctness; failures never touch the
//! post state.

use std::time::Duration;

use reqwest::blocking::Client;
use serde_json::json;

use crate::{Error, Result};

/// Environment variable holding the assist-service credential.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const PROMPT: &str =
    "Escribe un tweet corto e ingenioso sobre la creación de imágenes para redes sociales.";

/// Client for the text-generation service.
pub struct TextAssist {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
}

impl TextAssist {
    /// Build a client reading the credential from [`API_KEY_VAR`]. A missing
    /// credential is not an error until a suggestion is requested.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR).ok().filter(|k| !k.is_empty());
        Self::new(api_key)
    }

    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            api_key,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
        })
    }

    /// Point the client at a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Ask the service for suggested post text. The reply is used verbatim.
    pub fn suggest_text(&self) -> Result<String> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            Error::ConfigError(format!(
                "The {API_KEY_VAR} environment variable is not set; configure it to use text generation"
            ))
        })?;

        let url = format!(
            "{}/{}:generateContent?key={}",
            self.endpoint, self.model, api_key
        );
        let body = json!({
            "contents": [{ "parts": [{ "text": PROMPT }] }]
        });

        log::debug!("requesting suggested text from {}", self.model);
        let resp = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .map_err(|e| Error::AssistError(format!("request failed: {e}")))?;
        if !resp.status().is_success() {
            return Err(Error::AssistError(format!("HTTP {}", resp.status())));
        }
        let value: serde_json::Value = resp
            .json()
            .map_err(|e| Error::AssistError(format!("malformed response: {e}")))?;

        let text = value["candidates"][0]["content"]["parts"][0]["text"]
            .as_str()
            .map(str::trim)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(Error::AssistError("no text was generated".to_string()));
        }
        Ok(text.to_string())
    }
}
