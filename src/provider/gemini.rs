use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

const API_KEY_HEADER: &str = "x-goog-api-key";

use super::Provider;
use crate::errors::ReadmeError;
use crate::wire::{self, GenerateRequest};

/// Gemini `generateContent` over HTTPS. The key travels in the
/// `x-goog-api-key` header so it never appears in a URL.
pub struct GeminiProvider {
    client: Client,
    api_base: String,
    model: String,
    api_key: Option<String>,
    key_env: String,
}

impl GeminiProvider {
    pub fn new(api_base: String, model: String, api_key: Option<String>, key_env: String) -> Self {
        Self {
            client: Client::new(),
            api_base,
            model,
            api_key,
            key_env,
        }
    }

    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    fn key(&self) -> Result<&str, ReadmeError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| ReadmeError::MissingCredential(self.key_env.clone()))
    }
}

#[async_trait]
impl Provider for GeminiProvider {
    fn ensure_configured(&self) -> Result<(), ReadmeError> {
        self.key().map(|_| ())
    }

    async fn generate(&self, prompt: &str) -> Result<String, ReadmeError> {
        let key = self.key()?;
        let url = self.endpoint();
        let body = GenerateRequest::user(prompt);

        info!(model = %self.model, prompt_bytes = prompt.len(), "sending generateContent request");
        debug!(%url, "POST");

        let resp = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ReadmeError::Unknown(format!("request failed: {}", e.without_url())))?;

        let status = resp.status();
        let text = resp
            .text()
            .await
            .map_err(|e| ReadmeError::Unknown(format!("failed to read response body: {}", e.without_url())))?;

        debug!(status = status.as_u16(), body_bytes = text.len(), "generateContent response");

        if !status.is_success() {
            return Err(ReadmeError::from_status(status.as_u16(), &text));
        }

        wire::extract_text(&text)
    }
}
