use async_trait::async_trait;

use crate::config::Config;
use crate::errors::ReadmeError;

pub mod gemini;

/// Narrow request/response seam over the generation endpoint.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Checked before any prompt is built or request is sent.
    fn ensure_configured(&self) -> Result<(), ReadmeError> {
        Ok(())
    }

    /// Sends `prompt` and returns the raw generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ReadmeError>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

pub fn make_provider(cfg: &Config) -> DynProvider {
    Box::new(gemini::GeminiProvider::new(
        cfg.api_base.clone(),
        cfg.model.clone(),
        cfg.api_key(),
        cfg.api_key_env.clone(),
    ))
}
