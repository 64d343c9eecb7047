use anyhow::Context;
use fs_err as fs;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::options::GenerationOptions;

/// Read when the configured variable is unset.
pub const FALLBACK_KEY_ENV: &str = "VITE_GEMINI_API_KEY";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model: String,
    pub api_base: String,
    /// Name of the environment variable holding the API key.
    pub api_key_env: String,
    pub output: Option<String>,
    pub options: GenerationOptions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: "gemini-2.0-flash".into(),
            api_base: "https://generativelanguage.googleapis.com/v1beta".into(),
            api_key_env: "GEMINI_API_KEY".into(),
            output: None,
            options: GenerationOptions::default(),
        }
    }
}

impl Config {
    /// Defaults, overlaid with the TOML file at `path` when one is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let raw = fs::read_to_string(path)?;
        toml::from_str(&raw).with_context(|| format!("invalid config file {}", path.display()))
    }

    pub fn api_key(&self) -> Option<String> {
        self.api_key_with(|name| std::env::var(name).ok())
    }

    fn api_key_with(&self, lookup: impl Fn(&str) -> Option<String>) -> Option<String> {
        [self.api_key_env.as_str(), FALLBACK_KEY_ENV]
            .into_iter()
            .filter_map(|name| lookup(name))
            .find(|key| !key.trim().is_empty())
    }
}
