//! OpenAI-compatible client configuration.

use std::fmt;

use crate::AiError;

pub(crate) const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Chat-completion client configuration.
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: OPENAI_API_BASE.to_string(),
            model: "gpt-4o-mini".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }

    /// Create config from environment variables.
    ///
    /// Resolution order:
    /// 1. `OPENAI_API_KEY` (required)
    /// 2. `OPENAI_BASE_URL` (optional, for compatible endpoints)
    /// 3. `OPENAI_MODEL` (optional model override)
    pub fn from_env() -> Result<Self, AiError> {
        let key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            AiError::ApiError("OpenAI API not configured. Set OPENAI_API_KEY.".into())
        })?;

        let mut config = Self::new(key);
        if let Ok(base) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = base.trim_end_matches('/').to_string();
        }
        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            config.model = model;
        }
        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let base: String = base_url.into();
        self.base_url = base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}
