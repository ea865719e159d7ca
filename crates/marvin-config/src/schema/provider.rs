//! Provider (chat-completion endpoint) configuration.

use serde::{Deserialize, Serialize};

/// Settings for the chat-completion endpoint.
///
/// The API key is never stored in the config file; it comes from the
/// `OPENAI_API_KEY` environment variable (or a `.env` file).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL without the `/chat/completions` suffix; change this for
    /// OpenAI-compatible endpoints.
    pub base_url: String,
    /// Response token cap per request (valid range: 1-128000).
    pub max_tokens: u32,
    /// Sampling temperature (valid range: 0.0-2.0).
    pub temperature: f64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            max_tokens: 4096,
            temperature: 0.7,
        }
    }
}
