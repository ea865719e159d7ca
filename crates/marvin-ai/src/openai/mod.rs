//! OpenAI-compatible chat-completion client.
//!
//! Works against `api.openai.com` or any endpoint speaking the same
//! `/chat/completions` contract (configurable base URL).

mod api;
mod client;
mod config;

pub use client::OpenAiClient;
pub use config::OpenAiConfig;
