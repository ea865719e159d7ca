//! Config validation: range and sanity checks.
//!
//! Validation never rewrites values; it reports the first problem so the
//! loader can warn and carry on with what was parsed.

use crate::schema::MarvinConfig;
use marvin_common::ConfigError;

/// Validate a parsed config. Returns the first problem found.
pub fn validate(config: &MarvinConfig) -> Result<(), ConfigError> {
    if config.provider.model.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "provider.model must not be empty".into(),
        ));
    }

    if !(config.provider.base_url.starts_with("http://")
        || config.provider.base_url.starts_with("https://"))
    {
        return Err(ConfigError::ValidationError(format!(
            "provider.base_url must be an http(s) URL, got '{}'",
            config.provider.base_url
        )));
    }

    if config.provider.max_tokens == 0 || config.provider.max_tokens > 128_000 {
        return Err(ConfigError::ValidationError(format!(
            "provider.max_tokens must be in 1-128000, got {}",
            config.provider.max_tokens
        )));
    }

    if !(0.0..=2.0).contains(&config.provider.temperature) {
        return Err(ConfigError::ValidationError(format!(
            "provider.temperature must be in 0.0-2.0, got {}",
            config.provider.temperature
        )));
    }

    if config.session.max_tool_rounds == 0 || config.session.max_tool_rounds > 50 {
        return Err(ConfigError::ValidationError(format!(
            "session.max_tool_rounds must be in 1-50, got {}",
            config.session.max_tool_rounds
        )));
    }

    Ok(())
}
