//! Marvin configuration system.
//!
//! TOML-based configuration for the provider client, session persistence,
//! and logging. All sections use serde defaults so partial configs work
//! out of the box.

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::MarvinConfig;

use marvin_common::ConfigError;

/// Convenience function to load config from the platform default path.
///
/// Loads `config.toml` from the OS config directory, creating a commented
/// default file if none exists.
pub fn load_config() -> Result<MarvinConfig, ConfigError> {
    toml_loader::load_default()
}
