//! Configuration schema types for Marvin.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod logging;
mod provider;
mod session;

pub use logging::*;
pub use provider::*;
pub use session::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for Marvin.
///
/// All options have sensible defaults. Only override what you want to
/// change.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MarvinConfig {
    pub provider: ProviderConfig,
    pub session: SessionConfig,
    pub logging: LoggingConfig,
}
