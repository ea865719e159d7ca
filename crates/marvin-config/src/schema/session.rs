//! Session and transcript-persistence configuration.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Directory for transcript files. Empty means the platform data dir
    /// (`<data dir>/marvin/sessions`).
    pub transcript_dir: String,
    /// Whether transcripts are written at all.
    pub persist: bool,
    /// Tool-call loop budget per chat turn (valid range: 1-50).
    pub max_tool_rounds: u32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transcript_dir: String::new(),
            persist: true,
            max_tool_rounds: 10,
        }
    }
}
