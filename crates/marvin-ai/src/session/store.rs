//! Per-session transcript persistence (JSON Lines).
//!
//! Each session gets one append-only file named `<session-id>.jsonl`; every
//! line is a timestamped turn. Loading tolerates malformed trailing lines
//! (e.g. from an interrupted write) by skipping them with a warning.

use std::io::Write;
use std::path::{Path, PathBuf};

use marvin_common::{MarvinError, SessionId};
use tracing::warn;

use crate::Message;

/// One persisted transcript line.
#[derive(serde::Serialize, serde::Deserialize)]
struct TranscriptLine {
    ts: chrono::DateTime<chrono::Utc>,
    #[serde(flatten)]
    message: Message,
}

/// Append-only store of session transcripts under a directory.
#[derive(Debug, Clone)]
pub struct TranscriptStore {
    dir: PathBuf,
}

impl TranscriptStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, MarvinError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Default store location: `<data dir>/marvin/sessions`.
    pub fn default_dir() -> Result<PathBuf, MarvinError> {
        let base = dirs::data_dir()
            .ok_or_else(|| MarvinError::Transcript("could not determine data directory".into()))?;
        Ok(base.join("marvin").join("sessions"))
    }

    /// Path of the transcript file for a session.
    pub fn path(&self, id: &SessionId) -> PathBuf {
        self.dir.join(format!("{id}.jsonl"))
    }

    /// Append one turn to the session's transcript file.
    pub fn append(&self, id: &SessionId, message: &Message) -> Result<(), MarvinError> {
        let line = TranscriptLine {
            ts: chrono::Utc::now(),
            message: message.clone(),
        };
        let json = serde_json::to_string(&line)
            .map_err(|e| MarvinError::Transcript(format!("failed to encode turn: {e}")))?;

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.path(id))?;
        writeln!(file, "{json}")?;
        Ok(())
    }

    /// Load a session's transcript. A missing file is an empty transcript.
    pub fn load(&self, id: &SessionId) -> Result<Vec<Message>, MarvinError> {
        let path = self.path(id);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(parse_transcript(&content, &path))
    }

    /// List the session ids with a stored transcript.
    pub fn list(&self) -> Result<Vec<SessionId>, MarvinError> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) == Some("jsonl") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(SessionId::from_string(stem));
                }
            }
        }
        ids.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        Ok(ids)
    }
}

fn parse_transcript(content: &str, path: &Path) -> Vec<Message> {
    let mut messages = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<TranscriptLine>(line) {
            Ok(parsed) => messages.push(parsed.message),
            Err(e) => warn!(
                "skipping malformed transcript line {} in {}: {e}",
                index + 1,
                path.display()
            ),
        }
    }
    messages
}
