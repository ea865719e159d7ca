//! Conversation session management.
//!
//! A `Session` holds the ordered transcript for one conversation, runs the
//! automatic tool-call loop, and optionally persists every turn to a
//! per-session JSON Lines file.

mod chat;
mod manager;
mod store;
mod types;

pub use manager::Session;
pub use store::TranscriptStore;
pub use types::ToolExecutor;

#[cfg(test)]
mod tests;
