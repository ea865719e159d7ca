//! Session struct and conversation management.

use std::sync::atomic::AtomicBool;

use marvin_common::SessionId;
use tracing::{debug, warn};

use crate::usage::UsageLedger;
use crate::{Message, Role, ToolCall, ToolChoice, ToolDefinition};

use super::store::TranscriptStore;
use super::types::ToolExecutor;

/// A conversation session with message history and tool execution.
pub struct Session {
    /// Session identifier (also the transcript file stem).
    pub(super) id: SessionId,
    /// Conversation message history.
    pub(super) messages: Vec<Message>,
    /// System prompt (prepended to every API call).
    pub(super) system_prompt: Option<String>,
    /// Available tool definitions.
    pub(super) tools: Vec<ToolDefinition>,
    /// Tool-choice mode forwarded to the provider.
    pub(super) tool_choice: ToolChoice,
    /// Tool executor callback.
    pub(super) tool_executor: Option<ToolExecutor>,
    /// Token usage ledger.
    pub(super) ledger: UsageLedger,
    /// Maximum tool-call loop iterations to prevent infinite loops.
    pub(super) max_tool_rounds: u32,
    /// Model name for usage tracking.
    pub(super) model: String,
    /// Optional transcript persistence.
    pub(super) store: Option<TranscriptStore>,
    /// Whether the session is currently processing a request.
    pub(super) busy: AtomicBool,
}

impl Session {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            id: SessionId::new(),
            messages: Vec::new(),
            system_prompt: None,
            tools: Vec::new(),
            tool_choice: ToolChoice::Auto,
            tool_executor: None,
            ledger: UsageLedger::new(),
            max_tool_rounds: 10,
            model: model.into(),
            store: None,
            busy: AtomicBool::new(false),
        }
    }

    /// Resume a persisted session: loads any stored transcript for `id` and
    /// keeps persisting new turns to the same file.
    pub fn resume(
        model: impl Into<String>,
        store: TranscriptStore,
        id: SessionId,
    ) -> Result<Self, marvin_common::MarvinError> {
        let messages = store.load(&id)?;
        debug!(session = %id, turns = messages.len(), "resumed session");
        let mut session = Self::new(model);
        session.id = id;
        session.messages = messages;
        session.store = Some(store);
        Ok(session)
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }

    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }

    pub fn with_tool_choice(mut self, tool_choice: ToolChoice) -> Self {
        self.tool_choice = tool_choice;
        self
    }

    pub fn with_tool_executor(mut self, executor: ToolExecutor) -> Self {
        self.tool_executor = Some(executor);
        self
    }

    pub fn with_max_tool_rounds(mut self, max: u32) -> Self {
        self.max_tool_rounds = max;
        self
    }

    pub fn with_store(mut self, store: TranscriptStore) -> Self {
        self.store = Some(store);
        self
    }

    pub(crate) fn execute_tool(&self, executor: &ToolExecutor, tool_call: &ToolCall) -> String {
        debug!(tool = %tool_call.name, "executing tool");
        executor(&tool_call.name, &tool_call.arguments)
    }

    pub(crate) fn build_messages(&self) -> Vec<Message> {
        let mut msgs = Vec::new();
        if let Some(ref system) = self.system_prompt {
            msgs.push(Message {
                role: Role::System,
                content: system.clone(),
                tool_calls: Vec::new(),
                tool_call_id: None,
            });
        }
        msgs.extend(self.messages.clone());
        msgs
    }

    /// Persist one turn if a store is attached. Persistence failures are
    /// logged, not fatal: the in-memory conversation keeps going.
    pub(super) fn persist(store: Option<&TranscriptStore>, id: &SessionId, message: &Message) {
        if let Some(store) = store {
            if let Err(e) = store.append(id, message) {
                warn!(session = %id, "failed to persist turn: {e}");
            }
        }
    }

    /// Get the session id.
    pub fn id(&self) -> &SessionId {
        &self.id
    }

    /// Get the full conversation history.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Get the usage ledger.
    pub fn ledger(&self) -> &UsageLedger {
        &self.ledger
    }

    /// Clear conversation history (in memory only; the stored transcript is
    /// left untouched).
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    /// Number of messages in history.
    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new("default")
    }
}
