//! Session loop tests against a scripted fake client.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::tools::default_executor;
use crate::{
    AiClient, AiError, AiResponse, Message, Role, Session, TokenUsage, ToolCall, ToolChoice,
    ToolDefinition, TranscriptStore,
};

/// Fake client that replays a fixed sequence of responses and records the
/// message lists it was called with.
struct ScriptedClient {
    responses: Mutex<Vec<AiResponse>>,
    seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedClient {
    fn new(responses: Vec<AiResponse>) -> Self {
        Self {
            responses: Mutex::new(responses),
            seen: Mutex::new(Vec::new()),
        }
    }

    fn calls_made(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

#[async_trait]
impl AiClient for ScriptedClient {
    async fn send_message(
        &self,
        messages: &[Message],
        _tools: &[ToolDefinition],
        _tool_choice: &ToolChoice,
    ) -> Result<AiResponse, AiError> {
        self.seen.lock().unwrap().push(messages.to_vec());
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            return Err(AiError::ApiError("script exhausted".into()));
        }
        Ok(responses.remove(0))
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        tool_choice: &ToolChoice,
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<AiResponse, AiError> {
        let response = self.send_message(messages, tools, tool_choice).await?;
        for word in response.content.split_inclusive(' ') {
            on_chunk(word.to_string());
        }
        Ok(response)
    }
}

fn text_response(content: &str) -> AiResponse {
    AiResponse {
        content: content.to_string(),
        tool_calls: Vec::new(),
        usage: TokenUsage {
            input_tokens: 10,
            output_tokens: 5,
        },
    }
}

fn tool_response(name: &str, arguments: serde_json::Value) -> AiResponse {
    AiResponse {
        content: String::new(),
        tool_calls: vec![ToolCall {
            id: "call_1".into(),
            name: name.into(),
            arguments,
        }],
        usage: TokenUsage {
            input_tokens: 10,
            output_tokens: 5,
        },
    }
}

#[tokio::test]
async fn plain_chat_appends_user_and_assistant() {
    let client = ScriptedClient::new(vec![text_response("hi there")]);
    let mut session = Session::new("test-model");

    let reply = session.chat(&client, "hello").await.unwrap();
    assert_eq!(reply, "hi there");
    assert_eq!(session.message_count(), 2);
    assert_eq!(session.messages()[0].role, Role::User);
    assert_eq!(session.messages()[1].role, Role::Assistant);
    assert_eq!(session.ledger().call_count(), 1);
    assert_eq!(session.ledger().total_tokens(), 15);
}

#[tokio::test]
async fn system_prompt_prepended_to_every_call() {
    let client = ScriptedClient::new(vec![text_response("ok")]);
    let mut session = Session::new("test-model").with_system_prompt("be terse");

    session.chat(&client, "hello").await.unwrap();

    let seen = client.seen.lock().unwrap();
    assert_eq!(seen[0][0].role, Role::System);
    assert_eq!(seen[0][0].content, "be terse");
    // The system prompt is not part of the stored history.
    assert_eq!(session.message_count(), 2);
}

#[tokio::test]
async fn tool_loop_executes_and_feeds_result_back() {
    let client = ScriptedClient::new(vec![
        tool_response("get_current_weather", serde_json::json!({"city": "Tokyo"})),
        text_response("It is sunny in Tokyo."),
    ]);
    let mut session = Session::new("test-model")
        .with_tools(crate::tools::builtin_tools())
        .with_tool_executor(default_executor());

    let reply = session.chat(&client, "weather in tokyo?").await.unwrap();
    assert_eq!(reply, "It is sunny in Tokyo.");
    assert_eq!(client.calls_made(), 2);

    // user, assistant(tool_calls), tool result, assistant
    let messages = session.messages();
    assert_eq!(messages.len(), 4);
    assert_eq!(messages[1].tool_calls[0].name, "get_current_weather");
    assert_eq!(messages[2].role, Role::Tool);
    assert_eq!(messages[2].tool_call_id.as_deref(), Some("call_1"));
    assert!(messages[2].content.contains("temperature_c"));

    // The second provider call saw the tool result.
    let seen = client.seen.lock().unwrap();
    assert_eq!(seen[1].len(), 3);
    assert_eq!(seen[1][2].role, Role::Tool);
}

#[tokio::test]
async fn unknown_tool_result_is_reported_not_fatal() {
    let client = ScriptedClient::new(vec![
        tool_response("launch_rockets", serde_json::json!({})),
        text_response("sorry, no such tool"),
    ]);
    let mut session = Session::new("test-model").with_tool_executor(default_executor());

    let reply = session.chat(&client, "do it").await.unwrap();
    assert_eq!(reply, "sorry, no such tool");
    assert!(session.messages()[2].content.contains("unknown tool"));
}

#[tokio::test]
async fn without_executor_tool_calls_are_final() {
    let client = ScriptedClient::new(vec![tool_response(
        "get_current_weather",
        serde_json::json!({"city": "Tokyo"}),
    )]);
    let mut session = Session::new("test-model");

    let reply = session.chat(&client, "weather?").await.unwrap();
    assert_eq!(reply, "");
    assert_eq!(client.calls_made(), 1);
    assert_eq!(session.message_count(), 2);
}

#[tokio::test]
async fn round_budget_bounds_the_loop() {
    // The model keeps asking for tools forever.
    let client = ScriptedClient::new(vec![
        tool_response("get_current_weather", serde_json::json!({"city": "a"})),
        tool_response("get_current_weather", serde_json::json!({"city": "b"})),
        tool_response("get_current_weather", serde_json::json!({"city": "c"})),
        tool_response("get_current_weather", serde_json::json!({"city": "d"})),
    ]);
    let mut session = Session::new("test-model")
        .with_tool_executor(default_executor())
        .with_max_tool_rounds(2);

    let reply = session.chat(&client, "loop forever").await.unwrap();
    assert_eq!(reply, "");
    // Initial call + 2 tool rounds; the 3rd tool request ends the loop.
    assert_eq!(client.calls_made(), 3);
}

#[tokio::test]
async fn streaming_chat_delivers_chunks_and_appends() {
    let client = ScriptedClient::new(vec![text_response("streamed reply")]);
    let mut session = Session::new("test-model");

    let chunks = std::sync::Arc::new(Mutex::new(Vec::new()));
    let sink = chunks.clone();
    let reply = session
        .chat_streaming(
            &client,
            "hello",
            Box::new(move |chunk| sink.lock().unwrap().push(chunk)),
        )
        .await
        .unwrap();

    assert_eq!(reply, "streamed reply");
    assert_eq!(chunks.lock().unwrap().join(""), "streamed reply");
    assert_eq!(session.message_count(), 2);
}

#[tokio::test]
async fn transcript_persisted_and_resumable() {
    let dir = tempfile::tempdir().unwrap();
    let store = TranscriptStore::new(dir.path()).unwrap();

    let client = ScriptedClient::new(vec![
        tool_response("get_current_weather", serde_json::json!({"city": "Paris"})),
        text_response("Rainy."),
    ]);
    let mut session = Session::new("test-model")
        .with_tool_executor(default_executor())
        .with_store(store.clone());
    session.chat(&client, "weather in paris?").await.unwrap();
    let id = session.id().clone();

    // All four turns hit the file.
    assert_eq!(store.load(&id).unwrap().len(), 4);

    // Resuming restores the history and keeps appending.
    let client = ScriptedClient::new(vec![text_response("Still rainy.")]);
    let mut resumed = Session::resume("test-model", store.clone(), id.clone()).unwrap();
    assert_eq!(resumed.message_count(), 4);
    resumed.chat(&client, "and now?").await.unwrap();
    assert_eq!(store.load(&id).unwrap().len(), 6);

    // The resumed call replayed the stored history to the provider.
    let seen = client.seen.lock().unwrap();
    assert_eq!(seen[0].len(), 5);
}

#[tokio::test]
async fn provider_error_propagates() {
    let client = ScriptedClient::new(vec![]);
    let mut session = Session::new("test-model");
    let result = session.chat(&client, "hello").await;
    assert!(matches!(result, Err(AiError::ApiError(_))));
}
