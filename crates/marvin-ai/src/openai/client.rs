//! Client struct, request building, and response parsing.

use crate::tools::to_openai_tool;
use crate::{AiError, AiResponse, Message, Role, TokenUsage, ToolCall, ToolChoice, ToolDefinition};

use super::config::OpenAiConfig;

/// OpenAI-compatible chat-completion client.
pub struct OpenAiClient {
    pub(crate) config: OpenAiConfig,
    pub(crate) http: reqwest::Client,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::builder()
                .connect_timeout(std::time::Duration::from_secs(10))
                .timeout(std::time::Duration::from_secs(120))
                .build()
                .expect("failed to build HTTP client"),
        }
    }

    pub(crate) fn api_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    /// Build the JSON request body for the chat-completions endpoint.
    pub(crate) fn build_request_body(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        tool_choice: &ToolChoice,
        stream: bool,
    ) -> serde_json::Value {
        let mut msgs = Vec::new();
        for msg in messages {
            let role = match msg.role {
                Role::User => "user",
                Role::Assistant => "assistant",
                Role::System => "system",
                Role::Tool => "tool",
            };

            let mut entry = serde_json::json!({
                "role": role,
                "content": msg.content,
            });

            // Assistant turns that requested tools echo the calls back;
            // arguments travel as a JSON-encoded string on the wire.
            if !msg.tool_calls.is_empty() {
                let calls: Vec<_> = msg
                    .tool_calls
                    .iter()
                    .map(|tc| {
                        serde_json::json!({
                            "id": tc.id,
                            "type": "function",
                            "function": {
                                "name": tc.name,
                                "arguments": tc.arguments.to_string(),
                            }
                        })
                    })
                    .collect();
                entry["tool_calls"] = serde_json::json!(calls);
            }

            if let Some(ref id) = msg.tool_call_id {
                entry["tool_call_id"] = serde_json::json!(id);
            }

            msgs.push(entry);
        }

        let mut body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": msgs,
        });

        if !tools.is_empty() {
            let tool_defs: Vec<_> = tools.iter().map(to_openai_tool).collect();
            body["tools"] = serde_json::json!(tool_defs);
            body["tool_choice"] = match tool_choice {
                ToolChoice::Auto => serde_json::json!("auto"),
                ToolChoice::None => serde_json::json!("none"),
                ToolChoice::Required => serde_json::json!("required"),
                ToolChoice::Tool(name) => serde_json::json!({
                    "type": "function",
                    "function": { "name": name }
                }),
            };
        }

        if stream {
            body["stream"] = serde_json::json!(true);
            // Ask for a final usage chunk so the ledger stays accurate.
            body["stream_options"] = serde_json::json!({ "include_usage": true });
        }

        body
    }

    /// Parse a non-streaming response.
    pub(crate) fn parse_response(&self, json: serde_json::Value) -> Result<AiResponse, AiError> {
        let message = json["choices"]
            .as_array()
            .and_then(|choices| choices.first())
            .map(|c| c["message"].clone())
            .ok_or_else(|| AiError::ParseError("no choices in response".to_string()))?;

        let content = message["content"].as_str().unwrap_or_default().to_string();

        let tool_calls = message["tool_calls"]
            .as_array()
            .map(|calls| {
                calls
                    .iter()
                    .map(|c| {
                        let args_str = c["function"]["arguments"].as_str().unwrap_or("{}");
                        ToolCall {
                            id: c["id"].as_str().unwrap_or("").to_string(),
                            name: c["function"]["name"].as_str().unwrap_or("").to_string(),
                            arguments: serde_json::from_str(args_str)
                                .unwrap_or(serde_json::Value::Null),
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        let usage = TokenUsage {
            input_tokens: json["usage"]["prompt_tokens"].as_u64().unwrap_or(0),
            output_tokens: json["usage"]["completion_tokens"].as_u64().unwrap_or(0),
        };

        Ok(AiResponse {
            content,
            tool_calls,
            usage,
        })
    }
}
