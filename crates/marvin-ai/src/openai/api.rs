//! AiClient trait implementation for OpenAiClient (send_message + streaming).

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::streaming::{parse_sse_stream, SseEvent};
use crate::{AiClient, AiError, AiResponse, Message, TokenUsage, ToolCall, ToolChoice, ToolDefinition};

use super::client::OpenAiClient;

/// A tool call assembled from streamed argument fragments.
#[derive(Default)]
struct PartialToolCall {
    id: String,
    name: String,
    arguments: String,
}

/// Upper bound on the `index` field of streamed tool-call fragments. The
/// index sizes `partial_calls`, so an endpoint sending a huge index must
/// not be allowed to allocate accordingly.
const MAX_STREAMED_TOOL_CALLS: usize = 64;

fn accumulate_tool_call_delta(partial_calls: &mut Vec<PartialToolCall>, call: &serde_json::Value) {
    let index = call["index"].as_u64().unwrap_or(0) as usize;
    if index >= MAX_STREAMED_TOOL_CALLS {
        warn!(index, "ignoring streamed tool call fragment with out-of-range index");
        return;
    }
    while partial_calls.len() <= index {
        partial_calls.push(PartialToolCall::default());
    }
    let partial = &mut partial_calls[index];
    if let Some(id) = call["id"].as_str() {
        partial.id.push_str(id);
    }
    if let Some(name) = call["function"]["name"].as_str() {
        partial.name.push_str(name);
    }
    if let Some(args) = call["function"]["arguments"].as_str() {
        partial.arguments.push_str(args);
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn send_message(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        tool_choice: &ToolChoice,
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, tools, tool_choice, false);

        debug!(model = %self.config.model, "chat-completion request");

        let response = self
            .http
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| AiError::ParseError(e.to_string()))?;

        self.parse_response(json)
    }

    async fn send_message_streaming(
        &self,
        messages: &[Message],
        tools: &[ToolDefinition],
        tool_choice: &ToolChoice,
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<AiResponse, AiError> {
        let body = self.build_request_body(messages, tools, tool_choice, true);

        debug!(model = %self.config.model, "chat-completion streaming request");

        let response = self
            .http
            .post(self.api_url())
            .bearer_auth(&self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(AiError::RateLimited);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let text = text.chars().take(200).collect::<String>();
            return Err(AiError::ApiError(format!("HTTP {status}: {text}")));
        }

        let mut full_content = String::new();
        let mut usage = TokenUsage::default();

        // Tool calls arrive as indexed fragments across chunks.
        let mut partial_calls: Vec<PartialToolCall> = Vec::new();

        parse_sse_stream(response, |event: SseEvent| {
            if event.is_done() {
                return;
            }
            let Ok(data) = serde_json::from_str::<serde_json::Value>(&event.data) else {
                return;
            };

            // The final usage-only chunk has an empty choices array.
            if let Some(u) = data.get("usage").filter(|u| !u.is_null()) {
                usage.input_tokens = u["prompt_tokens"].as_u64().unwrap_or(0);
                usage.output_tokens = u["completion_tokens"].as_u64().unwrap_or(0);
            }

            let delta = &data["choices"][0]["delta"];

            if let Some(text) = delta["content"].as_str() {
                if !text.is_empty() {
                    full_content.push_str(text);
                    on_chunk(text.to_string());
                }
            }

            if let Some(calls) = delta["tool_calls"].as_array() {
                for call in calls {
                    accumulate_tool_call_delta(&mut partial_calls, call);
                }
            }
        })
        .await?;

        let tool_calls = partial_calls
            .into_iter()
            .filter(|p| !p.name.is_empty())
            .map(|p| ToolCall {
                id: if p.id.is_empty() {
                    marvin_common::new_call_id()
                } else {
                    p.id
                },
                name: p.name,
                arguments: serde_json::from_str(&p.arguments).unwrap_or(serde_json::Value::Null),
            })
            .collect();

        if usage.input_tokens == 0 && usage.output_tokens == 0 {
            warn!("no usage data received in streaming response");
        }

        Ok(AiResponse {
            content: full_content,
            tool_calls,
            usage,
        })
    }
}
