//! Server-Sent Events (SSE) streaming parser.
//!
//! The chat-completions endpoint streams responses as SSE `data:` lines,
//! terminated by a `data: [DONE]` sentinel. This module provides a
//! line-based parser over a reqwest response stream.

use futures_util::StreamExt;
use tokio::io::AsyncBufReadExt;
use tokio_util::io::StreamReader;

/// Sentinel payload marking the end of a chat-completion stream.
pub const SSE_DONE: &str = "[DONE]";

/// A single SSE event parsed from the stream.
#[derive(Debug, Clone)]
pub struct SseEvent {
    /// The event type, when the server sends `event:` lines.
    pub event: Option<String>,
    /// The event data (JSON string, or the `[DONE]` sentinel).
    pub data: String,
}

impl SseEvent {
    pub fn is_done(&self) -> bool {
        self.data.trim() == SSE_DONE
    }
}

/// Parse an SSE stream from a reqwest response, calling `on_event` for each
/// event. Returns early once the `[DONE]` sentinel is seen.
pub async fn parse_sse_stream(
    response: reqwest::Response,
    mut on_event: impl FnMut(SseEvent),
) -> Result<(), crate::AiError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    let mut lines = reader.lines();

    let mut current_event: Option<String> = None;
    let mut current_data = String::new();

    while let Some(line) = lines
        .next_line()
        .await
        .map_err(|e| crate::AiError::NetworkError(e.to_string()))?
    {
        if line.is_empty() {
            // Empty line = end of event
            if !current_data.is_empty() {
                let event = SseEvent {
                    event: current_event.take(),
                    data: std::mem::take(&mut current_data),
                };
                let done = event.is_done();
                on_event(event);
                if done {
                    return Ok(());
                }
            }
            current_event = None;
            continue;
        }

        // Comment lines (keep-alives) per the SSE spec.
        if line.starts_with(':') {
            continue;
        }

        if let Some(event_type) = field_value(&line, "event") {
            current_event = Some(event_type.to_string());
        } else if let Some(data) = field_value(&line, "data") {
            if !current_data.is_empty() {
                current_data.push('\n');
            }
            current_data.push_str(data);
        }
        // Ignore other fields (id:, retry:)
    }

    // Flush any remaining event
    if !current_data.is_empty() {
        on_event(SseEvent {
            event: current_event,
            data: current_data,
        });
    }

    Ok(())
}

/// Extract the value of an SSE `field: value` line; the space after the
/// colon is optional.
fn field_value<'a>(line: &'a str, field: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(field)?;
    let rest = rest.strip_prefix(':')?;
    Some(rest.strip_prefix(' ').unwrap_or(rest))
}
