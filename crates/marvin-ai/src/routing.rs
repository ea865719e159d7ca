//! Response routing: what to do next with a provider response.
//!
//! Every caller faces the same dispatch after a chat-completion call:
//! execute the requested tools and go around again, or treat the text as
//! final. This module makes that decision explicit so the session loop
//! and the demo binaries all branch the same way.

use crate::{AiResponse, ToolCall};

/// The caller's next step after receiving a provider response.
#[derive(Debug)]
pub enum NextStep {
    /// No tool calls (or no executor available): the text is the answer.
    Final(String),
    /// Execute these tool calls, append the results, and call again.
    ExecuteTools(Vec<ToolCall>),
    /// Tool calls were requested but the round budget is spent; callers
    /// should surface the partial text instead of looping further.
    Exhausted(String),
}

/// Route a provider response to the caller's next step.
///
/// `has_executor` is false when no tool executor is registered (tool calls
/// then degrade to a final text response). `rounds_left` is the remaining
/// tool-loop budget.
pub fn route_response(response: &AiResponse, has_executor: bool, rounds_left: u32) -> NextStep {
    if response.tool_calls.is_empty() || !has_executor {
        return NextStep::Final(response.content.clone());
    }
    if rounds_left == 0 {
        return NextStep::Exhausted(response.content.clone());
    }
    NextStep::ExecuteTools(response.tool_calls.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TokenUsage;

    fn response(content: &str, tool_calls: Vec<ToolCall>) -> AiResponse {
        AiResponse {
            content: content.to_string(),
            tool_calls,
            usage: TokenUsage::default(),
        }
    }

    fn call(name: &str) -> ToolCall {
        ToolCall {
            id: "call_1".into(),
            name: name.into(),
            arguments: serde_json::json!({}),
        }
    }

    #[test]
    fn plain_text_is_final() {
        let step = route_response(&response("hello", vec![]), true, 5);
        assert!(matches!(step, NextStep::Final(text) if text == "hello"));
    }

    #[test]
    fn tool_calls_without_executor_are_final() {
        let step = route_response(&response("partial", vec![call("t")]), false, 5);
        assert!(matches!(step, NextStep::Final(text) if text == "partial"));
    }

    #[test]
    fn tool_calls_with_budget_execute() {
        let step = route_response(&response("", vec![call("a"), call("b")]), true, 1);
        match step {
            NextStep::ExecuteTools(calls) => {
                assert_eq!(calls.len(), 2);
                assert_eq!(calls[0].name, "a");
            }
            other => panic!("expected ExecuteTools, got {other:?}"),
        }
    }

    #[test]
    fn exhausted_budget_returns_partial_text() {
        let step = route_response(&response("ran out", vec![call("t")]), true, 0);
        assert!(matches!(step, NextStep::Exhausted(text) if text == "ran out"));
    }
}
