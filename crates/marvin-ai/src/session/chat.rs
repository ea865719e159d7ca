//! Async chat methods for Session (send_message + streaming).

use tracing::debug;

use crate::routing::{route_response, NextStep};
use crate::{AiClient, AiError, Message};

use super::manager::Session;
use super::types::BusyGuard;

impl Session {
    /// Add a user message and get the assistant's response.
    /// If the AI calls tools, this runs the tool-call loop automatically.
    pub async fn chat(
        &mut self,
        client: &dyn AiClient,
        user_message: impl Into<String>,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let user = Message::user(user_message);
        Self::persist(self.store.as_ref(), &self.id, &user);
        self.messages.push(user);

        let mut rounds_left = self.max_tool_rounds;

        loop {
            let messages = self.build_messages();
            let response = client
                .send_message(&messages, &self.tools, &self.tool_choice)
                .await?;
            self.ledger.record(&self.model, &response.usage);

            match route_response(&response, self.tool_executor.is_some(), rounds_left) {
                NextStep::Final(text) => {
                    let assistant = Message::assistant(&text);
                    Self::persist(self.store.as_ref(), &self.id, &assistant);
                    self.messages.push(assistant);
                    return Ok(text);
                }
                NextStep::Exhausted(text) => {
                    debug!("max tool rounds reached, returning partial response");
                    let assistant = Message::assistant(&text);
                    Self::persist(self.store.as_ref(), &self.id, &assistant);
                    self.messages.push(assistant);
                    return Ok(text);
                }
                NextStep::ExecuteTools(calls) => {
                    rounds_left -= 1;

                    let assistant =
                        Message::assistant_with_calls(response.content.clone(), calls.clone());
                    Self::persist(self.store.as_ref(), &self.id, &assistant);
                    self.messages.push(assistant);

                    // route_response only yields ExecuteTools when an
                    // executor is registered.
                    let executor = self.tool_executor.as_ref().unwrap();
                    for tool_call in &calls {
                        let result = self.execute_tool(executor, tool_call);
                        let turn = Message::tool_result(&tool_call.id, result);
                        Self::persist(self.store.as_ref(), &self.id, &turn);
                        self.messages.push(turn);
                    }
                }
            }
        }
    }

    /// Send a message with streaming, returning the full response.
    ///
    /// Streaming exchanges do not run the tool loop; tool calls in the
    /// response degrade to the streamed text.
    pub async fn chat_streaming(
        &mut self,
        client: &dyn AiClient,
        user_message: impl Into<String>,
        on_chunk: Box<dyn Fn(String) + Send + Sync>,
    ) -> Result<String, AiError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        let user = Message::user(user_message);
        Self::persist(self.store.as_ref(), &self.id, &user);
        self.messages.push(user);

        let messages = self.build_messages();
        let response = client
            .send_message_streaming(&messages, &self.tools, &self.tool_choice, on_chunk)
            .await?;

        self.ledger.record(&self.model, &response.usage);
        let assistant = Message::assistant(&response.content);
        Self::persist(self.store.as_ref(), &self.id, &assistant);
        self.messages.push(assistant);

        Ok(response.content)
    }
}
