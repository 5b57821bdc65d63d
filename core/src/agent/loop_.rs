use crate::agent::ContextBuilder;
use crate::config::Config;
use crate::error::ToolError;
use crate::skills::SkillRegistry;
use crate::tools::{ToolRuntime, tool_schemas};
use crate::traits::{ChatMessage, ChatRequest, ChatTurn, Provider, ToolCall, ToolSpec};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const NO_OUTPUT: &str = "No output from model.";
pub const TOO_MANY_ITERATIONS: &str = "Stopped: too many tool iterations.";

/// Drives one conversation at a time against the model, executing the
/// skill tools it asks for until it produces a final answer.
pub struct AgentLoop {
    provider: Arc<dyn Provider>,
    context_builder: ContextBuilder,
    runtime: ToolRuntime,
    max_turns: usize,
}

impl AgentLoop {
    pub fn new(provider: Arc<dyn Provider>, skills: Arc<SkillRegistry>, config: &Config) -> Self {
        Self {
            provider,
            context_builder: ContextBuilder::new(skills.list()),
            runtime: ToolRuntime::new(skills),
            max_turns: config.max_turns,
        }
    }

    pub async fn run(&self, user_text: &str) -> String {
        self.run_with_history(user_text, vec![]).await
    }

    /// Runs the tool loop to completion.
    ///
    /// Always yields a string: the model's final text, a sentinel when the
    /// model said nothing or the turn budget ran out, or a one-line
    /// description of an endpoint failure. Nothing is retried.
    pub async fn run_with_history(&self, user_text: &str, history: Vec<ChatTurn>) -> String {
        let mut messages = self.context_builder.build_messages(history, user_text);
        let tools = tool_schemas();

        for turn in 0..self.max_turns {
            debug!(turn, messages = messages.len(), "Requesting completion");

            if let Some(answer) = self.step(&mut messages, &tools).await {
                return answer;
            }
        }

        warn!(max_turns = self.max_turns, "Turn budget exhausted");
        TOO_MANY_ITERATIONS.to_string()
    }

    /// One round-trip. `None` means tool results were appended and the loop
    /// should ask again.
    async fn step(&self, messages: &mut Vec<ChatMessage>, tools: &[ToolSpec]) -> Option<String> {
        let request = ChatRequest {
            messages: messages.as_slice(),
            tools,
        };

        let response = match self.provider.chat(request).await {
            Ok(response) => response,
            Err(e) => {
                error!("Chat request failed: {}", e);
                return Some(e.to_string());
            }
        };

        if !response.has_tool_calls() {
            return Some(response.final_text().unwrap_or(NO_OUTPUT).to_string());
        }

        messages.push(ChatMessage::assistant_with_tool_calls(
            response.tool_calls.clone(),
        ));

        for call in response.tool_calls {
            let output = self.execute_tool_call(&call);
            messages.push(ChatMessage::tool_result(call.id, output));
        }

        None
    }

    fn execute_tool_call(&self, call: &ToolCall) -> String {
        info!(tool = %call.name, id = %call.id, "Executing tool call");

        let result = serde_json::from_str::<serde_json::Value>(&call.arguments)
            .map_err(|e| ToolError::InvalidArguments {
                tool: call.name.clone(),
                reason: e.to_string(),
            })
            .and_then(|args| self.runtime.dispatch(&call.name, &args));

        result.unwrap_or_else(|e| {
            warn!(tool = %call.name, id = %call.id, "Tool call failed: {}", e);
            e.to_output()
        })
    }
}
