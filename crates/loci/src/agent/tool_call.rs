//! Tool-calling agent: LLM ⇄ tools loop until the model answers.
//!
//! Each round: call the LLM; if the reply requests tool calls, execute
//! them through the registry and feed every result back as a user
//! message, then ask again. A reply with no tool calls is the answer.
//! The loop is bounded by `max_steps`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::tool::ToolRegistry;
use crate::traits::AsyncAgent;

const DEFAULT_MAX_STEPS: usize = 5;

/// Agent that lets the model call registered tools before answering.
///
/// The LLM client must be constructed with the registry's specs
/// (`client.with_tools(registry.specs())`) so the model knows what it
/// can call; this agent only executes what the model asks for.
///
/// **Interaction**: Holds an `LlmClient` and a `ToolRegistry`; implements
/// `AsyncAgent`. Used by the weather demo with `WeatherTool`.
pub struct ToolCallAgent {
    llm: Arc<dyn LlmClient>,
    tools: Arc<ToolRegistry>,
    system_prompt: String,
    max_steps: usize,
}

impl ToolCallAgent {
    /// Builds with the given client, registry, and system prompt.
    pub fn new(
        llm: Arc<dyn LlmClient>,
        tools: Arc<ToolRegistry>,
        system_prompt: impl Into<String>,
    ) -> Self {
        Self {
            llm,
            tools,
            system_prompt: system_prompt.into(),
            max_steps: DEFAULT_MAX_STEPS,
        }
    }

    /// Sets the round limit (builder). Default 5.
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }
}

#[async_trait]
impl AsyncAgent for ToolCallAgent {
    type Input = String;
    type Output = String;
    type Error = AgentError;

    fn name(&self) -> &str {
        "ToolCallAgent"
    }

    async fn run(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        let mut messages = vec![
            Message::system(self.system_prompt.clone()),
            Message::user(input),
        ];
        for step in 0..self.max_steps {
            let reply = self
                .llm
                .invoke(&messages)
                .await
                .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;
            if !reply.content.is_empty() {
                messages.push(Message::assistant(reply.content.clone()));
            }
            if reply.tool_calls.is_empty() {
                return Ok(reply.content);
            }
            tracing::debug!(step, calls = reply.tool_calls.len(), "executing tool calls");
            for call in &reply.tool_calls {
                let args: Value = if call.arguments.trim().is_empty() {
                    serde_json::json!({})
                } else {
                    serde_json::from_str(&call.arguments).unwrap_or(serde_json::json!({}))
                };
                let result = self
                    .tools
                    .execute(&call.name, args)
                    .await
                    .map_err(|e| AgentError::ExecutionFailed(e.to_string()))?;
                let text = match result {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                // Fed back as a user message so the next round has context.
                messages.push(Message::user(format!(
                    "Tool {} returned: {}",
                    call.name, text
                )));
            }
        }
        Err(AgentError::MaxStepsExceeded(self.max_steps))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ToolError;
    use crate::llm::{LlmResponse, MockLlm, ToolCall};
    use crate::tool::Tool;

    struct FixedTool;

    #[async_trait]
    impl Tool for FixedTool {
        fn name(&self) -> &str {
            "probe"
        }
        fn description(&self) -> &str {
            "Returns a fixed probe result."
        }
        fn parameters_schema(&self) -> Value {
            serde_json::json!({"type": "object"})
        }
        async fn execute(&self, _args: Value) -> Result<Value, ToolError> {
            Ok(Value::String("probe-result".into()))
        }
    }

    fn registry() -> Arc<ToolRegistry> {
        let mut r = ToolRegistry::new();
        r.register(Arc::new(FixedTool));
        Arc::new(r)
    }

    #[tokio::test]
    async fn answers_directly_without_tool_calls() {
        let agent = ToolCallAgent::new(Arc::new(MockLlm::fixed("direct")), registry(), "sys");
        let out = agent.run("q".to_string()).await.unwrap();
        assert_eq!(out, "direct");
    }

    #[tokio::test]
    async fn one_round_tool_loop_feeds_result_back() {
        let llm = Arc::new(MockLlm::tool_call_then_answer("probe", "{}", "final answer"));
        let agent = ToolCallAgent::new(llm.clone(), registry(), "sys");
        let out = agent.run("q".to_string()).await.unwrap();
        assert_eq!(out, "final answer");
        // Round 1 requested the tool, round 2 answered.
        assert_eq!(llm.call_count(), 2);
    }

    #[tokio::test]
    async fn unknown_tool_fails_the_run() {
        let llm = Arc::new(MockLlm::tool_call_then_answer("missing", "{}", "unreached"));
        let agent = ToolCallAgent::new(llm, registry(), "sys");
        let err = agent.run("q".to_string()).await.unwrap_err();
        assert!(matches!(err, AgentError::ExecutionFailed(_)));
    }

    #[tokio::test]
    async fn endless_tool_calls_hit_step_limit() {
        let llm = Arc::new(MockLlm::scripted(vec![LlmResponse {
            content: String::new(),
            tool_calls: vec![ToolCall {
                name: "probe".into(),
                arguments: "{}".into(),
                id: None,
            }],
        }]));
        let agent = ToolCallAgent::new(llm, registry(), "sys").with_max_steps(3);
        let err = agent.run("q".to_string()).await.unwrap_err();
        assert!(matches!(err, AgentError::MaxStepsExceeded(3)));
    }
}
