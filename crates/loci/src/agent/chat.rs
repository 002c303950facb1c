//! Chat agent: one question, one LLM answer.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AgentError;
use crate::llm::LlmClient;
use crate::message::Message;
use crate::traits::AsyncAgent;

/// Single-turn chat agent: holds an LLM client and an optional system
/// prompt; `run` turns the user input into a request, calls the LLM, and
/// returns the reply text.
pub struct ChatAgent {
    llm: Arc<dyn LlmClient>,
    system_prompt: Option<String>,
}

impl ChatAgent {
    /// Builds with the given LLM client, no system prompt.
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self {
            llm,
            system_prompt: None,
        }
    }

    /// Sets the system prompt (builder).
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = Some(prompt.into());
        self
    }
}

#[async_trait]
impl AsyncAgent for ChatAgent {
    type Input = String;
    type Output = String;
    type Error = AgentError;

    fn name(&self) -> &str {
        "ChatAgent"
    }

    async fn run(&self, input: Self::Input) -> Result<Self::Output, Self::Error> {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = &self.system_prompt {
            messages.push(Message::system(sys.clone()));
        }
        messages.push(Message::user(input));
        self.llm
            .invoke(&messages)
            .await
            .map(|r| r.content)
            .map_err(|e| AgentError::ExecutionFailed(e.to_string()))
    }
}
