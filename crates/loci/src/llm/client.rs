//! LLM client seam: messages in, one assistant reply out.

use async_trait::async_trait;

use crate::llm::LlmError;
use crate::message::Message;

/// A single tool invocation requested by the model.
///
/// Produced by clients configured with tools; consumed by the
/// tool-calling agent, which executes the named tool with the JSON
/// `arguments` and feeds the result back into the conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolCall {
    /// Tool name as listed in the request's tool specs.
    pub name: String,
    /// Arguments as a JSON string; parsed when the tool is called.
    pub arguments: String,
    /// Provider-assigned call id, when one is given.
    pub id: Option<String>,
}

/// One model reply: assistant text plus any requested tool calls.
#[derive(Debug, Clone, Default)]
pub struct LlmResponse {
    /// Assistant message content; may be empty when only tools are called.
    pub content: String,
    /// Tool invocations the model wants executed; empty means the reply
    /// is final.
    pub tool_calls: Vec<ToolCall>,
}

/// Chat-completion provider seam.
///
/// Given the conversation so far, returns one assistant reply. Tool
/// availability is part of client construction (`with_tools` on the
/// concrete clients), not of this call.
///
/// **Interaction**: Implemented by `ChatOpenAi`, `ChatGemini`, and
/// `MockLlm`; consumed by `ChatAgent`, `ToolCallAgent`, and the argue
/// pipeline nodes.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Sends the messages and returns the model's reply.
    async fn invoke(&self, messages: &[Message]) -> Result<LlmResponse, LlmError>;
}
