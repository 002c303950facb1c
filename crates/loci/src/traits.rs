//! Core agent trait.

use async_trait::async_trait;

/// Async agent: input in, output out, with async I/O (LLM, tools) inside.
///
/// Implemented by `ChatAgent` (single turn) and `ToolCallAgent`
/// (bounded tool loop).
#[async_trait]
pub trait AsyncAgent {
    /// Input type.
    type Input;
    /// Output type.
    type Output;
    /// Error type; implementations can use `crate::AgentError`.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Agent name.
    fn name(&self) -> &str;

    /// Executes: given input, returns output or error.
    async fn run(&self, input: Self::Input) -> Result<Self::Output, Self::Error>;
}
