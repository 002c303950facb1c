//! Agent implementations.
//!
//! - `ChatAgent`: single-turn LLM conversation
//! - `ToolCallAgent`: LLM ⇄ tools loop, bounded by max_steps

mod chat;
mod tool_call;

pub use chat::ChatAgent;
pub use tool_call::ToolCallAgent;
