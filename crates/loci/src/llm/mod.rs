//! LLM clients and request/response types.
//!
//! - `LlmClient`: async chat-completion seam used by agents and nodes
//! - `LlmResponse` / `ToolCall`: model reply and requested tool invocations
//! - `LlmError`: provider error enum
//! - `MockLlm`: fixed/echo/scripted mock for tests and offline demos
//! - `ChatOpenAi`: OpenAI-compatible Chat Completions client
//! - `ChatGemini`: Gemini client (also the vision provider)

mod client;
mod error;
mod gemini;
mod mock;
mod openai;

pub use client::{LlmClient, LlmResponse, ToolCall};
pub use error::LlmError;
pub use gemini::{ChatGemini, GeminiConfig};
pub use mock::MockLlm;
pub use openai::{ChatOpenAi, OpenAiConfig};
