//! Genius Loci demo agents: state-in, state-out.
//!
//! A small agent toolkit around one core idea: a `StateGraph` of named
//! nodes with dependency edges, compiled to a fixed topological order and
//! invoked with a state value that every node overlays its outputs on.
//! On top of it: the judge-a-photo pipeline (`argue`), a tool-calling
//! weather agent (`agent` + `tool`), and a mock settlement wallet.
//!
//! LLM, vision, and settlement providers sit behind trait seams with
//! mock implementations, so every demo also runs offline.

pub mod agent;
pub mod argue;
pub mod error;
pub mod graph;
pub mod llm;
pub mod message;
pub mod tool;
pub mod traits;
pub mod vision;
pub mod wallet;

pub use agent::{ChatAgent, ToolCallAgent};
pub use error::{AgentError, ToolError, ValidationError};
pub use graph::{
    CompiledStateGraph, FnNode, GraphBuildError, Node, NodeObserver, StateGraph,
};
pub use llm::{ChatGemini, ChatOpenAi, LlmClient, LlmError, LlmResponse, MockLlm, ToolCall};
pub use message::Message;
pub use tool::{Tool, ToolRegistry, ToolSpec, WeatherTool};
pub use traits::AsyncAgent;
pub use vision::{ImageSource, MockVision, VisionClient};
pub use wallet::{MockEvmWallet, TransferReceipt};
