//! State graph: nodes + dependency edges, compile and invoke.
//!
//! Aligns with LangGraph `StateGraph`: add nodes and edges, compile, then
//! invoke with state. Edges form a DAG; `compile` validates the structure
//! and fixes the execution order, `invoke` threads state through every
//! reachable node in that order.

mod build_error;
mod compiled;
mod node;
mod observer;
mod state_graph;

pub use build_error::GraphBuildError;
pub use compiled::CompiledStateGraph;
pub use node::{FnNode, Node};
pub use observer::NodeObserver;
pub use state_graph::StateGraph;
