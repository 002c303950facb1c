//! Graph build error.
//!
//! Returned by `StateGraph::compile` when the registered nodes and edges
//! do not form a runnable graph. Every structural defect is reported at
//! build time; `compile_best_effort` is the only way to bypass these.

use thiserror::Error;

/// Error when compiling a state graph.
///
/// Returned by `StateGraph::compile()`. Each variant names the offending
/// node or edge so the caller can fix the graph definition.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphBuildError {
    /// A node was registered with an empty id.
    #[error("node id must not be empty")]
    EmptyNodeId,

    /// The same id was registered more than once via `add_node`.
    #[error("duplicate node: {0}")]
    DuplicateNode(String),

    /// An edge references an id never registered via `add_node`.
    #[error("edge {from} -> {to} references unknown node: {missing}")]
    UnknownEdgeEndpoint {
        /// Edge source.
        from: String,
        /// Edge target.
        to: String,
        /// Whichever endpoint is unregistered.
        missing: String,
    },

    /// `set_entry_point` names an unregistered node.
    #[error("entry point is not a registered node: {0}")]
    UnknownEntry(String),

    /// `set_finish_point` names an unregistered node.
    #[error("finish point is not a registered node: {0}")]
    UnknownFinish(String),

    /// No complete execution order exists: nodes due to run are stuck in
    /// a cycle, or behind a dependency that can never run. Carries the
    /// stuck ids.
    #[error("no execution order for nodes: {}", .0.join(", "))]
    Cycle(Vec<String>),

    /// No nodes were registered.
    #[error("graph has no nodes")]
    EmptyGraph,
}
