//! Shared error types for agents, graph runs, and tools.
//!
//! - `AgentError`: agent and graph execution errors
//! - `ValidationError`: tool argument validation, converts into `ToolError`
//! - `ToolError`: tool lookup, validation, and execution errors

use thiserror::Error;

/// Errors from running an agent or a compiled graph.
///
/// Node failures are wrapped as `NodeFailed` by the graph runner so the
/// offending node is always named; the run aborts on the first failure.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Execution failed, with a reason.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),

    /// A graph node failed; the run was aborted at this node.
    #[error("node '{node}' failed: {message}")]
    NodeFailed {
        /// Id of the node that failed.
        node: String,
        /// Failure description from the node.
        message: String,
    },

    /// A bounded agent loop exceeded its step limit without finishing.
    #[error("max steps exceeded: {0}")]
    MaxStepsExceeded(usize),
}

/// Argument validation error, used by `validate_args` and `ToolRegistry::execute`.
///
/// Produced when required fields are missing or a field has the wrong type.
/// Converts to `ToolError::ValidationFailed` in `ToolRegistry::execute`.
#[derive(Debug, Error, Clone)]
#[error("validation failed: {0}")]
pub struct ValidationError(pub String);

/// Tool lookup, validation, and execution errors.
///
/// Returned by `Tool::execute` and `ToolRegistry::execute`.
#[derive(Debug, Error)]
pub enum ToolError {
    /// No tool registered under this name.
    #[error("tool not found: {0}")]
    NotFound(String),
    /// Arguments did not satisfy the tool's schema.
    #[error("validation failed: {0}")]
    ValidationFailed(String),
    /// The tool ran and failed.
    #[error("execution failed: {0}")]
    ExecutionFailed(String),
}

impl From<ValidationError> for ToolError {
    fn from(e: ValidationError) -> Self {
        ToolError::ValidationFailed(e.0)
    }
}
