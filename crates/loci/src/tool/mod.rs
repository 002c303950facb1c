//! Tool trait, specs, and registry.
//!
//! - `Tool`: tool interface (name, description, parameters_schema, execute)
//! - `ToolSpec`: what the LLM sees when choosing a tool
//! - `ToolRegistry`: registration and execute-by-name with validation
//! - `validate_args`: schema check applied before every execution
//! - `WeatherTool`: geocode + forecast + outfit advice

mod registry;
mod validation;
mod weather;

pub use registry::ToolRegistry;
pub use validation::validate_args;
pub use weather::WeatherTool;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::ToolError;

/// Tool specification handed to the LLM.
///
/// **Interaction**: Produced by `ToolRegistry::specs` from each tool's
/// name/description/schema; passed to a client via `with_tools` so the
/// model can return matching `ToolCall`s.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    /// Tool name, matched against `ToolCall::name`.
    pub name: String,
    /// Human-readable description for the LLM.
    pub description: Option<String>,
    /// JSON Schema for the arguments (minimal: type, properties, required).
    pub input_schema: Value,
}

/// Tool interface.
///
/// Register with `ToolRegistry::register`, execute via
/// `ToolRegistry::execute(name, args)`. `parameters_schema` is a minimal
/// JSON Schema used both in the LLM prompt and for argument validation.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Tool name, used for registration and dispatch.
    fn name(&self) -> &str;

    /// Description shown to the LLM when it chooses tools.
    fn description(&self) -> &str;

    /// Argument JSON Schema (minimal: type, properties, required).
    fn parameters_schema(&self) -> Value;

    /// Executes with parsed arguments; may perform external I/O.
    async fn execute(&self, args: Value) -> Result<Value, ToolError>;
}
