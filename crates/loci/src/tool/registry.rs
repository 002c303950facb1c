//! Tool registry: register by name, list specs, execute with validation.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ToolError;

use super::validation::validate_args;
use super::{Tool, ToolSpec};

/// Registry of tools, dispatched by name.
///
/// Registration order is preserved so `specs()` lists tools in the order
/// they were added. Execution validates arguments against the tool's
/// schema before dispatch.
///
/// **Interaction**: Filled by the caller; `specs()` feeds a client's
/// `with_tools`, `execute()` is called by `ToolCallAgent`.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
    order: Vec<String>,
}

impl ToolRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a tool under its own name. Re-registering a name
    /// replaces the previous tool.
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> &mut Self {
        let name = tool.name().to_string();
        if self.tools.insert(name.clone(), tool).is_none() {
            self.order.push(name);
        }
        self
    }

    /// Specs of all registered tools, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.order
            .iter()
            .filter_map(|name| self.tools.get(name))
            .map(|t| ToolSpec {
                name: t.name().to_string(),
                description: Some(t.description().to_string()),
                input_schema: t.parameters_schema(),
            })
            .collect()
    }

    /// Validates `args` against the named tool's schema and executes it.
    pub async fn execute(&self, name: &str, args: Value) -> Result<Value, ToolError> {
        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;
        validate_args(&tool.parameters_schema(), &args)?;
        tool.execute(args).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct UpperTool;

    #[async_trait]
    impl Tool for UpperTool {
        fn name(&self) -> &str {
            "upper"
        }
        fn description(&self) -> &str {
            "Uppercases the given text."
        }
        fn parameters_schema(&self) -> Value {
            serde_json::json!({
                "type": "object",
                "properties": {"text": {"type": "string"}},
                "required": ["text"]
            })
        }
        async fn execute(&self, args: Value) -> Result<Value, ToolError> {
            let text = args["text"].as_str().unwrap_or_default();
            Ok(Value::String(text.to_uppercase()))
        }
    }

    #[tokio::test]
    async fn execute_validates_then_runs() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UpperTool));
        let out = registry
            .execute("upper", serde_json::json!({"text": "hi"}))
            .await
            .unwrap();
        assert_eq!(out, Value::String("HI".into()));
    }

    #[tokio::test]
    async fn execute_rejects_bad_args() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UpperTool));
        let err = registry.execute("upper", serde_json::json!({})).await;
        assert!(matches!(err, Err(ToolError::ValidationFailed(_))));
    }

    #[tokio::test]
    async fn unknown_tool_is_not_found() {
        let registry = ToolRegistry::new();
        let err = registry.execute("nope", serde_json::json!({})).await;
        assert!(matches!(err, Err(ToolError::NotFound(n)) if n == "nope"));
    }

    #[test]
    fn specs_preserve_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(Arc::new(UpperTool));
        let specs = registry.specs();
        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "upper");
        assert!(specs[0].input_schema["required"][0] == "text");
    }
}
