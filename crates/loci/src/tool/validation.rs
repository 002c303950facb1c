//! Argument validation against a minimal JSON Schema.
//!
//! - `validate_args(schema, args)`: required fields must be present, and
//!   fields declared in `properties` with a primitive `type` must match it.
//! - Used by `ToolRegistry::execute`; errors convert to
//!   `ToolError::ValidationFailed` via `ValidationError`.

use serde_json::Value;

use crate::error::ValidationError;

/// Validates `args` against the minimal schema.
///
/// `args` must be an object; every key in `schema["required"]` must be
/// present; any present field whose schema entry declares `type` of
/// `string`, `number`, `integer`, or `boolean` must hold that type.
/// Unknown fields and richer schema constructs pass through unchecked.
pub fn validate_args(schema: &Value, args: &Value) -> Result<(), ValidationError> {
    let Some(obj) = args.as_object() else {
        return Err(ValidationError("args must be an object".into()));
    };
    if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
        for r in required {
            let Some(key) = r.as_str() else {
                continue;
            };
            if !obj.contains_key(key) {
                return Err(ValidationError(format!("missing required field: {key}")));
            }
        }
    }
    if let Some(props) = schema.get("properties").and_then(|p| p.as_object()) {
        for (key, value) in obj {
            let Some(declared) = props.get(key).and_then(|p| p.get("type")).and_then(|t| t.as_str())
            else {
                continue;
            };
            let ok = match declared {
                "string" => value.is_string(),
                "number" => value.is_number(),
                "integer" => value.is_i64() || value.is_u64(),
                "boolean" => value.is_boolean(),
                _ => true,
            };
            if !ok {
                return Err(ValidationError(format!(
                    "field '{key}' must be of type {declared}"
                )));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_required_passes() {
        let schema = serde_json::json!({"type": "object"});
        assert!(validate_args(&schema, &serde_json::json!({})).is_ok());
    }

    #[test]
    fn required_present_passes() {
        let schema = serde_json::json!({"required": ["city"]});
        assert!(validate_args(&schema, &serde_json::json!({"city": "Oslo"})).is_ok());
    }

    #[test]
    fn missing_required_fails() {
        let schema = serde_json::json!({"required": ["city"]});
        let e = validate_args(&schema, &serde_json::json!({})).unwrap_err();
        assert!(e.0.contains("city"));
    }

    #[test]
    fn non_object_args_fail() {
        let schema = serde_json::json!({"required": ["city"]});
        let e = validate_args(&schema, &serde_json::json!([])).unwrap_err();
        assert!(e.0.contains("object"));
    }

    #[test]
    fn declared_type_mismatch_fails() {
        let schema = serde_json::json!({
            "properties": {"city": {"type": "string"}},
            "required": ["city"]
        });
        let e = validate_args(&schema, &serde_json::json!({"city": 42})).unwrap_err();
        assert!(e.0.contains("string"));
    }

    #[test]
    fn undeclared_fields_pass_through() {
        let schema = serde_json::json!({"properties": {"city": {"type": "string"}}});
        assert!(validate_args(&schema, &serde_json::json!({"other": 1})).is_ok());
    }
}
