//! Tool domain entities

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Argument map of a tool call.
///
/// Ordered so that plans, trace entries and serialized output are stable
/// for identical inputs.
pub type ToolArguments = BTreeMap<String, serde_json::Value>;

/// Semantic type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    #[default]
    String,
    Integer,
    Number,
    Boolean,
    Array,
    Object,
}

impl ParamType {
    pub fn as_str(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Integer => "integer",
            ParamType::Number => "number",
            ParamType::Boolean => "boolean",
            ParamType::Array => "array",
            ParamType::Object => "object",
        }
    }

    /// Coerce a JSON value to this type.
    ///
    /// Returns `None` when the value cannot represent this type. Strings that
    /// spell a number or boolean are accepted for the numeric and boolean
    /// types, and scalars are rendered to text for `string`.
    pub fn coerce(&self, value: &serde_json::Value) -> Option<serde_json::Value> {
        use serde_json::Value;

        match (self, value) {
            (ParamType::String, Value::String(_)) => Some(value.clone()),
            (ParamType::String, Value::Number(n)) => Some(Value::String(n.to_string())),
            (ParamType::String, Value::Bool(b)) => Some(Value::String(b.to_string())),

            (ParamType::Integer, Value::Number(n)) => {
                if n.is_i64() || n.is_u64() {
                    Some(value.clone())
                } else {
                    // 3.0 is an acceptable integer, 3.5 is not
                    n.as_f64()
                        .filter(|f| f.fract() == 0.0 && f.is_finite())
                        .map(|f| Value::from(f as i64))
                }
            }
            (ParamType::Integer, Value::String(s)) => s.trim().parse::<i64>().ok().map(Value::from),

            (ParamType::Number, Value::Number(_)) => Some(value.clone()),
            (ParamType::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|f| f.is_finite())
                .map(Value::from),

            (ParamType::Boolean, Value::Bool(_)) => Some(value.clone()),
            (ParamType::Boolean, Value::String(s)) => match s.trim().to_lowercase().as_str() {
                "true" => Some(Value::Bool(true)),
                "false" => Some(Value::Bool(false)),
                _ => None,
            },

            (ParamType::Array, Value::Array(_)) => Some(value.clone()),
            (ParamType::Object, Value::Object(_)) => Some(value.clone()),
            _ => None,
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parameter specification for a tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolParameter {
    /// Parameter name
    pub name: String,
    /// Parameter description
    pub description: String,
    /// Whether this parameter is required
    pub required: bool,
    /// Semantic type of the parameter
    pub param_type: ParamType,
    /// Allowed values (string parameters only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    /// Inclusive lower bound for numeric parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minimum: Option<f64>,
    /// Inclusive upper bound for numeric parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maximum: Option<f64>,
    /// Value the tool assumes when the argument is omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
}

impl ToolParameter {
    pub fn new(name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required,
            param_type: ParamType::String,
            enum_values: Vec::new(),
            minimum: None,
            maximum: None,
            default: None,
        }
    }

    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    pub fn with_enum<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_range(mut self, minimum: Option<f64>, maximum: Option<f64>) -> Self {
        self.minimum = minimum;
        self.maximum = maximum;
        self
    }

    pub fn with_default(mut self, value: impl Into<serde_json::Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// Schema of a tool: its unique name, purpose, inputs and outputs.
///
/// Immutable once registered in the [`ToolRegistry`](super::registry::ToolRegistry).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    /// Unique name of the tool (e.g., "calculator_tool")
    pub name: String,
    /// Human-readable description
    pub description: String,
    /// Input parameters
    pub input_schema: Vec<ToolParameter>,
    /// Fields present in a successful payload
    #[serde(default)]
    pub output_schema: Vec<ToolParameter>,
}

impl ToolDescriptor {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            input_schema: Vec::new(),
            output_schema: Vec::new(),
        }
    }

    pub fn with_parameter(mut self, param: ToolParameter) -> Self {
        self.input_schema.push(param);
        self
    }

    pub fn with_output(mut self, field: ToolParameter) -> Self {
        self.output_schema.push(field);
        self
    }

    pub fn parameter(&self, name: &str) -> Option<&ToolParameter> {
        self.input_schema.iter().find(|p| p.name == name)
    }

    pub fn required_parameters(&self) -> impl Iterator<Item = &ToolParameter> {
        self.input_schema.iter().filter(|p| p.required)
    }
}

/// A call to a tool with arguments
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Name of the tool to call
    pub tool_name: String,
    /// Arguments passed to the tool
    #[serde(default)]
    pub arguments: ToolArguments,
    /// Optional reasoning for why this tool is being called
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<String>,
}

impl ToolCall {
    pub fn new(tool_name: impl Into<String>) -> Self {
        Self {
            tool_name: tool_name.into(),
            arguments: ToolArguments::new(),
            reasoning: None,
        }
    }

    pub fn with_arg(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.arguments.insert(key.into(), value.into());
        self
    }

    pub fn with_arguments(mut self, arguments: ToolArguments) -> Self {
        self.arguments = arguments;
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Get a string argument
    pub fn get_string(&self, key: &str) -> Option<&str> {
        self.arguments.get(key).and_then(|v| v.as_str())
    }

    /// Render arguments as compact JSON for trace entries and logs.
    pub fn arguments_json(&self) -> String {
        serde_json::to_string(&self.arguments).unwrap_or_else(|_| "{}".to_string())
    }
}

impl std::fmt::Display for ToolCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.tool_name, self.arguments_json())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_descriptor() {
        let tool = ToolDescriptor::new("weather_tool", "Current weather")
            .with_parameter(ToolParameter::new("location", "City name", true))
            .with_parameter(
                ToolParameter::new("units", "Temperature units", false)
                    .with_enum(["celsius", "fahrenheit"]),
            );

        assert_eq!(tool.name, "weather_tool");
        assert_eq!(tool.input_schema.len(), 2);
        assert_eq!(tool.required_parameters().count(), 1);
        assert_eq!(tool.parameter("units").unwrap().enum_values.len(), 2);
        assert!(tool.parameter("missing").is_none());
    }

    #[test]
    fn test_coerce_integer() {
        assert_eq!(ParamType::Integer.coerce(&json!(3)), Some(json!(3)));
        assert_eq!(ParamType::Integer.coerce(&json!("42")), Some(json!(42)));
        assert_eq!(ParamType::Integer.coerce(&json!(3.0)), Some(json!(3)));
        assert_eq!(ParamType::Integer.coerce(&json!(3.5)), None);
        assert_eq!(ParamType::Integer.coerce(&json!("abc")), None);
    }

    #[test]
    fn test_coerce_string_and_boolean() {
        assert_eq!(ParamType::String.coerce(&json!(2)), Some(json!("2")));
        assert_eq!(ParamType::String.coerce(&json!(null)), None);
        assert_eq!(ParamType::Boolean.coerce(&json!("TRUE")), Some(json!(true)));
        assert_eq!(ParamType::Boolean.coerce(&json!("yes")), None);
        assert_eq!(ParamType::Object.coerce(&json!({"a": 1})), Some(json!({"a": 1})));
        assert_eq!(ParamType::Array.coerce(&json!("x")), None);
    }

    #[test]
    fn test_tool_call_display_is_stable() {
        let a = ToolCall::new("calc").with_arg("b", 2).with_arg("a", 1);
        let b = ToolCall::new("calc").with_arg("a", 1).with_arg("b", 2);

        assert_eq!(a, b);
        assert_eq!(a.to_string(), r#"calc({"a":1,"b":2})"#);
        assert_eq!(a.get_string("a"), None);
    }

    #[test]
    fn test_param_type_serde_lowercase() {
        let json = serde_json::to_string(&ParamType::Integer).unwrap();
        assert_eq!(json, "\"integer\"");
    }
}
