//! Tool domain value objects: immutable result and error types
//!
//! Every tool invocation that reaches a terminal state produces one
//! [`ToolResult`]. Failures are values: a [`ToolError`] is carried inside the
//! result and never propagated past the invoker boundary.
//!
//! Error codes drive the **retry policy**: `INVALID_ARGUMENT` and
//! `UNKNOWN_TOOL` are terminal (another attempt cannot change the outcome),
//! every other code is retried while the retry budget lasts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Error that occurred during tool execution.
///
/// | Code | Retryable? | Description |
/// |------|-----------|-------------|
/// | `INVALID_ARGUMENT` | No | Missing/wrong parameters |
/// | `UNKNOWN_TOOL` | No | Tool name not registered |
/// | `EXECUTION_FAILED` | Yes | Runtime failure (I/O error, HTTP error) |
/// | `NOT_FOUND` | Yes | Resource the tool looked for is missing |
/// | `PERMISSION_DENIED` | Yes | Access denied |
/// | `TIMEOUT` | Yes | Per-call timeout elapsed |
/// | `PANICKED` | Yes | Handler panicked |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolError {
    /// Error code (e.g., "NOT_FOUND", "TIMEOUT")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ToolError {
    pub const INVALID_ARGUMENT: &'static str = "INVALID_ARGUMENT";
    pub const UNKNOWN_TOOL: &'static str = "UNKNOWN_TOOL";
    pub const EXECUTION_FAILED: &'static str = "EXECUTION_FAILED";
    pub const NOT_FOUND: &'static str = "NOT_FOUND";
    pub const PERMISSION_DENIED: &'static str = "PERMISSION_DENIED";
    pub const TIMEOUT: &'static str = "TIMEOUT";
    pub const PANICKED: &'static str = "PANICKED";

    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    // Common error constructors
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(Self::INVALID_ARGUMENT, message)
    }

    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::new(Self::UNKNOWN_TOOL, format!("Unknown tool: {}", name.into()))
    }

    pub fn execution_failed(message: impl Into<String>) -> Self {
        Self::new(Self::EXECUTION_FAILED, message)
    }

    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            Self::NOT_FOUND,
            format!("Resource not found: {}", resource.into()),
        )
    }

    pub fn permission_denied(resource: impl Into<String>) -> Self {
        Self::new(
            Self::PERMISSION_DENIED,
            format!("Permission denied: {}", resource.into()),
        )
    }

    pub fn timeout(operation: impl Into<String>) -> Self {
        Self::new(
            Self::TIMEOUT,
            format!("Operation timed out: {}", operation.into()),
        )
    }

    pub fn panicked(message: impl Into<String>) -> Self {
        Self::new(Self::PANICKED, message)
    }

    /// Whether another attempt could produce a different outcome.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self.code.as_str(),
            Self::INVALID_ARGUMENT | Self::UNKNOWN_TOOL
        )
    }
}

impl std::fmt::Display for ToolError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for ToolError {}

/// Terminal outcome of one tool invocation.
///
/// Produced by the invoker, passed through the retry supervisor unchanged,
/// and accumulated in order into the agent response's `raw_outputs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolResult {
    /// Name of the tool that was executed
    pub tool_name: String,
    /// Whether the execution was successful
    pub success: bool,
    /// Structured output (for successful execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<serde_json::Value>,
    /// Error information (for failed execution)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolError>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    /// Number of attempts the retry supervisor spent on this result
    #[serde(default = "one")]
    pub attempts: u32,
}

fn one() -> u32 {
    1
}

impl ToolResult {
    /// Create a successful result
    pub fn success(
        tool_name: impl Into<String>,
        payload: serde_json::Value,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: true,
            payload: Some(payload),
            error: None,
            started_at,
            finished_at: Utc::now(),
            attempts: 1,
        }
    }

    /// Create a failed result
    pub fn failure(tool_name: impl Into<String>, error: ToolError, started_at: DateTime<Utc>) -> Self {
        Self {
            tool_name: tool_name.into(),
            success: false,
            payload: None,
            error: Some(error),
            started_at,
            finished_at: Utc::now(),
            attempts: 1,
        }
    }

    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Check if execution was successful
    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn payload(&self) -> Option<&serde_json::Value> {
        self.payload.as_ref()
    }

    /// Get the error
    pub fn error(&self) -> Option<&ToolError> {
        self.error.as_ref()
    }

    /// Error message, or "Unknown error" for a failure without details.
    pub fn error_message(&self) -> &str {
        self.error
            .as_ref()
            .map(|e| e.message.as_str())
            .unwrap_or("Unknown error")
    }

    /// Wall-clock duration in milliseconds
    pub fn duration_ms(&self) -> u64 {
        (self.finished_at - self.started_at)
            .num_milliseconds()
            .max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_tool_error() {
        let err = ToolError::not_found("/path/to/file").with_details("File does not exist");

        assert_eq!(err.code, "NOT_FOUND");
        assert!(err.message.contains("/path/to/file"));
        assert_eq!(
            err.to_string(),
            "[NOT_FOUND] Resource not found: /path/to/file (File does not exist)"
        );
    }

    #[test]
    fn test_retryable_codes() {
        assert!(!ToolError::invalid_argument("bad").is_retryable());
        assert!(!ToolError::unknown_tool("nope").is_retryable());
        assert!(ToolError::execution_failed("io").is_retryable());
        assert!(ToolError::timeout("weather_tool").is_retryable());
        assert!(ToolError::panicked("boom").is_retryable());
    }

    #[test]
    fn test_tool_result_success() {
        let result = ToolResult::success("calculator_tool", json!({"result": 4}), Utc::now());

        assert!(result.is_success());
        assert_eq!(result.payload(), Some(&json!({"result": 4})));
        assert!(result.error().is_none());
        assert_eq!(result.attempts, 1);
        assert!(result.finished_at >= result.started_at);
    }

    #[test]
    fn test_tool_result_failure() {
        let result = ToolResult::failure(
            "weather_tool",
            ToolError::execution_failed("geocoding failed"),
            Utc::now(),
        )
        .with_attempts(3);

        assert!(!result.is_success());
        assert!(result.payload().is_none());
        assert_eq!(result.error_message(), "geocoding failed");
        assert_eq!(result.attempts, 3);
    }

    #[test]
    fn test_tool_result_serialization_skips_empty_fields() {
        let result = ToolResult::success("search_tool", json!({"summary": "ok"}), Utc::now());
        let value = serde_json::to_value(&result).unwrap();

        assert_eq!(value["tool_name"], "search_tool");
        assert!(value.get("error").is_none());
        assert!(value.get("started_at").is_some());
    }
}
