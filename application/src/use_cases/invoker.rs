//! Tool invoker
//!
//! Executes one named tool: lookup, argument validation, then the handler
//! under a per-call timeout. Every path ends in a [`ToolResult`]; nothing
//! raised by a handler crosses this boundary.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinError;
use tracing::{debug, warn};
use toolcall_domain::{
    DefaultToolValidator, ToolCall, ToolError, ToolRegistry, ToolResult, ToolValidator,
};

/// Executes single tool calls against the registry.
pub struct ToolInvoker {
    registry: Arc<ToolRegistry>,
    validator: DefaultToolValidator,
    timeout: Duration,
}

impl ToolInvoker {
    pub fn new(registry: Arc<ToolRegistry>, timeout: Duration) -> Self {
        Self {
            registry,
            validator: DefaultToolValidator,
            timeout,
        }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Invoke `call` once.
    ///
    /// The handler runs on its own tokio task so a panic is reported as a
    /// `PANICKED` failure. When the timeout elapses the task is detached,
    /// not aborted: side effects already underway complete on their own.
    pub async fn invoke(&self, call: &ToolCall) -> ToolResult {
        let started_at = Utc::now();
        let name = call.tool_name.as_str();

        let tool = match self.registry.lookup(name) {
            Ok(tool) => tool,
            Err(_) => return ToolResult::failure(name, ToolError::unknown_tool(name), started_at),
        };

        let arguments = match self.validator.validate(&call.arguments, &tool.descriptor) {
            Ok(args) => args,
            Err(e) => {
                return ToolResult::failure(
                    name,
                    ToolError::invalid_argument(e.to_string()),
                    started_at,
                );
            }
        };

        debug!(tool = %name, args = %call.arguments_json(), "Invoking tool");

        let handler = Arc::clone(&tool.handler);
        let task = tokio::spawn(async move { handler.execute(&arguments).await });

        match tokio::time::timeout(self.timeout, task).await {
            Ok(Ok(Ok(payload))) => ToolResult::success(name, payload, started_at),
            Ok(Ok(Err(error))) => ToolResult::failure(name, error, started_at),
            Ok(Err(join_error)) => {
                let error = join_error_to_tool_error(join_error);
                warn!(tool = %name, error = %error, "Tool task did not complete");
                ToolResult::failure(name, error, started_at)
            }
            Err(_) => {
                warn!(tool = %name, timeout_ms = self.timeout.as_millis() as u64, "Tool call timed out");
                ToolResult::failure(
                    name,
                    ToolError::timeout(format!("{} after {}ms", name, self.timeout.as_millis())),
                    started_at,
                )
            }
        }
    }
}

fn join_error_to_tool_error(error: JoinError) -> ToolError {
    if !error.is_panic() {
        return ToolError::execution_failed("tool task was cancelled");
    }

    let panic = error.into_panic();
    let message = panic
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());
    ToolError::panicked(format!("Tool handler panicked: {}", message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockCalculator, PanickingTool, SlowTool};
    use serde_json::json;

    fn invoker(timeout: Duration) -> ToolInvoker {
        let mut registry = ToolRegistry::new();
        registry.register(MockCalculator).unwrap();
        registry.register(PanickingTool).unwrap();
        registry.register(SlowTool(Duration::from_millis(300))).unwrap();
        ToolInvoker::new(Arc::new(registry), timeout)
    }

    #[tokio::test]
    async fn test_invoke_success() {
        let result = invoker(Duration::from_secs(5))
            .invoke(&ToolCall::new("calculator_tool").with_arg("expression", "2 + 2"))
            .await;
        assert!(result.success);
        assert_eq!(result.payload().unwrap()["result"], json!(4.0));
        assert!(result.finished_at >= result.started_at);
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let result = invoker(Duration::from_secs(5))
            .invoke(&ToolCall::new("nope"))
            .await;
        assert!(!result.success);
        assert_eq!(result.error().unwrap().code, ToolError::UNKNOWN_TOOL);
    }

    #[tokio::test]
    async fn test_invalid_arguments() {
        let result = invoker(Duration::from_secs(5))
            .invoke(&ToolCall::new("calculator_tool"))
            .await;
        assert_eq!(result.error().unwrap().code, ToolError::INVALID_ARGUMENT);
        assert!(result.error_message().contains("Missing required parameter"));
    }

    #[tokio::test]
    async fn test_handler_error_is_captured() {
        let result = invoker(Duration::from_secs(5))
            .invoke(&ToolCall::new("calculator_tool").with_arg("expression", "two + 2"))
            .await;
        assert!(!result.success);
        assert_eq!(result.tool_name, "calculator_tool");
    }

    #[tokio::test]
    async fn test_panic_is_captured() {
        let result = invoker(Duration::from_secs(5))
            .invoke(&ToolCall::new("panicking_tool"))
            .await;
        let error = result.error().unwrap();
        assert_eq!(error.code, ToolError::PANICKED);
        assert!(error.message.contains("handler exploded"));
    }

    #[tokio::test]
    async fn test_timeout() {
        let result = invoker(Duration::from_millis(20))
            .invoke(&ToolCall::new("slow_tool"))
            .await;
        assert_eq!(result.error().unwrap().code, ToolError::TIMEOUT);
        assert!(result.error_message().contains("slow_tool"));
    }
}
