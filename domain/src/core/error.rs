//! Domain error types
//!
//! The taxonomy separates failures that are absorbed locally (invalid plan
//! steps, tool failures, fallback synthesis failures) from failures of the
//! orchestration spine itself, which surface as `success = false`.

use std::time::Duration;

use thiserror::Error;

use crate::tool::value_objects::ToolError;

/// Agent-level errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AgentError {
    /// A plan step references an unknown tool or carries malformed
    /// arguments. The step is dropped; the run continues.
    #[error("Invalid plan step for '{tool}': {reason}")]
    InvalidPlanStep { tool: String, reason: String },

    /// A tool handler failed. Captured into a `ToolResult`.
    #[error("Tool execution failed: {0}")]
    ToolExecution(ToolError),

    /// Fallback answer composition failed. Replaced by a generic answer.
    #[error("Synthesis failed: {0}")]
    Synthesis(String),

    /// The selector or synthesizer failed in a way no fallback absorbed.
    #[error("{0}")]
    Fatal(String),

    #[error("Query timed out after {0:?}")]
    Timeout(Duration),

    #[error("Query cancelled")]
    Cancelled,
}

impl AgentError {
    /// Whether this error ends the run with `success = false`.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AgentError::Fatal(_) | AgentError::Timeout(_) | AgentError::Cancelled
        )
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, AgentError::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AgentError::InvalidPlanStep {
            tool: "weather_tool".into(),
            reason: "missing location".into(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid plan step for 'weather_tool': missing location"
        );
        assert_eq!(
            AgentError::Timeout(Duration::from_secs(5)).to_string(),
            "Query timed out after 5s"
        );
    }

    #[test]
    fn test_fatal_classification() {
        assert!(AgentError::Fatal("selector".into()).is_fatal());
        assert!(AgentError::Cancelled.is_fatal());
        assert!(AgentError::Timeout(Duration::from_millis(50)).is_fatal());
        assert!(!AgentError::Synthesis("oops".into()).is_fatal());
        assert!(!AgentError::ToolExecution(ToolError::timeout("x")).is_fatal());
        assert!(AgentError::Cancelled.is_cancelled());
    }
}
