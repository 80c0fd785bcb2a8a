//! Port for structured run-event logging.
//!
//! Defines the [`RunEventLogger`] trait for recording the lifecycle of each
//! orchestrator run (query received, plan selected, tool results, answer) to
//! a machine-readable log.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostic messages, while this port captures one record
//! per event (JSONL in the infrastructure adapter).

use serde_json::Value;

/// A structured run event.
///
/// Each event has a type string and a JSON payload containing
/// event-specific fields. The adapter adds the timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct RunEvent {
    /// Event type identifier (e.g., "query_received", "tool_result").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl RunEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for logging run events.
///
/// `log` is synchronous and infallible so that a broken log sink never
/// affects the run; adapters swallow their own write errors.
pub trait RunEventLogger: Send + Sync {
    fn log(&self, event: RunEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoRunEventLogger;

impl RunEventLogger for NoRunEventLogger {
    fn log(&self, _event: RunEvent) {}
}
