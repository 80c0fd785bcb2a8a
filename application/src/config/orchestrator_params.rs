//! Orchestrator parameters: run control.
//!
//! [`OrchestratorParams`] groups the static parameters that control one
//! orchestrator run: retry policy, plan size, and time bounds. These are
//! application-layer concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Run control parameters.
///
/// | Parameter | Default | Used by |
/// |-----------|---------|---------|
/// | `max_retries` | 2 | RetrySupervisor |
/// | `retry_delay` | 1 s | RetrySupervisor |
/// | `max_plan_steps` | 5 | Selector |
/// | `tool_timeout` | 30 s | ToolInvoker |
/// | `query_timeout` | 120 s | Orchestrator |
/// | `fallback_on_llm_error` | false | Selector, Synthesizer |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrchestratorParams {
    /// Extra attempts after the first failed one.
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub retry_delay: Duration,
    /// Plans longer than this are truncated.
    pub max_plan_steps: usize,
    /// Per-call tool timeout.
    pub tool_timeout: Duration,
    /// Wall-clock bound of a whole run.
    pub query_timeout: Duration,
    /// Fall back to heuristics when an available LLM fails at runtime.
    pub fallback_on_llm_error: bool,
}

impl Default for OrchestratorParams {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay: Duration::from_secs(1),
            max_plan_steps: 5,
            tool_timeout: Duration::from_secs(30),
            query_timeout: Duration::from_secs(120),
            fallback_on_llm_error: false,
        }
    }
}

impl OrchestratorParams {
    // ==================== Builder Methods ====================

    pub fn with_max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn with_max_plan_steps(mut self, max: usize) -> Self {
        self.max_plan_steps = max;
        self
    }

    pub fn with_tool_timeout(mut self, timeout: Duration) -> Self {
        self.tool_timeout = timeout;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.query_timeout = timeout;
        self
    }

    pub fn with_fallback_on_llm_error(mut self, enabled: bool) -> Self {
        self.fallback_on_llm_error = enabled;
        self
    }

    /// Total attempts per step, including the first one.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}
