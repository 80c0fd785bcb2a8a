//! Retry supervisor
//!
//! Wraps [`ToolInvoker`] calls with a bounded number of attempts and a fixed
//! delay between them.
//!
//! ```text
//! Pending → Attempting ─┬─ success ───────────────▶ Success
//!              ▲        ├─ retryable, budget left ─┐
//!              └────────┘ (sleep retry_delay) ◀────┘
//!                       └─ otherwise ─────────────▶ Exhausted (last result)
//! ```

use std::time::Duration;

use tracing::{info, warn};
use toolcall_domain::{StepTrace, ToolCall, ToolResult};

use super::invoker::ToolInvoker;
use crate::ports::agent_progress::AgentProgressNotifier;

/// Bounded retry policy for one planned step.
#[derive(Debug, Clone)]
pub struct RetrySupervisor {
    max_retries: u32,
    delay: Duration,
}

impl RetrySupervisor {
    pub fn new(max_retries: u32, delay: Duration) -> Self {
        Self { max_retries, delay }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Run `call` until it succeeds, fails terminally, or the budget is spent.
    ///
    /// Appends exactly one `Attempt k/N` entry to `trace` per attempt. The
    /// returned result is the last attempt's result, unchanged apart from its
    /// attempt count.
    pub async fn execute(
        &self,
        invoker: &ToolInvoker,
        call: &ToolCall,
        trace: &mut StepTrace,
        progress: &dyn AgentProgressNotifier,
    ) -> ToolResult {
        let max_attempts = self.max_attempts();
        let mut attempt = 1;

        loop {
            progress.on_tool_attempt(call, attempt, max_attempts);
            let result = invoker.invoke(call).await.with_attempts(attempt);
            let prefix = format!("Attempt {}/{}: {}", attempt, max_attempts, call.tool_name);

            if result.success {
                info!(tool = %call.tool_name, attempt, "Tool succeeded");
                trace.push(format!("{} succeeded in {}ms", prefix, result.duration_ms()));
                return result;
            }

            let error = result
                .error()
                .map(ToString::to_string)
                .unwrap_or_else(|| "Unknown error".to_string());
            let retryable = result.error().is_none_or(|e| e.is_retryable());

            if !retryable {
                warn!(tool = %call.tool_name, attempt, error = %error, "Tool failed, not retryable");
                trace.push(format!("{} failed: {} (not retried)", prefix, error));
                return result;
            }

            if attempt >= max_attempts {
                warn!(tool = %call.tool_name, attempt, error = %error, "Tool failed, retries exhausted");
                trace.push(format!("{} failed: {} (retries exhausted)", prefix, error));
                return result;
            }

            warn!(tool = %call.tool_name, attempt, error = %error, "Tool failed, retrying");
            trace.push(format!(
                "{} failed: {}; retrying in {}ms",
                prefix,
                error,
                self.delay.as_millis()
            ));
            tokio::time::sleep(self.delay).await;
            attempt += 1;
        }
    }
}
