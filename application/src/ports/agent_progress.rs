//! Agent execution progress port.
//!
//! [`AgentProgressNotifier`] is an **output port** that the presentation layer
//! implements to display real-time progress of one orchestrator run.
//! All callback argument types come from the domain layer.

use toolcall_domain::{ExecutionPhase, ToolCall, ToolCallPlan, ToolResult};

/// Progress notifier for agent execution.
///
/// All methods have default no-op implementations, so implementers only
/// need to override the callbacks they care about.
pub trait AgentProgressNotifier: Send + Sync {
    /// Called when the run transitions to a new phase
    fn on_phase_change(&self, _phase: &ExecutionPhase) {}

    /// Called once the selector produced a plan
    fn on_plan_selected(&self, _plan: &ToolCallPlan) {}

    /// Called before each attempt of a tool call
    fn on_tool_attempt(&self, _call: &ToolCall, _attempt: u32, _max_attempts: u32) {}

    /// Called with the terminal result of a planned step
    fn on_tool_result(&self, _result: &ToolResult) {}

    /// Called when the final answer is ready
    fn on_answer(&self, _answer: &str, _success: bool) {}
}

/// No-op progress notifier
pub struct NoAgentProgress;

impl AgentProgressNotifier for NoAgentProgress {}
