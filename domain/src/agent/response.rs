//! Agent response and step trace

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::context::QueryContext;
use crate::tool::value_objects::ToolResult;

/// Append-only, human-readable record of one run's lifecycle events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepTrace(Vec<String>);

impl StepTrace {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        self.0.push(entry.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    pub fn into_inner(self) -> Vec<String> {
        self.0
    }
}

/// Distinct tool names of `results` in first-occurrence order.
pub fn tools_used(results: &[ToolResult]) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for result in results {
        if !names.iter().any(|n| n == &result.tool_name) {
            names.push(result.tool_name.clone());
        }
    }
    names
}

/// Structured outcome of one orchestrator run.
///
/// `tools_used` is always derived from `raw_outputs`; build responses with
/// [`AgentResponse::new`] rather than by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub query: String,
    pub final_answer: String,
    pub tools_used: Vec<String>,
    pub steps: Vec<String>,
    pub raw_outputs: Vec<ToolResult>,
    pub execution_time_seconds: f64,
    pub success: bool,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub context: QueryContext,
}

impl AgentResponse {
    pub fn new(
        query: impl Into<String>,
        context: QueryContext,
        final_answer: impl Into<String>,
        success: bool,
        trace: StepTrace,
        raw_outputs: Vec<ToolResult>,
        execution_time_seconds: f64,
    ) -> Self {
        Self {
            query: query.into(),
            final_answer: final_answer.into(),
            tools_used: tools_used(&raw_outputs),
            steps: trace.into_inner(),
            raw_outputs,
            execution_time_seconds,
            success,
            timestamp: Utc::now(),
            context,
        }
    }

    /// Number of tool results that succeeded
    pub fn successful_tools(&self) -> usize {
        self.raw_outputs.iter().filter(|r| r.success).count()
    }

    pub fn failed_tools(&self) -> usize {
        self.raw_outputs.len() - self.successful_tools()
    }
}
