//! Tool call plan produced by the selector for one query.

use serde::{Deserialize, Serialize};

use crate::tool::entities::ToolCall;

/// Which strategy produced a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanSource {
    /// Structured plan returned by the LLM collaborator
    Llm,
    /// Deterministic keyword rule table
    Heuristic,
}

impl std::fmt::Display for PlanSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlanSource::Llm => write!(f, "LLM"),
            PlanSource::Heuristic => write!(f, "keyword rules"),
        }
    }
}

/// Ordered sequence of tool calls for one query.
///
/// Steps execute strictly in this order; later steps may depend on the
/// outcome of earlier ones.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCallPlan {
    pub source: PlanSource,
    pub steps: Vec<ToolCall>,
}

impl ToolCallPlan {
    pub fn new(source: PlanSource) -> Self {
        Self {
            source,
            steps: Vec::new(),
        }
    }

    pub fn from_steps(source: PlanSource, steps: Vec<ToolCall>) -> Self {
        Self { source, steps }
    }

    pub fn push(&mut self, call: ToolCall) {
        self.steps.push(call);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ToolCall> {
        self.steps.iter()
    }

    /// Keep the first `max_steps` steps. Returns the number dropped.
    pub fn truncate(&mut self, max_steps: usize) -> usize {
        let dropped = self.steps.len().saturating_sub(max_steps);
        self.steps.truncate(max_steps);
        dropped
    }

    /// Tool names in plan order (duplicates kept).
    pub fn tool_names(&self) -> Vec<&str> {
        self.steps.iter().map(|c| c.tool_name.as_str()).collect()
    }

    /// One-line rendering used in trace entries: `a({...}), b({...})`.
    pub fn describe(&self) -> String {
        self.steps
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl IntoIterator for ToolCallPlan {
    type Item = ToolCall;
    type IntoIter = std::vec::IntoIter<ToolCall>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.into_iter()
    }
}

impl<'a> IntoIterator for &'a ToolCallPlan {
    type Item = &'a ToolCall;
    type IntoIter = std::slice::Iter<'a, ToolCall>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan_of(names: &[&str]) -> ToolCallPlan {
        ToolCallPlan::from_steps(
            PlanSource::Heuristic,
            names.iter().map(|n| ToolCall::new(*n)).collect(),
        )
    }

    #[test]
    fn test_truncate_keeps_highest_priority() {
        let mut plan = plan_of(&["search_tool", "calculator_tool", "weather_tool"]);
        assert_eq!(plan.truncate(2), 1);
        assert_eq!(plan.tool_names(), vec!["search_tool", "calculator_tool"]);

        assert_eq!(plan.truncate(5), 0);
        assert_eq!(plan.len(), 2);
    }

    #[test]
    fn test_describe() {
        let plan = ToolCallPlan::from_steps(
            PlanSource::Llm,
            vec![ToolCall::new("weather_tool").with_arg("location", "Tokyo")],
        );
        assert_eq!(plan.describe(), r#"weather_tool({"location":"Tokyo"})"#);
        assert_eq!(plan.source.to_string(), "LLM");
    }
}
