//! Agent self-description.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Brief tool entry for the info payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolSummary {
    pub name: String,
    pub description: String,
}

/// Name, version, retry settings and capabilities of a configured agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentInfo {
    pub name: String,
    pub version: String,
    pub description: String,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub max_plan_steps: usize,
    pub llm_available: bool,
    /// Why the LLM is unavailable, when it is
    #[serde(skip_serializing_if = "Option::is_none")]
    pub llm_unavailable_reason: Option<String>,
    pub total_tools: usize,
    pub tools: Vec<ToolSummary>,
    pub timestamp: DateTime<Utc>,
}

impl AgentInfo {
    /// `healthy` when at least one tool is registered.
    pub fn status(&self) -> &'static str {
        if self.total_tools > 0 {
            "healthy"
        } else {
            "unhealthy"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status() {
        let mut info = AgentInfo {
            name: "toolcall-agent".into(),
            version: "0.1.0".into(),
            description: String::new(),
            max_retries: 2,
            retry_delay_ms: 1000,
            max_plan_steps: 5,
            llm_available: false,
            llm_unavailable_reason: Some("no API key".into()),
            total_tools: 0,
            tools: Vec::new(),
            timestamp: Utc::now(),
        };
        assert_eq!(info.status(), "unhealthy");
        info.total_tools = 1;
        assert_eq!(info.status(), "healthy");
    }
}
