//! Agent configuration from TOML (`[agent]` section)
//!
//! ```toml
//! [agent]
//! max_retries = 2
//! retry_delay_ms = 1000
//! max_plan_steps = 5
//! tool_timeout_secs = 30
//! query_timeout_secs = 120
//! ```

use serde::{Deserialize, Serialize};

/// Raw agent configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileAgentConfig {
    /// Extra attempts after a failed tool call
    pub max_retries: u32,
    /// Delay between attempts, in milliseconds
    pub retry_delay_ms: u64,
    /// Longest plan executed for one query
    pub max_plan_steps: usize,
    /// Per-call tool timeout
    pub tool_timeout_secs: u64,
    /// Wall-clock bound of one query
    pub query_timeout_secs: u64,
}

impl Default for FileAgentConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            retry_delay_ms: 1000,
            max_plan_steps: 5,
            tool_timeout_secs: 30,
            query_timeout_secs: 120,
        }
    }
}
