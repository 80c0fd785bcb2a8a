//! Output format value object

use serde::{Deserialize, Serialize};

/// How an agent response is rendered for the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Only the final answer (default)
    #[default]
    Answer,
    /// Answer plus plan, step trace and per-tool outcomes
    Full,
    /// The whole response as JSON
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "answer" => Ok(OutputFormat::Answer),
            "full" => Ok(OutputFormat::Full),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{}', expected answer, full or json",
                other
            )),
        }
    }
}
