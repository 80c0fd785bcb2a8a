//! Output formatter trait

use toolcall_domain::{AgentResponse, OutputFormat};

/// Trait for formatting agent responses
pub trait OutputFormatter {
    /// Only the final answer
    fn format_answer(&self, response: &AgentResponse) -> String;

    /// Answer plus step trace and per-tool outcomes
    fn format_full(&self, response: &AgentResponse) -> String;

    /// The whole response as JSON
    fn format_json(&self, response: &AgentResponse) -> String;

    /// Dispatch on `format`
    fn render(&self, response: &AgentResponse, format: OutputFormat) -> String {
        match format {
            OutputFormat::Answer => self.format_answer(response),
            OutputFormat::Full => self.format_full(response),
            OutputFormat::Json => self.format_json(response),
        }
    }
}
