//! Console output formatter for agent responses

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use toolcall_domain::{AgentInfo, AgentResponse, ToolDescriptor, ToolResult, summarize_payload};

/// Formats agent responses for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete response: answer, steps and tool outcomes
    pub fn format(response: &AgentResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Agent Response"));
        output.push('\n');

        output.push_str(&format!("{} {}\n", "Query:".cyan().bold(), response.query));
        if !response.context.is_empty() {
            let entries: Vec<String> = response
                .context
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            output.push_str(&format!("{} {}\n", "Context:".cyan().bold(), entries.join(", ")));
        }
        output.push_str(&format!(
            "{} {}\n",
            "Tools used:".cyan().bold(),
            if response.tools_used.is_empty() {
                "none".dimmed().to_string()
            } else {
                response.tools_used.join(", ")
            }
        ));

        output.push_str(&Self::section_header("Steps"));
        for (i, step) in response.steps.iter().enumerate() {
            output.push_str(&format!("{:>3}. {}\n", i + 1, step));
        }

        if !response.raw_outputs.is_empty() {
            output.push_str(&Self::section_header("Tool Results"));
            for result in &response.raw_outputs {
                output.push_str(&Self::tool_result_line(result));
                output.push('\n');
            }
        }

        output.push_str(&Self::section_header("Answer"));
        output.push('\n');
        output.push_str(&response.final_answer);
        output.push('\n');

        output.push_str(&format!(
            "\n{} {} in {:.2}s\n",
            "Status:".bold(),
            Self::status(response.success),
            response.execution_time_seconds
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(response: &AgentResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the answer only (concise output)
    pub fn format_answer_only(response: &AgentResponse) -> String {
        if response.success {
            response.final_answer.clone()
        } else {
            format!("{} {}", "Error:".red().bold(), response.final_answer)
        }
    }

    /// One line per registered tool
    pub fn format_tools(tools: &[&ToolDescriptor]) -> String {
        let mut output = format!("{}\n", "Available tools:".cyan().bold());
        for tool in tools {
            let params: Vec<String> = tool
                .input_schema
                .iter()
                .map(|p| {
                    if p.required {
                        p.name.clone()
                    } else {
                        format!("{}?", p.name)
                    }
                })
                .collect();
            output.push_str(&format!(
                "  {}({})\n      {}\n",
                tool.name.yellow().bold(),
                params.join(", "),
                tool.description
            ));
        }
        output
    }

    /// Tools the keyword rules would pick for a query
    pub fn format_suggestions(query: &str, suggestions: &[String]) -> String {
        if suggestions.is_empty() {
            format!(
                "{} no tool matches {:?}\n",
                "Suggested tools:".cyan().bold(),
                query
            )
        } else {
            format!(
                "{} {}\n",
                "Suggested tools:".cyan().bold(),
                suggestions.join(", ")
            )
        }
    }

    /// Agent self-description
    pub fn format_info(info: &AgentInfo) -> String {
        let mut output = String::new();
        output.push_str(&Self::header(&format!("{} v{}", info.name, info.version)));
        output.push('\n');
        output.push_str(&format!("{}\n\n", info.description));

        let status = if info.status() == "healthy" {
            info.status().green()
        } else {
            info.status().red()
        };
        output.push_str(&format!("{} {}\n", "Status:".cyan().bold(), status));

        let llm = match (&info.llm_available, &info.llm_unavailable_reason) {
            (true, _) => "available".green().to_string(),
            (false, Some(reason)) => format!("{} ({})", "unavailable".yellow(), reason),
            (false, None) => "unavailable".yellow().to_string(),
        };
        output.push_str(&format!("{} {}\n", "LLM:".cyan().bold(), llm));
        output.push_str(&format!(
            "{} {} (delay {} ms)\n",
            "Max retries:".cyan().bold(),
            info.max_retries,
            info.retry_delay_ms
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Max plan steps:".cyan().bold(),
            info.max_plan_steps
        ));

        output.push_str(&Self::section_header(&format!("Tools ({})", info.total_tools)));
        for tool in &info.tools {
            output.push_str(&format!("  * {}: {}\n", tool.name.yellow(), tool.description));
        }
        output.push_str(&Self::footer());
        output
    }

    fn tool_result_line(result: &ToolResult) -> String {
        let attempts = if result.attempts > 1 {
            format!(" after {} attempts", result.attempts)
        } else {
            String::new()
        };

        if result.success {
            let summary = summarize_payload(result.payload());
            format!(
                "  {} {} ({} ms{}): {}",
                "v".green(),
                result.tool_name.bold(),
                result.duration_ms(),
                attempts,
                summary
            )
        } else {
            let code = result.error().map(|e| e.code.as_str()).unwrap_or("ERROR");
            format!(
                "  {} {} ({} ms{}): [{}] {}",
                "x".red(),
                result.tool_name.bold(),
                result.duration_ms(),
                attempts,
                code,
                result.error_message()
            )
        }
    }

    fn status(success: bool) -> colored::ColoredString {
        if success {
            "success".green().bold()
        } else {
            "failed".red().bold()
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_answer(&self, response: &AgentResponse) -> String {
        Self::format_answer_only(response)
    }

    fn format_full(&self, response: &AgentResponse) -> String {
        Self::format(response)
    }

    fn format_json(&self, response: &AgentResponse) -> String {
        Self::format_json(response)
    }
}
