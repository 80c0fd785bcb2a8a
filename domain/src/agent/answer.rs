//! Extractive answer composition
//!
//! Used by the synthesizer when no LLM is available (or the LLM returned
//! nothing usable). Pure functions of the result sequence.

use crate::core::string::{squash_whitespace, truncate};
use crate::tool::value_objects::ToolResult;

/// Answer when no tool ran at all.
pub const NO_RESULTS_ANSWER: &str =
    "I wasn't able to execute any tools to answer your question. Please try rephrasing your query.";

/// Answer used when composing the fallback answer itself failed.
pub const GENERIC_ANSWER: &str =
    "I ran the requested tools but could not put their results into words. See the raw outputs for details.";

/// Maximum characters of a rendered payload in a summary line.
const SUMMARY_MAX_CHARS: usize = 200;

/// Payload fields that already hold human-readable text, in preference order.
const TEXT_FIELDS: &[&str] = &["summary", "formatted_result", "answer"];

/// Short human-readable summary of a result's payload.
pub fn summarize_payload(payload: Option<&serde_json::Value>) -> String {
    let Some(payload) = payload else {
        return "Operation completed successfully".to_string();
    };

    if let Some(text) = payload.as_str() {
        return truncate(&squash_whitespace(text), SUMMARY_MAX_CHARS);
    }

    let field = TEXT_FIELDS.iter().find_map(|key| {
        payload
            .get(*key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    });

    match field {
        Some(text) => truncate(&squash_whitespace(text), SUMMARY_MAX_CHARS),
        None => truncate(&payload.to_string(), SUMMARY_MAX_CHARS),
    }
}

/// One line per result: `tool: summary` or `tool: Failed - error`.
pub fn result_line(result: &ToolResult) -> String {
    if result.success {
        format!("{}: {}", result.tool_name, summarize_payload(result.payload()))
    } else {
        format!("{}: Failed - {}", result.tool_name, result.error_message())
    }
}

/// Compose the final answer from tool results without an LLM.
///
/// Never returns an empty string.
pub fn compose_fallback_answer(results: &[ToolResult]) -> String {
    if results.is_empty() {
        return NO_RESULTS_ANSWER.to_string();
    }

    let (succeeded, failed): (Vec<&ToolResult>, Vec<&ToolResult>) =
        results.iter().partition(|r| r.success);

    if succeeded.is_empty() {
        let errors = failed
            .iter()
            .map(|r| format!("{} ({})", r.error_message(), r.tool_name))
            .collect::<Vec<_>>()
            .join("; ");
        return format!("I encountered errors while processing your request: {}", errors);
    }

    let mut parts: Vec<String> = succeeded
        .iter()
        .map(|r| format!("From {}: {}", r.tool_name, summarize_payload(r.payload())))
        .collect();

    if !failed.is_empty() {
        let apologies = failed
            .iter()
            .map(|r| format!("Sorry, {} failed: {}.", r.tool_name, r.error_message()))
            .collect::<Vec<_>>()
            .join(" ");
        parts.push(apologies);
    }

    format!("Here's what I found:\n\n{}", parts.join("\n\n"))
}
