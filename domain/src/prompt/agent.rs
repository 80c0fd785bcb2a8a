//! Prompt templates for tool selection and answer synthesis

use crate::agent::answer::result_line;
use crate::core::context::QueryContext;
use crate::tool::entities::ToolDescriptor;
use crate::tool::value_objects::ToolResult;

/// Templates for generating agent prompts
pub struct AgentPromptTemplate;

impl AgentPromptTemplate {
    /// System prompt for the selection call
    pub fn selection_system() -> &'static str {
        "You are a tool-routing assistant. You decide which tools answer a user's query \
         and with which arguments. You reply with JSON only."
    }

    /// Render tool descriptors as a bullet list with their parameters.
    pub fn tool_catalog(tools: &[&ToolDescriptor]) -> String {
        tools
            .iter()
            .map(|t| {
                let params = t
                    .input_schema
                    .iter()
                    .map(|p| {
                        let required = if p.required { ", required" } else { "" };
                        let allowed = if p.enum_values.is_empty() {
                            String::new()
                        } else {
                            format!(" One of: {}.", p.enum_values.join(", "))
                        };
                        format!(
                            "    - {} ({}{}): {}{}",
                            p.name, p.param_type, required, p.description, allowed
                        )
                    })
                    .collect::<Vec<_>>()
                    .join("\n");
                format!("- {}: {}\n{}", t.name, t.description, params)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Prompt asking the LLM for an ordered tool plan
    pub fn selection_prompt(query: &str, tools: &[&ToolDescriptor], context: &QueryContext) -> String {
        let context_section = if context.is_empty() {
            "(none)".to_string()
        } else {
            context
                .iter()
                .map(|(k, v)| format!("- {}: {}", k, v))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            r#"Available tools:
{catalog}

User query: {query}

Context:
{context_section}

Choose the tool(s) needed to answer the query, in the order they should run.
Extract concrete argument values from the query (for example the location for
weather or the search terms for a search). Use the context's file_path for
document tools.

Respond with a JSON array and nothing else:
[
  {{"tool": "tool_name", "arguments": {{"param": "value"}}, "reasoning": "why"}}
]

Respond with [] if no tool applies."#,
            catalog = Self::tool_catalog(tools),
        )
    }

    /// System prompt for the synthesis call
    pub fn synthesis_system() -> &'static str {
        "You are a helpful AI assistant that provides clear, concise answers based on tool execution results."
    }

    /// Prompt asking the LLM to answer from tool results
    pub fn synthesis_prompt(query: &str, steps: &[String], results: &[ToolResult]) -> String {
        let steps_text = steps
            .iter()
            .enumerate()
            .map(|(i, s)| format!("{}. {}", i + 1, s))
            .collect::<Vec<_>>()
            .join("\n");
        let results_text = results
            .iter()
            .map(result_line)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            r#"Based on the tool execution results below, answer the user's question.

User question: {query}

Execution steps:
{steps_text}

Tool results:
{results_text}

Give a natural, conversational answer that directly addresses the question
using the tool results. If a tool failed, mention it briefly and focus on the
successful results."#
        )
    }
}
