//! Plan parsing from LLM responses.
//!
//! The selection prompt asks for a JSON array of
//! `{"tool": "...", "arguments": {...}}` objects. Models do not always
//! comply exactly, so three shapes are accepted:
//!
//! 1. A raw JSON array
//! 2. A fenced ` ```json ` (or bare ` ``` `) block containing one
//! 3. An object with a `tool_calls` array
//!
//! Entries are parsed independently: one malformed entry does not discard
//! the rest of the plan.

use crate::tool::entities::{ToolArguments, ToolCall};

/// Result of parsing one plan entry: a call, or why it was rejected.
pub type ParsedEntry = Result<ToolCall, String>;

/// Parse the entries of a plan from model response text.
///
/// Returns `None` if no plan-shaped JSON can be found at all. An empty
/// array is a valid (empty) plan.
pub fn parse_tool_calls(response: &str) -> Option<Vec<ParsedEntry>> {
    let trimmed = response.trim();

    if let Some(entries) = parse_json_str(trimmed) {
        return Some(entries);
    }

    for block in fenced_blocks(trimmed) {
        if let Some(entries) = parse_json_str(&block) {
            return Some(entries);
        }
    }

    // Prose around a bare array: take the outermost brackets
    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']'))
        && start < end
    {
        return parse_json_str(&trimmed[start..=end]);
    }

    None
}

fn parse_json_str(text: &str) -> Option<Vec<ParsedEntry>> {
    let value = serde_json::from_str::<serde_json::Value>(text).ok()?;
    parse_plan_json(&value)
}

/// Contents of every ``` fenced block, in order.
fn fenced_blocks(response: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Option<String> = None;

    for line in response.lines() {
        let line_trimmed = line.trim();
        match current.as_mut() {
            None if line_trimmed.starts_with("```") => current = Some(String::new()),
            Some(_) if line_trimmed == "```" => {
                if let Some(block) = current.take() {
                    blocks.push(block);
                }
            }
            Some(block) => {
                block.push_str(line);
                block.push('\n');
            }
            None => {}
        }
    }

    blocks
}

/// Parse plan entries from a JSON value (array or `{"tool_calls": [...]}`).
pub fn parse_plan_json(json: &serde_json::Value) -> Option<Vec<ParsedEntry>> {
    let entries = match json {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(map) => map.get("tool_calls")?.as_array()?,
        _ => return None,
    };

    Some(entries.iter().map(parse_entry).collect())
}

fn parse_entry(entry: &serde_json::Value) -> ParsedEntry {
    let obj = entry
        .as_object()
        .ok_or_else(|| format!("plan entry is not an object: {}", entry))?;

    // OpenAI-style entries nest name/arguments under "function"
    let (obj, nested) = match obj.get("function").and_then(|f| f.as_object()) {
        Some(function) => (function, true),
        None => (obj, false),
    };

    let name = ["tool", "tool_name", "name"]
        .iter()
        .find_map(|key| obj.get(*key).and_then(|v| v.as_str()))
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| "plan entry has no tool name".to_string())?;

    let arguments = match ["arguments", "args", "parameters"]
        .iter()
        .find_map(|key| obj.get(*key))
    {
        None | Some(serde_json::Value::Null) => ToolArguments::new(),
        Some(serde_json::Value::Object(map)) => {
            map.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
        }
        // Function-calling APIs encode arguments as a JSON string
        Some(serde_json::Value::String(s)) => serde_json::from_str::<ToolArguments>(s)
            .map_err(|e| format!("arguments of '{}' are not a JSON object: {}", name, e))?,
        Some(other) => {
            return Err(format!(
                "arguments of '{}' must be an object, got {}",
                name, other
            ));
        }
    };

    let mut call = ToolCall::new(name).with_arguments(arguments);
    let source = if nested { entry.as_object() } else { Some(obj) };
    if let Some(reasoning) = source
        .and_then(|o| o.get("reasoning"))
        .and_then(|v| v.as_str())
        .filter(|r| !r.is_empty())
    {
        call = call.with_reasoning(reasoning);
    }

    Ok(call)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn calls(response: &str) -> Vec<ToolCall> {
        parse_tool_calls(response)
            .unwrap()
            .into_iter()
            .collect::<Result<Vec<_>, _>>()
            .unwrap()
    }

    #[test]
    fn test_parse_raw_array() {
        let parsed = calls(r#"[{"tool": "weather_tool", "arguments": {"location": "Tokyo"}}]"#);
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].tool_name, "weather_tool");
        assert_eq!(parsed[0].arguments["location"], json!("Tokyo"));
    }

    #[test]
    fn test_parse_fenced_block() {
        let response = r#"Here is the plan:

```json
[
  {"tool": "search_tool", "arguments": {"query": "rust"}, "reasoning": "look it up"},
  {"tool": "calculator_tool", "arguments": {"expression": "2+2"}}
]
```
"#;
        let parsed = calls(response);
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].reasoning.as_deref(), Some("look it up"));
        assert_eq!(parsed[1].tool_name, "calculator_tool");
    }

    #[test]
    fn test_parse_tool_calls_object() {
        let parsed = calls(
            r#"{"tool_calls": [{"function": {"name": "rag_tool", "arguments": "{\"question\": \"what is ML\"}"}}]}"#,
        );
        assert_eq!(parsed[0].tool_name, "rag_tool");
        assert_eq!(parsed[0].get_string("question"), Some("what is ML"));
    }

    #[test]
    fn test_parse_array_in_prose() {
        let parsed = calls(r#"Sure! [{"tool_name": "system_tool", "args": {"operation": "system_info"}}] Done."#);
        assert_eq!(parsed[0].tool_name, "system_tool");
    }

    #[test]
    fn test_empty_array_is_empty_plan() {
        assert_eq!(parse_tool_calls("[]").unwrap().len(), 0);
    }

    #[test]
    fn test_malformed_entries_are_isolated() {
        let entries = parse_tool_calls(
            r#"[{"tool": "search_tool", "arguments": {"query": "x"}}, {"arguments": {}}, {"tool": "calc", "arguments": [1]}, 7]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 4);
        assert!(entries[0].is_ok());
        assert!(entries[1].as_ref().unwrap_err().contains("no tool name"));
        assert!(entries[2].as_ref().unwrap_err().contains("must be an object"));
        assert!(entries[3].is_err());
    }

    #[test]
    fn test_unparseable() {
        assert!(parse_tool_calls("I think you should use the weather tool.").is_none());
        assert!(parse_tool_calls(r#"{"answer": 42}"#).is_none());
    }
}
