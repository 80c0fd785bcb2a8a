//! Fallback tool selection rules
//!
//! When no LLM is available the selector falls back to a fixed,
//! priority-ordered keyword rule table. Every matching rule contributes one
//! tool call, in table order, so "search for X and calculate 2 + 2" plans
//! both `search_tool` and `calculator_tool`.
//!
//! Selection is a pure function of `(query, context, registered tools)`.
//!
//! | # | Tool | Trigger |
//! |---|------|---------|
//! | 1 | `search_tool` | search, find, look up, google, web |
//! | 2 | `calculator_tool` | calculate, compute, math, equation, solve, `2 + 2` |
//! | 3 | `weather_tool` | weather, temperature, rain, forecast, climate |
//! | 4 | `pdf_summarizer_tool` | uploaded file in context, or summarize/summary/pdf with a `.pdf` path |
//! | 5 | `system_tool` | files, directory, system, disk, folder |
//! | 6 | `rag_tool` | question, answer, knowledge, document search, rag |
//!
//! If nothing matched and the query is non-trivial, `search_tool` is planned
//! with the whole query.

use crate::agent::plan::{PlanSource, ToolCallPlan};
use crate::core::context::QueryContext;
use crate::tool::entities::ToolCall;

pub const SEARCH_TOOL: &str = "search_tool";
pub const CALCULATOR_TOOL: &str = "calculator_tool";
pub const WEATHER_TOOL: &str = "weather_tool";
pub const PDF_SUMMARIZER_TOOL: &str = "pdf_summarizer_tool";
pub const SYSTEM_TOOL: &str = "system_tool";
pub const RAG_TOOL: &str = "rag_tool";

pub const DEFAULT_LOCATION: &str = "New York";

const ARITHMETIC_OPERATORS: &[char] = &['+', '-', '*', '/', '^', '%'];

/// Words that end a location phrase ("weather in Paris today").
const LOCATION_STOP_WORDS: &[&str] = &[
    "today", "tomorrow", "tonight", "now", "currently", "right", "this", "next", "and", "or",
    "is", "be", "will", "like", "please", "week", "weekend", "morning", "evening",
];

const SEARCH_PREFIXES: &[&str] = &["search for", "search", "find", "look up", "google"];

struct Rule {
    tool: &'static str,
    triggers: &'static [&'static str],
}

const RULES: &[Rule] = &[
    Rule {
        tool: SEARCH_TOOL,
        triggers: &["search", "find", "look up", "google", "web"],
    },
    Rule {
        tool: CALCULATOR_TOOL,
        triggers: &["calculate", "compute", "math", "equation", "solve"],
    },
    Rule {
        tool: WEATHER_TOOL,
        triggers: &["weather", "temperature", "rain", "forecast", "climate"],
    },
    Rule {
        tool: PDF_SUMMARIZER_TOOL,
        triggers: &["summarize", "summary", "pdf"],
    },
    Rule {
        tool: SYSTEM_TOOL,
        triggers: &["files", "directory", "system", "disk", "folder", "list files"],
    },
    Rule {
        tool: RAG_TOOL,
        triggers: &["question", "answer", "knowledge", "document search", "rag"],
    },
];

/// A query is trivial when it carries no letters or digits at all.
pub fn is_trivial_query(query: &str) -> bool {
    !query.chars().any(char::is_alphanumeric)
}

/// Names of rule-table tools whose triggers match `query`.
///
/// Unlike [`FallbackSelector::select`] this never adds the default search
/// and does not look at context or registration.
pub fn suggest_tools(query: &str) -> Vec<&'static str> {
    let words = words(query);
    RULES
        .iter()
        .filter(|rule| {
            has_trigger(&words, rule.triggers)
                || (rule.tool == CALCULATOR_TOOL && has_arithmetic(query))
        })
        .map(|rule| rule.tool)
        .collect()
}

/// Deterministic keyword-based selector.
#[derive(Debug, Clone)]
pub struct FallbackSelector {
    default_location: String,
}

impl Default for FallbackSelector {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
        }
    }
}

impl FallbackSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Location used by the weather rule when none can be extracted.
    pub fn with_default_location(mut self, location: impl Into<String>) -> Self {
        let location = location.into();
        if !location.trim().is_empty() {
            self.default_location = location;
        }
        self
    }

    /// Build a plan for `query`. Rules whose tool is not registered are
    /// skipped.
    pub fn select<F>(&self, query: &str, context: &QueryContext, is_registered: F) -> ToolCallPlan
    where
        F: Fn(&str) -> bool,
    {
        let words = words(query);
        let mut plan = ToolCallPlan::new(PlanSource::Heuristic);

        for rule in RULES {
            if !is_registered(rule.tool) {
                continue;
            }
            if let Some(call) = self.apply(rule, query, &words, context) {
                plan.push(call.with_reasoning(format!("keyword rule for {}", rule.tool)));
            }
        }

        if plan.is_empty() && !is_trivial_query(query) && is_registered(SEARCH_TOOL) {
            plan.push(
                ToolCall::new(SEARCH_TOOL)
                    .with_arg("query", query.trim())
                    .with_reasoning("no keyword rule matched"),
            );
        }

        plan
    }

    fn apply(
        &self,
        rule: &Rule,
        query: &str,
        words: &[String],
        context: &QueryContext,
    ) -> Option<ToolCall> {
        let triggered = has_trigger(words, rule.triggers);

        match rule.tool {
            SEARCH_TOOL if triggered => {
                Some(ToolCall::new(SEARCH_TOOL).with_arg("query", search_terms(query)))
            }
            CALCULATOR_TOOL if triggered || has_arithmetic(query) => Some(
                ToolCall::new(CALCULATOR_TOOL).with_arg("expression", extract_expression(query)),
            ),
            WEATHER_TOOL if triggered => {
                let location =
                    extract_location(query).unwrap_or_else(|| self.default_location.clone());
                Some(ToolCall::new(WEATHER_TOOL).with_arg("location", location))
            }
            PDF_SUMMARIZER_TOOL => {
                let path = match context.uploaded_file() {
                    Some(path) => Some(path.to_string()),
                    None if triggered => extract_pdf_path(query),
                    None => None,
                }?;
                Some(ToolCall::new(PDF_SUMMARIZER_TOOL).with_arg("file_path", path))
            }
            SYSTEM_TOOL if triggered => {
                Some(ToolCall::new(SYSTEM_TOOL).with_arg("operation", system_operation(words)))
            }
            RAG_TOOL if triggered => {
                Some(ToolCall::new(RAG_TOOL).with_arg("question", query.trim()))
            }
            _ => None,
        }
    }
}

/// Lowercased alphanumeric words of `text`.
fn words(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn has_phrase(words: &[String], phrase: &str) -> bool {
    let parts: Vec<&str> = phrase.split_whitespace().collect();
    if parts.is_empty() {
        return false;
    }
    words
        .windows(parts.len())
        .any(|window| window.iter().zip(&parts).all(|(w, p)| w == p))
}

fn has_trigger(words: &[String], triggers: &[&str]) -> bool {
    triggers.iter().any(|t| has_phrase(words, t))
}

/// An arithmetic operator between a digit and a digit or `(`.
///
/// `-` and `/` only count when spaced on both sides, so dates
/// (`2024-05-01`, `5/1`) and phone numbers (`555-1234`) do not match.
fn has_arithmetic(query: &str) -> bool {
    let chars: Vec<char> = query.chars().collect();
    let skip_ws = |mut i: usize| {
        while i < chars.len() && chars[i].is_whitespace() {
            i += 1;
        }
        i
    };

    for (i, c) in chars.iter().enumerate() {
        if !c.is_ascii_digit() {
            continue;
        }
        let op = skip_ws(i + 1);
        if op < chars.len() && ARITHMETIC_OPERATORS.contains(&chars[op]) {
            let operand = skip_ws(op + 1);
            let spaced = op > i + 1 && operand > op + 1;
            if matches!(chars[op], '-' | '/') && !spaced {
                continue;
            }
            if operand < chars.len() && (chars[operand].is_ascii_digit() || chars[operand] == '(') {
                return true;
            }
        }
    }
    false
}

fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit()
        || c.is_whitespace()
        || matches!(c, '.' | '(' | ')')
        || ARITHMETIC_OPERATORS.contains(&c)
}

/// Longest run of digits, operators and parentheses. Falls back to the
/// whole query when it contains no digits.
fn extract_expression(query: &str) -> String {
    let mut best = "";
    for run in query.split(|c: char| !is_expression_char(c)) {
        let run = run.trim().trim_end_matches('.').trim_end();
        if run.chars().any(|c| c.is_ascii_digit()) && run.chars().count() > best.chars().count() {
            best = run;
        }
    }

    if best.is_empty() {
        query.trim().to_string()
    } else {
        best.to_string()
    }
}

/// Query with a leading search verb removed.
fn search_terms(query: &str) -> String {
    let trimmed = query.trim();
    for prefix in SEARCH_PREFIXES {
        let Some(head) = trimmed.get(..prefix.len()) else {
            continue;
        };
        let boundary = trimmed[prefix.len()..]
            .chars()
            .next()
            .is_none_or(|c| !c.is_alphanumeric());
        if head.eq_ignore_ascii_case(prefix) && boundary {
            let rest = trimmed[prefix.len()..].trim_start_matches([':', ' ', '\t']).trim();
            if !rest.is_empty() {
                return rest.to_string();
            }
        }
    }
    trimmed.to_string()
}

fn is_place_word(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_alphabetic() || matches!(c, '-' | '\'' | '.'))
}

/// Up to three words following the last `in`/`at`/`for` that yields a place.
fn extract_location(query: &str) -> Option<String> {
    let tokens: Vec<&str> = query.split_whitespace().collect();
    let indicators = tokens.iter().enumerate().filter_map(|(i, t)| {
        let word = t.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
        matches!(word.as_str(), "in" | "at" | "for").then_some(i)
    });
    let indicators: Vec<usize> = indicators.collect();

    for &start in indicators.iter().rev() {
        let mut place: Vec<&str> = Vec::new();
        for token in &tokens[start + 1..] {
            let word = token.trim_matches(|c: char| !c.is_alphanumeric());
            let lower = word.to_lowercase();
            if place.is_empty() && lower == "the" {
                continue;
            }
            if !is_place_word(word) || LOCATION_STOP_WORDS.contains(&lower.as_str()) {
                break;
            }
            place.push(word);
            let ends_clause = token.chars().last().is_some_and(|c| !c.is_alphanumeric());
            if place.len() == 3 || ends_clause {
                break;
            }
        }
        if !place.is_empty() {
            return Some(place.join(" "));
        }
    }
    None
}

/// First whitespace-separated token that names a `.pdf` file.
fn extract_pdf_path(query: &str) -> Option<String> {
    query
        .split_whitespace()
        .map(|t| {
            t.trim_matches(|c: char| matches!(c, '"' | '\'' | '`' | ',' | '?' | '!' | '(' | ')' | ';' | ':'))
                .trim_end_matches('.')
        })
        .find(|t| t.len() > 4 && t.to_lowercase().ends_with(".pdf"))
        .map(str::to_string)
}

fn system_operation(words: &[String]) -> &'static str {
    if has_phrase(words, "disk") {
        "disk_usage"
    } else if has_trigger(words, &["files", "directory", "folder", "list files"]) {
        "list_directory"
    } else {
        "system_info"
    }
}
