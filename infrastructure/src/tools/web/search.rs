//! `search_tool`: search the web using the DuckDuckGo Instant Answer API.
//!
//! # DuckDuckGo Instant Answer API
//!
//! Uses the [DuckDuckGo Instant Answer API](https://api.duckduckgo.com/) which:
//! - Requires **no API key**
//! - Returns instant answers, abstracts, definitions, and related topics
//! - Does not return full web search result listings
//!
//! Results are flattened into `{title, url, snippet}` entries: the abstract
//! first, then related topics (including those nested in topic groups).
//!
//! # Parameters
//!
//! | Name | Type | Required | Description |
//! |------|------|:---:|-------------|
//! | `query` | string | Yes | The search query |
//! | `num_results` | integer | No | Results to return (1-10) |

use async_trait::async_trait;
use serde_json::{Value, json};
use toolcall_domain::agent::rules::SEARCH_TOOL;
use toolcall_domain::core::string::truncate;
use toolcall_domain::{ParamType, ToolArguments, ToolDescriptor, ToolError, ToolHandler, ToolParameter};
use tracing::debug;

use crate::tools::args::{opt_u64, require_str};

/// DuckDuckGo Instant Answer API endpoint (no API key required).
const DDG_API_URL: &str = "https://api.duckduckgo.com/";

const MAX_RESULTS: usize = 10;
const TITLE_CHARS: usize = 100;

pub struct SearchTool {
    client: reqwest::Client,
    endpoint: String,
    default_results: usize,
}

impl SearchTool {
    pub fn new(client: reqwest::Client, default_results: usize) -> Self {
        Self::with_endpoint(client, DDG_API_URL, default_results)
    }

    pub fn with_endpoint(
        client: reqwest::Client,
        endpoint: impl Into<String>,
        default_results: usize,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            default_results: default_results.clamp(1, MAX_RESULTS),
        }
    }
}

#[async_trait]
impl ToolHandler for SearchTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new(
            SEARCH_TOOL,
            "Search the web using DuckDuckGo. Returns instant answers, abstracts, and related topics.",
        )
        .with_parameter(ToolParameter::new("query", "The search query", true))
        .with_parameter(
            ToolParameter::new("num_results", "Number of results to return", false)
                .with_type(ParamType::Integer)
                .with_range(Some(1.0), Some(MAX_RESULTS as f64))
                .with_default(self.default_results),
        )
        .with_output(
            ToolParameter::new("results", "Search results (title, url, snippet)", true)
                .with_type(ParamType::Array),
        )
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<Value, ToolError> {
        let query = require_str(arguments, "query")?;
        let limit = opt_u64(arguments, "num_results")
            .map(|n| (n as usize).clamp(1, MAX_RESULTS))
            .unwrap_or(self.default_results);

        debug!(query, limit, "Searching DuckDuckGo");

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("no_html", "1"),
                ("skip_disambig", "1"),
            ])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ToolError::timeout("search request")
                } else {
                    ToolError::execution_failed(format!("Search request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            return Err(ToolError::execution_failed(format!(
                "Search API returned error: {}",
                response.status()
            )));
        }

        // DuckDuckGo answers with `application/x-javascript`, so parse the text
        let text = response.text().await.map_err(|e| {
            ToolError::execution_failed(format!("Failed to read search results: {}", e))
        })?;
        let body: Value = serde_json::from_str(&text).map_err(|e| {
            ToolError::execution_failed(format!("Failed to parse search results: {}", e))
        })?;

        Ok(build_payload(query, &body, limit))
    }
}

fn non_empty<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data[key].as_str().map(str::trim).filter(|s| !s.is_empty())
}

/// Flatten an Instant Answer response into result entries.
fn collect_results(data: &Value, limit: usize) -> Vec<Value> {
    let mut results = Vec::new();

    if let Some(abstract_text) = non_empty(data, "AbstractText").or(non_empty(data, "Abstract")) {
        results.push(json!({
            "title": non_empty(data, "Heading")
                .or(non_empty(data, "AbstractSource"))
                .unwrap_or("DuckDuckGo"),
            "url": data["AbstractURL"].as_str().unwrap_or(""),
            "snippet": abstract_text,
        }));
    }

    let topics = data["RelatedTopics"].as_array().cloned().unwrap_or_default();
    let flattened = topics.iter().flat_map(|topic| match topic["Topics"].as_array() {
        // Topic group: {"Name": ..., "Topics": [...]}
        Some(group) => group.clone(),
        None => vec![topic.clone()],
    });

    for topic in flattened {
        if results.len() >= limit {
            break;
        }
        if let Some(text) = non_empty(&topic, "Text") {
            results.push(json!({
                "title": truncate(text, TITLE_CHARS),
                "url": topic["FirstURL"].as_str().unwrap_or(""),
                "snippet": text,
            }));
        }
    }

    results.truncate(limit);
    results
}

fn build_payload(query: &str, data: &Value, limit: usize) -> Value {
    let results = collect_results(data, limit);
    let answer = non_empty(data, "Answer");
    let definition = non_empty(data, "Definition");

    let summary = answer
        .or(non_empty(data, "AbstractText"))
        .or(definition)
        .map(String::from)
        .or_else(|| {
            results
                .first()
                .and_then(|r| r["snippet"].as_str())
                .map(String::from)
        })
        .map(|s| truncate(&s, 300))
        .unwrap_or_else(|| format!("No instant answer found for '{}'", query));

    let mut payload = json!({
        "query": query,
        "results": results,
        "total_results": results.len(),
        "summary": summary,
    });
    if let Some(answer) = answer {
        payload["answer"] = json!(answer);
    }
    if let Some(definition) = definition {
        payload["definition"] = json!(definition);
    }
    payload
}
