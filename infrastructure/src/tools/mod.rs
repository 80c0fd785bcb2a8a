//! Tool implementations for the agent system
//!
//! This module provides the concrete [`ToolHandler`]s the orchestrator
//! dispatches to by name.
//!
//! | Tool | Module | Backend |
//! |------|--------|---------|
//! | `search_tool` | [`web::search`] | DuckDuckGo Instant Answer API |
//! | `calculator_tool` | [`calculator`] | local parser |
//! | `weather_tool` | [`web::weather`] | Open-Meteo |
//! | `pdf_summarizer_tool` | [`pdf`] | `pdf-extract` (feature `pdf-tools`) |
//! | `system_tool` | [`system`] | `sysinfo` + filesystem |
//! | `rag_tool` | [`rag`] | in-memory document store |
//!
//! [`ToolHandler`]: toolcall_domain::ToolHandler

pub mod calculator;
pub mod pdf;
pub mod rag;
pub mod system;
pub mod web;

mod args;

pub use calculator::CalculatorTool;
pub use pdf::PdfSummarizerTool;
pub use rag::{Document, DocumentStore, RagTool};
pub use system::SystemTool;
pub use web::{SearchTool, WeatherTool};

use crate::config::FileToolsConfig;
use std::time::Duration;
use toolcall_domain::{RegistryError, ToolRegistry};

/// Per-request timeout of the shared HTTP client.
pub const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared HTTP client for the web tools.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("toolcall-agent/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Register every built-in tool, in rule-table order.
pub fn default_registry(
    config: &FileToolsConfig,
    client: reqwest::Client,
) -> Result<ToolRegistry, RegistryError> {
    let mut registry = ToolRegistry::new();
    registry.register(SearchTool::new(client.clone(), config.search_results))?;
    registry.register(CalculatorTool::new())?;
    registry.register(WeatherTool::new(client))?;
    registry.register(PdfSummarizerTool::new())?;
    registry.register(SystemTool::from_config(&config.allowed_paths))?;
    registry.register(RagTool::new())?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcall_domain::agent::rules::{
        CALCULATOR_TOOL, PDF_SUMMARIZER_TOOL, RAG_TOOL, SEARCH_TOOL, SYSTEM_TOOL, WEATHER_TOOL,
    };

    #[test]
    fn test_default_registry_has_all_tools_in_order() {
        let client = http_client(HTTP_TIMEOUT).unwrap();
        let registry = default_registry(&FileToolsConfig::default(), client).unwrap();
        assert_eq!(
            registry.names(),
            vec![
                SEARCH_TOOL,
                CALCULATOR_TOOL,
                WEATHER_TOOL,
                PDF_SUMMARIZER_TOOL,
                SYSTEM_TOOL,
                RAG_TOOL
            ]
        );
    }

    #[test]
    fn test_every_tool_has_one_required_parameter() {
        let client = http_client(HTTP_TIMEOUT).unwrap();
        let registry = default_registry(&FileToolsConfig::default(), client).unwrap();
        for descriptor in registry.list() {
            assert!(!descriptor.description.is_empty(), "{}", descriptor.name);
            assert!(
                descriptor.required_parameters().count() == 1,
                "{} should have exactly one required parameter",
                descriptor.name
            );
        }
    }
}
