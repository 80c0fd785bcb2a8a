//! Infrastructure layer for toolcall-agent
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer: the OpenAI-compatible LLM gateway, the
//! concrete tools, the JSONL run log, and configuration file loading.

pub mod config;
pub mod logging;
pub mod openai;
pub mod tools;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileAgentConfig, FileConfig, FileLlmConfig,
    FileLoggingConfig, FileOutputConfig, FileToolsConfig,
};
pub use logging::{JsonlRunEventLogger, RunLogError};
pub use openai::{OpenAiConfig, OpenAiGateway, OpenAiSession};
pub use tools::{
    CalculatorTool, PdfSummarizerTool, RagTool, SearchTool, SystemTool, WeatherTool,
    default_registry, http_client,
};
