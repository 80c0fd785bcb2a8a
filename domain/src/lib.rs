//! Domain layer for toolcall-agent
//!
//! This crate contains the core types and pure logic of the tool-calling
//! agent. It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Tools
//!
//! A tool is a named capability described by a [`ToolDescriptor`] and
//! implemented by a [`ToolHandler`]. Tools live in a [`ToolRegistry`] that is
//! built once at startup and read concurrently afterwards.
//!
//! ## Plans and responses
//!
//! A query is answered by a [`ToolCallPlan`] (chosen by an LLM or by the
//! [`FallbackSelector`] rule table), executed step by step into
//! [`ToolResult`]s, and reported as an [`AgentResponse`] with a full step
//! trace.

pub mod agent;
pub mod config;
pub mod core;
pub mod prompt;
pub mod tool;

// Re-export commonly used types
pub use agent::{
    answer::{GENERIC_ANSWER, NO_RESULTS_ANSWER, compose_fallback_answer, result_line, summarize_payload},
    info::{AgentInfo, ToolSummary},
    phase::ExecutionPhase,
    plan::{PlanSource, ToolCallPlan},
    plan_parser::{ParsedEntry, parse_plan_json, parse_tool_calls},
    response::{AgentResponse, StepTrace, tools_used},
    rules::{FallbackSelector, is_trivial_query, suggest_tools},
};
pub use config::OutputFormat;
pub use core::{context::QueryContext, error::AgentError};
pub use prompt::AgentPromptTemplate;
pub use tool::{
    DefaultToolValidator, ParamType, RegisteredTool, RegistryError, RegistryStats, ToolArguments,
    ToolCall, ToolDescriptor, ToolError, ToolHandler, ToolParameter, ToolRegistry, ToolResult,
    ToolValidator, ValidationError,
};
