//! Agent domain module
//!
//! Everything about answering one query that does not need I/O:
//!
//! - [`plan::ToolCallPlan`]: ordered tool calls chosen for a query
//! - [`rules::FallbackSelector`]: deterministic keyword rule table
//! - [`plan_parser`]: plan extraction from LLM text
//! - [`answer`]: extractive answer composition
//! - [`response::AgentResponse`]: the auditable result of a run
//! - [`phase::ExecutionPhase`]: orchestrator lifecycle

pub mod answer;
pub mod info;
pub mod phase;
pub mod plan;
pub mod plan_parser;
pub mod response;
pub mod rules;
