//! Core domain concepts shared across all subdomains.
//!
//! - [`context::QueryContext`]: context mapping supplied with a query
//! - [`error::AgentError`]: agent-level error taxonomy

pub mod context;
pub mod error;
pub mod string;
