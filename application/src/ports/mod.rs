//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation adapters
//! must implement.

pub mod agent_progress;
pub mod llm_gateway;
pub mod run_event_logger;
