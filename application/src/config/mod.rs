//! Application-level configuration.
//!
//! - [`OrchestratorParams`]: retry policy, plan size and time bounds of a run

pub mod orchestrator_params;

pub use orchestrator_params::OrchestratorParams;
