//! Application layer for toolcall-agent
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::OrchestratorParams;
pub use ports::{
    agent_progress::{AgentProgressNotifier, NoAgentProgress},
    llm_gateway::{GatewayError, LlmAvailability, LlmGateway, LlmSession, UnavailableGateway},
    run_event_logger::{NoRunEventLogger, RunEvent, RunEventLogger},
};
pub use use_cases::invoker::ToolInvoker;
pub use use_cases::retry::RetrySupervisor;
pub use use_cases::run_query::{
    EMPTY_QUERY_ANSWER, NO_PLAN_ANSWER, RunQueryInput, RunQueryUseCase,
};
pub use use_cases::selector::{Selector, SelectorError};
pub use use_cases::synthesizer::{Synthesizer, SynthesizerError};
