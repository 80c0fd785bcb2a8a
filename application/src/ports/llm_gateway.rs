//! LLM Gateway port
//!
//! Defines the interface for communicating with the LLM collaborator used by
//! the selector and the synthesizer.
//!
//! A gateway declares its availability up front (e.g., no credential
//! configured). Declared unavailability routes the agent to its heuristic
//! paths; an error from an available gateway is a runtime failure.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GatewayError {
    #[error("LLM unavailable: {0}")]
    Unavailable(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timeout")]
    Timeout,

    #[error("Other error: {0}")]
    Other(String),
}

/// Whether the gateway can be used at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LlmAvailability {
    Available { model: String },
    Unavailable { reason: String },
}

impl LlmAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, LlmAvailability::Available { .. })
    }

    pub fn unavailable_reason(&self) -> Option<&str> {
        match self {
            LlmAvailability::Available { .. } => None,
            LlmAvailability::Unavailable { reason } => Some(reason),
        }
    }
}

/// Gateway for LLM communication
///
/// This port defines how the application layer communicates with LLM providers.
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Declared availability. Must not perform I/O.
    fn availability(&self) -> LlmAvailability;

    /// Create a new session with a system prompt
    async fn create_session_with_system_prompt(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError>;
}

/// An active LLM session
#[async_trait]
pub trait LlmSession: Send + Sync {
    /// Send a message and get a response
    async fn send(&self, content: &str) -> Result<String, GatewayError>;
}

/// Gateway that is always unavailable (`--no-llm`, missing credentials).
#[derive(Debug, Clone)]
pub struct UnavailableGateway {
    reason: String,
}

impl UnavailableGateway {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LlmGateway for UnavailableGateway {
    fn availability(&self) -> LlmAvailability {
        LlmAvailability::Unavailable {
            reason: self.reason.clone(),
        }
    }

    async fn create_session_with_system_prompt(
        &self,
        _system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Err(GatewayError::Unavailable(self.reason.clone()))
    }
}
