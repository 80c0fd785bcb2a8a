//! OpenAI-compatible LLM adapter
//!
//! Implements the application layer's [`LlmGateway`] port against any
//! `/chat/completions` endpoint (OpenAI, Azure-style proxies, local servers).
//!
//! [`LlmGateway`]: toolcall_application::LlmGateway

pub mod gateway;
pub mod session;

pub use gateway::{OpenAiConfig, OpenAiGateway};
pub use session::OpenAiSession;
