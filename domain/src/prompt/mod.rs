//! Prompt templates used by the LLM-backed selector and synthesizer.

pub mod agent;

pub use agent::AgentPromptTemplate;
