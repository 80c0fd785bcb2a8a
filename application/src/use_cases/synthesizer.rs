//! Answer synthesizer
//!
//! Turns the ordered tool results into one final answer: via the LLM when
//! the gateway is available, otherwise by extractive composition. The
//! extractive path cannot fail; a panic inside it is replaced by a generic
//! sentence.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, warn};
use toolcall_domain::{
    AgentError, AgentPromptTemplate, GENERIC_ANSWER, StepTrace, ToolResult,
    compose_fallback_answer,
};

use crate::ports::llm_gateway::{GatewayError, LlmAvailability, LlmGateway};

/// Errors the synthesizer cannot absorb.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthesizerError {
    #[error("answer synthesis via LLM failed: {0}")]
    Llm(#[from] GatewayError),
}

pub struct Synthesizer {
    gateway: Arc<dyn LlmGateway>,
    fallback_on_llm_error: bool,
}

impl Synthesizer {
    pub fn new(gateway: Arc<dyn LlmGateway>, fallback_on_llm_error: bool) -> Self {
        Self {
            gateway,
            fallback_on_llm_error,
        }
    }

    /// Produce the final answer for `query` from `results`.
    ///
    /// On success the answer is never blank.
    pub async fn synthesize(
        &self,
        query: &str,
        results: &[ToolResult],
        trace: &mut StepTrace,
    ) -> Result<String, SynthesizerError> {
        if results.is_empty() {
            return Ok(self.extractive(results, trace));
        }

        match self.gateway.availability() {
            LlmAvailability::Unavailable { .. } => Ok(self.extractive(results, trace)),
            LlmAvailability::Available { .. } => {
                trace.push("Synthesizing answer with LLM");
                let llm_result = self.llm_answer(query, results, trace).await;
                match llm_result {
                    Ok(answer) if !answer.trim().is_empty() => {
                        trace.push("Synthesis completed");
                        Ok(answer.trim().to_string())
                    }
                    Ok(_) => {
                        warn!("LLM returned an empty answer");
                        trace.push("LLM returned an empty answer; composing answer from tool results");
                        Ok(self.extractive(results, trace))
                    }
                    Err(e) if self.fallback_on_llm_error => {
                        warn!(error = %e, "LLM synthesis failed, composing answer from tool results");
                        trace.push(format!(
                            "LLM synthesis failed ({}); composing answer from tool results",
                            e
                        ));
                        Ok(self.extractive(results, trace))
                    }
                    Err(e) => Err(SynthesizerError::Llm(e)),
                }
            }
        }
    }

    async fn llm_answer(
        &self,
        query: &str,
        results: &[ToolResult],
        trace: &StepTrace,
    ) -> Result<String, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(AgentPromptTemplate::synthesis_system())
            .await?;
        let prompt = AgentPromptTemplate::synthesis_prompt(query, trace.entries(), results);
        session.send(&prompt).await
    }

    fn extractive(&self, results: &[ToolResult], trace: &mut StepTrace) -> String {
        trace.push("Composing answer from tool results");
        let composed = catch_unwind(AssertUnwindSafe(|| compose_fallback_answer(results)));

        match composed {
            Ok(answer) if !answer.trim().is_empty() => {
                debug!(chars = answer.len(), "Composed extractive answer");
                trace.push("Synthesis completed");
                answer
            }
            Ok(_) => self.generic(trace, AgentError::Synthesis("empty answer".into())),
            Err(_) => self.generic(
                trace,
                AgentError::Synthesis("answer composition panicked".into()),
            ),
        }
    }

    fn generic(&self, trace: &mut StepTrace, error: AgentError) -> String {
        warn!(error = %error, "Falling back to generic answer");
        trace.push(format!("{}; using a generic answer", error));
        GENERIC_ANSWER.to_string()
    }
}
