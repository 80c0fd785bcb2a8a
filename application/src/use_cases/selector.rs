//! Tool selector
//!
//! Decides which tools answer a query and with which arguments.
//!
//! - **LLM-backed** when the gateway declares itself available: the model
//!   gets the tool catalog and returns a JSON plan. Each entry is validated
//!   against the registry; invalid entries are dropped with a trace entry.
//! - **Keyword rules** ([`FallbackSelector`]) when the gateway is
//!   unavailable, or when it fails and `fallback_on_llm_error` is set.
//!
//! Either way the plan is truncated to `max_plan_steps`.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};
use toolcall_domain::{
    AgentError, AgentPromptTemplate, DefaultToolValidator, FallbackSelector, PlanSource,
    QueryContext, StepTrace, ToolCallPlan, ToolRegistry, ToolValidator, parse_tool_calls,
};

use crate::ports::llm_gateway::{GatewayError, LlmAvailability, LlmGateway};

/// Errors the selector cannot absorb.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SelectorError {
    #[error("tool selection via LLM failed: {0}")]
    Llm(#[from] GatewayError),
}

/// Chooses a [`ToolCallPlan`] for a query.
pub struct Selector {
    registry: Arc<ToolRegistry>,
    gateway: Arc<dyn LlmGateway>,
    fallback: FallbackSelector,
    validator: DefaultToolValidator,
    max_plan_steps: usize,
    fallback_on_llm_error: bool,
}

impl Selector {
    pub fn new(
        registry: Arc<ToolRegistry>,
        gateway: Arc<dyn LlmGateway>,
        max_plan_steps: usize,
        fallback_on_llm_error: bool,
    ) -> Self {
        Self {
            registry,
            gateway,
            fallback: FallbackSelector::new(),
            validator: DefaultToolValidator,
            max_plan_steps,
            fallback_on_llm_error,
        }
    }

    pub fn with_fallback(mut self, fallback: FallbackSelector) -> Self {
        self.fallback = fallback;
        self
    }

    /// Plan tool calls for `query`.
    pub async fn select(
        &self,
        query: &str,
        context: &QueryContext,
        trace: &mut StepTrace,
    ) -> Result<ToolCallPlan, SelectorError> {
        let mut plan = match self.gateway.availability() {
            LlmAvailability::Unavailable { reason } => {
                debug!(reason = %reason, "LLM unavailable, using keyword rules");
                trace.push(format!("LLM unavailable ({}); selecting tools by keyword rules", reason));
                self.select_by_rules(query, context)
            }
            LlmAvailability::Available { model } => {
                trace.push(format!("Selecting tools with LLM ({})", model));
                let llm_plan = self.select_with_llm(query, context, trace).await;
                match llm_plan {
                    Ok(plan) => plan,
                    Err(e) if self.fallback_on_llm_error => {
                        warn!(error = %e, "LLM selection failed, falling back to keyword rules");
                        trace.push(format!("LLM selection failed ({}); selecting tools by keyword rules", e));
                        self.select_by_rules(query, context)
                    }
                    Err(e) => {
                        warn!(error = %e, "LLM selection failed");
                        return Err(SelectorError::Llm(e));
                    }
                }
            }
        };

        let dropped = plan.truncate(self.max_plan_steps);
        if dropped > 0 {
            trace.push(format!(
                "Plan truncated to {} steps ({} dropped)",
                self.max_plan_steps, dropped
            ));
        }

        if plan.is_empty() {
            trace.push(format!("Selected empty plan via {}", plan.source));
        } else {
            trace.push(format!("Selected plan via {}: {}", plan.source, plan.describe()));
        }
        info!(source = %plan.source, tools = ?plan.tool_names(), "Plan selected");

        Ok(plan)
    }

    fn select_by_rules(&self, query: &str, context: &QueryContext) -> ToolCallPlan {
        self.fallback
            .select(query, context, |name| self.registry.contains(name))
    }

    async fn select_with_llm(
        &self,
        query: &str,
        context: &QueryContext,
        trace: &mut StepTrace,
    ) -> Result<ToolCallPlan, GatewayError> {
        let session = self
            .gateway
            .create_session_with_system_prompt(AgentPromptTemplate::selection_system())
            .await?;
        let prompt = AgentPromptTemplate::selection_prompt(query, &self.registry.list(), context);
        let response = session.send(&prompt).await?;

        let mut plan = ToolCallPlan::new(PlanSource::Llm);
        let Some(entries) = parse_tool_calls(&response) else {
            warn!("Could not parse a plan from the LLM response");
            trace.push("Could not parse a plan from the LLM response");
            return Ok(plan);
        };

        for entry in entries {
            let call = match entry {
                Ok(call) => call,
                Err(reason) => {
                    let error = AgentError::InvalidPlanStep {
                        tool: "<unnamed>".to_string(),
                        reason,
                    };
                    trace.push(format!("{} (dropped)", error));
                    continue;
                }
            };

            let validated = self
                .registry
                .lookup(&call.tool_name)
                .map_err(|e| e.to_string())
                .and_then(|tool| {
                    self.validator
                        .validate(&call.arguments, &tool.descriptor)
                        .map_err(|e| e.to_string())
                });

            match validated {
                Ok(arguments) => {
                    for name in call.arguments.keys() {
                        if !arguments.contains_key(name) {
                            debug!(tool = %call.tool_name, arg = %name, "Ignoring undeclared argument");
                        }
                    }
                    plan.push(call.with_arguments(arguments));
                }
                Err(reason) => {
                    let error = AgentError::InvalidPlanStep {
                        tool: call.tool_name.clone(),
                        reason,
                    };
                    warn!(error = %error, "Dropping invalid plan step");
                    trace.push(format!("{} (dropped)", error));
                }
            }
        }

        Ok(plan)
    }
}
