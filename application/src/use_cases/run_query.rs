//! Run Query use case
//!
//! The agent orchestrator: sequences selection, per-step execution with
//! retries, and synthesis for one query, accumulating the step trace.
//!
//! ```text
//! Received → Planning → Executing(0..n) → Synthesizing → Completed
//! ```
//!
//! Steps run strictly in plan order, one at a time: a later step may depend
//! on what an earlier one produced. Tool failures are recorded and carried
//! into the answer; only a selector or synthesizer failure, a timeout, or a
//! cancellation ends the run with `success = false`.

use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use toolcall_domain::{
    AgentError, AgentInfo, AgentResponse, ExecutionPhase, FallbackSelector, QueryContext,
    StepTrace, ToolRegistry, ToolResult, ToolSummary, is_trivial_query, suggest_tools,
};

use super::invoker::ToolInvoker;
use super::retry::RetrySupervisor;
use super::selector::Selector;
use super::synthesizer::Synthesizer;
use crate::config::OrchestratorParams;
use crate::ports::agent_progress::{AgentProgressNotifier, NoAgentProgress};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::run_event_logger::{NoRunEventLogger, RunEvent, RunEventLogger};

/// Answer for a query with nothing to answer.
pub const EMPTY_QUERY_ANSWER: &str = "Please enter a question so I can pick the right tools.";

/// Answer when no tool applies to a non-trivial query.
pub const NO_PLAN_ANSWER: &str = "I couldn't determine which tools to use for your query. \
     Please try rephrasing it or ask about search, calculations, weather, documents or your system.";

const AGENT_NAME: &str = "toolcall-agent";
const AGENT_DESCRIPTION: &str =
    "Agent that answers natural-language queries by selecting and invoking tools";

/// Input for the RunQuery use case
#[derive(Debug, Clone)]
pub struct RunQueryInput {
    pub query: String,
    pub context: QueryContext,
}

impl RunQueryInput {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            context: QueryContext::new(),
        }
    }

    pub fn with_context(mut self, context: QueryContext) -> Self {
        self.context = context;
        self
    }
}

/// Per-run mutable state. Owned by one run; survives a timeout so the
/// partial trace can be returned.
struct RunState {
    phase: ExecutionPhase,
    trace: StepTrace,
    raw_outputs: Vec<ToolResult>,
}

/// How a run ended when it did not error.
struct Outcome {
    answer: String,
    success: bool,
}

/// Use case for answering one query with tools
pub struct RunQueryUseCase {
    registry: Arc<ToolRegistry>,
    gateway: Arc<dyn LlmGateway>,
    params: OrchestratorParams,
    selector: Selector,
    invoker: ToolInvoker,
    retry: RetrySupervisor,
    synthesizer: Synthesizer,
    run_logger: Arc<dyn RunEventLogger>,
}

impl RunQueryUseCase {
    pub fn new(
        registry: Arc<ToolRegistry>,
        gateway: Arc<dyn LlmGateway>,
        params: OrchestratorParams,
    ) -> Self {
        Self {
            selector: Selector::new(
                registry.clone(),
                gateway.clone(),
                params.max_plan_steps,
                params.fallback_on_llm_error,
            ),
            invoker: ToolInvoker::new(registry.clone(), params.tool_timeout),
            retry: RetrySupervisor::new(params.max_retries, params.retry_delay),
            synthesizer: Synthesizer::new(gateway.clone(), params.fallback_on_llm_error),
            registry,
            gateway,
            params,
            run_logger: Arc::new(NoRunEventLogger),
        }
    }

    /// Replace the keyword rule table settings (e.g., default location).
    pub fn with_fallback_selector(mut self, fallback: FallbackSelector) -> Self {
        self.selector = self.selector.with_fallback(fallback);
        self
    }

    pub fn with_run_logger(mut self, logger: Arc<dyn RunEventLogger>) -> Self {
        self.run_logger = logger;
        self
    }

    pub fn params(&self) -> &OrchestratorParams {
        &self.params
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunQueryInput) -> AgentResponse {
        self.execute_with_progress(input, &NoAgentProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunQueryInput,
        progress: &dyn AgentProgressNotifier,
    ) -> AgentResponse {
        self.execute_with_cancellation(input, progress, &CancellationToken::new())
            .await
    }

    /// Execute the use case, stopping early when `cancel` fires.
    ///
    /// Cancellation and the query timeout both stop waiting on the run;
    /// in-flight tool calls are not interrupted. The partial trace and
    /// results gathered so far are returned with `success = false`.
    pub async fn execute_with_cancellation(
        &self,
        input: RunQueryInput,
        progress: &dyn AgentProgressNotifier,
        cancel: &CancellationToken,
    ) -> AgentResponse {
        let started = Instant::now();
        let RunQueryInput { query, context } = input;

        info!(query = %query, "Received query");
        self.run_logger.log(RunEvent::new(
            "query_received",
            json!({ "query": query, "context": context }),
        ));

        let mut state = RunState {
            phase: ExecutionPhase::Received,
            trace: StepTrace::new(),
            raw_outputs: Vec::new(),
        };
        progress.on_phase_change(&state.phase);
        state.trace.push(format!("Received query: {}", query.trim()));

        let outcome = {
            let run = self.run(&query, &context, &mut state, progress);
            tokio::select! {
                biased;
                _ = cancel.cancelled() => Err(AgentError::Cancelled),
                result = tokio::time::timeout(self.params.query_timeout, run) => match result {
                    Ok(outcome) => outcome,
                    Err(_) => Err(AgentError::Timeout(self.params.query_timeout)),
                },
            }
        };

        let Outcome { answer, success } = match outcome {
            Ok(outcome) => outcome,
            Err(error) => {
                warn!(error = %error, phase = %state.phase, "Query failed");
                state.trace.push(format!("Failed during {}: {}", state.phase, error));
                Outcome {
                    answer: failure_answer(&error),
                    success: false,
                }
            }
        };

        self.enter(&mut state, ExecutionPhase::Completed, progress);
        progress.on_answer(&answer, success);

        let elapsed = started.elapsed().as_secs_f64();
        state
            .trace
            .push(format!("Completed in {:.2}s (success: {})", elapsed, success));

        let response = AgentResponse::new(
            query,
            context,
            answer,
            success,
            state.trace,
            state.raw_outputs,
            elapsed,
        );

        info!(
            success = response.success,
            tools = ?response.tools_used,
            elapsed_secs = elapsed,
            "Query completed"
        );
        self.run_logger.log(RunEvent::new(
            "query_completed",
            json!({
                "query": response.query,
                "success": response.success,
                "tools_used": response.tools_used,
                "execution_time_seconds": response.execution_time_seconds,
            }),
        ));

        response
    }

    async fn run(
        &self,
        query: &str,
        context: &QueryContext,
        state: &mut RunState,
        progress: &dyn AgentProgressNotifier,
    ) -> Result<Outcome, AgentError> {
        if is_trivial_query(query) {
            state.trace.push("Query is empty; no tools to run");
            return Ok(Outcome {
                answer: EMPTY_QUERY_ANSWER.to_string(),
                success: true,
            });
        }

        // Planning
        self.enter(state, ExecutionPhase::Planning, progress);
        let plan = self
            .selector
            .select(query, context, &mut state.trace)
            .await
            .map_err(|e| AgentError::Fatal(e.to_string()))?;

        progress.on_plan_selected(&plan);
        self.run_logger.log(RunEvent::new(
            "plan_selected",
            json!({ "source": plan.source, "steps": plan.steps }),
        ));

        if plan.is_empty() {
            return Ok(Outcome {
                answer: NO_PLAN_ANSWER.to_string(),
                success: false,
            });
        }

        // Executing, strictly in plan order
        let total = plan.len();
        for (index, call) in plan.iter().enumerate() {
            self.enter(state, ExecutionPhase::Executing(index), progress);
            state
                .trace
                .push(format!("Step {}/{}: {}", index + 1, total, call));

            let result = self
                .retry
                .execute(&self.invoker, call, &mut state.trace, progress)
                .await;

            progress.on_tool_result(&result);
            self.run_logger.log(RunEvent::new(
                "tool_result",
                json!({
                    "step": index + 1,
                    "tool": result.tool_name,
                    "success": result.success,
                    "attempts": result.attempts,
                    "duration_ms": result.duration_ms(),
                    "error": result.error(),
                }),
            ));
            state.raw_outputs.push(result);
        }

        // Synthesizing
        self.enter(state, ExecutionPhase::Synthesizing, progress);
        let answer = self
            .synthesizer
            .synthesize(query, &state.raw_outputs, &mut state.trace)
            .await
            .map_err(|e| AgentError::Fatal(e.to_string()))?;

        self.run_logger.log(RunEvent::new(
            "answer_synthesized",
            json!({ "chars": answer.chars().count() }),
        ));

        Ok(Outcome {
            answer,
            success: true,
        })
    }

    fn enter(
        &self,
        state: &mut RunState,
        phase: ExecutionPhase,
        progress: &dyn AgentProgressNotifier,
    ) {
        debug_assert!(
            state.phase.can_advance_to(phase),
            "illegal phase transition {} -> {}",
            state.phase,
            phase
        );
        debug!(from = %state.phase, to = %phase, "Phase change");
        state.phase = phase;
        progress.on_phase_change(&phase);
    }

    /// Self-description: version, retry settings, LLM availability, tools.
    pub fn agent_info(&self) -> AgentInfo {
        let availability = self.gateway.availability();
        AgentInfo {
            name: AGENT_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: AGENT_DESCRIPTION.to_string(),
            max_retries: self.params.max_retries,
            retry_delay_ms: self.params.retry_delay.as_millis() as u64,
            max_plan_steps: self.params.max_plan_steps,
            llm_available: availability.is_available(),
            llm_unavailable_reason: availability.unavailable_reason().map(String::from),
            total_tools: self.registry.len(),
            tools: self
                .registry
                .list()
                .into_iter()
                .map(|d| ToolSummary {
                    name: d.name.clone(),
                    description: d.description.clone(),
                })
                .collect(),
            timestamp: chrono::Utc::now(),
        }
    }

    /// Registered tools whose keyword rules match `query`, without running
    /// anything.
    pub fn suggest_tools(&self, query: &str) -> Vec<String> {
        suggest_tools(query)
            .into_iter()
            .filter(|name| self.registry.contains(name))
            .map(String::from)
            .collect()
    }
}

fn failure_answer(error: &AgentError) -> String {
    match error {
        AgentError::Timeout(limit) => format!(
            "The query timed out after {:?} before an answer could be produced.",
            limit
        ),
        AgentError::Cancelled => {
            "The query was cancelled before an answer could be produced.".to_string()
        }
        other => format!("An error occurred while processing your query: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm_gateway::{GatewayError, UnavailableGateway};
    use crate::use_cases::test_support::{
        FlakyTool, MockCalculator, PanickingTool, ScriptedGateway, SlowTool,
    };
    use std::sync::Mutex;
    use std::time::Duration;
    use toolcall_domain::{ToolError, ToolHandler};

    fn fast_params() -> OrchestratorParams {
        OrchestratorParams::default().with_retry_delay(Duration::from_millis(1))
    }

    fn no_llm() -> Arc<dyn LlmGateway> {
        Arc::new(UnavailableGateway::new("no API key"))
    }

    fn use_case(tools: Vec<Arc<dyn ToolHandler>>, gateway: Arc<dyn LlmGateway>) -> RunQueryUseCase {
        use_case_with(tools, gateway, fast_params())
    }

    fn use_case_with(
        tools: Vec<Arc<dyn ToolHandler>>,
        gateway: Arc<dyn LlmGateway>,
        params: OrchestratorParams,
    ) -> RunQueryUseCase {
        let mut registry = ToolRegistry::new();
        for tool in tools {
            registry.register_arc(tool).unwrap();
        }
        RunQueryUseCase::new(Arc::new(registry), gateway, params)
    }

    fn attempts(response: &AgentResponse) -> usize {
        response
            .steps
            .iter()
            .filter(|s| s.starts_with("Attempt "))
            .count()
    }

    #[tokio::test]
    async fn test_single_rule_calculator() {
        let uc = use_case(vec![Arc::new(MockCalculator), Arc::new(FlakyTool::new("search_tool", 0))], no_llm());
        let response = uc.execute(RunQueryInput::new("Calculate 2 + 2")).await;

        assert!(response.success);
        assert_eq!(response.tools_used, vec!["calculator_tool"]);
        assert_eq!(response.raw_outputs.len(), 1);
        assert!(response.final_answer.contains("2 + 2 = 4"));
    }

    #[tokio::test]
    async fn test_weather_scenario_without_llm() {
        let weather = Arc::new(FlakyTool::always_failing("weather_tool"));
        let uc = use_case(vec![weather.clone(), Arc::new(MockCalculator)], no_llm());

        let response = uc.execute(RunQueryInput::new("What's the weather in Tokyo?")).await;

        assert!(response.success);
        assert!(!response.final_answer.trim().is_empty());
        assert_eq!(response.tools_used, vec!["weather_tool"]);
        assert!(response
            .steps
            .iter()
            .any(|s| s == r#"Step 1/1: weather_tool({"location":"Tokyo"})"#));
        let seen = weather.seen.lock().unwrap();
        assert_eq!(seen[0].get("location").and_then(|v| v.as_str()), Some("Tokyo"));
        assert_eq!(seen[0].len(), 1);
    }

    #[tokio::test]
    async fn test_retry_then_success() {
        let search = Arc::new(FlakyTool::new("search_tool", 2));
        let uc = use_case(vec![search.clone()], no_llm());

        let response = uc.execute(RunQueryInput::new("search for rust")).await;

        assert!(response.success);
        assert_eq!(response.raw_outputs.len(), 1);
        assert!(response.raw_outputs[0].success);
        assert_eq!(response.raw_outputs[0].attempts, 3);
        assert_eq!(attempts(&response), 3);
        assert_eq!(search.call_count(), 3);
    }

    #[tokio::test]
    async fn test_retry_exhaustion() {
        let search = Arc::new(FlakyTool::always_failing("search_tool"));
        let uc = use_case_with(vec![search.clone()], no_llm(), fast_params().with_max_retries(1));

        let response = uc.execute(RunQueryInput::new("search for rust")).await;

        assert_eq!(search.call_count(), 2);
        assert_eq!(attempts(&response), 2);
        assert!(!response.raw_outputs[0].success);
        // every tool failed: still a successful response with an explanation
        assert!(response.success);
        assert!(response
            .final_answer
            .starts_with("I encountered errors while processing your request"));
    }

    #[tokio::test]
    async fn test_partial_failure_keeps_order() {
        let uc = use_case(
            vec![
                Arc::new(FlakyTool::always_failing("search_tool")),
                Arc::new(MockCalculator),
            ],
            no_llm(),
        );

        let response = uc
            .execute(RunQueryInput::new("search the population of Peru and calculate 30 + 4"))
            .await;

        assert!(response.success);
        assert_eq!(response.tools_used, vec!["search_tool", "calculator_tool"]);
        assert!(!response.raw_outputs[0].success);
        assert!(response.raw_outputs[1].success);
        assert!(response.final_answer.contains("From calculator_tool"));
        assert!(response.final_answer.contains("Sorry, search_tool failed"));
    }

    #[tokio::test]
    async fn test_panicking_tool_is_isolated() {
        let gateway = ScriptedGateway::new(vec![Ok(r#"[{"tool": "panicking_tool"}]"#.to_string())]);
        let uc = use_case_with(
            vec![Arc::new(PanickingTool)],
            Arc::new(gateway),
            fast_params().with_fallback_on_llm_error(true),
        );

        let response = uc.execute(RunQueryInput::new("blow up")).await;

        assert!(response.success);
        assert_eq!(response.raw_outputs.len(), 1);
        assert_eq!(
            response.raw_outputs[0].error().unwrap().code,
            ToolError::PANICKED
        );
        assert_eq!(response.raw_outputs[0].attempts, 3);
        // synthesis script exhausted -> extractive fallback
        assert!(response.final_answer.contains("panicked"));
    }

    #[tokio::test]
    async fn test_selector_failure_is_fatal() {
        let gateway = ScriptedGateway::new(vec![Err(GatewayError::RequestFailed("401".into()))]);
        let uc = use_case(vec![Arc::new(MockCalculator)], Arc::new(gateway));

        let response = uc.execute(RunQueryInput::new("Calculate 2 + 2")).await;

        assert!(!response.success);
        assert!(response.raw_outputs.is_empty());
        assert!(response.tools_used.is_empty());
        assert!(response
            .final_answer
            .starts_with("An error occurred while processing your query"));
        assert!(response.final_answer.contains("401"));
    }

    #[tokio::test]
    async fn test_synthesizer_failure_is_fatal() {
        let gateway = ScriptedGateway::new(vec![
            Ok(r#"[{"tool": "calculator_tool", "arguments": {"expression": "1 + 1"}}]"#.to_string()),
            Err(GatewayError::ConnectionError("reset".into())),
        ]);
        let uc = use_case(vec![Arc::new(MockCalculator)], Arc::new(gateway));

        let response = uc.execute(RunQueryInput::new("what is one plus one")).await;

        assert!(!response.success);
        assert_eq!(response.raw_outputs.len(), 1);
        assert!(response.final_answer.contains("answer synthesis via LLM failed"));
    }

    #[tokio::test]
    async fn test_llm_happy_path() {
        let gateway = ScriptedGateway::new(vec![
            Ok(r#"[{"tool": "calculator_tool", "arguments": {"expression": "40 + 2"}}]"#.to_string()),
            Ok("It's 42.".to_string()),
        ]);
        let uc = use_case(vec![Arc::new(MockCalculator)], Arc::new(gateway));

        let response = uc.execute(RunQueryInput::new("what is forty plus two")).await;

        assert!(response.success);
        assert_eq!(response.final_answer, "It's 42.");
        assert_eq!(response.tools_used, vec!["calculator_tool"]);
    }

    #[tokio::test]
    async fn test_empty_plan_for_non_trivial_query() {
        // no search tool registered, nothing matches
        let uc = use_case(vec![Arc::new(MockCalculator)], no_llm());
        let response = uc.execute(RunQueryInput::new("tell me a joke")).await;

        assert!(!response.success);
        assert_eq!(response.final_answer, NO_PLAN_ANSWER);
        assert!(response.raw_outputs.is_empty());
    }

    #[tokio::test]
    async fn test_trivial_query() {
        let uc = use_case(vec![Arc::new(MockCalculator)], no_llm());
        let response = uc.execute(RunQueryInput::new("   ")).await;

        assert!(response.success);
        assert_eq!(response.final_answer, EMPTY_QUERY_ANSWER);
        assert!(response.raw_outputs.is_empty());
    }

    #[tokio::test]
    async fn test_query_timeout_keeps_partial_trace() {
        let gateway = ScriptedGateway::new(vec![Ok(r#"[{"tool": "slow_tool"}]"#.to_string())]);
        let uc = use_case_with(
            vec![Arc::new(SlowTool(Duration::from_secs(5)))],
            Arc::new(gateway),
            fast_params().with_query_timeout(Duration::from_millis(50)),
        );

        let response = uc.execute(RunQueryInput::new("do the slow thing")).await;

        assert!(!response.success);
        assert!(response.final_answer.contains("timed out"));
        assert!(response.steps.iter().any(|s| s.starts_with("Step 1/1: slow_tool")));
        assert!(response.raw_outputs.is_empty());
    }

    #[tokio::test]
    async fn test_cancellation() {
        let uc = use_case(vec![Arc::new(MockCalculator)], no_llm());
        let token = CancellationToken::new();
        token.cancel();

        let response = uc
            .execute_with_cancellation(RunQueryInput::new("Calculate 2 + 2"), &NoAgentProgress, &token)
            .await;

        assert!(!response.success);
        assert!(response.final_answer.contains("cancelled"));
        assert!(response.steps.last().unwrap().starts_with("Completed in"));
    }

    #[tokio::test]
    async fn test_context_echoed_and_pdf_selected() {
        let pdf = Arc::new(FlakyTool::new("pdf_summarizer_tool", 0));
        let uc = use_case(vec![pdf], no_llm());
        let context = QueryContext::new().with("file_path", "/uploads/a.pdf");

        let response = uc
            .execute(RunQueryInput::new("what is in my document").with_context(context.clone()))
            .await;

        // FlakyTool's schema names its parameter "input", so validation rejects file_path
        assert_eq!(response.context, context);
        assert_eq!(response.tools_used, vec!["pdf_summarizer_tool"]);
        assert_eq!(
            response.raw_outputs[0].error().unwrap().code,
            ToolError::INVALID_ARGUMENT
        );
        assert_eq!(response.raw_outputs[0].attempts, 1);
    }

    #[derive(Default)]
    struct RecordingProgress {
        phases: Mutex<Vec<ExecutionPhase>>,
    }

    impl AgentProgressNotifier for RecordingProgress {
        fn on_phase_change(&self, phase: &ExecutionPhase) {
            self.phases.lock().unwrap().push(*phase);
        }
    }

    #[tokio::test]
    async fn test_phase_sequence() {
        let uc = use_case(vec![Arc::new(MockCalculator), Arc::new(FlakyTool::new("search_tool", 0))], no_llm());
        let progress = RecordingProgress::default();

        uc.execute_with_progress(
            RunQueryInput::new("search docs and calculate 1 + 1"),
            &progress,
        )
        .await;

        assert_eq!(
            *progress.phases.lock().unwrap(),
            vec![
                ExecutionPhase::Received,
                ExecutionPhase::Planning,
                ExecutionPhase::Executing(0),
                ExecutionPhase::Executing(1),
                ExecutionPhase::Synthesizing,
                ExecutionPhase::Completed,
            ]
        );
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl RunEventLogger for RecordingLogger {
        fn log(&self, event: RunEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    #[tokio::test]
    async fn test_run_events() {
        let logger = Arc::new(RecordingLogger::default());
        let uc = use_case(vec![Arc::new(MockCalculator)], no_llm()).with_run_logger(logger.clone());

        uc.execute(RunQueryInput::new("Calculate 2 + 2")).await;

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                "query_received",
                "plan_selected",
                "tool_result",
                "answer_synthesized",
                "query_completed"
            ]
        );
    }

    #[tokio::test]
    async fn test_concurrent_runs_share_registry() {
        let weather = Arc::new(FlakyTool::new("weather_tool", 0));
        let uc = Arc::new(use_case(
            vec![Arc::new(MockCalculator), weather.clone()],
            no_llm(),
        ));

        let (calc, forecast) = tokio::join!(
            uc.execute(RunQueryInput::new("Calculate 2 + 3")),
            uc.execute(RunQueryInput::new("What's the weather in Paris?")),
        );

        assert!(calc.success);
        assert_eq!(calc.query, "Calculate 2 + 3");
        assert_eq!(calc.tools_used, vec!["calculator_tool"]);
        assert_eq!(calc.raw_outputs.len(), 1);
        assert!(calc.final_answer.contains("2 + 3 = 5"));
        assert!(!calc.steps.iter().any(|s| s.contains("weather_tool")));

        assert!(forecast.success);
        assert_eq!(forecast.query, "What's the weather in Paris?");
        assert_eq!(forecast.tools_used, vec!["weather_tool"]);
        assert_eq!(forecast.raw_outputs.len(), 1);
        assert!(!forecast.steps.iter().any(|s| s.contains("calculator_tool")));

        let seen = weather.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].get("location").and_then(|v| v.as_str()), Some("Paris"));
    }

    #[tokio::test]
    async fn test_agent_info_and_suggestions() {
        let uc = use_case(vec![Arc::new(MockCalculator)], no_llm());

        let info = uc.agent_info();
        assert!(!info.llm_available);
        assert_eq!(info.llm_unavailable_reason.as_deref(), Some("no API key"));
        assert_eq!(info.max_retries, 2);
        assert_eq!(info.total_tools, 1);
        assert_eq!(info.tools[0].name, "calculator_tool");

        assert_eq!(uc.suggest_tools("calculate the weather"), vec!["calculator_tool"]);
    }
}
