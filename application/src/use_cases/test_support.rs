//! Hand-written mocks shared by the use case tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use toolcall_domain::{ToolArguments, ToolDescriptor, ToolError, ToolHandler, ToolParameter};

use crate::ports::llm_gateway::{GatewayError, LlmAvailability, LlmGateway, LlmSession};

/// Gateway that replays scripted responses, one per `send`.
#[derive(Clone)]
pub struct ScriptedGateway {
    responses: Arc<Mutex<VecDeque<Result<String, GatewayError>>>>,
    pub prompts: Arc<Mutex<Vec<String>>>,
}

impl ScriptedGateway {
    pub fn new(responses: Vec<Result<String, GatewayError>>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(responses.into())),
            prompts: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl LlmSession for ScriptedGateway {
    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        self.prompts.lock().unwrap().push(content.to_string());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(GatewayError::Other("script exhausted".into())))
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    fn availability(&self) -> LlmAvailability {
        LlmAvailability::Available {
            model: "scripted".into(),
        }
    }

    async fn create_session_with_system_prompt(
        &self,
        _system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        Ok(Box::new(self.clone()))
    }
}

/// Evaluates `a + b` style expressions well enough for tests.
pub struct MockCalculator;

#[async_trait]
impl ToolHandler for MockCalculator {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new("calculator_tool", "Evaluate arithmetic")
            .with_parameter(ToolParameter::new("expression", "Expression", true))
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<serde_json::Value, ToolError> {
        let expression = arguments
            .get("expression")
            .and_then(|v| v.as_str())
            .unwrap_or_default();
        let sum: f64 = expression
            .split('+')
            .map(|t| t.trim().parse::<f64>())
            .sum::<Result<f64, _>>()
            .map_err(|e| ToolError::invalid_argument(e.to_string()))?;
        Ok(json!({"expression": expression, "result": sum, "summary": format!("{} = {}", expression, sum)}))
    }
}

/// Tool with a configurable name that fails its first `failures` calls.
pub struct FlakyTool {
    pub name: &'static str,
    pub failures: u32,
    pub calls: AtomicU32,
    pub seen: Mutex<Vec<ToolArguments>>,
}

impl FlakyTool {
    pub fn new(name: &'static str, failures: u32) -> Self {
        Self {
            name,
            failures,
            calls: AtomicU32::new(0),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn always_failing(name: &'static str) -> Self {
        Self::new(name, u32::MAX)
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ToolHandler for FlakyTool {
    fn descriptor(&self) -> ToolDescriptor {
        let param = match self.name {
            "weather_tool" => "location",
            "search_tool" => "query",
            "rag_tool" => "question",
            _ => "input",
        };
        ToolDescriptor::new(self.name, "Sometimes works")
            .with_parameter(ToolParameter::new(param, "Input", true))
    }

    async fn execute(&self, arguments: &ToolArguments) -> Result<serde_json::Value, ToolError> {
        self.seen.lock().unwrap().push(arguments.clone());
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if call <= self.failures {
            Err(ToolError::execution_failed(format!("{} unavailable (call {})", self.name, call)))
        } else {
            Ok(json!({"summary": format!("{} ok on call {}", self.name, call)}))
        }
    }
}

/// Tool that panics on every call.
pub struct PanickingTool;

#[async_trait]
impl ToolHandler for PanickingTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new("panicking_tool", "Always panics")
    }

    async fn execute(&self, _arguments: &ToolArguments) -> Result<serde_json::Value, ToolError> {
        panic!("handler exploded");
    }
}

/// Tool that sleeps before answering.
pub struct SlowTool(pub Duration);

#[async_trait]
impl ToolHandler for SlowTool {
    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor::new("slow_tool", "Takes its time")
    }

    async fn execute(&self, _arguments: &ToolArguments) -> Result<serde_json::Value, ToolError> {
        tokio::time::sleep(self.0).await;
        Ok(json!({"summary": "finally"}))
    }
}
