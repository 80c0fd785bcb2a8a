//! Tool handler capability interface
//!
//! Every concrete tool (calculator, weather, search, ...) implements
//! [`ToolHandler`]. The orchestrator never inspects a handler's concrete type:
//! handlers are registered in the [`ToolRegistry`](super::registry::ToolRegistry)
//! and dispatched by name.
//!
//! ```text
//! ┌──────────────┐  descriptor()  ┌──────────────┐
//! │ ToolHandler  │───────────────▶│ ToolRegistry │
//! │ (infra)      │◀───────────────│ (by name)    │
//! └──────────────┘   execute()    └──────────────┘
//! ```

use async_trait::async_trait;

use super::entities::{ToolArguments, ToolDescriptor};
use super::value_objects::ToolError;

/// A named capability with a declared schema and an execution body.
///
/// `execute` receives arguments that were already validated and coerced
/// against [`descriptor()`](Self::descriptor). It returns the structured
/// payload on success; a returned error is captured into a failed
/// `ToolResult` by the invoker. Handlers may perform blocking I/O
/// internally.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Schema of this tool. Must return the same value on every call.
    fn descriptor(&self) -> ToolDescriptor;

    /// Execute the tool.
    async fn execute(&self, arguments: &ToolArguments) -> Result<serde_json::Value, ToolError>;
}
