//! Tool domain module
//!
//! This module defines the core abstractions for the agent's **Tool System**:
//! how a query is answered by discrete, named capabilities in a validated,
//! failure-isolated manner.
//!
//! # Overview
//!
//! Every tool is described by a [`ToolDescriptor`] (name, input schema, output
//! schema), implemented by a [`ToolHandler`], registered in the
//! [`ToolRegistry`], invoked via a [`ToolCall`], and answered by a
//! [`ToolResult`].
//!
//! ```text
//! ┌──────────────┐    ┌──────────────┐    ┌──────────────┐
//! │ ToolRegistry │───▶│ ToolCall     │───▶│ ToolResult   │
//! │ (by name)    │    │ (invocation) │    │ (terminal)   │
//! └──────┬───────┘    └──────────────┘    └──────────────┘
//!        │
//!        └─ "calculator_tool" → (ToolDescriptor, Arc<dyn ToolHandler>)
//! ```
//!
//! # Architecture
//!
//! - **Domain** (this module): descriptors, validation, registry, results; no I/O
//! - **Application** (`ToolInvoker`, `RetrySupervisor`): execution policy
//! - **Infrastructure** (`tools::*`): concrete handlers doing HTTP, filesystem
//!   and system inspection

pub mod entities;
pub mod handler;
pub mod registry;
pub mod traits;
pub mod value_objects;

pub use entities::{ParamType, ToolArguments, ToolCall, ToolDescriptor, ToolParameter};
pub use handler::ToolHandler;
pub use registry::{RegisteredTool, RegistryError, RegistryStats, ToolRegistry};
pub use traits::{DefaultToolValidator, ToolValidator, ValidationError};
pub use value_objects::{ToolError, ToolResult};
