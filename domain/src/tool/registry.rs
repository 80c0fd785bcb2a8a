//! Tool Registry
//!
//! Holds every registered tool for the lifetime of the process: the
//! [`ToolDescriptor`] captured at registration time plus the shared
//! [`ToolHandler`] used to execute it.
//!
//! # Usage
//!
//! ```ignore
//! let mut registry = ToolRegistry::new();
//! registry.register(CalculatorTool::new())?;
//! registry.register(WeatherTool::new(client))?;
//!
//! let registry = Arc::new(registry); // read-only from here on
//! let tool = registry.lookup("calculator_tool")?;
//! ```
//!
//! Registration happens once at startup. After the registry is wrapped in an
//! `Arc` it is only read, so concurrent orchestrator runs share it without
//! locking.

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;

use super::entities::ToolDescriptor;
use super::handler::ToolHandler;

/// Errors raised by registry operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// A registered tool: its immutable descriptor and its handler.
#[derive(Clone)]
pub struct RegisteredTool {
    pub descriptor: ToolDescriptor,
    pub handler: Arc<dyn ToolHandler>,
}

impl std::fmt::Debug for RegisteredTool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredTool")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Name-keyed registry of tools, preserving registration order.
#[derive(Debug, Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool handler.
    ///
    /// Fails with [`RegistryError::DuplicateTool`] if a tool with the same
    /// name is already registered; the registry is left unchanged.
    pub fn register<H: ToolHandler + 'static>(&mut self, handler: H) -> Result<(), RegistryError> {
        self.register_arc(Arc::new(handler))
    }

    /// Register a shared tool handler (Arc version)
    pub fn register_arc(&mut self, handler: Arc<dyn ToolHandler>) -> Result<(), RegistryError> {
        let descriptor = handler.descriptor();
        if self.index.contains_key(&descriptor.name) {
            return Err(RegistryError::DuplicateTool(descriptor.name));
        }

        self.index.insert(descriptor.name.clone(), self.tools.len());
        self.tools.push(RegisteredTool {
            descriptor,
            handler,
        });
        Ok(())
    }

    /// Look up a tool by exact name.
    pub fn lookup(&self, name: &str) -> Result<&RegisteredTool, RegistryError> {
        self.index
            .get(name)
            .map(|&i| &self.tools[i])
            .ok_or_else(|| RegistryError::UnknownTool(name.to_string()))
    }

    /// Descriptor for a tool, if registered.
    pub fn descriptor(&self, name: &str) -> Option<&ToolDescriptor> {
        self.lookup(name).ok().map(|t| &t.descriptor)
    }

    /// All descriptors in registration order.
    pub fn list(&self) -> Vec<&ToolDescriptor> {
        self.tools.iter().map(|t| &t.descriptor).collect()
    }

    /// Tool names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.descriptor.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Get statistics about registered tools
    pub fn stats(&self) -> RegistryStats {
        RegistryStats {
            total_tools: self.tools.len(),
            tool_names: self.names().into_iter().map(String::from).collect(),
        }
    }
}

/// Statistics about the registry
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct RegistryStats {
    pub total_tools: usize,
    pub tool_names: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tool::entities::{ToolArguments, ToolParameter};
    use crate::tool::value_objects::ToolError;
    use async_trait::async_trait;

    struct EchoTool(&'static str);

    #[async_trait]
    impl ToolHandler for EchoTool {
        fn descriptor(&self) -> ToolDescriptor {
            ToolDescriptor::new(self.0, "Echo arguments back")
                .with_parameter(ToolParameter::new("text", "Text to echo", true))
        }

        async fn execute(&self, arguments: &ToolArguments) -> Result<serde_json::Value, ToolError> {
            Ok(serde_json::to_value(arguments).unwrap_or_default())
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool("echo")).unwrap();

        let tool = registry.lookup("echo").unwrap();
        assert_eq!(tool.descriptor.name, "echo");
        assert!(registry.contains("echo"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_registration_fails() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool("echo")).unwrap();

        let err = registry.register(EchoTool("echo")).unwrap_err();
        assert_eq!(err, RegistryError::DuplicateTool("echo".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unknown_tool() {
        let registry = ToolRegistry::new();
        let err = registry.lookup("missing").unwrap_err();
        assert_eq!(err, RegistryError::UnknownTool("missing".to_string()));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool("zeta")).unwrap();
        registry.register(EchoTool("alpha")).unwrap();
        registry.register(EchoTool("mid")).unwrap();

        let names: Vec<_> = registry.list().iter().map(|d| d.name.clone()).collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
        assert_eq!(registry.stats().total_tools, 3);
    }

    #[tokio::test]
    async fn test_handler_is_shared() {
        let mut registry = ToolRegistry::new();
        registry.register(EchoTool("echo")).unwrap();

        let mut args = ToolArguments::new();
        args.insert("text".into(), "hi".into());
        let handler = registry.lookup("echo").unwrap().handler.clone();
        let payload = handler.execute(&args).await.unwrap();
        assert_eq!(payload["text"], "hi");
    }
}
