//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod agent;
mod llm;
mod logging;
mod output;
mod tools;

pub use agent::FileAgentConfig;
pub use llm::{DEFAULT_BASE_URL, DEFAULT_MODEL, FileLlmConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use tools::FileToolsConfig;

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use toolcall_application::OrchestratorParams;

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigValidationError {
    #[error("{field} must be greater than zero")]
    InvalidTimeout { field: &'static str },

    #[error("agent.max_plan_steps must be at least 1")]
    InvalidPlanSteps,

    #[error("llm.model must not be empty")]
    EmptyModelName,

    #[error("llm.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Orchestrator settings
    pub agent: FileAgentConfig,
    /// LLM endpoint settings
    pub llm: FileLlmConfig,
    /// Tool settings
    pub tools: FileToolsConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Run log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.agent.tool_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "agent.tool_timeout_secs",
            });
        }
        if self.agent.query_timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "agent.query_timeout_secs",
            });
        }
        if self.llm.timeout_secs == 0 {
            return Err(ConfigValidationError::InvalidTimeout {
                field: "llm.timeout_secs",
            });
        }
        if self.agent.max_plan_steps == 0 {
            return Err(ConfigValidationError::InvalidPlanSteps);
        }
        if self.llm.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.llm.temperature,
            ));
        }
        Ok(())
    }

    /// Orchestrator parameters described by this configuration.
    pub fn orchestrator_params(&self) -> OrchestratorParams {
        OrchestratorParams::default()
            .with_max_retries(self.agent.max_retries)
            .with_retry_delay(Duration::from_millis(self.agent.retry_delay_ms))
            .with_max_plan_steps(self.agent.max_plan_steps)
            .with_tool_timeout(Duration::from_secs(self.agent.tool_timeout_secs))
            .with_query_timeout(Duration::from_secs(self.agent.query_timeout_secs))
            .with_fallback_on_llm_error(self.llm.fallback_on_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toolcall_domain::OutputFormat;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[agent]
max_retries = 4
retry_delay_ms = 250
max_plan_steps = 3

[llm]
model = "gpt-4o-mini"
fallback_on_error = true

[tools]
default_location = "Paris"
allowed_paths = ["/tmp"]

[output]
format = "full"
color = false

[logging]
run_log = "runs.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.max_retries, 4);
        assert_eq!(config.agent.max_plan_steps, 3);
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert!(config.llm.fallback_on_error);
        assert_eq!(config.tools.default_location, "Paris");
        assert_eq!(config.tools.allowed_paths, vec!["/tmp"]);
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert_eq!(
            config.logging.run_log.as_deref(),
            Some(std::path::Path::new("runs.jsonl"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[agent]
max_retries = 0
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.agent.max_retries, 0);
        // Defaults should apply
        assert_eq!(config.agent.retry_delay_ms, 1000);
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert!(config.output.color);
        assert!(config.logging.run_log.is_none());
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = FileConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert!(config.llm.api_key().is_none());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = FileConfig::default();
        config.agent.tool_timeout_secs = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTimeout {
                field: "agent.tool_timeout_secs"
            })
        );
    }

    #[test]
    fn test_validate_rejects_empty_model() {
        let mut config = FileConfig::default();
        config.llm.model = "  ".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::EmptyModelName)
        );
    }

    #[test]
    fn test_validate_rejects_zero_plan_steps() {
        let mut config = FileConfig::default();
        config.agent.max_plan_steps = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidPlanSteps)
        );
    }

    #[test]
    fn test_validate_rejects_out_of_range_temperature() {
        let mut config = FileConfig::default();
        config.llm.temperature = 2.5;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidTemperature(2.5))
        );
        config.llm.temperature = 2.0;
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_orchestrator_params_mapping() {
        let mut config = FileConfig::default();
        config.agent.max_retries = 3;
        config.agent.retry_delay_ms = 50;
        config.llm.fallback_on_error = true;

        let params = config.orchestrator_params();
        assert_eq!(params.max_retries, 3);
        assert_eq!(params.retry_delay, Duration::from_millis(50));
        assert_eq!(params.max_plan_steps, 5);
        assert_eq!(params.tool_timeout, Duration::from_secs(30));
        assert_eq!(params.query_timeout, Duration::from_secs(120));
        assert!(params.fallback_on_llm_error);
    }

    #[test]
    fn test_blank_api_key_is_ignored() {
        let mut config = FileConfig::default();
        config.llm.api_key = Some("   ".to_string());
        assert!(config.llm.api_key().is_none());
        config.llm.api_key = Some("sk-test".to_string());
        assert_eq!(config.llm.api_key(), Some("sk-test"));
    }
}
