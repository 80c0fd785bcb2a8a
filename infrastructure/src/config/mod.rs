//! Configuration file loading for toolcall-agent
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `TOOLCALL_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./toolcall.toml` or `./.toolcall.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/toolcall-agent/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_BASE_URL, DEFAULT_MODEL, FileAgentConfig, FileConfig,
    FileLlmConfig, FileLoggingConfig, FileOutputConfig, FileToolsConfig,
};
pub use loader::ConfigLoader;
