//! LLM configuration from TOML (`[llm]` section)
//!
//! Any OpenAI-compatible `/chat/completions` endpoint works. Without an API
//! key the agent runs on its keyword rules and extractive answers.
//!
//! ```toml
//! [llm]
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-3.5-turbo"
//! temperature = 0.3
//! fallback_on_error = false
//! ```

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Raw LLM configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// API key; `OPENAI_API_KEY` is used when unset
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    /// HTTP request timeout
    pub timeout_secs: u64,
    /// Use keyword rules / extractive answers when the LLM fails at runtime
    pub fallback_on_error: bool,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.3,
            max_tokens: 1000,
            timeout_secs: 60,
            fallback_on_error: false,
        }
    }
}

impl FileLlmConfig {
    /// Configured API key, ignoring blank values.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }
}
