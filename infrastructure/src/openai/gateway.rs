//! OpenAI-compatible LLM Gateway implementation

use crate::config::FileLlmConfig;
use crate::openai::session::OpenAiSession;
use async_trait::async_trait;
use std::time::Duration;
use toolcall_application::{GatewayError, LlmAvailability, LlmGateway, LlmSession};
use tracing::info;

/// Connection settings for an OpenAI-compatible endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl From<&FileLlmConfig> for OpenAiConfig {
    fn from(config: &FileLlmConfig) -> Self {
        Self {
            api_key: config.api_key().map(String::from),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: Duration::from_secs(config.timeout_secs),
        }
    }
}

impl OpenAiConfig {
    pub(crate) fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

/// LLM Gateway implementation for OpenAI-compatible chat completion APIs
pub struct OpenAiGateway {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiGateway {
    /// Create a gateway. Construction succeeds without an API key; the
    /// gateway then declares itself unavailable.
    pub fn new(config: OpenAiConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                GatewayError::ConnectionError(format!("Failed to create HTTP client: {}", e))
            })?;

        info!(
            model = %config.model,
            base_url = %config.base_url,
            has_key = config.api_key.is_some(),
            "OpenAiGateway initialized"
        );

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &OpenAiConfig {
        &self.config
    }
}

#[async_trait]
impl LlmGateway for OpenAiGateway {
    fn availability(&self) -> LlmAvailability {
        match self.config.api_key {
            Some(_) => LlmAvailability::Available {
                model: self.config.model.clone(),
            },
            None => LlmAvailability::Unavailable {
                reason: "no API key configured (set OPENAI_API_KEY or llm.api_key)".to_string(),
            },
        }
    }

    async fn create_session_with_system_prompt(
        &self,
        system_prompt: &str,
    ) -> Result<Box<dyn LlmSession>, GatewayError> {
        let Some(api_key) = self.config.api_key.clone() else {
            return Err(GatewayError::Unavailable(
                "no API key configured".to_string(),
            ));
        };

        Ok(Box::new(OpenAiSession::new(
            self.client.clone(),
            self.config.clone(),
            api_key,
            system_prompt,
        )))
    }
}
