//! OpenAI chat session.
//!
//! The chat completions API is stateless, so the session keeps the message
//! history locally and sends it with every request.

use crate::openai::gateway::OpenAiConfig;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use toolcall_application::{GatewayError, LlmSession};
use toolcall_domain::core::string::truncate;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn new(role: &str, content: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// An active conversation with an OpenAI-compatible model.
pub struct OpenAiSession {
    client: reqwest::Client,
    config: OpenAiConfig,
    api_key: String,
    messages: Mutex<Vec<ChatMessage>>,
}

impl OpenAiSession {
    pub fn new(
        client: reqwest::Client,
        config: OpenAiConfig,
        api_key: String,
        system_prompt: &str,
    ) -> Self {
        let mut messages = Vec::new();
        if !system_prompt.is_empty() {
            messages.push(ChatMessage::new("system", system_prompt));
        }
        Self {
            client,
            config,
            api_key,
            messages: Mutex::new(messages),
        }
    }

    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, GatewayError> {
        let request = ChatRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            "Calling chat completions API"
        );

        let response = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::Timeout
                } else if e.is_connect() {
                    GatewayError::ConnectionError(e.to_string())
                } else {
                    GatewayError::RequestFailed(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {} from chat completions API: {}",
                status,
                truncate(body.trim(), 200)
            )));
        }

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        extract_content(body)
    }
}

fn extract_content(response: ChatResponse) -> Result<String, GatewayError> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or_else(|| GatewayError::InvalidResponse("response contained no choices".to_string()))
}

#[async_trait]
impl LlmSession for OpenAiSession {
    async fn send(&self, content: &str) -> Result<String, GatewayError> {
        let mut messages = self.messages.lock().await;
        messages.push(ChatMessage::new("user", content));

        match self.complete(&messages).await {
            Ok(reply) => {
                messages.push(ChatMessage::new("assistant", reply.clone()));
                Ok(reply)
            }
            Err(e) => {
                // Keep history consistent for a retry by the caller
                messages.pop();
                Err(e)
            }
        }
    }
}
