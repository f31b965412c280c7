use super::openai_client::{ChatCompletionRequest, ChatMessage, OpenAIClient};
use crate::{
    config::PlannerConfig,
    error::{PlannerError, Result},
};
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Opaque text-completion service: one prompt in, one text out.
#[async_trait]
pub trait TextCompletion: Send + Sync + std::fmt::Debug {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// `TextCompletion` backed by an OpenAI-compatible chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenAiCompletion {
    client: OpenAIClient,
    model: String,
    temperature: Option<f64>,
    max_tokens: Option<u32>,
    timeout: Duration,
    json_mode: bool,
}

impl OpenAiCompletion {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: OpenAIClient::new(api_key.into()),
            model: crate::config::DEFAULT_MODEL.to_string(),
            temperature: Some(crate::config::DEFAULT_TEMPERATURE),
            max_tokens: Some(crate::config::DEFAULT_MAX_TOKENS),
            timeout: Duration::from_secs(crate::config::DEFAULT_TIMEOUT_SECS),
            json_mode: false,
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.api_key.clone())
            .with_base_url(config.base_url.clone())
            .with_model(config.model.clone())
            .with_temperature(Some(config.temperature))
            .with_max_tokens(Some(config.max_tokens))
            .with_timeout(config.timeout)
            .with_json_mode(config.json_mode)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.client.set_base_url(base_url);
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Ask the endpoint for `response_format: json_object`. Not every provider supports it.
    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextCompletion for OpenAiCompletion {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let mut request =
            ChatCompletionRequest::new(self.model.clone(), vec![ChatMessage::user(prompt)])
                .with_temperature(self.temperature)
                .with_max_tokens(self.max_tokens);
        if self.json_mode {
            request = request.json_object();
        }

        debug!(
            target: "trip_planner::llm",
            model = %self.model,
            prompt_chars = prompt.len(),
            "sending completion request"
        );

        timeout(self.timeout, self.client.chat_completion(&request, self.timeout))
            .await
            .map_err(|_| PlannerError::Timeout("completion call timed out".to_string()))?
    }
}
