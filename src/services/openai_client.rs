use std::time::Duration;

use reqwest::{header::HeaderMap, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{PlannerError, Result};

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
const MAX_RETRIES: usize = 3;
const INITIAL_BACKOFF: Duration = Duration::from_millis(250);

/// Minimal client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: String,
    base_url: String,
    http: reqwest::Client,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ChatMessage {
    pub role: &'static str,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Clone, Copy, Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            temperature: None,
            max_tokens: None,
            response_format: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f64>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn json_object(mut self) -> Self {
        self.response_format = Some(ResponseFormat {
            kind: "json_object",
        });
        self
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<AssistantMessage>,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

/// What to do with a non-final response.
enum Attempt {
    Retry(Duration),
    GiveUp(PlannerError),
    Done,
}

impl OpenAIClient {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn set_base_url(&mut self, base_url: impl Into<String>) {
        self.base_url = base_url.into();
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST a chat completion and return the first choice's text.
    ///
    /// 429 and 5xx responses are retried up to three times with doubling backoff;
    /// a `Retry-After` header in seconds overrides the backoff for 429s.
    pub async fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
        timeout: Duration,
    ) -> Result<String> {
        let url = chat_url(&self.base_url);
        let mut backoff = INITIAL_BACKOFF;

        for attempt in 0..=MAX_RETRIES {
            let response = self
                .http
                .post(&url)
                .timeout(timeout)
                .bearer_auth(&self.api_key)
                .header("X-Title", "trip-planner-rs")
                .json(request)
                .send()
                .await?;

            let status = response.status();
            let headers = response.headers().clone();
            let text = response.text().await?;

            match classify(status, &headers, backoff, attempt < MAX_RETRIES) {
                Attempt::Retry(wait) => {
                    warn!(
                        target: "trip_planner::llm",
                        attempt,
                        %status,
                        wait_ms = wait.as_millis() as u64,
                        "completion endpoint unavailable, retrying"
                    );
                    tokio::time::sleep(wait).await;
                    backoff *= 2;
                }
                Attempt::GiveUp(err) => return Err(err),
                Attempt::Done => return parse_completion_body(status, &text),
            }
        }

        Err(PlannerError::Llm(
            "completion endpoint retries exhausted".to_string(),
        ))
    }
}

fn classify(status: StatusCode, headers: &HeaderMap, backoff: Duration, can_retry: bool) -> Attempt {
    if status == StatusCode::TOO_MANY_REQUESTS {
        let wait = headers
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.parse::<u64>().ok())
            .map(Duration::from_secs)
            .unwrap_or(backoff);
        return if can_retry {
            Attempt::Retry(wait)
        } else {
            Attempt::GiveUp(PlannerError::RateLimit {
                retry_after: wait.as_secs().max(1),
            })
        };
    }

    if status.is_server_error() && can_retry {
        return Attempt::Retry(backoff);
    }

    Attempt::Done
}

fn parse_completion_body(status: StatusCode, text: &str) -> Result<String> {
    let envelope: Value = serde_json::from_str(text)
        .map_err(|err| PlannerError::Llm(format!("Failed to parse completion envelope: {err}")))?;

    if let Some(error) = envelope.get("error") {
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        return Err(PlannerError::Llm(if status.is_success() {
            format!("API error: {message}")
        } else {
            format!("HTTP {status} error: {message}")
        }));
    }

    if !status.is_success() {
        return Err(PlannerError::Llm(format!("HTTP {status} error: {text}")));
    }

    let response: ChatCompletionResponse = serde_json::from_value(envelope)
        .map_err(|err| PlannerError::Llm(format!("Unexpected completion shape: {err}")))?;
    first_choice_content(response)
}

fn first_choice_content(response: ChatCompletionResponse) -> Result<String> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| PlannerError::Llm("Completion response contained no choices".to_string()))?;

    choice
        .message
        .and_then(|message| message.content)
        .ok_or_else(|| {
            PlannerError::Llm("Completion response missing assistant content".to_string())
        })
}

fn chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{trimmed}/chat/completions")
    }
}
