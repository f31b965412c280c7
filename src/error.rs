use thiserror::Error;

/// Main error type for the trip planner.
///
/// Agent failures are carried as data inside routing results, so the type is
/// `Clone` and comparable; foreign errors are flattened into their messages.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing input: {0}")]
    MissingInput(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed `{schema}` response: {reason}")]
    MalformedResponse { schema: &'static str, reason: String },

    #[error("Unknown routing strategy: {0}")]
    UnknownStrategy(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Language model error: {0}")]
    Llm(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Timeout error: {0}")]
    Timeout(String),

    #[error("Rate limit exceeded: retry after {retry_after}s")]
    RateLimit { retry_after: u64 },

    #[error("Agent task failed: {0}")]
    TaskFailed(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl From<serde_json::Error> for PlannerError {
    fn from(err: serde_json::Error) -> Self {
        PlannerError::Serialization(err.to_string())
    }
}

impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            PlannerError::Timeout(err.to_string())
        } else {
            PlannerError::Http(err.to_string())
        }
    }
}

impl PlannerError {
    pub(crate) fn malformed(schema: &'static str, reason: impl Into<String>) -> Self {
        PlannerError::MalformedResponse {
            schema,
            reason: reason.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PlannerError::Http(_)
                | PlannerError::Llm(_)
                | PlannerError::RateLimit { .. }
                | PlannerError::Timeout(_)
        )
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::InvalidInput(_) => "INVALID_INPUT",
            PlannerError::MissingInput(_) => "MISSING_INPUT",
            PlannerError::NotFound(_) => "NOT_FOUND",
            PlannerError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
            PlannerError::UnknownStrategy(_) => "UNKNOWN_STRATEGY",
            PlannerError::Http(_) => "HTTP_ERROR",
            PlannerError::Llm(_) => "LLM_ERROR",
            PlannerError::Serialization(_) => "SERIALIZATION_ERROR",
            PlannerError::Timeout(_) => "TIMEOUT_ERROR",
            PlannerError::RateLimit { .. } => "RATE_LIMIT_ERROR",
            PlannerError::TaskFailed(_) => "TASK_FAILED",
        }
    }

    /// Convert to the error record stored in place of an agent result
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "error": {
                "code": self.error_code(),
                "message": self.to_string(),
                "retryable": self.is_retryable()
            }
        })
    }
}
