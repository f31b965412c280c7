use crate::{
    error::{PlannerError, Result},
    services::{
        openai_client::DEFAULT_BASE_URL,
        openstreetmap::{DEFAULT_NOMINATIM_URL, DEFAULT_OVERPASS_URL},
    },
};
use std::{env, time::Duration};

pub const DEFAULT_MODEL: &str = "openai/gpt-4.1-mini";
pub const DEFAULT_TEMPERATURE: f64 = 0.3;
pub const DEFAULT_MAX_TOKENS: u32 = 1500;
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
pub const DEFAULT_POI_RADIUS_M: u32 = 10_000;
pub const DEFAULT_CURRENCY: &str = "INR";

/// Settings for the language model and lookup services.
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub json_mode: bool,
    pub timeout: Duration,
    pub nominatim_url: String,
    pub overpass_url: String,
    pub user_agent: String,
    pub poi_radius_m: u32,
    pub currency: String,
}

impl PlannerConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            json_mode: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            user_agent: format!("trip-planner-rs/{}", env!("CARGO_PKG_VERSION")),
            poi_radius_m: DEFAULT_POI_RADIUS_M,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Build from the process environment, loading `.env` first when present.
    pub fn from_env() -> Result<Self> {
        Self::from_env_with_key(None)
    }

    /// Like [`from_env`](Self::from_env), but an explicit key wins over `OPENAI_API_KEY`.
    /// Every other variable is still read from the environment.
    pub fn from_env_with_key(api_key: Option<String>) -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(api_key, |name| env::var(name).ok())
    }

    /// Resolve settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(api_key: Option<String>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = api_key.or_else(|| lookup("OPENAI_API_KEY")).ok_or_else(|| {
            PlannerError::Config(
                "OPENAI_API_KEY environment variable must be set before planning trips"
                    .to_string(),
            )
        })?;

        let mut config = Self::new(api_key);

        if let Some(base_url) = lookup("OPENAI_BASE_URL").or_else(|| lookup("OPENROUTER_BASE_URL")) {
            config.base_url = base_url;
        }
        if let Some(model) = lookup("MODEL") {
            config.model = model;
        }
        if let Some(raw) = lookup("TRIP_PLANNER_TIMEOUT_SECS") {
            let secs = raw.parse::<u64>().map_err(|err| {
                PlannerError::Config(format!("TRIP_PLANNER_TIMEOUT_SECS `{raw}`: {err}"))
            })?;
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(url) = lookup("NOMINATIM_URL") {
            config.nominatim_url = url;
        }
        if let Some(url) = lookup("OVERPASS_URL") {
            config.overpass_url = url;
        }
        if let Some(currency) = lookup("TRIP_PLANNER_CURRENCY") {
            config.currency = currency;
        }

        Ok(config)
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_json_mode(mut self, json_mode: bool) -> Self {
        self.json_mode = json_mode;
        self
    }

    pub fn with_osm_urls(
        mut self,
        nominatim_url: impl Into<String>,
        overpass_url: impl Into<String>,
    ) -> Self {
        self.nominatim_url = nominatim_url.into();
        self.overpass_url = overpass_url.into();
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}
