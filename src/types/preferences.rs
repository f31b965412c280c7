use crate::error::{PlannerError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DEFAULT_ACCOMMODATION: &str = "hotel";
pub const DEFAULT_TRANSPORT: &str = "mixed";
pub const DEFAULT_LANGUAGE: &str = "english";

/// A single trip planning request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripPreferences {
    /// Total budget for the whole party
    pub budget: f64,
    pub duration_days: u32,
    /// Category tags in the order the traveler listed them (e.g. `heritage`, `nightlife`)
    pub interests: Vec<String>,
    /// Free-text place name
    pub location: String,
    pub start_date: NaiveDate,
    pub travelers: u32,
    #[serde(default = "default_accommodation")]
    pub accommodation_type: String,
    #[serde(default = "default_transport")]
    pub transport_preference: String,
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_accommodation() -> String {
    DEFAULT_ACCOMMODATION.to_string()
}

fn default_transport() -> String {
    DEFAULT_TRANSPORT.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

impl TripPreferences {
    pub fn new(
        location: impl Into<String>,
        budget: f64,
        duration_days: u32,
        start_date: NaiveDate,
        travelers: u32,
    ) -> Result<Self> {
        let preferences = Self {
            budget,
            duration_days,
            interests: Vec::new(),
            location: location.into(),
            start_date,
            travelers,
            accommodation_type: default_accommodation(),
            transport_preference: default_transport(),
            language: default_language(),
        };
        preferences.validate()?;
        Ok(preferences)
    }

    pub fn with_interests<I, S>(mut self, interests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.interests = interests.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_accommodation_type(mut self, accommodation_type: impl Into<String>) -> Self {
        self.accommodation_type = accommodation_type.into();
        self
    }

    pub fn with_transport_preference(mut self, transport_preference: impl Into<String>) -> Self {
        self.transport_preference = transport_preference.into();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Check the positivity constraints on budget, duration and party size.
    pub fn validate(&self) -> Result<()> {
        if !self.budget.is_finite() || self.budget <= 0.0 {
            return Err(PlannerError::InvalidInput(format!(
                "budget must be a positive number, got {}",
                self.budget
            )));
        }
        if self.duration_days == 0 {
            return Err(PlannerError::InvalidInput(
                "duration_days must be at least 1".to_string(),
            ));
        }
        if self.travelers == 0 {
            return Err(PlannerError::InvalidInput(
                "travelers must be at least 1".to_string(),
            ));
        }
        if self.location.trim().is_empty() {
            return Err(PlannerError::InvalidInput(
                "location must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
