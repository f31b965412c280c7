use super::{itinerary::ItineraryItem, preferences::TripPreferences};
use crate::{
    error::{PlannerError, Result},
    CompletionSchema,
};
use chrono::{Duration, NaiveDate};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_EXTRACTED_BUDGET: f64 = 50_000.0;
pub const DEFAULT_EXTRACTED_DURATION: u32 = 5;
pub const DEFAULT_EXTRACTED_TRAVELERS: u32 = 2;
pub const DEFAULT_EXTRACTED_LOCATION: &str = "not specified";
pub const DEFAULT_START_OFFSET_DAYS: i64 = 30;

/// Day-by-day activities chosen from the researched points of interest.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, CompletionSchema)]
pub struct PlanningResponse {
    /// Every scheduled activity across the whole trip
    pub itinerary: Vec<ItineraryItem>,
}

/// Cost-saving ideas for an existing itinerary.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, CompletionSchema)]
pub struct OptimizationResponse {
    /// Two or three concrete, actionable suggestions
    pub suggestions: Vec<String>,
    /// Combined savings of all suggestions, in the trip currency
    #[schemars(range(min = 0))]
    pub estimated_savings: f64,
}

/// Trip details pulled out of a free-text request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, CompletionSchema)]
#[completion(name = "TripRequest")]
pub struct ExtractedPreferences {
    /// Total budget for the party
    #[serde(default)]
    pub budget: Option<f64>,
    /// Trip length in days
    #[serde(default)]
    pub duration_days: Option<u32>,
    /// Interest tags such as heritage, culture, nightlife, beaches, adventure, local food
    #[serde(default)]
    pub interests: Option<Vec<String>>,
    /// Destination place name
    #[serde(default)]
    pub location: Option<String>,
    /// First day of the trip as YYYY-MM-DD
    #[serde(default)]
    pub start_date: Option<String>,
    /// Number of people travelling
    #[serde(default)]
    pub travelers: Option<u32>,
}

impl ExtractedPreferences {
    /// Fill gaps with defaults and validate. `today` anchors the default start date.
    pub fn into_preferences(self, today: NaiveDate) -> Result<TripPreferences> {
        let schema = Self::schema().schema_name();

        let start_date = match self.start_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .map_err(|err| {
                    PlannerError::malformed(schema, format!("invalid start_date `{raw}`: {err}"))
                })?,
            _ => today + Duration::days(DEFAULT_START_OFFSET_DAYS),
        };

        let interests = self
            .interests
            .filter(|interests| !interests.is_empty())
            .unwrap_or_else(|| vec!["culture".to_string()]);

        let location = self
            .location
            .filter(|location| !location.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EXTRACTED_LOCATION.to_string());

        TripPreferences::new(
            location,
            self.budget.unwrap_or(DEFAULT_EXTRACTED_BUDGET),
            self.duration_days.unwrap_or(DEFAULT_EXTRACTED_DURATION),
            start_date,
            self.travelers.unwrap_or(DEFAULT_EXTRACTED_TRAVELERS),
        )
        .map(|preferences| preferences.with_interests(interests))
        .map_err(|err| PlannerError::malformed(schema, err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_defaults_for_empty_extraction() {
        let prefs = ExtractedPreferences::default()
            .into_preferences(today())
            .unwrap();

        assert_eq!(prefs.budget, 50_000.0);
        assert_eq!(prefs.duration_days, 5);
        assert_eq!(prefs.travelers, 2);
        assert_eq!(prefs.interests, vec!["culture"]);
        assert_eq!(prefs.location, "not specified");
        assert_eq!(prefs.start_date, NaiveDate::from_ymd_opt(2026, 11, 15).unwrap());
    }

    #[test]
    fn test_bad_start_date_is_malformed() {
        let extracted = ExtractedPreferences {
            start_date: Some("next friday".to_string()),
            ..Default::default()
        };
        let err = extracted.into_preferences(today()).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::MalformedResponse {
                schema: "TripRequest",
                ..
            }
        ));
    }

    #[test]
    fn test_zero_budget_is_malformed() {
        let extracted = ExtractedPreferences {
            budget: Some(0.0),
            location: Some("Jaipur".to_string()),
            ..Default::default()
        };
        assert!(extracted.into_preferences(today()).is_err());
    }

    #[test]
    fn test_schema_names() {
        assert_eq!(PlanningResponse::schema().schema_name(), "PlanningResponse");
        assert_eq!(ExtractedPreferences::schema().schema_name(), "TripRequest");
        assert_eq!(
            ExtractedPreferences::schema().type_name(),
            "ExtractedPreferences"
        );
        assert_eq!(
            OptimizationResponse::schema().schema_json()["title"],
            "OptimizationResponse"
        );
    }
}
