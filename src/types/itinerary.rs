use super::{geo::Coordinates, preferences::TripPreferences};
use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, sync::Arc};

/// One scheduled activity in an itinerary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ItineraryItem {
    /// 1-based day of the trip
    #[schemars(range(min = 1))]
    pub day: u32,
    /// Suggested start time in 24h `HH:MM` form
    #[schemars(regex(pattern = r"^[0-9]{1,2}:[0-9]{2}$"))]
    pub time: String,
    /// Name of the activity or place to visit
    pub activity: String,
    /// Where the activity takes place
    pub location: String,
    /// Estimated cost for the whole party
    #[schemars(range(min = 0))]
    pub cost: f64,
    /// Estimated duration in hours
    #[schemars(range(min = 0))]
    pub duration_hours: f64,
    /// Category tag such as `culture` or `nightlife`
    pub category: String,
    /// Reservation link or reference, when one exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub booking_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItineraryStatus {
    #[default]
    Draft,
    Planned,
    Updated,
}

impl fmt::Display for ItineraryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ItineraryStatus::Draft => "draft",
            ItineraryStatus::Planned => "planned",
            ItineraryStatus::Updated => "updated",
        };
        f.write_str(label)
    }
}

/// Final output of a planning round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripItinerary {
    pub id: String,
    pub preferences: Arc<TripPreferences>,
    pub items: Vec<ItineraryItem>,
    total_cost: f64,
    pub created_at: DateTime<Utc>,
    pub status: ItineraryStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization_suggestions: Option<Vec<String>>,
}

impl TripItinerary {
    /// Empty draft for the given request.
    pub fn draft(preferences: Arc<TripPreferences>) -> Self {
        Self {
            id: new_trip_id(),
            preferences,
            items: Vec::new(),
            total_cost: 0.0,
            created_at: Utc::now(),
            status: ItineraryStatus::Draft,
            optimization_suggestions: None,
        }
    }

    /// Set the schedule and its cost; the cost is clamped at zero.
    pub fn with_items(mut self, items: Vec<ItineraryItem>, total_cost: f64) -> Self {
        self.items = items;
        self.total_cost = clamp_cost(total_cost);
        self
    }

    pub fn with_suggestions(mut self, suggestions: Option<Vec<String>>) -> Self {
        self.optimization_suggestions = suggestions;
        self
    }

    pub fn with_status(mut self, status: ItineraryStatus) -> Self {
        self.status = status;
        self
    }

    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Items grouped by day, each day sorted by start time.
    pub fn days(&self) -> BTreeMap<u32, Vec<&ItineraryItem>> {
        let mut days: BTreeMap<u32, Vec<&ItineraryItem>> = BTreeMap::new();
        for item in &self.items {
            days.entry(item.day).or_default().push(item);
        }
        for items in days.values_mut() {
            items.sort_by(|a, b| a.time.cmp(&b.time));
        }
        days
    }

    /// Human-readable summary grouped by day.
    pub fn render_summary(&self, currency: &str) -> String {
        let mut lines = Vec::new();
        let rule = "=".repeat(50);

        lines.push(rule.clone());
        lines.push(format!("Trip Itinerary: {}", self.id));
        lines.push(format!("Status: {}", self.status));
        lines.push(format!("Destination: {}", self.preferences.location));
        lines.push(format!("Duration: {} days", self.preferences.duration_days));
        lines.push(format!("Total Cost: {:.2} {}", self.total_cost, currency));
        lines.push(rule);

        if self.items.is_empty() {
            lines.push("No items in this itinerary.".to_string());
            return lines.join("\n");
        }

        for (day, items) in self.days() {
            lines.push(String::new());
            lines.push(format!("--- Day {} ---", day));
            for item in items {
                lines.push(format!(
                    "  {}: {} ({})",
                    item.time, item.activity, item.category
                ));
                lines.push(format!("     Cost: {:.2} {}", item.cost, currency));
            }
        }

        if let Some(suggestions) = self
            .optimization_suggestions
            .as_ref()
            .filter(|s| !s.is_empty())
        {
            lines.push(String::new());
            lines.push("--- Savings Suggestions ---".to_string());
            for suggestion in suggestions {
                lines.push(format!("  - {}", suggestion));
            }
        }

        lines.join("\n")
    }
}

fn clamp_cost(cost: f64) -> f64 {
    if cost.is_finite() && cost > 0.0 {
        cost
    } else {
        0.0
    }
}

fn new_trip_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("TRIP_{}", &raw[..8])
}
