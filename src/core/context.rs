use crate::{
    error::{PlannerError, Result},
    types::{RouteResults, TripPreferences},
};
use serde_json::{Map, Value};
use std::sync::Arc;

/// Inputs and accumulated agent results for one planning round.
///
/// A context is never mutated while agents read it. Strategies derive a fresh
/// snapshot with [`PlanningContext::with_previous_results`] before each step.
#[derive(Debug, Clone)]
pub struct PlanningContext {
    preferences: Option<Arc<TripPreferences>>,
    previous_results: RouteResults,
    user_input: String,
    needs_info: bool,
    ready_to_book: bool,
    changes: Map<String, Value>,
    replanning: Option<String>,
}

impl Default for PlanningContext {
    fn default() -> Self {
        Self::empty()
    }
}

impl PlanningContext {
    pub fn new(preferences: impl Into<Arc<TripPreferences>>) -> Self {
        let preferences = preferences.into();
        let user_input = format!(
            "Plan a trip to {} for {} days",
            preferences.location, preferences.duration_days
        );
        Self {
            preferences: Some(preferences),
            user_input,
            ..Self::empty()
        }
    }

    /// Context without a trip request. Only monitoring can do anything with it.
    pub fn empty() -> Self {
        Self {
            preferences: None,
            previous_results: RouteResults::new(),
            user_input: String::new(),
            needs_info: true,
            ready_to_book: false,
            changes: Map::new(),
            replanning: None,
        }
    }

    pub fn with_user_input(mut self, user_input: impl Into<String>) -> Self {
        self.user_input = user_input.into();
        self
    }

    pub fn with_needs_info(mut self, needs_info: bool) -> Self {
        self.needs_info = needs_info;
        self
    }

    pub fn with_ready_to_book(mut self, ready_to_book: bool) -> Self {
        self.ready_to_book = ready_to_book;
        self
    }

    pub fn with_changes(mut self, changes: Map<String, Value>) -> Self {
        self.changes = changes;
        self
    }

    /// Mark this round as a replan of the itinerary with the given id
    pub fn with_replanning(mut self, itinerary_id: impl Into<String>) -> Self {
        self.replanning = Some(itinerary_id.into());
        self
    }

    /// Snapshot of this context with `previous_results` replaced
    pub fn with_previous_results(&self, previous_results: RouteResults) -> Self {
        Self {
            previous_results,
            ..self.clone()
        }
    }

    pub fn preferences(&self) -> Option<&TripPreferences> {
        self.preferences.as_deref()
    }

    pub fn require_preferences(&self) -> Result<&TripPreferences> {
        self.preferences()
            .ok_or_else(|| PlannerError::MissingInput("No trip preferences in context".to_string()))
    }

    pub fn previous_results(&self) -> &RouteResults {
        &self.previous_results
    }

    pub fn user_input(&self) -> &str {
        &self.user_input
    }

    pub fn needs_info(&self) -> bool {
        self.needs_info
    }

    pub fn ready_to_book(&self) -> bool {
        self.ready_to_book
    }

    pub fn changes(&self) -> &Map<String, Value> {
        &self.changes
    }

    pub fn replanning(&self) -> Option<&str> {
        self.replanning.as_deref()
    }

    // Derived scalars; zero or empty without preferences.

    pub fn budget(&self) -> f64 {
        self.preferences().map_or(0.0, |p| p.budget)
    }

    pub fn duration_days(&self) -> u32 {
        self.preferences().map_or(0, |p| p.duration_days)
    }

    pub fn interests(&self) -> &[String] {
        self.preferences()
            .map(|p| p.interests.as_slice())
            .unwrap_or_default()
    }

    pub fn location(&self) -> &str {
        self.preferences().map_or("", |p| p.location.as_str())
    }
}
