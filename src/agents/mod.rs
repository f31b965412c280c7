//! The five planning agents.

pub mod booking;
pub mod monitoring;
pub mod optimization;
pub mod planning;
pub mod research;

pub use booking::BookingAgent;
pub use monitoring::MonitoringAgent;
pub use optimization::OptimizationAgent;
pub use planning::PlanningAgent;
pub use research::ResearchAgent;

use crate::{
    config::PlannerConfig,
    core::AgentRegistry,
    services::{Geocoder, PoiSource, TextCompletion},
};
use std::sync::Arc;

/// Registry with all five agents wired to the given services
pub fn standard_registry(
    llm: Arc<dyn TextCompletion>,
    geocoder: Arc<dyn Geocoder>,
    poi_source: Arc<dyn PoiSource>,
) -> AgentRegistry {
    AgentRegistry::new()
        .with(ResearchAgent::new(geocoder, poi_source))
        .with(PlanningAgent::new(llm.clone()))
        .with(OptimizationAgent::new(llm))
        .with(BookingAgent)
        .with(MonitoringAgent)
}

/// Like [`standard_registry`] but with radius and currency taken from `config`
pub fn configured_registry(
    config: &PlannerConfig,
    llm: Arc<dyn TextCompletion>,
    geocoder: Arc<dyn Geocoder>,
    poi_source: Arc<dyn PoiSource>,
) -> AgentRegistry {
    AgentRegistry::new()
        .with(ResearchAgent::new(geocoder, poi_source).with_radius(config.poi_radius_m))
        .with(PlanningAgent::new(llm.clone()).with_currency(config.currency.clone()))
        .with(OptimizationAgent::new(llm).with_currency(config.currency.clone()))
        .with(BookingAgent)
        .with(MonitoringAgent)
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::{
        core::PlanningContext,
        error::{PlannerError, Result},
        services::TextCompletion,
        types::{
            AgentKind, AgentOutput, Coordinates, ItineraryItem, PlanningOutput, PointOfInterest,
            ResearchOutput, RouteResults, TripPreferences,
        },
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::{collections::VecDeque, sync::Mutex};

    /// Replies with canned texts in order and records every prompt
    #[derive(Debug, Default)]
    pub struct ScriptedCompletion {
        replies: Mutex<VecDeque<String>>,
        prompts: Mutex<Vec<String>>,
    }

    impl ScriptedCompletion {
        pub fn new<I, S>(replies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self {
                replies: Mutex::new(replies.into_iter().map(Into::into).collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl TextCompletion for ScriptedCompletion {
        async fn complete(&self, prompt: &str) -> Result<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| PlannerError::Llm("no scripted reply left".to_string()))
        }
    }

    pub fn sample_context() -> PlanningContext {
        let preferences = TripPreferences::new(
            "Hampi",
            25_000.0,
            3,
            NaiveDate::from_ymd_opt(2026, 12, 20).unwrap(),
            2,
        )
        .unwrap()
        .with_interests(["heritage"]);
        PlanningContext::new(preferences)
    }

    pub fn research_results(count: usize) -> RouteResults {
        let mut results = RouteResults::new();
        results.insert(
            AgentKind::Research,
            Ok(AgentOutput::Research(ResearchOutput {
                coordinates: Coordinates::new(15.33, 76.46),
                points_of_interest: (0..count)
                    .map(|i| PointOfInterest {
                        name: format!("Place {i}"),
                        kind: "attraction".to_string(),
                        lat: 15.33,
                        lon: 76.46,
                    })
                    .collect(),
            })),
        );
        results
    }

    pub fn planning_results(cost: f64) -> RouteResults {
        let mut results = RouteResults::new();
        results.insert(
            AgentKind::Planning,
            Ok(AgentOutput::Planning(PlanningOutput {
                itinerary: vec![ItineraryItem {
                    day: 1,
                    time: "10:00".to_string(),
                    activity: "Virupaksha Temple".to_string(),
                    location: "Hampi Bazaar".to_string(),
                    cost,
                    duration_hours: 2.0,
                    category: "heritage".to_string(),
                    booking_url: None,
                    coordinates: None,
                }],
                total_cost: cost,
            })),
        );
        results
    }
}
