use crate::{
    config::DEFAULT_POI_RADIUS_M,
    core::{Agent, PlanningContext},
    error::{PlannerError, Result},
    services::{category_filters, Geocoder, PoiSource},
    types::{AgentKind, AgentOutput, ResearchOutput},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Upper bound on places handed to the planning prompt
pub const MAX_POINTS_OF_INTEREST: usize = 20;

/// Resolves the destination and collects nearby places matching the interests.
#[derive(Debug, Clone)]
pub struct ResearchAgent {
    geocoder: Arc<dyn Geocoder>,
    poi_source: Arc<dyn PoiSource>,
    radius_m: u32,
}

impl ResearchAgent {
    pub fn new(geocoder: Arc<dyn Geocoder>, poi_source: Arc<dyn PoiSource>) -> Self {
        Self {
            geocoder,
            poi_source,
            radius_m: DEFAULT_POI_RADIUS_M,
        }
    }

    pub fn with_radius(mut self, radius_m: u32) -> Self {
        self.radius_m = radius_m;
        self
    }
}

#[async_trait]
impl Agent for ResearchAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Research
    }

    async fn run(&self, context: &PlanningContext) -> Result<AgentOutput> {
        let preferences = context.require_preferences()?;

        let coordinates = self
            .geocoder
            .lookup(&preferences.location)
            .await?
            .ok_or_else(|| {
                PlannerError::NotFound(format!(
                    "Could not find coordinates for {}",
                    preferences.location
                ))
            })?;

        let filters = category_filters(&preferences.interests);
        let mut points_of_interest = self
            .poi_source
            .query(coordinates, self.radius_m, &filters)
            .await?;
        points_of_interest.truncate(MAX_POINTS_OF_INTEREST);

        info!(
            target: "trip_planner::agents",
            location = %preferences.location,
            found = points_of_interest.len(),
            "research finished"
        );

        Ok(AgentOutput::Research(ResearchOutput {
            coordinates,
            points_of_interest,
        }))
    }
}
