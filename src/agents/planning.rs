use crate::{
    config::DEFAULT_CURRENCY,
    core::{Agent, PlanningContext},
    error::{PlannerError, Result},
    services::{prompts::planning_prompt, TextCompletion},
    types::{parse_completion, AgentKind, AgentOutput, PlanningOutput, PlanningResponse},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Turns researched places into a day-by-day schedule via the language model.
#[derive(Debug, Clone)]
pub struct PlanningAgent {
    llm: Arc<dyn TextCompletion>,
    currency: String,
}

impl PlanningAgent {
    pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
        Self {
            llm,
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }
}

#[async_trait]
impl Agent for PlanningAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Planning
    }

    async fn run(&self, context: &PlanningContext) -> Result<AgentOutput> {
        let preferences = context.require_preferences()?;

        let points_of_interest = context
            .previous_results()
            .research()
            .map(|research| research.points_of_interest.as_slice())
            .filter(|pois| !pois.is_empty())
            .ok_or_else(|| {
                PlannerError::MissingInput("No points of interest found to create a plan".to_string())
            })?;

        let prompt = planning_prompt(preferences, points_of_interest, &self.currency);
        let raw = self.llm.complete(&prompt).await?;
        let response: PlanningResponse = parse_completion(&raw)?;

        let total_cost = response.itinerary.iter().map(|item| item.cost).sum();
        info!(
            target: "trip_planner::agents",
            items = response.itinerary.len(),
            total_cost,
            "itinerary drafted"
        );

        Ok(AgentOutput::Planning(PlanningOutput {
            itinerary: response.itinerary,
            total_cost,
        }))
    }
}
