use crate::{
    config::DEFAULT_CURRENCY,
    core::{Agent, PlanningContext},
    error::{PlannerError, Result},
    services::{prompts::optimization_prompt, TextCompletion},
    types::{parse_completion, AgentKind, AgentOutput, OptimizationOutput, OptimizationResponse},
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Asks the language model for cheaper alternatives to a drafted itinerary.
#[derive(Debug, Clone)]
pub struct OptimizationAgent {
    llm: Arc<dyn TextCompletion>,
    currency: String,
}

impl OptimizationAgent {
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
impl Agent for OptimizationAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Optimization
    }

    async fn run(&self, context: &PlanningContext) -> Result<AgentOutput> {
        let preferences = context.require_preferences()?;

        let planning = context
            .previous_results()
            .planning()
            .filter(|planning| !planning.itinerary.is_empty())
            .ok_or_else(|| PlannerError::MissingInput("No itinerary to optimize".to_string()))?;

        let prompt = optimization_prompt(
            &planning.itinerary,
            planning.total_cost,
            preferences.budget,
            &self.currency,
        );
        let raw = self.llm.complete(&prompt).await?;
        let response: OptimizationResponse = parse_completion(&raw)?;

        info!(
            target: "trip_planner::agents",
            suggestions = response.suggestions.len(),
            savings = response.estimated_savings,
            "optimization finished"
        );

        Ok(AgentOutput::Optimization(OptimizationOutput {
            suggestions: response.suggestions,
            cost_savings: response.estimated_savings,
        }))
    }
}
