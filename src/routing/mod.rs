//! Strategy dispatch: which agents run for a planning round, and in what order.

pub mod history;
pub mod strategies;

use crate::{
    core::{AgentRegistry, PlanningContext},
    error::{PlannerError, Result},
    types::{RouteResults, RoutingStrategy},
};
use async_trait::async_trait;
use chrono::Utc;
use std::{collections::HashMap, sync::Arc};
use tracing::info;

pub use history::{PerformanceHistory, RouteRecord, RoutingHistory};
pub use strategies::{Conditional, Feedback, Parallel, Priority, Semantic, Sequential};

/// Results of one policy run plus an optional note for the routing log
#[derive(Debug, Clone, Default)]
pub struct Routed {
    pub results: RouteResults,
    pub note: Option<String>,
}

impl Routed {
    pub fn new(results: RouteResults) -> Self {
        Self {
            results,
            note: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// One routing strategy.
///
/// Agent failures are part of the returned results, so a policy itself never fails.
#[async_trait]
pub trait RoutingPolicy: Send + Sync + std::fmt::Debug {
    fn strategy(&self) -> RoutingStrategy;

    async fn route(
        &self,
        context: &PlanningContext,
        agents: &AgentRegistry,
        performance: &PerformanceHistory,
    ) -> Routed;
}

/// Dispatch table from strategy to policy, plus the routing and performance logs.
#[derive(Debug, Clone)]
pub struct Router {
    policies: HashMap<RoutingStrategy, Arc<dyn RoutingPolicy>>,
    performance: PerformanceHistory,
    history: RoutingHistory,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    /// Router with all six built-in strategies
    pub fn new() -> Self {
        Self::empty()
            .with_policy(Sequential)
            .with_policy(Parallel)
            .with_policy(Conditional)
            .with_policy(Semantic)
            .with_policy(Priority)
            .with_policy(Feedback)
    }

    /// Router with an empty dispatch table
    pub fn empty() -> Self {
        Self {
            policies: HashMap::new(),
            performance: PerformanceHistory::new(),
            history: RoutingHistory::new(),
        }
    }

    /// Register `policy` under its own strategy, replacing any previous one
    pub fn with_policy<P: RoutingPolicy + 'static>(mut self, policy: P) -> Self {
        self.policies.insert(policy.strategy(), Arc::new(policy));
        self
    }

    pub fn with_performance(mut self, performance: PerformanceHistory) -> Self {
        self.performance = performance;
        self
    }

    pub fn performance(&self) -> &PerformanceHistory {
        &self.performance
    }

    pub fn history(&self) -> &RoutingHistory {
        &self.history
    }

    pub fn supports(&self, strategy: RoutingStrategy) -> bool {
        self.policies.contains_key(&strategy)
    }

    pub async fn route(
        &self,
        strategy: RoutingStrategy,
        context: &PlanningContext,
        agents: &AgentRegistry,
    ) -> Result<RouteResults> {
        let policy = self
            .policies
            .get(&strategy)
            .ok_or_else(|| PlannerError::UnknownStrategy(strategy.to_string()))?;

        info!(target: "trip_planner::router", %strategy, "routing planning round");
        let routed = policy.route(context, agents, &self.performance).await;

        let record = RouteRecord {
            strategy,
            agents: routed.results.kinds(),
            note: routed.note,
            at: Utc::now(),
        };
        info!(
            target: "trip_planner::router",
            %strategy,
            agents = ?record.agents,
            note = record.note.as_deref().unwrap_or(""),
            "routing finished"
        );
        self.history.push(record);

        Ok(routed.results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_registers_every_strategy() {
        let router = Router::new();
        for strategy in RoutingStrategy::ALL {
            assert!(router.supports(strategy), "{strategy} missing");
        }
    }

    #[tokio::test]
    async fn test_empty_router_reports_unknown_strategy() {
        let router = Router::empty().with_policy(Sequential);
        let err = router
            .route(
                RoutingStrategy::Priority,
                &PlanningContext::empty(),
                &AgentRegistry::new(),
            )
            .await
            .unwrap_err();

        assert_eq!(err, PlannerError::UnknownStrategy("priority".to_string()));
        assert!(router.history().is_empty());
    }

    #[tokio::test]
    async fn test_route_appends_history() {
        let router = Router::new();
        let results = router
            .route(
                RoutingStrategy::Sequential,
                &PlanningContext::empty(),
                &AgentRegistry::new(),
            )
            .await
            .unwrap();

        assert!(results.is_empty());
        let record = router.history().last().unwrap();
        assert_eq!(record.strategy, RoutingStrategy::Sequential);
        assert!(record.agents.is_empty());
    }
}
