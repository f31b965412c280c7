use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Roles an agent can play in a planning round.
///
/// Declaration order is the iteration order used by the feedback strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentKind {
    Orchestrator,
    Research,
    Planning,
    Booking,
    Optimization,
    Monitoring,
}

impl AgentKind {
    pub const ALL: [AgentKind; 6] = [
        AgentKind::Orchestrator,
        AgentKind::Research,
        AgentKind::Planning,
        AgentKind::Booking,
        AgentKind::Optimization,
        AgentKind::Monitoring,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Orchestrator => "orchestrator",
            AgentKind::Research => "research",
            AgentKind::Planning => "planning",
            AgentKind::Booking => "booking",
            AgentKind::Optimization => "optimization",
            AgentKind::Monitoring => "monitoring",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentKind::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlannerError::InvalidInput(format!("unknown agent `{s}`")))
    }
}

/// Named policies for selecting which agents run and in what order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoutingStrategy {
    #[default]
    Sequential,
    Parallel,
    Conditional,
    Semantic,
    Priority,
    Feedback,
}

impl RoutingStrategy {
    pub const ALL: [RoutingStrategy; 6] = [
        RoutingStrategy::Sequential,
        RoutingStrategy::Parallel,
        RoutingStrategy::Conditional,
        RoutingStrategy::Semantic,
        RoutingStrategy::Priority,
        RoutingStrategy::Feedback,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoutingStrategy::Sequential => "sequential",
            RoutingStrategy::Parallel => "parallel",
            RoutingStrategy::Conditional => "conditional",
            RoutingStrategy::Semantic => "semantic",
            RoutingStrategy::Priority => "priority",
            RoutingStrategy::Feedback => "feedback",
        }
    }
}

impl fmt::Display for RoutingStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoutingStrategy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoutingStrategy::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PlannerError::UnknownStrategy(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strategy_round_trips_through_str() {
        for strategy in RoutingStrategy::ALL {
            assert_eq!(strategy.as_str().parse::<RoutingStrategy>(), Ok(strategy));
        }
        assert_eq!(
            " Parallel ".parse::<RoutingStrategy>(),
            Ok(RoutingStrategy::Parallel)
        );
    }

    #[test]
    fn test_unknown_strategy() {
        let err = "round_robin".parse::<RoutingStrategy>().unwrap_err();
        assert_eq!(err, PlannerError::UnknownStrategy("round_robin".to_string()));
    }

    #[test]
    fn test_agent_kind_serializes_lowercase() {
        let value = serde_json::to_value(AgentKind::Optimization).unwrap();
        assert_eq!(value, "optimization");
        assert!("nobody".parse::<AgentKind>().is_err());
    }
}
