use crate::types::{AgentKind, RoutingStrategy};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};
use tracing::warn;

/// Mean score used for agents without any recorded feedback
pub const DEFAULT_PERFORMANCE_SCORE: f64 = 0.5;

/// Per-agent feedback scores, shared between the orchestrator and its router.
///
/// Clones share the same underlying log.
#[derive(Debug, Clone, Default)]
pub struct PerformanceHistory {
    scores: Arc<RwLock<HashMap<AgentKind, Vec<f64>>>>,
}

impl PerformanceHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores are clamped to `[0, 1]`; NaN and infinities are dropped.
    pub fn record(&self, kind: AgentKind, score: f64) {
        if !score.is_finite() {
            warn!(
                target: "trip_planner::router",
                agent = %kind,
                score,
                "ignoring non-finite performance score"
            );
            return;
        }
        let score = score.clamp(0.0, 1.0);
        let mut scores = self.scores.write().unwrap_or_else(PoisonError::into_inner);
        scores.entry(kind).or_default().push(score);
    }

    /// Mean of the recorded scores, or [`DEFAULT_PERFORMANCE_SCORE`] when there are none
    pub fn mean(&self, kind: AgentKind) -> f64 {
        let scores = self.scores.read().unwrap_or_else(PoisonError::into_inner);
        match scores.get(&kind) {
            Some(values) if !values.is_empty() => {
                values.iter().sum::<f64>() / values.len() as f64
            }
            _ => DEFAULT_PERFORMANCE_SCORE,
        }
    }

    pub fn scores(&self, kind: AgentKind) -> Vec<f64> {
        let scores = self.scores.read().unwrap_or_else(PoisonError::into_inner);
        scores.get(&kind).cloned().unwrap_or_default()
    }

    pub fn clear(&self) {
        self.scores
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

/// One routing decision
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteRecord {
    pub strategy: RoutingStrategy,
    /// Agents that produced a result, in the order the strategy dispatched them
    pub agents: Vec<AgentKind>,
    /// Strategy-specific detail (the active conditional rule, the semantic match)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub at: DateTime<Utc>,
}

/// Append-only log of routing decisions
#[derive(Debug, Clone, Default)]
pub struct RoutingHistory {
    records: Arc<RwLock<Vec<RouteRecord>>>,
}

impl RoutingHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, record: RouteRecord) {
        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(record);
    }

    pub fn records(&self) -> Vec<RouteRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<RouteRecord> {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.records
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
