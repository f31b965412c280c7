//! The six built-in routing policies.
//!
//! Thresholds and tie-breaks here are fixed policy: callers compare strategies by
//! which agents they pick, so the constants are kept as they are.

use super::{history::PerformanceHistory, Routed, RoutingPolicy};
use crate::{
    core::{AgentRegistry, PlanningContext},
    error::PlannerError,
    types::{AgentKind, RouteResults, RoutingStrategy},
};
use async_trait::async_trait;
use std::cmp::Ordering;
use tracing::{debug, info, warn};

pub const SEQUENTIAL_ORDER: [AgentKind; 4] = [
    AgentKind::Research,
    AgentKind::Planning,
    AgentKind::Optimization,
    AgentKind::Booking,
];

pub const PARALLEL_AGENTS: [AgentKind; 2] = [AgentKind::Research, AgentKind::Monitoring];

pub const CONDITIONAL_DEFAULT: [AgentKind; 2] = [AgentKind::Research, AgentKind::Planning];

pub const HIGH_BUDGET_THRESHOLD: f64 = 100_000.0;
pub const LONG_TRIP_DAYS: u32 = 7;
pub const COMPLEX_INTEREST_COUNT: usize = 3;
pub const DOMESTIC_LOCATIONS: [&str; 2] = ["india", "domestic"];

pub const PRIORITY_BASE: f64 = 0.5;
pub const PRIORITY_THRESHOLD: f64 = 0.5;
pub const FEEDBACK_THRESHOLD: f64 = 0.6;
pub const FEEDBACK_TOP_N: usize = 2;

/// Capability text per agent, scored against the user's request by word overlap
pub const CAPABILITIES: [(AgentKind, &str); 4] = [
    (
        AgentKind::Research,
        "find information about destinations, attractions, hotels, restaurants, local culture, weather, events",
    ),
    (
        AgentKind::Planning,
        "create itineraries, schedule activities, organize timeline, plan routes, optimize sequences",
    ),
    (
        AgentKind::Booking,
        "make reservations, handle payments, confirm bookings, manage tickets, process transactions",
    ),
    (
        AgentKind::Optimization,
        "improve costs, enhance experiences, find alternatives, optimize routes, suggest upgrades",
    ),
];

/// Run the registered agents of `order` one after another. Each agent sees the
/// results of the agents before it; unregistered agents are skipped.
pub async fn run_in_order(
    order: &[AgentKind],
    context: &PlanningContext,
    agents: &AgentRegistry,
) -> RouteResults {
    let mut results = RouteResults::new();

    for &kind in order {
        let Some(agent) = agents.get(kind) else {
            debug!(target: "trip_planner::router", agent = %kind, "agent not registered, skipping");
            continue;
        };

        let step = context.with_previous_results(results.clone());
        let result = agent.run(&step).await;
        log_agent_result(kind, &result);
        results.insert(kind, result);
    }

    results
}

fn log_agent_result(kind: AgentKind, result: &crate::types::AgentResult) {
    match result {
        Ok(_) => info!(target: "trip_planner::router", agent = %kind, "agent completed"),
        Err(err) => warn!(
            target: "trip_planner::router",
            agent = %kind,
            code = err.error_code(),
            error = %err,
            "agent returned an error"
        ),
    }
}

/// Research → planning → optimization → booking
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

#[async_trait]
impl RoutingPolicy for Sequential {
    fn strategy(&self) -> RoutingStrategy {
        RoutingStrategy::Sequential
    }

    async fn route(
        &self,
        context: &PlanningContext,
        agents: &AgentRegistry,
        _performance: &PerformanceHistory,
    ) -> Routed {
        Routed::new(run_in_order(&SEQUENTIAL_ORDER, context, agents).await)
    }
}

/// Research and monitoring side by side
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

#[async_trait]
impl RoutingPolicy for Parallel {
    fn strategy(&self) -> RoutingStrategy {
        RoutingStrategy::Parallel
    }

    async fn route(
        &self,
        context: &PlanningContext,
        agents: &AgentRegistry,
        _performance: &PerformanceHistory,
    ) -> Routed {
        let handles: Vec<_> = PARALLEL_AGENTS
            .iter()
            .filter_map(|&kind| agents.get(kind).map(|agent| (kind, agent)))
            .map(|(kind, agent)| {
                let context = context.clone();
                let handle = tokio::spawn(async move { agent.run(&context).await });
                (kind, handle)
            })
            .collect();

        let mut results = RouteResults::new();
        for (kind, handle) in handles {
            let result = handle.await.unwrap_or_else(|err| {
                Err(PlannerError::TaskFailed(format!("{kind} agent task: {err}")))
            });
            log_agent_result(kind, &result);
            results.insert(kind, result);
        }

        Routed::new(results)
    }
}

/// A named predicate over the context with the agents it selects
#[derive(Debug, Clone, Copy)]
pub struct ConditionalRule {
    pub name: &'static str,
    /// Empty when the rule has no agent subset of its own
    pub agents: &'static [AgentKind],
    test: fn(&PlanningContext) -> bool,
}

impl ConditionalRule {
    pub fn matches(&self, context: &PlanningContext) -> bool {
        (self.test)(context)
    }
}

fn is_high_budget(context: &PlanningContext) -> bool {
    context.budget() > HIGH_BUDGET_THRESHOLD
}

fn is_long_trip(context: &PlanningContext) -> bool {
    context.duration_days() > LONG_TRIP_DAYS
}

fn has_complex_interests(context: &PlanningContext) -> bool {
    context.interests().len() > COMPLEX_INTEREST_COUNT
}

fn is_international(context: &PlanningContext) -> bool {
    let location = context.location().to_lowercase();
    !DOMESTIC_LOCATIONS.contains(&location.as_str())
}

/// Rules in evaluation order; the first matching rule with agents wins.
pub const CONDITIONAL_RULES: [ConditionalRule; 4] = [
    ConditionalRule {
        name: "budget_high",
        agents: &[AgentKind::Research, AgentKind::Planning, AgentKind::Optimization],
        test: is_high_budget,
    },
    ConditionalRule {
        name: "duration_long",
        agents: &[AgentKind::Research, AgentKind::Planning, AgentKind::Monitoring],
        test: is_long_trip,
    },
    ConditionalRule {
        name: "complex_interests",
        agents: &[AgentKind::Research, AgentKind::Optimization],
        test: has_complex_interests,
    },
    ConditionalRule {
        name: "international",
        agents: &[],
        test: is_international,
    },
];

/// The active rule name (`None` for the default) and the agents it selects
pub fn select_conditional(context: &PlanningContext) -> (Option<&'static str>, Vec<AgentKind>) {
    debug!(
        target: "trip_planner::router",
        budget = context.budget(),
        duration_days = context.duration_days(),
        interests = context.interests().len(),
        location = context.location(),
        "evaluating conditional rules"
    );

    CONDITIONAL_RULES
        .iter()
        .find(|rule| !rule.agents.is_empty() && rule.matches(context))
        .map(|rule| (Some(rule.name), rule.agents.to_vec()))
        .unwrap_or_else(|| (None, CONDITIONAL_DEFAULT.to_vec()))
}

/// Agent subset picked by the first matching business rule
#[derive(Debug, Clone, Copy, Default)]
pub struct Conditional;

#[async_trait]
impl RoutingPolicy for Conditional {
    fn strategy(&self) -> RoutingStrategy {
        RoutingStrategy::Conditional
    }

    async fn route(
        &self,
        context: &PlanningContext,
        agents: &AgentRegistry,
        _performance: &PerformanceHistory,
    ) -> Routed {
        let (rule, selected) = select_conditional(context);
        let rule = rule.unwrap_or("default");
        info!(target: "trip_planner::router", rule, agents = ?selected, "conditional rule selected");

        Routed::new(run_in_order(&selected, context, agents).await).with_note(rule)
    }
}

/// Share of the query's words that also appear in `capability`
pub fn capability_score(query: &str, capability: &str) -> f64 {
    let query_lower = query.to_lowercase();
    let capability_lower = capability.to_lowercase();
    let query_words: std::collections::HashSet<&str> = query_lower.split_whitespace().collect();
    let capability_words: std::collections::HashSet<&str> =
        capability_lower.split_whitespace().collect();

    let common = query_words.intersection(&capability_words).count();
    common as f64 / query.split_whitespace().count().max(1) as f64
}

/// Highest-scoring agent for `query`; earlier entries win ties and zero never matches.
pub fn best_semantic_match(query: &str) -> Option<(AgentKind, f64)> {
    let mut best: Option<(AgentKind, f64)> = None;
    for (kind, capability) in CAPABILITIES {
        let score = capability_score(query, capability);
        if score > best.map_or(0.0, |(_, s)| s) {
            best = Some((kind, score));
        }
    }
    best
}

/// Single best-matching agent for the user's request, else sequential
#[derive(Debug, Clone, Copy, Default)]
pub struct Semantic;

#[async_trait]
impl RoutingPolicy for Semantic {
    fn strategy(&self) -> RoutingStrategy {
        RoutingStrategy::Semantic
    }

    async fn route(
        &self,
        context: &PlanningContext,
        agents: &AgentRegistry,
        performance: &PerformanceHistory,
    ) -> Routed {
        match best_semantic_match(context.user_input()) {
            Some((kind, score)) if agents.contains(kind) => {
                info!(target: "trip_planner::router", agent = %kind, score, "semantic match");
                Routed::new(run_in_order(&[kind], context, agents).await)
                    .with_note(kind.as_str())
            }
            _ => {
                info!(target: "trip_planner::router", "no semantic match, falling back to sequential");
                Sequential
                    .route(context, agents, performance)
                    .await
                    .with_note("fallback: sequential")
            }
        }
    }
}

/// Heuristic urgency of an agent for this context, capped at 1.0
pub fn priority_score(kind: AgentKind, context: &PlanningContext) -> f64 {
    let mut score = PRIORITY_BASE;

    match kind {
        AgentKind::Research => {
            if context.needs_info() {
                score += 0.4;
            }
            if context.interests().len() > 2 {
                score += 0.2;
            }
        }
        AgentKind::Planning => {
            if context.duration_days() > 3 {
                score += 0.3;
            }
            if context.budget() > 50_000.0 {
                score += 0.2;
            }
        }
        AgentKind::Booking => {
            if context.ready_to_book() {
                score += 0.5;
            }
        }
        AgentKind::Optimization => {
            if context.budget() < 20_000.0 {
                score += 0.4;
            }
        }
        AgentKind::Orchestrator | AgentKind::Monitoring => {}
    }

    score.min(1.0)
}

/// Scored agents, highest first; equal scores keep research, planning, booking,
/// optimization order.
pub fn priority_ranking(context: &PlanningContext) -> Vec<(AgentKind, f64)> {
    let mut ranking: Vec<(AgentKind, f64)> = [
        AgentKind::Research,
        AgentKind::Planning,
        AgentKind::Booking,
        AgentKind::Optimization,
    ]
    .into_iter()
    .map(|kind| (kind, priority_score(kind, context)))
    .collect();

    ranking.sort_by(|a, b| descending(a.1, b.1));
    ranking
}

fn descending(a: f64, b: f64) -> Ordering {
    b.partial_cmp(&a).unwrap_or(Ordering::Equal)
}

/// Every agent scoring above the threshold, most urgent first
#[derive(Debug, Clone, Copy, Default)]
pub struct Priority;

#[async_trait]
impl RoutingPolicy for Priority {
    fn strategy(&self) -> RoutingStrategy {
        RoutingStrategy::Priority
    }

    async fn route(
        &self,
        context: &PlanningContext,
        agents: &AgentRegistry,
        _performance: &PerformanceHistory,
    ) -> Routed {
        let ranking = priority_ranking(context);
        debug!(target: "trip_planner::router", ?ranking, "priority scores");

        let selected: Vec<AgentKind> = ranking
            .into_iter()
            .filter(|(_, score)| *score > PRIORITY_THRESHOLD)
            .map(|(kind, _)| kind)
            .collect();

        Routed::new(run_in_order(&selected, context, agents).await)
    }
}

/// Registered agents ranked by mean feedback score, highest first
pub fn feedback_ranking(
    agents: &AgentRegistry,
    performance: &PerformanceHistory,
) -> Vec<(AgentKind, f64)> {
    let mut ranking: Vec<(AgentKind, f64)> = AgentKind::ALL
        .into_iter()
        .filter(|kind| agents.contains(*kind))
        .map(|kind| (kind, performance.mean(kind)))
        .collect();

    ranking.sort_by(|a, b| descending(a.1, b.1));
    ranking
}

/// The two best-rated agents, if their rating clears the threshold
#[derive(Debug, Clone, Copy, Default)]
pub struct Feedback;

#[async_trait]
impl RoutingPolicy for Feedback {
    fn strategy(&self) -> RoutingStrategy {
        RoutingStrategy::Feedback
    }

    async fn route(
        &self,
        context: &PlanningContext,
        agents: &AgentRegistry,
        performance: &PerformanceHistory,
    ) -> Routed {
        let selected: Vec<AgentKind> = feedback_ranking(agents, performance)
            .into_iter()
            .take(FEEDBACK_TOP_N)
            .filter(|(_, score)| *score > FEEDBACK_THRESHOLD)
            .map(|(kind, _)| kind)
            .collect();

        if selected.is_empty() {
            info!(target: "trip_planner::router", "no agent above the feedback threshold");
        }

        Routed::new(run_in_order(&selected, context, agents).await)
    }
}
