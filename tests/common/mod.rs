#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use std::sync::{Arc, Mutex};
use trip_planner_rs::{
    services::{Geocoder, PoiSource, TextCompletion},
    types::{
        AgentOutput, BookingOutput, BookingStatus, Coordinates, ItineraryItem, MonitoringOutput,
        OptimizationOutput, PlanningOutput, PointOfInterest, ResearchOutput,
    },
    Agent, AgentKind, AgentRegistry, PlannerError, PlanningContext, Result, TripPreferences,
};

/// Every call as (agent, kinds present in `previous_results` at call time)
pub type CallLog = Arc<Mutex<Vec<(AgentKind, Vec<AgentKind>)>>>;

pub fn canned_output(kind: AgentKind) -> AgentOutput {
    match kind {
        AgentKind::Research => AgentOutput::Research(ResearchOutput {
            coordinates: Coordinates::new(48.85, 2.35),
            points_of_interest: vec![PointOfInterest {
                name: "Louvre".to_string(),
                kind: "museum".to_string(),
                lat: 48.86,
                lon: 2.33,
            }],
        }),
        AgentKind::Planning => AgentOutput::Planning(PlanningOutput {
            itinerary: vec![item(1, "10:00", "Louvre", 2_000.0)],
            total_cost: 2_000.0,
        }),
        AgentKind::Optimization => AgentOutput::Optimization(OptimizationOutput {
            suggestions: vec!["Museum pass".to_string()],
            cost_savings: 300.0,
        }),
        AgentKind::Booking => AgentOutput::Booking(BookingOutput {
            booking_status: BookingStatus::Confirmed,
            booking_ids: vec!["BK00000000".to_string()],
            payment_processed: true,
            confirmation_sent: true,
        }),
        AgentKind::Monitoring | AgentKind::Orchestrator => {
            AgentOutput::Monitoring(MonitoringOutput {
                weather_updates: "All clear".to_string(),
                traffic_conditions: "Normal".to_string(),
                alternative_routes: Vec::new(),
                last_updated: Utc::now(),
            })
        }
    }
}

pub fn item(day: u32, time: &str, activity: &str, cost: f64) -> ItineraryItem {
    ItineraryItem {
        day,
        time: time.to_string(),
        activity: activity.to_string(),
        location: activity.to_string(),
        cost,
        duration_hours: 2.0,
        category: "culture".to_string(),
        booking_url: None,
        coordinates: None,
    }
}

/// Returns a canned output for its kind and logs what it saw
#[derive(Debug)]
pub struct RecordingAgent {
    kind: AgentKind,
    log: CallLog,
}

#[async_trait]
impl Agent for RecordingAgent {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    async fn run(&self, context: &PlanningContext) -> Result<AgentOutput> {
        self.log
            .lock()
            .unwrap()
            .push((self.kind, context.previous_results().kinds()));
        Ok(canned_output(self.kind))
    }
}

#[derive(Debug)]
pub struct PanickingAgent(pub AgentKind);

#[async_trait]
impl Agent for PanickingAgent {
    fn kind(&self) -> AgentKind {
        self.0
    }

    async fn run(&self, _context: &PlanningContext) -> Result<AgentOutput> {
        panic!("agent blew up");
    }
}

/// Blocks until every agent sharing its barrier has started
#[derive(Debug)]
pub struct RendezvousAgent {
    pub kind: AgentKind,
    pub barrier: Arc<tokio::sync::Barrier>,
}

#[async_trait]
impl Agent for RendezvousAgent {
    fn kind(&self) -> AgentKind {
        self.kind
    }

    async fn run(&self, _context: &PlanningContext) -> Result<AgentOutput> {
        self.barrier.wait().await;
        Ok(canned_output(self.kind))
    }
}

pub fn recording_registry(kinds: &[AgentKind]) -> (AgentRegistry, CallLog) {
    let log = CallLog::default();
    let mut registry = AgentRegistry::new();
    for &kind in kinds {
        registry.register(RecordingAgent {
            kind,
            log: log.clone(),
        });
    }
    (registry, log)
}

pub fn all_agents() -> Vec<AgentKind> {
    vec![
        AgentKind::Research,
        AgentKind::Planning,
        AgentKind::Optimization,
        AgentKind::Booking,
        AgentKind::Monitoring,
    ]
}

pub fn preferences(budget: f64, days: u32, interests: &[&str], location: &str) -> TripPreferences {
    TripPreferences::new(
        location,
        budget,
        days,
        NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
        2,
    )
    .unwrap()
    .with_interests(interests.iter().copied())
}

#[derive(Debug, Clone, Copy)]
pub struct StubGeocoder(pub Option<Coordinates>);

#[async_trait]
impl Geocoder for StubGeocoder {
    async fn lookup(&self, _place_name: &str) -> Result<Option<Coordinates>> {
        Ok(self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct StubPoiSource;

#[async_trait]
impl PoiSource for StubPoiSource {
    async fn query(
        &self,
        center: Coordinates,
        _radius_m: u32,
        _category_filters: &[&str],
    ) -> Result<Vec<PointOfInterest>> {
        Ok(["City Palace", "Hawa Mahal", "Amber Fort"]
            .into_iter()
            .map(|name| PointOfInterest {
                name: name.to_string(),
                kind: "attraction".to_string(),
                lat: center.lat,
                lon: center.lon,
            })
            .collect())
    }
}

/// Replies by prompt type; deterministic across calls
#[derive(Debug, Clone)]
pub struct PromptRouter {
    pub plan: String,
    pub optimize: String,
    pub extract: String,
}

impl PromptRouter {
    pub fn new(plan_cost: f64, savings: f64) -> Self {
        Self {
            plan: serde_json::json!({
                "itinerary": [
                    {"day": 1, "time": "09:00", "activity": "City Palace", "location": "Jaipur",
                     "cost": plan_cost / 2.0, "duration_hours": 3, "category": "heritage"},
                    {"day": 2, "time": "10:00", "activity": "Amber Fort", "location": "Amer",
                     "cost": plan_cost / 2.0, "duration_hours": 4, "category": "heritage"}
                ]
            })
            .to_string(),
            optimize: serde_json::json!({
                "suggestions": ["Buy a composite ticket", "Use the metro"],
                "estimated_savings": savings
            })
            .to_string(),
            extract: "{}".to_string(),
        }
    }

    pub fn with_plan(mut self, plan: impl Into<String>) -> Self {
        self.plan = plan.into();
        self
    }

    pub fn with_extract(mut self, extract: impl Into<String>) -> Self {
        self.extract = extract.into();
        self
    }
}

#[async_trait]
impl TextCompletion for PromptRouter {
    async fn complete(&self, prompt: &str) -> Result<String> {
        if prompt.contains("day-by-day itinerary") {
            Ok(self.plan.clone())
        } else if prompt.contains("make the itinerary below cheaper") {
            Ok(self.optimize.clone())
        } else if prompt.contains("Pull the trip details") {
            Ok(self.extract.clone())
        } else {
            Err(PlannerError::Llm("unexpected prompt".to_string()))
        }
    }
}
