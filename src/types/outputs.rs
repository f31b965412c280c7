use super::{
    geo::{Coordinates, PointOfInterest},
    itinerary::ItineraryItem,
    kinds::AgentKind,
};
use crate::error::PlannerError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchOutput {
    pub coordinates: Coordinates,
    pub points_of_interest: Vec<PointOfInterest>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningOutput {
    pub itinerary: Vec<ItineraryItem>,
    /// Sum of item costs
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationOutput {
    pub suggestions: Vec<String>,
    pub cost_savings: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Confirmed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingOutput {
    pub booking_status: BookingStatus,
    pub booking_ids: Vec<String>,
    pub payment_processed: bool,
    pub confirmation_sent: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitoringOutput {
    pub weather_updates: String,
    pub traffic_conditions: String,
    pub alternative_routes: Vec<String>,
    pub last_updated: DateTime<Utc>,
}

/// Successful output of one agent run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AgentOutput {
    Research(ResearchOutput),
    Planning(PlanningOutput),
    Optimization(OptimizationOutput),
    Booking(BookingOutput),
    Monitoring(MonitoringOutput),
}

impl AgentOutput {
    pub fn as_research(&self) -> Option<&ResearchOutput> {
        match self {
            AgentOutput::Research(output) => Some(output),
            _ => None,
        }
    }

    pub fn as_planning(&self) -> Option<&PlanningOutput> {
        match self {
            AgentOutput::Planning(output) => Some(output),
            _ => None,
        }
    }

    pub fn as_optimization(&self) -> Option<&OptimizationOutput> {
        match self {
            AgentOutput::Optimization(output) => Some(output),
            _ => None,
        }
    }

    pub fn as_booking(&self) -> Option<&BookingOutput> {
        match self {
            AgentOutput::Booking(output) => Some(output),
            _ => None,
        }
    }

    pub fn as_monitoring(&self) -> Option<&MonitoringOutput> {
        match self {
            AgentOutput::Monitoring(output) => Some(output),
            _ => None,
        }
    }
}

/// Either an agent's output or the error record it produced instead.
pub type AgentResult = std::result::Result<AgentOutput, PlannerError>;

/// Agent results of one routing pass, in the order the agents finished.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteResults {
    entries: Vec<(AgentKind, AgentResult)>,
}

impl RouteResults {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a result, replacing any earlier result of the same agent in place.
    pub fn insert(&mut self, kind: AgentKind, result: AgentResult) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == kind) {
            Some((_, slot)) => *slot = result,
            None => self.entries.push((kind, result)),
        }
    }

    pub fn get(&self, kind: AgentKind) -> Option<&AgentResult> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == kind)
            .map(|(_, result)| result)
    }

    /// The successful output of `kind`, if it ran and succeeded.
    pub fn output(&self, kind: AgentKind) -> Option<&AgentOutput> {
        self.get(kind).and_then(|result| result.as_ref().ok())
    }

    pub fn contains(&self, kind: AgentKind) -> bool {
        self.get(kind).is_some()
    }

    pub fn kinds(&self) -> Vec<AgentKind> {
        self.entries.iter().map(|(kind, _)| *kind).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentKind, &AgentResult)> {
        self.entries.iter().map(|(kind, result)| (*kind, result))
    }

    pub fn planning(&self) -> Option<&PlanningOutput> {
        self.output(AgentKind::Planning)
            .and_then(AgentOutput::as_planning)
    }

    pub fn research(&self) -> Option<&ResearchOutput> {
        self.output(AgentKind::Research)
            .and_then(AgentOutput::as_research)
    }

    pub fn optimization(&self) -> Option<&OptimizationOutput> {
        self.output(AgentKind::Optimization)
            .and_then(AgentOutput::as_optimization)
    }

    /// Mapping of agent name to output, or to an error record for failed agents.
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (kind, result) in &self.entries {
            let value = match result {
                Ok(output) => serde_json::to_value(output).unwrap_or(Value::Null),
                Err(err) => err.to_error_payload(),
            };
            map.insert(kind.to_string(), value);
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn planning(cost: f64) -> AgentResult {
        Ok(AgentOutput::Planning(PlanningOutput {
            itinerary: Vec::new(),
            total_cost: cost,
        }))
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut results = RouteResults::new();
        results.insert(AgentKind::Research, Err(PlannerError::NotFound("x".into())));
        results.insert(AgentKind::Planning, planning(10.0));
        results.insert(AgentKind::Research, Err(PlannerError::NotFound("y".into())));

        assert_eq!(results.kinds(), vec![AgentKind::Research, AgentKind::Planning]);
        assert_eq!(
            results.get(AgentKind::Research),
            Some(&Err(PlannerError::NotFound("y".into())))
        );
    }

    #[test]
    fn test_typed_accessors_skip_errors() {
        let mut results = RouteResults::new();
        results.insert(
            AgentKind::Optimization,
            Err(PlannerError::malformed("OptimizationResponse", "bad")),
        );
        results.insert(AgentKind::Planning, planning(42.0));

        assert!(results.optimization().is_none());
        assert!(results.contains(AgentKind::Optimization));
        assert_eq!(results.planning().map(|p| p.total_cost), Some(42.0));
    }

    #[test]
    fn test_to_json_renders_error_records() {
        let mut results = RouteResults::new();
        results.insert(AgentKind::Planning, planning(5.0));
        results.insert(
            AgentKind::Booking,
            Err(PlannerError::MissingInput("No itinerary to book".into())),
        );

        let json = results.to_json();
        assert_eq!(json["planning"]["total_cost"], 5.0);
        assert_eq!(json["booking"]["error"]["code"], "MISSING_INPUT");
    }
}
