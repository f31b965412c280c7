use crate::{
    core::{Agent, PlanningContext},
    error::Result,
    types::{AgentKind, AgentOutput, MonitoringOutput},
};
use async_trait::async_trait;
use chrono::Utc;

/// Snapshot of travel conditions. Always reports all clear.
#[derive(Debug, Clone, Copy, Default)]
pub struct MonitoringAgent;

impl MonitoringAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for MonitoringAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Monitoring
    }

    async fn run(&self, _context: &PlanningContext) -> Result<AgentOutput> {
        Ok(AgentOutput::Monitoring(MonitoringOutput {
            weather_updates: "All clear".to_string(),
            traffic_conditions: "Normal".to_string(),
            alternative_routes: Vec::new(),
            last_updated: Utc::now(),
        }))
    }
}
