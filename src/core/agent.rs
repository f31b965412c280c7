use super::context::PlanningContext;
use crate::{
    error::Result,
    types::{AgentKind, AgentOutput},
};
use async_trait::async_trait;
use std::{collections::HashMap, sync::Arc};

/// A unit of work in a planning round.
///
/// Agents only read the context they are given; the routing strategy decides what
/// goes into `previous_results` before each call.
#[async_trait]
pub trait Agent: Send + Sync + std::fmt::Debug {
    /// The role this agent plays (used as its key in routing results)
    fn kind(&self) -> AgentKind;

    /// Run the agent against a context snapshot
    async fn run(&self, context: &PlanningContext) -> Result<AgentOutput>;
}

/// Registry of available agents, keyed by role
#[derive(Debug, Default, Clone)]
pub struct AgentRegistry {
    agents: HashMap<AgentKind, Arc<dyn Agent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an agent under its own kind, replacing any previous one
    pub fn register<A: Agent + 'static>(&mut self, agent: A) {
        self.register_shared(Arc::new(agent));
    }

    pub fn register_shared(&mut self, agent: Arc<dyn Agent>) {
        self.agents.insert(agent.kind(), agent);
    }

    pub fn with<A: Agent + 'static>(mut self, agent: A) -> Self {
        self.register(agent);
        self
    }

    pub fn get(&self, kind: AgentKind) -> Option<Arc<dyn Agent>> {
        self.agents.get(&kind).cloned()
    }

    pub fn contains(&self, kind: AgentKind) -> bool {
        self.agents.contains_key(&kind)
    }

    /// Registered kinds in declaration order
    pub fn kinds(&self) -> Vec<AgentKind> {
        let mut kinds: Vec<AgentKind> = self.agents.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
