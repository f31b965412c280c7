pub mod agent;
pub mod context;
pub mod orchestrator;

pub use agent::{Agent, AgentRegistry};
pub use context::PlanningContext;
pub use orchestrator::{merge_itinerary, CheckoutReceipt, Orchestrator};
