//! trip-planner-rs: multi-agent trip planning with pluggable routing strategies
//!
//! An [`Orchestrator`] hands each request to a [`Router`], which picks the agents
//! (research, planning, optimization, booking, monitoring) to run and how their
//! results flow into one another. The planning and optimization results are merged
//! into a [`TripItinerary`].
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use chrono::NaiveDate;
//! use trip_planner_rs::{Orchestrator, RoutingStrategy, TripPreferences};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let orchestrator = Orchestrator::from_env()?;
//!     let preferences = TripPreferences::new(
//!         "Jaipur",
//!         60_000.0,
//!         4,
//!         NaiveDate::from_ymd_opt(2026, 12, 1).unwrap(),
//!         2,
//!     )?
//!     .with_interests(["heritage", "local food"]);
//!
//!     let itinerary = orchestrator
//!         .plan_trip(preferences, RoutingStrategy::Sequential)
//!         .await?;
//!     println!("{}", itinerary.render_summary(orchestrator.currency()));
//!     Ok(())
//! }
//! ```

extern crate self as trip_planner_rs;

pub mod agents;
pub mod config;
pub mod core;
pub mod error;
pub mod routing;
pub mod schemas;
pub mod services;
pub mod types;

pub use agents::{
    standard_registry, BookingAgent, MonitoringAgent, OptimizationAgent, PlanningAgent,
    ResearchAgent,
};
pub use config::PlannerConfig;
pub use core::{Agent, AgentRegistry, CheckoutReceipt, Orchestrator, PlanningContext};
pub use error::{PlannerError, Result};
pub use routing::{PerformanceHistory, RouteRecord, Router, RoutingHistory, RoutingPolicy};
pub use schemas::{CompletionSchema, SchemaHandle};
pub use services::{Geocoder, PaymentGateway, PoiSource, TextCompletion};
pub use trip_planner_macros::CompletionSchema;
pub use types::{
    AgentKind, AgentOutput, AgentResult, ItineraryItem, ItineraryStatus, RouteResults,
    RoutingStrategy, TripItinerary, TripPreferences,
};

pub use schemas as schema;

#[cfg(feature = "cli")]
pub mod cli;
