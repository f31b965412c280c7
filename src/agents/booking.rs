use crate::{
    core::{Agent, PlanningContext},
    error::{PlannerError, Result},
    services::payments::short_reference,
    types::{AgentKind, AgentOutput, BookingOutput, BookingStatus},
};
use async_trait::async_trait;
use tracing::info;

/// Number of synthetic confirmations issued per booking
pub const BOOKING_REFERENCES: usize = 3;

/// Issues synthetic confirmations for a drafted itinerary. Real payments go
/// through [`crate::services::PaymentGateway`] at checkout instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingAgent;

impl BookingAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Agent for BookingAgent {
    fn kind(&self) -> AgentKind {
        AgentKind::Booking
    }

    async fn run(&self, context: &PlanningContext) -> Result<AgentOutput> {
        context.require_preferences()?;
        if context.previous_results().planning().is_none() {
            return Err(PlannerError::MissingInput("No itinerary to book".to_string()));
        }

        let booking_ids: Vec<String> = (0..BOOKING_REFERENCES)
            .map(|_| short_reference("BK"))
            .collect();
        info!(target: "trip_planner::agents", ?booking_ids, "bookings confirmed");

        Ok(AgentOutput::Booking(BookingOutput {
            booking_status: BookingStatus::Confirmed,
            booking_ids,
            payment_processed: true,
            confirmation_sent: true,
        }))
    }
}
