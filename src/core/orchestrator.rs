use super::{agent::AgentRegistry, context::PlanningContext};
use crate::{
    agents::{configured_registry, standard_registry},
    config::{PlannerConfig, DEFAULT_CURRENCY},
    error::{PlannerError, Result},
    routing::{PerformanceHistory, Router, RoutingHistory},
    services::{
        prompts::extraction_prompt, BookingConfirmation, Geocoder, MockPaymentGateway,
        NominatimGeocoder, OpenAiCompletion, OverpassPoiSource, PaymentGateway, PaymentReceipt,
        PaymentStatus, PoiSource, TextCompletion,
    },
    types::{
        parse_completion, ExtractedPreferences, ItineraryStatus, RouteResults, RoutingStrategy,
        TripItinerary, TripPreferences,
    },
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of paying for and booking an itinerary
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckoutReceipt {
    pub itinerary_id: String,
    pub payment: PaymentReceipt,
    /// `None` when the payment was declined
    pub booking: Option<BookingConfirmation>,
}

/// Entry point for planning trips.
///
/// Owns the agents and the router; the router's performance history is the only
/// state that outlives a single call.
#[derive(Debug, Clone)]
pub struct Orchestrator {
    agents: AgentRegistry,
    router: Router,
    llm: Arc<dyn TextCompletion>,
    payments: Arc<dyn PaymentGateway>,
    currency: String,
}

impl Orchestrator {
    pub fn new(
        llm: Arc<dyn TextCompletion>,
        geocoder: Arc<dyn Geocoder>,
        poi_source: Arc<dyn PoiSource>,
    ) -> Self {
        Self {
            agents: standard_registry(llm.clone(), geocoder, poi_source),
            router: Router::new(),
            llm,
            payments: Arc::new(MockPaymentGateway::new()),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }

    /// Orchestrator talking to the configured language model and OpenStreetMap endpoints
    pub fn from_config(config: &PlannerConfig) -> Result<Self> {
        let llm: Arc<dyn TextCompletion> = Arc::new(OpenAiCompletion::from_config(config));
        let geocoder = Arc::new(NominatimGeocoder::new(
            config.nominatim_url.clone(),
            &config.user_agent,
            config.timeout,
        )?);
        let poi_source = Arc::new(OverpassPoiSource::new(
            config.overpass_url.clone(),
            &config.user_agent,
            config.timeout,
        )?);

        Ok(Self {
            agents: configured_registry(config, llm.clone(), geocoder, poi_source),
            router: Router::new(),
            llm,
            payments: Arc::new(MockPaymentGateway::new()),
            currency: config.currency.clone(),
        })
    }

    pub fn from_env() -> Result<Self> {
        Self::from_config(&PlannerConfig::from_env()?)
    }

    pub fn with_agents(mut self, agents: AgentRegistry) -> Self {
        self.agents = agents;
        self
    }

    /// Replace the router, keeping the current performance history
    pub fn with_router(mut self, router: Router) -> Self {
        let performance = self.router.performance().clone();
        self.router = router.with_performance(performance);
        self
    }

    pub fn with_payment_gateway(mut self, payments: Arc<dyn PaymentGateway>) -> Self {
        self.payments = payments;
        self
    }

    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = currency.into();
        self
    }

    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    /// Feedback scores consulted by the feedback strategy
    pub fn performance(&self) -> &PerformanceHistory {
        self.router.performance()
    }

    pub fn routing_history(&self) -> &RoutingHistory {
        self.router.history()
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Plan a trip. Agent failures degrade the itinerary instead of failing the call.
    pub async fn plan_trip(
        &self,
        preferences: impl Into<Arc<TripPreferences>>,
        strategy: RoutingStrategy,
    ) -> Result<TripItinerary> {
        let preferences = preferences.into();
        preferences.validate()?;
        info!(
            target: "trip_planner::router",
            location = %preferences.location,
            %strategy,
            "planning trip"
        );

        let context = PlanningContext::new(preferences.clone());
        let results = self.router.route(strategy, &context, &self.agents).await?;
        Ok(merge_itinerary(preferences, &results, ItineraryStatus::Planned))
    }

    /// Re-plan an existing itinerary. Always routes with the feedback strategy.
    pub async fn adaptive_replan(
        &self,
        itinerary: &TripItinerary,
        changes: Map<String, Value>,
    ) -> Result<TripItinerary> {
        info!(
            target: "trip_planner::router",
            itinerary = %itinerary.id,
            changes = changes.len(),
            "replanning trip"
        );

        let context = PlanningContext::new(itinerary.preferences.clone())
            .with_changes(changes)
            .with_replanning(itinerary.id.clone());
        let results = self
            .router
            .route(RoutingStrategy::Feedback, &context, &self.agents)
            .await?;

        Ok(merge_itinerary(
            itinerary.preferences.clone(),
            &results,
            ItineraryStatus::Updated,
        ))
    }

    /// Extract preferences from free text with the language model, then plan.
    pub async fn plan_trip_from_prompt(
        &self,
        request: &str,
        strategy: RoutingStrategy,
    ) -> Result<TripItinerary> {
        let today = Utc::now().date_naive();
        let raw = self.llm.complete(&extraction_prompt(request, today)).await?;
        let extracted: ExtractedPreferences = parse_completion(&raw)?;
        let preferences = extracted.into_preferences(today)?;

        info!(
            target: "trip_planner::agents",
            location = %preferences.location,
            budget = preferences.budget,
            days = preferences.duration_days,
            "extracted trip request"
        );

        self.plan_trip(preferences, strategy).await
    }

    /// Pay for the itinerary's total cost and book it
    pub async fn checkout(
        &self,
        itinerary: &TripItinerary,
        payment_details: &Value,
    ) -> Result<CheckoutReceipt> {
        if itinerary.is_empty() {
            return Err(PlannerError::MissingInput(
                "No itinerary items to book".to_string(),
            ));
        }

        let payment = self
            .payments
            .process_payment(itinerary.total_cost(), payment_details)
            .await?;

        let booking = match payment.status {
            PaymentStatus::Success => Some(self.payments.book(itinerary).await?),
            PaymentStatus::Declined => {
                warn!(
                    target: "trip_planner::agents",
                    itinerary = %itinerary.id,
                    transaction = %payment.transaction_id,
                    "payment declined"
                );
                None
            }
        };

        Ok(CheckoutReceipt {
            itinerary_id: itinerary.id.clone(),
            payment,
            booking,
        })
    }
}

/// Build the itinerary from planning and optimization results.
///
/// Cost is planning's total minus optimization's savings, clamped at zero.
pub fn merge_itinerary(
    preferences: Arc<TripPreferences>,
    results: &RouteResults,
    status: ItineraryStatus,
) -> TripItinerary {
    for (kind, result) in results.iter() {
        if let Err(err) = result {
            warn!(
                target: "trip_planner::agents",
                agent = %kind,
                code = err.error_code(),
                "no data from agent"
            );
        }
    }

    let (items, planned_cost) = results
        .planning()
        .map(|planning| (planning.itinerary.clone(), planning.total_cost))
        .unwrap_or_default();
    let optimization = results.optimization();
    let savings = optimization.map_or(0.0, |o| o.cost_savings);

    TripItinerary::draft(preferences)
        .with_items(items, planned_cost - savings)
        .with_suggestions(optimization.map(|o| o.suggestions.clone()))
        .with_status(status)
}
