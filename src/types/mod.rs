pub mod geo;
pub mod itinerary;
pub mod kinds;
pub mod outputs;
pub mod payloads;
pub mod preferences;
pub mod response;

pub use geo::{Coordinates, PointOfInterest};
pub use itinerary::{ItineraryItem, ItineraryStatus, TripItinerary};
pub use kinds::{AgentKind, RoutingStrategy};
pub use outputs::{
    AgentOutput, AgentResult, BookingOutput, BookingStatus, MonitoringOutput,
    OptimizationOutput, PlanningOutput, ResearchOutput, RouteResults,
};
pub use payloads::{ExtractedPreferences, OptimizationResponse, PlanningResponse};
pub use preferences::TripPreferences;
pub use response::{extract_json_object, parse_completion};
