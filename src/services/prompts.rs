use crate::{
    schemas::CompletionSchema,
    types::{
        ExtractedPreferences, ItineraryItem, OptimizationResponse, PlanningResponse,
        PointOfInterest, TripPreferences,
    },
};
use chrono::NaiveDate;

fn schema_block<T: CompletionSchema>() -> String {
    format!(
        "Respond with a single JSON object and nothing else. It must validate against this JSON Schema:\n{}",
        T::schema().to_prompt_string()
    )
}

/// Prompt asking for a day-by-day itinerary built from researched places.
pub fn planning_prompt(
    preferences: &TripPreferences,
    points_of_interest: &[PointOfInterest],
    currency: &str,
) -> String {
    let places = points_of_interest
        .iter()
        .map(|poi| {
            format!(
                "- {} (type: {}, at {:.5},{:.5})",
                poi.name, poi.kind, poi.lat, poi.lon
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let interests = if preferences.interests.is_empty() {
        "none given".to_string()
    } else {
        preferences.interests.join(", ")
    };

    format!(
        "You are an experienced travel planner. Build a day-by-day itinerary for the traveler below using only the listed places.\n\n\
         Traveler request:\n\
         - Destination: {location}\n\
         - Length: {days} days starting {start}\n\
         - Party size: {travelers}\n\
         - Total budget: {budget:.2} {currency}\n\
         - Interests: {interests}\n\
         - Stay: {stay}; getting around: {transport}\n\n\
         Places available:\n{places}\n\n\
         Rules:\n\
         1. Cover all {days} days with 2-3 activities per day and leave room for travel and rest.\n\
         2. Prefer places that match the interests.\n\
         3. Give each activity a realistic cost in {currency} for all {travelers} travelers together.\n\
         4. Keep the summed cost within {budget:.2} {currency}.\n\
         5. Use 24-hour HH:MM start times and 1-based day numbers.\n\n\
         {schema}",
        location = preferences.location,
        days = preferences.duration_days,
        start = preferences.start_date,
        travelers = preferences.travelers,
        budget = preferences.budget,
        currency = currency,
        interests = interests,
        stay = preferences.accommodation_type,
        transport = preferences.transport_preference,
        places = places,
        schema = schema_block::<PlanningResponse>(),
    )
}

/// Prompt asking for 2-3 savings ideas on an existing itinerary.
pub fn optimization_prompt(
    items: &[ItineraryItem],
    current_cost: f64,
    budget: f64,
    currency: &str,
) -> String {
    let schedule = items
        .iter()
        .map(|item| {
            format!(
                "- Day {} at {}: {}, cost {:.2} {}",
                item.day, item.time, item.activity, item.cost, currency
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "You are a frugal travel expert. Find ways to make the itinerary below cheaper without hurting the experience much.\n\n\
         Budget: {budget:.2} {currency}\n\
         Current estimated cost: {current_cost:.2} {currency}\n\n\
         Itinerary:\n{schedule}\n\n\
         Give 2-3 concrete suggestions (cheaper equivalents, public transport, free alternatives), each with a short note on the benefit, \
         and estimate the combined savings in {currency}.\n\n\
         {schema}",
        budget = budget,
        currency = currency,
        current_cost = current_cost,
        schedule = schedule,
        schema = schema_block::<OptimizationResponse>(),
    )
}

/// Prompt extracting structured trip details from free text.
pub fn extraction_prompt(request: &str, today: NaiveDate) -> String {
    format!(
        "You are a travel planning assistant. Pull the trip details out of the request below.\n\n\
         Request: \"{request}\"\n\n\
         Leave a field out when the request does not mention it. Dates use YYYY-MM-DD; today is {today}.\n\n\
         {schema}",
        request = request.trim(),
        today = today,
        schema = schema_block::<ExtractedPreferences>(),
    )
}
