use serde_json::json;
use trip_planner_rs::{
    schema::validate_structured_payload,
    types::{parse_completion, ExtractedPreferences, OptimizationResponse, PlanningResponse},
    CompletionSchema, PlannerError,
};

#[test]
fn test_planning_schema_has_item_constraints() {
    let schema = PlanningResponse::schema().schema_json();

    assert_eq!(schema["type"], "object");
    assert_eq!(schema["required"], json!(["itinerary"]));

    let item = &schema["definitions"]["ItineraryItem"];
    let props = item["properties"].as_object().unwrap();
    assert_eq!(props["day"]["minimum"], 1.0);
    assert_eq!(props["cost"]["minimum"], 0.0);
    assert!(props["time"]["pattern"].as_str().unwrap().contains(":"));

    let required: Vec<&str> = item["required"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert!(required.contains(&"activity"));
    assert!(!required.contains(&"booking_url"));
}

#[test]
fn test_extraction_schema_fields_are_optional() {
    let handle = ExtractedPreferences::schema();
    assert_eq!(handle.schema_name(), "TripRequest");

    let schema = handle.schema_json();
    assert!(schema
        .get("required")
        .and_then(|r| r.as_array())
        .map_or(true, |r| r.is_empty()));
    assert!(schema["properties"]
        .as_object()
        .unwrap()
        .contains_key("start_date"));

    assert!(validate_structured_payload(handle, &json!({})).is_ok());
}

#[test]
fn test_bad_time_format_rejected() {
    let payload = json!({
        "itinerary": [{
            "day": 1, "time": "9am", "activity": "Breakfast", "location": "Cafe",
            "cost": 200, "duration_hours": 1, "category": "food"
        }]
    });

    let err = validate_structured_payload(PlanningResponse::schema(), &payload).unwrap_err();
    match err {
        PlannerError::MalformedResponse { schema, reason } => {
            assert_eq!(schema, "PlanningResponse");
            assert!(reason.contains("/itinerary/0/time"), "{reason}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_many_violations_are_truncated() {
    let payload = json!({
        "itinerary": [
            {"day": 0, "time": "x", "activity": "a", "location": "b",
             "cost": -1, "duration_hours": -1, "category": "c"}
        ]
    });

    let err = validate_structured_payload(PlanningResponse::schema(), &payload).unwrap_err();
    assert!(err.to_string().contains("additional errors truncated"));
}

#[test]
fn test_wrong_type_reports_path() {
    let err = parse_completion::<OptimizationResponse>(
        r#"{"suggestions": "take the bus", "estimated_savings": 100}"#,
    )
    .unwrap_err();

    assert_eq!(err.error_code(), "MALFORMED_RESPONSE");
    assert!(err.to_string().contains("/suggestions"));
}
