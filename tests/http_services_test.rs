use mockito::{Matcher, Server};
use serde_json::json;
use std::time::Duration;
use trip_planner_rs::{
    services::{
        Geocoder, NominatimGeocoder, OpenAiCompletion, OverpassPoiSource, PoiSource,
        TextCompletion,
    },
    types::Coordinates,
    PlannerError,
};

const USER_AGENT: &str = "trip-planner-rs/test";

#[tokio::test]
async fn test_completion_returns_assistant_content() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_header("authorization", "Bearer test-key")
        .match_body(Matcher::PartialJson(json!({
            "model": "test/model",
            "messages": [{"role": "user", "content": "plan it"}]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"message": {"role": "assistant", "content": "{\"itinerary\": []}"}}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let llm = OpenAiCompletion::new("test-key")
        .with_base_url(server.url())
        .with_model("test/model");
    let text = llm.complete("plan it").await.unwrap();

    assert_eq!(text, "{\"itinerary\": []}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_json_mode_sets_response_format() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "response_format": {"type": "json_object"}
        })))
        .with_status(200)
        .with_body(json!({"choices": [{"message": {"content": "{}"}}]}).to_string())
        .create_async()
        .await;

    let llm = OpenAiCompletion::new("test-key")
        .with_base_url(format!("{}/", server.url()))
        .with_json_mode(true);
    assert_eq!(llm.complete("hi").await.unwrap(), "{}");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_completion_surfaces_api_error() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/chat/completions")
        .with_status(401)
        .with_body(json!({"error": {"message": "invalid api key"}}).to_string())
        .create_async()
        .await;

    let llm = OpenAiCompletion::new("bad-key").with_base_url(server.url());
    let err = llm.complete("hi").await.unwrap_err();

    match err {
        PlannerError::Llm(message) => assert!(message.contains("invalid api key")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_completion_rate_limit_after_retries() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/chat/completions")
        .with_status(429)
        .with_header("retry-after", "0")
        .with_body("{}")
        .expect(4)
        .create_async()
        .await;

    let llm = OpenAiCompletion::new("test-key")
        .with_base_url(server.url())
        .with_timeout(Duration::from_secs(5));
    let err = llm.complete("hi").await.unwrap_err();

    assert_eq!(err, PlannerError::RateLimit { retry_after: 1 });
    assert!(err.is_retryable());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_nominatim_lookup() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/search")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Pune".into()),
            Matcher::UrlEncoded("format".into(), "json".into()),
            Matcher::UrlEncoded("limit".into(), "1".into()),
        ]))
        .match_header("user-agent", USER_AGENT)
        .with_status(200)
        .with_body(r#"[{"lat": "18.5204", "lon": "73.8567", "display_name": "Pune"}]"#)
        .create_async()
        .await;

    let geocoder = NominatimGeocoder::new(
        format!("{}/search", server.url()),
        USER_AGENT,
        Duration::from_secs(5),
    )
    .unwrap();
    let coordinates = geocoder.lookup("Pune").await.unwrap();

    assert_eq!(coordinates, Some(Coordinates::new(18.5204, 73.8567)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_nominatim_no_match() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/search")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let geocoder = NominatimGeocoder::new(
        format!("{}/search", server.url()),
        USER_AGENT,
        Duration::from_secs(5),
    )
    .unwrap();
    assert_eq!(geocoder.lookup("Nowhere").await.unwrap(), None);
}

#[tokio::test]
async fn test_overpass_query_and_parsing() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/interpreter")
        .match_body(Matcher::Regex(
            r#"nwr\["tourism"="museum"\]\(around:10000,18\.52,73\.85\);"#.to_string(),
        ))
        .with_status(200)
        .with_body(
            json!({
                "elements": [
                    {"type": "node", "lat": 18.51, "lon": 73.85,
                     "tags": {"name": "Raja Dinkar Kelkar Museum", "tourism": "museum"}},
                    {"type": "way", "center": {"lat": 18.52, "lon": 73.86},
                     "tags": {"name": "Vishrambaug Wada", "historic": "palace"}},
                    {"type": "node", "lat": 18.50, "lon": 73.80, "tags": {"tourism": "museum"}}
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let source = OverpassPoiSource::new(
        format!("{}/api/interpreter", server.url()),
        USER_AGENT,
        Duration::from_secs(5),
    )
    .unwrap();
    let places = source
        .query(
            Coordinates::new(18.52, 73.85),
            10_000,
            &[r#""tourism"="museum""#],
        )
        .await
        .unwrap();

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Raja Dinkar Kelkar Museum");
    assert_eq!(places[0].kind, "museum");
    assert_eq!(places[1].kind, "attraction");
    assert_eq!(places[1].lat, 18.52);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_overpass_skips_request_without_filters() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/interpreter")
        .expect(0)
        .create_async()
        .await;

    let source = OverpassPoiSource::new(
        format!("{}/api/interpreter", server.url()),
        USER_AGENT,
        Duration::from_secs(5),
    )
    .unwrap();
    let places = source
        .query(Coordinates::new(0.0, 0.0), 10_000, &[])
        .await
        .unwrap();

    assert!(places.is_empty());
    mock.assert_async().await;
}
