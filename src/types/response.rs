use crate::{
    error::{PlannerError, Result},
    schemas::{validate_structured_payload, CompletionSchema},
};
use serde_json::Value;
use tracing::debug;

/// Narrow raw model output down to its JSON object.
///
/// A fenced code block is searched first, then the whole text. Within either, the first
/// `{` that starts a complete JSON object wins, so stray braces in surrounding prose are
/// skipped. When nothing parses, everything before the first `{` and after the last `}`
/// is discarded and the caller gets to report the parse error.
pub fn extract_json_object(raw: &str) -> &str {
    let trimmed = raw.trim();

    if let Some(object) = fenced_block(trimmed).and_then(first_object) {
        return object;
    }
    if let Some(object) = first_object(trimmed) {
        return object;
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => &trimmed[start..=end],
        _ => trimmed,
    }
}

/// Body of the first fenced code block, without its language tag.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    let body_start = after_open.find('\n').map_or(0, |newline| newline + 1);
    let body = &after_open[body_start..];
    let close = body.find("```")?;
    Some(&body[..close])
}

fn first_object(text: &str) -> Option<&str> {
    text.match_indices('{').find_map(|(start, _)| {
        let candidate = &text[start..];
        let mut stream = serde_json::Deserializer::from_str(candidate).into_iter::<Value>();
        match stream.next() {
            Some(Ok(Value::Object(_))) => Some(&candidate[..stream.byte_offset()]),
            _ => None,
        }
    })
}

/// Parse raw model output into `T`: extract, parse, validate against `T`'s schema,
/// then deserialize. Every failure is a `MalformedResponse`.
pub fn parse_completion<T: CompletionSchema>(raw: &str) -> Result<T> {
    let schema = T::schema();
    let body = extract_json_object(raw);

    let value: Value = serde_json::from_str(body).map_err(|err| {
        PlannerError::malformed(
            schema.schema_name(),
            format!("response is not valid JSON: {err}"),
        )
    })?;

    if !value.is_object() {
        return Err(PlannerError::malformed(
            schema.schema_name(),
            "expected a JSON object",
        ));
    }

    if let Err(err) = validate_structured_payload(schema, &value) {
        debug!(
            target: "trip_planner::schema",
            schema = schema.schema_name(),
            error = %err,
            payload = %value
        );
        return Err(err);
    }

    deserialize_structured_response(value, schema.schema_name())
}

pub fn deserialize_structured_response<T: CompletionSchema>(
    payload: Value,
    schema_name: &'static str,
) -> Result<T> {
    serde_path_to_error::deserialize(payload).map_err(|err| {
        let path = err.path().to_string();
        let location = if path.is_empty() || path == "." {
            "<root>".to_string()
        } else {
            path
        };
        PlannerError::malformed(
            schema_name,
            format!("failed to deserialize at {}: {}", location, err.inner()),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::payloads::{OptimizationResponse, PlanningResponse};

    #[test]
    fn test_extract_from_code_fence() {
        let raw = "```json\n{\"suggestions\": [], \"estimated_savings\": 0}\n```";
        assert_eq!(
            extract_json_object(raw),
            "{\"suggestions\": [], \"estimated_savings\": 0}"
        );
    }

    #[test]
    fn test_stray_brace_in_prose_is_skipped() {
        let raw = "Savings {approx}:\n```json\n{\"suggestions\": [], \"estimated_savings\": 1}\n```";
        let parsed: OptimizationResponse = parse_completion(raw).unwrap();
        assert!(parsed.suggestions.is_empty());
        assert_eq!(parsed.estimated_savings, 1.0);

        let unfenced = "Budget {rough}: {\"suggestions\": [\"Walk\"], \"estimated_savings\": 5} ok}";
        assert_eq!(
            extract_json_object(unfenced),
            "{\"suggestions\": [\"Walk\"], \"estimated_savings\": 5}"
        );
    }

    #[test]
    fn test_unparsable_falls_back_to_outer_braces() {
        assert_eq!(extract_json_object("note {a: 1} end"), "{a: 1}");
    }

    #[test]
    fn test_extract_without_braces_returns_trimmed() {
        assert_eq!(extract_json_object("  sorry, I cannot help  "), "sorry, I cannot help");
    }

    #[test]
    fn test_parse_with_surrounding_prose() {
        let raw = r#"Here you go:
{"suggestions": ["Use the metro"], "estimated_savings": 450.5}
Enjoy your trip!"#;
        let parsed: OptimizationResponse = parse_completion(raw).unwrap();
        assert_eq!(parsed.suggestions, vec!["Use the metro"]);
        assert_eq!(parsed.estimated_savings, 450.5);
    }

    #[test]
    fn test_non_json_is_malformed() {
        let err = parse_completion::<PlanningResponse>("I could not build a plan.").unwrap_err();
        assert_eq!(err.error_code(), "MALFORMED_RESPONSE");
        assert!(err.to_string().contains("PlanningResponse"));
    }

    #[test]
    fn test_missing_required_field_is_malformed() {
        let err = parse_completion::<OptimizationResponse>(r#"{"suggestions": []}"#).unwrap_err();
        assert!(matches!(
            err,
            PlannerError::MalformedResponse {
                schema: "OptimizationResponse",
                ..
            }
        ));
    }

    #[test]
    fn test_planning_items_parsed() {
        let raw = r#"```json
{
  "itinerary": [
    {"day": 1, "time": "10:00", "activity": "Visit the City Palace",
     "location": "City Palace, Udaipur", "cost": 1000.0,
     "duration_hours": 3.0, "category": "heritage"}
  ]
}
```"#;
        let parsed: PlanningResponse = parse_completion(raw).unwrap();
        assert_eq!(parsed.itinerary.len(), 1);
        assert_eq!(parsed.itinerary[0].day, 1);
        assert!(parsed.itinerary[0].booking_url.is_none());
    }
}
