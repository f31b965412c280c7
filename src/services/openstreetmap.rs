//! Geocoding and points-of-interest lookups against OpenStreetMap services.
//!
//! [`NominatimGeocoder`] resolves a place name to coordinates and
//! [`OverpassPoiSource`] finds named places around them. Both sit behind traits
//! so that the research agent can be exercised without network access.

use crate::{
    error::{PlannerError, Result},
    types::{Coordinates, PointOfInterest},
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_OVERPASS_URL: &str = "https://overpass-api.de/api/interpreter";

/// Interest tag → Overpass tag filter. Interests missing here are ignored.
pub const INTEREST_TAGS: &[(&str, &str)] = &[
    ("beaches", r#""natural"="beach""#),
    ("nightlife", r#""amenity"="nightclub""#),
    ("local food", r#""amenity"="restaurant""#),
    ("culture", r#""tourism"="museum""#),
    ("heritage", r#""historic"="castle""#),
    ("adventure", r#""leisure"="adventure_park""#),
];

/// Resolves a free-text place name to coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + std::fmt::Debug {
    async fn lookup(&self, place_name: &str) -> Result<Option<Coordinates>>;
}

/// Finds named places within `radius_m` metres of a point.
#[async_trait]
pub trait PoiSource: Send + Sync + std::fmt::Debug {
    async fn query(
        &self,
        center: Coordinates,
        radius_m: u32,
        category_filters: &[&str],
    ) -> Result<Vec<PointOfInterest>>;
}

/// Overpass tag filters for the interests that have one, in interest order.
pub fn category_filters(interests: &[String]) -> Vec<&'static str> {
    interests
        .iter()
        .filter_map(|interest| {
            INTEREST_TAGS
                .iter()
                .find(|(name, _)| *name == interest.as_str())
                .map(|(_, filter)| *filter)
        })
        .collect()
}

fn build_http_client(user_agent: &str, timeout: Duration) -> Result<Client> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|err| PlannerError::Config(format!("Failed to build HTTP client: {err}")))
}

#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_http_client(user_agent, timeout)?,
        })
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn lookup(&self, place_name: &str) -> Result<Option<Coordinates>> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", place_name), ("format", "json"), ("limit", "1")])
            .send()
            .await?
            .error_for_status()?;

        let places: Vec<NominatimPlace> = response.json().await?;
        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let parse = |raw: &str| {
            raw.parse::<f64>().map_err(|err| {
                PlannerError::Http(format!("Geocoder returned invalid coordinate `{raw}`: {err}"))
            })
        };
        Ok(Some(Coordinates::new(parse(&place.lat)?, parse(&place.lon)?)))
    }
}

#[derive(Debug, Clone)]
pub struct OverpassPoiSource {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<Coordinates>,
    #[serde(default)]
    tags: std::collections::HashMap<String, String>,
}

impl OverpassElement {
    fn into_point_of_interest(mut self) -> Option<PointOfInterest> {
        let name = self.tags.remove("name")?;
        let (lat, lon) = match (self.lat, self.lon, self.center) {
            (Some(lat), Some(lon), _) => (lat, lon),
            (_, _, Some(center)) => (center.lat, center.lon),
            _ => return None,
        };
        let kind = self
            .tags
            .remove("amenity")
            .or_else(|| self.tags.remove("tourism"))
            .unwrap_or_else(|| "attraction".to_string());

        Some(PointOfInterest {
            name,
            kind,
            lat,
            lon,
        })
    }
}

impl OverpassPoiSource {
    pub fn new(base_url: impl Into<String>, user_agent: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            base_url: base_url.into(),
            client: build_http_client(user_agent, timeout)?,
        })
    }
}

/// Overpass QL union of one `nwr` clause per filter; `None` without filters.
pub fn build_overpass_query(
    center: Coordinates,
    radius_m: u32,
    category_filters: &[&str],
) -> Option<String> {
    if category_filters.is_empty() {
        return None;
    }

    let clauses: String = category_filters
        .iter()
        .map(|filter| {
            format!(
                "nwr[{}](around:{},{},{});",
                filter, radius_m, center.lat, center.lon
            )
        })
        .collect();

    Some(format!("[out:json];({});out center;", clauses))
}

#[async_trait]
impl PoiSource for OverpassPoiSource {
    async fn query(
        &self,
        center: Coordinates,
        radius_m: u32,
        category_filters: &[&str],
    ) -> Result<Vec<PointOfInterest>> {
        let Some(query) = build_overpass_query(center, radius_m, category_filters) else {
            return Ok(Vec::new());
        };

        debug!(target: "trip_planner::osm", %query, "querying Overpass");

        let response = self
            .client
            .post(&self.base_url)
            .body(query)
            .send()
            .await?
            .error_for_status()?;

        let parsed: OverpassResponse = response.json().await?;
        Ok(parsed
            .elements
            .into_iter()
            .filter_map(OverpassElement::into_point_of_interest)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_filters_follow_interest_order() {
        let interests = vec![
            "heritage".to_string(),
            "shopping".to_string(),
            "nightlife".to_string(),
        ];
        assert_eq!(
            category_filters(&interests),
            vec![r#""historic"="castle""#, r#""amenity"="nightclub""#]
        );
    }

    #[test]
    fn test_overpass_query_shape() {
        let query = build_overpass_query(
            Coordinates::new(18.52, 73.85),
            10_000,
            &[r#""tourism"="museum""#],
        )
        .unwrap();
        assert_eq!(
            query,
            r#"[out:json];(nwr["tourism"="museum"](around:10000,18.52,73.85););out center;"#
        );
        assert!(build_overpass_query(Coordinates::new(0.0, 0.0), 1, &[]).is_none());
    }

    #[test]
    fn test_element_conversion() {
        let element: OverpassElement = serde_json::from_value(serde_json::json!({
            "type": "way",
            "center": {"lat": 18.5, "lon": 73.8},
            "tags": {"name": "Shaniwar Wada", "historic": "castle"}
        }))
        .unwrap();
        let poi = element.into_point_of_interest().unwrap();
        assert_eq!(poi.name, "Shaniwar Wada");
        assert_eq!(poi.kind, "attraction");
        assert_eq!(poi.lat, 18.5);

        let unnamed: OverpassElement = serde_json::from_value(serde_json::json!({
            "lat": 1.0, "lon": 2.0, "tags": {"amenity": "nightclub"}
        }))
        .unwrap();
        assert!(unnamed.into_point_of_interest().is_none());
    }
}
