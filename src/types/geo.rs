use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// WGS84 latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// A named place returned by the points-of-interest service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    /// Category tag value (e.g. `museum`, `nightclub`), or `attraction`
    #[serde(rename = "type")]
    pub kind: String,
    pub lat: f64,
    pub lon: f64,
}

impl PointOfInterest {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.lat, self.lon)
    }
}
