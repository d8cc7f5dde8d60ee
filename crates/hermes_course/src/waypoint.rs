use hermes_directions::geopoint::GeoPoint;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A stop on a course. Waypoints are never mutated once added; edits replace them.
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(deny_unknown_fields, rename = "Waypoint")]
pub struct Waypoint {
    pub id: String,
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Waypoint {
    pub fn point(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}
