use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::{geopoint::GeoPoint, route_option::RouteOption};

/// Stops between start and goal the provider accepts. Extra stops are dropped.
pub const MAX_WAYPOINTS: usize = 5;

#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug)]
#[serde(deny_unknown_fields, rename = "DrivingDirectionsRequest")]
pub struct DrivingRequest {
    pub start: GeoPoint,
    pub goal: GeoPoint,
    #[serde(default)]
    pub waypoints: Vec<GeoPoint>,
    #[serde(default)]
    pub option: RouteOption,
}

impl DrivingRequest {
    pub fn new(start: GeoPoint, goal: GeoPoint, option: RouteOption) -> Self {
        Self {
            start,
            goal,
            waypoints: vec![],
            option,
        }
    }

    /// The intermediate stops actually sent upstream.
    pub fn capped_waypoints(&self) -> &[GeoPoint] {
        &self.waypoints[..self.waypoints.len().min(MAX_WAYPOINTS)]
    }
}

/// Canonical driving directions for one leg, independent of the provider's
/// response layout.
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename = "DrivingRoute")]
pub struct DrivingRoute {
    /// The option that was actually served, after fallback.
    pub option: RouteOption,
    pub path: Vec<GeoPoint>,
    pub summary: DrivingSummary,
    pub sections: Vec<PathSection>,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DrivingSummary {
    /// Meters
    pub distance: f64,
    /// Milliseconds
    pub duration: u64,
    pub toll_fare: Option<f64>,
    pub fuel_price: Option<f64>,
    pub taxi_fare: Option<f64>,
}

#[skip_serializing_none]
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PathSection {
    pub distance: f64,
    /// Milliseconds, estimated from the distance share when the provider omits it.
    pub duration: u64,
    pub point_index: usize,
    pub point_count: usize,
    pub name: Option<String>,
    pub congestion: Option<i64>,
    pub speed: Option<f64>,
}

/// Allocates the route duration to a section in proportion to its distance.
pub fn estimate_section_duration(
    section_distance: f64,
    total_distance: f64,
    total_duration: u64,
) -> u64 {
    if total_distance <= 0.0 {
        return 0;
    }

    (section_distance * total_duration as f64 / total_distance).round() as u64
}
