use std::fmt::Display;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Builds a point from a provider pair, which is ordered `[lng, lat]`.
    pub fn from_lng_lat([lng, lat]: [f64; 2]) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    /// The `lng,lat` form the directions providers expect in query strings.
    pub fn lng_lat(&self) -> LngLat {
        LngLat(*self)
    }
}

/// Formats as `lng,lat`. Floats go through `Debug` so integral values keep
/// their `.0` (`127.0,37.5`).
pub struct LngLat(GeoPoint);

impl Display for LngLat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?},{:?}", self.0.lng, self.0.lat)
    }
}
