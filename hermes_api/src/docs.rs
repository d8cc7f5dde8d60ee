use axum::{Json, extract::Path};
use hermes_course::{course_session::CourseSummaryState, route_section::AggregateResult};
use hermes_directions::driving_route::{DrivingRequest, DrivingRoute};
use schemars::{Schema, schema_for};

use crate::{
    course::{sessions::RefreshSessionRequest, summary::CourseSummaryRequest},
    error::ApiError,
};

pub const SCHEMA_NAMES: [&str; 6] = [
    "driving-request",
    "driving-route",
    "course-summary-request",
    "aggregate-result",
    "refresh-session-request",
    "session-state",
];

pub fn schema(name: &str) -> Option<Schema> {
    match name {
        "driving-request" => Some(schema_for!(DrivingRequest)),
        "driving-route" => Some(schema_for!(DrivingRoute)),
        "course-summary-request" => Some(schema_for!(CourseSummaryRequest)),
        "aggregate-result" => Some(schema_for!(AggregateResult)),
        "refresh-session-request" => Some(schema_for!(RefreshSessionRequest)),
        "session-state" => Some(schema_for!(CourseSummaryState)),
        _ => None,
    }
}

pub async fn schema_handler(Path(name): Path<String>) -> Result<Json<Schema>, ApiError> {
    schema(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Unknown schema {name}")))
}

pub async fn schemas_index_handler() -> Json<[&'static str; 6]> {
    Json(SCHEMA_NAMES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_listed_schema_exists() {
        for name in SCHEMA_NAMES {
            assert!(schema(name).is_some(), "missing schema {name}");
        }
        assert!(schema("vrp").is_none());
    }
}
