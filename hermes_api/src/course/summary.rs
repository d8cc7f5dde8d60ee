use std::sync::Arc;

use axum::{Json, extract::State};
use hermes_course::{course::Course, route_section::AggregateResult, transport_mode::TransportMode};
use hermes_directions::route_option::RouteOption;
use schemars::JsonSchema;
use serde::Deserialize;

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "CourseSummaryRequest")]
pub struct CourseSummaryRequest {
    pub waypoints: Course,
    /// Defaults to the configured transport mode
    pub mode: Option<TransportMode>,
    /// Driving only, defaults to the configured route option
    pub option: Option<RouteOption>,
}

pub fn validate_course(course: &Course) -> Result<(), ApiError> {
    match course
        .waypoints()
        .iter()
        .find(|waypoint| !waypoint.point().is_valid())
    {
        Some(waypoint) => Err(ApiError::BadRequest(format!(
            "Waypoint {} has invalid coordinates",
            waypoint.id
        ))),
        None => Ok(()),
    }
}

pub async fn summary_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CourseSummaryRequest>,
) -> Result<Json<AggregateResult>, ApiError> {
    validate_course(&body.waypoints)?;

    let mode = state.course_config.mode_or_default(body.mode);
    let option = body
        .option
        .unwrap_or_else(|| state.aggregator.route_option());

    let result = state
        .aggregator
        .aggregate_with_option(&body.waypoints, mode, option)
        .await;

    Ok(Json(result))
}
