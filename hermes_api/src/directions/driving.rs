use std::sync::Arc;

use axum::{Json, extract::State};
use hermes_directions::driving_route::{DrivingRequest, DrivingRoute};

use crate::{error::ApiError, state::AppState};

pub async fn driving_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<DrivingRequest>,
) -> Result<Json<DrivingRoute>, ApiError> {
    if let Some(point) = std::iter::once(&body.start)
        .chain(std::iter::once(&body.goal))
        .chain(body.waypoints.iter())
        .find(|point| !point.is_valid())
    {
        return Err(ApiError::BadRequest(format!(
            "Invalid coordinates: lat {}, lng {}",
            point.lat, point.lng
        )));
    }

    let route = state.aggregator.driving().route(&body).await?;

    Ok(Json(route))
}
