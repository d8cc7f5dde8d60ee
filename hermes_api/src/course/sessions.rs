use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use hermes_course::{
    course::Course, course_session::CourseSummaryState, transport_mode::TransportMode,
};
use hermes_directions::route_option::RouteOption;
use schemars::JsonSchema;
use serde::Deserialize;
use tracing::info;

use crate::{course::summary::validate_course, error::ApiError, state::AppState};

#[derive(Deserialize, JsonSchema)]
#[serde(deny_unknown_fields, rename = "RefreshSessionRequest")]
pub struct RefreshSessionRequest {
    pub waypoints: Course,
    pub mode: Option<TransportMode>,
    /// Driving only, defaults to the configured route option
    pub option: Option<RouteOption>,
}

/// Re-aggregates the whole course after an edit. Answers with the session
/// state, which stays `InProgress` when a newer refresh superseded this one.
pub async fn refresh_session_handler(
    Path(session_id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshSessionRequest>,
) -> Result<Json<CourseSummaryState>, ApiError> {
    validate_course(&body.waypoints)?;

    let session = state.sessions.session(&session_id).await;
    let mode = state.course_config.mode_or_default(body.mode);
    let option = body
        .option
        .unwrap_or_else(|| state.aggregator.route_option());

    if session
        .refresh(&state.aggregator, &body.waypoints, mode, option)
        .await
        .is_none()
    {
        info!("Refresh of session {session_id} was superseded");
    }

    Ok(Json(session.state()))
}

pub async fn get_session_handler(
    Path(session_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<CourseSummaryState>, ApiError> {
    state
        .sessions
        .get_state(&session_id)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound(session_id))
}

pub async fn close_session_handler(
    Path(session_id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<StatusCode, ApiError> {
    if state.sessions.close(&session_id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(session_id))
    }
}

#[cfg(test)]
mod tests {
    use hermes_course::course_config::CourseConfig;

    use crate::test_utils::{seoul_course, unconfigured_state, waypoint};

    use super::*;

    fn refresh_request(waypoints: Course) -> RefreshSessionRequest {
        RefreshSessionRequest {
            waypoints,
            mode: None,
            option: Some(RouteOption::AvoidToll),
        }
    }

    #[tokio::test]
    async fn test_unknown_session_is_not_found() {
        let state = unconfigured_state(CourseConfig::default());

        let get = get_session_handler(Path(String::from("missing")), State(Arc::clone(&state))).await;
        assert!(matches!(get, Err(ApiError::NotFound(id)) if id == "missing"));

        let close = close_session_handler(Path(String::from("missing")), State(state)).await;
        assert!(matches!(close, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_refresh_then_close() {
        let state = unconfigured_state(CourseConfig::default());

        let Json(refreshed) = refresh_session_handler(
            Path(String::from("course-1")),
            State(Arc::clone(&state)),
            Json(refresh_request(seoul_course())),
        )
        .await
        .unwrap();

        match refreshed {
            CourseSummaryState::Ready { generation, result } => {
                assert_eq!(generation, 1);
                assert_eq!(result.mode, TransportMode::Driving);
                assert_eq!(result.sections.len(), 2);
                assert_eq!(result.failed_legs, 2);
            }
            other => panic!("unexpected state {other:?}"),
        }

        let Json(fetched) =
            get_session_handler(Path(String::from("course-1")), State(Arc::clone(&state)))
                .await
                .unwrap();
        assert!(matches!(fetched, CourseSummaryState::Ready { generation: 1, .. }));

        let closed = close_session_handler(Path(String::from("course-1")), State(Arc::clone(&state)))
            .await
            .unwrap();
        assert_eq!(closed, StatusCode::NO_CONTENT);

        let fetched = get_session_handler(Path(String::from("course-1")), State(state)).await;
        assert!(matches!(fetched, Err(ApiError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_invalid_refresh_creates_no_session() {
        let state = unconfigured_state(CourseConfig::default());
        let course = Course::new(vec![waypoint("a", 37.5, 200.0), waypoint("b", 37.6, 127.1)]);

        let result = refresh_session_handler(
            Path(String::from("course-1")),
            State(Arc::clone(&state)),
            Json(refresh_request(course)),
        )
        .await;

        assert!(matches!(result, Err(ApiError::BadRequest(_))));
        assert_eq!(state.sessions.len().await, 0);
    }

    #[test]
    fn test_refresh_request_accepts_option() {
        let request = serde_json::from_str::<RefreshSessionRequest>(
            r#"{"waypoints": [], "option": "tracomfort"}"#,
        )
        .unwrap();

        assert_eq!(request.option, Some(RouteOption::Comfort));
        assert_eq!(request.mode, None);
    }
}
