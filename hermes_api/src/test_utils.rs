use std::sync::Arc;

use hermes_course::{
    course::Course, course_aggregator::CourseAggregator, course_config::CourseConfig,
    session_manager::SessionManager, waypoint::Waypoint,
};
use hermes_directions::{
    directions_config::DirectionsConfig, naver_api::NaverDirectionsClient,
    transit_api::TransitDirectionsClient,
};

use crate::state::AppState;

/// State over clients with no credentials and no transit endpoint, so every
/// leg fails with a configuration error before any request is sent.
pub fn unconfigured_state(course_config: CourseConfig) -> Arc<AppState> {
    let directions_config = DirectionsConfig::default();
    let aggregator = CourseAggregator::new(
        NaverDirectionsClient::new((&directions_config).into()).unwrap(),
        TransitDirectionsClient::new((&directions_config).into()).unwrap(),
    );

    Arc::new(AppState {
        aggregator,
        course_config,
        sessions: SessionManager::new(course_config.session_ttl),
    })
}

pub fn waypoint(id: &str, lat: f64, lng: f64) -> Waypoint {
    Waypoint {
        id: id.to_string(),
        lat,
        lng,
        name: id.to_string(),
        address: String::new(),
        category: None,
    }
}

pub fn seoul_course() -> Course {
    Course::new(vec![
        waypoint("a", 37.5, 127.0),
        waypoint("b", 37.55, 127.05),
        waypoint("c", 37.6, 127.1),
    ])
}
