use hermes_course::{
    course_aggregator::CourseAggregator, course_config::CourseConfig,
    session_manager::SessionManager,
};
use hermes_directions::{naver_api::NaverDirectionsClient, transit_api::TransitDirectionsClient};

pub type Aggregator = CourseAggregator<NaverDirectionsClient, TransitDirectionsClient>;

pub struct AppState {
    pub aggregator: Aggregator,
    pub course_config: CourseConfig,
    pub sessions: SessionManager,
}
