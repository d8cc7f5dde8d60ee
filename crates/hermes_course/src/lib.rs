pub mod course;
pub mod course_aggregator;
pub mod course_config;
pub mod course_session;
pub mod leg_directions;
pub mod route_section;
pub mod session_manager;
pub mod transport_mode;
pub mod waypoint;

#[cfg(test)]
pub(crate) mod test_utils;
