pub mod directions_config;
pub mod directions_error;
pub mod driving_route;
pub mod geopoint;
pub mod naver_api;
pub mod route_option;
pub mod transit_api;
