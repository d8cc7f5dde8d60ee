mod course;
mod directions;
mod docs;
mod error;
mod state;
#[cfg(test)]
mod test_utils;

use crate::course::sessions::{
    close_session_handler, get_session_handler, refresh_session_handler,
};
use crate::course::summary::summary_handler;
use crate::directions::driving::driving_handler;
use crate::docs::{schema_handler, schemas_index_handler};
use crate::state::AppState;
use axum::http::Method;
use axum::routing::{get, post};
use axum::{Router, serve};
use hermes_course::course_aggregator::CourseAggregator;
use hermes_course::course_config::CourseConfig;
use hermes_course::session_manager::SessionManager;
use hermes_directions::directions_config::DirectionsConfig;
use hermes_directions::naver_api::NaverDirectionsClient;
use hermes_directions::transit_api::TransitDirectionsClient;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{Level, info, warn};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const API_ADDRESS_ENV_VAR: &str = "HERMES_API_ADDRESS";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let directions_config = DirectionsConfig::from_env()?;
    let course_config = CourseConfig::from_env()?;

    let driving = NaverDirectionsClient::new((&directions_config).into())?;
    if !driving.is_configured() {
        warn!("Driving directions credentials are missing, driving legs will fail");
    }

    let transit = TransitDirectionsClient::new((&directions_config).into())?;
    if !transit.is_configured() {
        warn!("Transit directions endpoint is missing, transit legs will fail");
    }

    let aggregator = CourseAggregator::new(driving, transit)
        .with_route_option(directions_config.default_option)
        .with_concurrency(course_config.concurrency);

    let state = Arc::new(AppState {
        aggregator,
        course_config,
        sessions: SessionManager::new(course_config.session_ttl),
    });

    let eviction_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(
            (eviction_state.sessions.ttl() / 2).max(Duration::from_secs(1)),
        );
        loop {
            interval.tick().await;
            let evicted = eviction_state.sessions.evict_expired().await;
            if evicted > 0 {
                info!("Evicted {evicted} expired course sessions");
            }
        }
    });

    let cors_layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_origin(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/directions/driving", post(driving_handler))
        .route("/course/summary", post(summary_handler))
        .route(
            "/course/sessions/{session_id}",
            get(get_session_handler).delete(close_session_handler),
        )
        .route(
            "/course/sessions/{session_id}/refresh",
            post(refresh_session_handler),
        )
        .route("/docs/schemas", get(schemas_index_handler))
        .route("/docs/schemas/{name}", get(schema_handler))
        .layer(ServiceBuilder::new().layer(cors_layer))
        .with_state(state);

    let address =
        std::env::var(API_ADDRESS_ENV_VAR).unwrap_or_else(|_| String::from("127.0.0.1:8080"));
    let listener = tokio::net::TcpListener::bind(&address).await?;
    info!("Listening on {address}");

    serve(listener, app).await?;

    Ok(())
}
