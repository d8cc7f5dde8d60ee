use fxhash::FxHashMap;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    directions_config::{
        DirectionsConfig, NAVER_CLIENT_ID_ENV_VAR, NAVER_CLIENT_SECRET_ENV_VAR, NaverCredentials,
    },
    directions_error::DirectionsError,
    driving_route::{
        DrivingRequest, DrivingRoute, DrivingSummary, MAX_WAYPOINTS, PathSection,
        estimate_section_duration,
    },
    geopoint::GeoPoint,
    route_option::RouteOption,
};

pub const NAVER_API_KEY_ID_HEADER: &str = "X-NCP-APIGW-API-KEY-ID";
pub const NAVER_API_KEY_HEADER: &str = "X-NCP-APIGW-API-KEY";

const NAVER_SUCCESS_CODE: i64 = 0;

/// `[lng, lat]`
pub type NaverPoint = [f64; 2];

#[derive(Deserialize)]
pub struct NaverDirectionsResponse {
    /// Application level status, `0` on success regardless of the HTTP status
    pub code: i64,

    #[serde(default)]
    pub message: String,

    /// Routes keyed by the option name they were computed for
    #[serde(default)]
    pub route: FxHashMap<String, Vec<NaverRoute>>,
}

#[derive(Debug, Deserialize)]
pub struct NaverRoute {
    pub summary: NaverSummary,

    #[serde(default)]
    pub path: Vec<NaverPoint>,

    #[serde(default)]
    pub section: Vec<NaverSection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverSummary {
    pub distance: f64,
    pub duration: u64,
    pub toll_fare: Option<f64>,
    pub fuel_price: Option<f64>,
    pub taxi_fare: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NaverSection {
    #[serde(default)]
    pub point_index: usize,
    #[serde(default)]
    pub point_count: usize,
    pub distance: f64,
    /// Frequently omitted by the provider
    pub duration: Option<u64>,
    pub name: Option<String>,
    pub congestion: Option<i64>,
    pub speed: Option<f64>,
}

impl NaverRoute {
    pub fn into_driving_route(self, option: RouteOption) -> DrivingRoute {
        let total_distance = self.summary.distance;
        let total_duration = self.summary.duration;

        let sections = self
            .section
            .into_iter()
            .map(|section| PathSection {
                duration: section.duration.unwrap_or_else(|| {
                    estimate_section_duration(section.distance, total_distance, total_duration)
                }),
                distance: section.distance,
                point_index: section.point_index,
                point_count: section.point_count,
                name: section.name,
                congestion: section.congestion,
                speed: section.speed,
            })
            .collect();

        DrivingRoute {
            option,
            path: self.path.into_iter().map(GeoPoint::from_lng_lat).collect(),
            summary: DrivingSummary {
                distance: total_distance,
                duration: total_duration,
                toll_fare: self.summary.toll_fare,
                fuel_price: self.summary.fuel_price,
                taxi_fare: self.summary.taxi_fare,
            },
            sections,
        }
    }
}

fn take_route(
    routes: &mut FxHashMap<String, Vec<NaverRoute>>,
    option: RouteOption,
) -> Option<NaverRoute> {
    routes
        .remove(option.key())
        .and_then(|candidates| candidates.into_iter().next())
}

/// Picks the route computed for `requested`, or the fallback option's route
/// when the provider left the requested one out. Returns the option served.
pub fn select_route(
    mut routes: FxHashMap<String, Vec<NaverRoute>>,
    requested: RouteOption,
) -> Result<(RouteOption, NaverRoute), DirectionsError> {
    if let Some(route) = take_route(&mut routes, requested) {
        return Ok((requested, route));
    }

    let fallback = RouteOption::FALLBACK;
    if requested != fallback {
        debug!("Option {requested} absent from response, falling back to {fallback}");
        if let Some(route) = take_route(&mut routes, fallback) {
            return Ok((fallback, route));
        }
    }

    Err(DirectionsError::NoRoute {
        requested,
        fallback,
    })
}

/// Query parameters in provider order: every coordinate is `lng,lat`.
pub fn build_query(request: &DrivingRequest) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("start", request.start.lng_lat().to_string()),
        ("goal", request.goal.lng_lat().to_string()),
    ];

    let waypoints = request.capped_waypoints();
    if !waypoints.is_empty() {
        let waypoints = waypoints
            .iter()
            .map(|point| point.lng_lat().to_string())
            .collect::<Vec<_>>()
            .join("|");
        query.push(("waypoints", waypoints));
    }

    query.push(("option", request.option.key().to_string()));
    query
}

pub struct NaverDirectionsClientParams {
    pub credentials: Option<NaverCredentials>,
    pub url: String,
    pub timeout: std::time::Duration,
}

impl From<&DirectionsConfig> for NaverDirectionsClientParams {
    fn from(config: &DirectionsConfig) -> Self {
        Self {
            credentials: config.credentials.clone(),
            url: config.driving_url.clone(),
            timeout: config.timeout,
        }
    }
}

pub struct NaverDirectionsClient {
    params: NaverDirectionsClientParams,
    client: reqwest::Client,
}

impl NaverDirectionsClient {
    pub fn new(params: NaverDirectionsClientParams) -> Result<Self, DirectionsError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self { params, client })
    }

    pub fn is_configured(&self) -> bool {
        self.params.credentials.is_some()
    }

    #[instrument(skip_all, fields(option = %request.option))]
    pub async fn route(&self, request: &DrivingRequest) -> Result<DrivingRoute, DirectionsError> {
        let credentials = self.params.credentials.as_ref().ok_or_else(|| {
            DirectionsError::Configuration(format!(
                "{NAVER_CLIENT_ID_ENV_VAR} and {NAVER_CLIENT_SECRET_ENV_VAR} must be set"
            ))
        })?;

        if request.waypoints.len() > MAX_WAYPOINTS {
            debug!(
                "Dropping {} waypoints beyond the first {MAX_WAYPOINTS}",
                request.waypoints.len() - MAX_WAYPOINTS
            );
        }

        let response = self
            .client
            .get(&self.params.url)
            .header(NAVER_API_KEY_ID_HEADER, &credentials.client_id)
            .header(NAVER_API_KEY_HEADER, &credentials.client_secret)
            .query(&build_query(request))
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        let body = match serde_json::from_str::<NaverDirectionsResponse>(&text) {
            Ok(body) if body.code != NAVER_SUCCESS_CODE => {
                return Err(DirectionsError::Provider {
                    code: body.code,
                    message: body.message,
                });
            }
            Ok(body) if status.is_success() => body,
            Err(error) if status.is_success() => return Err(DirectionsError::Deserialize(error)),
            _ => return Err(DirectionsError::from_http_status(status, text)),
        };

        let (option, route) = select_route(body.route, request.option)?;
        let route = route.into_driving_route(option);
        debug!(
            "Resolved {option} route: {} m, {} ms, {} points",
            route.summary.distance,
            route.summary.duration,
            route.path.len()
        );

        Ok(route)
    }
}
