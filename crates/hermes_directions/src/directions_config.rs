use std::time::Duration;

use anyhow::Context;

use crate::route_option::RouteOption;

pub const NAVER_CLIENT_ID_ENV_VAR: &str = "NAVER_MAPS_CLIENT_ID";
pub const NAVER_CLIENT_SECRET_ENV_VAR: &str = "NAVER_MAPS_CLIENT_SECRET";
pub const DRIVING_URL_ENV_VAR: &str = "HERMES_DRIVING_DIRECTIONS_URL";
pub const TRANSIT_URL_ENV_VAR: &str = "HERMES_TRANSIT_DIRECTIONS_URL";
pub const TRANSIT_API_KEY_ENV_VAR: &str = "HERMES_TRANSIT_API_KEY";
pub const TIMEOUT_ENV_VAR: &str = "HERMES_DIRECTIONS_TIMEOUT_SECS";
pub const ROUTE_OPTION_ENV_VAR: &str = "HERMES_DEFAULT_ROUTE_OPTION";

pub const NAVER_DRIVING_API_URL: &str =
    "https://naveropenapi.apigw.ntruss.com/map-direction/v1/driving";

#[derive(Clone)]
pub struct NaverCredentials {
    pub client_id: String,
    pub client_secret: String,
}

/// Settings for both directions clients. Credentials and the transit endpoint
/// are optional here: their absence is reported per call, not at start-up.
pub struct DirectionsConfig {
    pub credentials: Option<NaverCredentials>,
    pub driving_url: String,
    pub transit_url: Option<String>,
    pub transit_api_key: Option<String>,
    pub timeout: Duration,
    pub default_option: RouteOption,
}

impl Default for DirectionsConfig {
    fn default() -> Self {
        Self {
            credentials: None,
            driving_url: NAVER_DRIVING_API_URL.to_string(),
            transit_url: None,
            transit_api_key: None,
            timeout: Duration::from_secs(10),
            default_option: RouteOption::default(),
        }
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

impl DirectionsConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let defaults = DirectionsConfig::default();

        let credentials = match (
            non_empty_var(NAVER_CLIENT_ID_ENV_VAR),
            non_empty_var(NAVER_CLIENT_SECRET_ENV_VAR),
        ) {
            (Some(client_id), Some(client_secret)) => Some(NaverCredentials {
                client_id,
                client_secret,
            }),
            _ => None,
        };

        let timeout = match non_empty_var(TIMEOUT_ENV_VAR) {
            Some(value) => Duration::from_secs(
                value
                    .parse::<u64>()
                    .with_context(|| format!("{TIMEOUT_ENV_VAR} is not a number of seconds"))?,
            ),
            None => defaults.timeout,
        };

        let default_option = match non_empty_var(ROUTE_OPTION_ENV_VAR) {
            Some(value) => value
                .parse::<RouteOption>()
                .map_err(anyhow::Error::msg)?,
            None => defaults.default_option,
        };

        Ok(Self {
            credentials,
            driving_url: non_empty_var(DRIVING_URL_ENV_VAR).unwrap_or(defaults.driving_url),
            transit_url: non_empty_var(TRANSIT_URL_ENV_VAR),
            transit_api_key: non_empty_var(TRANSIT_API_KEY_ENV_VAR),
            timeout,
            default_option,
        })
    }
}
