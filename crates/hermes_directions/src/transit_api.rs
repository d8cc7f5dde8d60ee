use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::{
    directions_config::{DirectionsConfig, TRANSIT_URL_ENV_VAR},
    directions_error::DirectionsError,
    geopoint::GeoPoint,
};

/// One transit itinerary, as returned by the transit provider. It is already
/// canonical and kept as is.
#[derive(Deserialize, Serialize, JsonSchema, Clone, Debug, PartialEq)]
pub struct TransitRoute {
    /// Minutes
    pub total_time: u64,
    /// Meters
    pub total_distance: f64,
    #[serde(default)]
    pub transfer_count: u32,
}

#[derive(Deserialize)]
struct TransitResponse {
    #[serde(default)]
    paths: Vec<TransitRoute>,
}

pub struct TransitDirectionsClientParams {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub timeout: std::time::Duration,
}

impl From<&DirectionsConfig> for TransitDirectionsClientParams {
    fn from(config: &DirectionsConfig) -> Self {
        Self {
            url: config.transit_url.clone(),
            api_key: config.transit_api_key.clone(),
            timeout: config.timeout,
        }
    }
}

pub struct TransitDirectionsClient {
    params: TransitDirectionsClientParams,
    client: reqwest::Client,
}

impl TransitDirectionsClient {
    pub fn new(params: TransitDirectionsClientParams) -> Result<Self, DirectionsError> {
        let client = reqwest::Client::builder().timeout(params.timeout).build()?;

        Ok(Self { params, client })
    }

    pub fn is_configured(&self) -> bool {
        self.params.url.is_some()
    }

    /// Takes the first itinerary the provider proposes.
    #[instrument(skip_all)]
    pub async fn route(
        &self,
        start: &GeoPoint,
        goal: &GeoPoint,
    ) -> Result<TransitRoute, DirectionsError> {
        let url = self.params.url.as_ref().ok_or_else(|| {
            DirectionsError::Configuration(format!("{TRANSIT_URL_ENV_VAR} must be set"))
        })?;

        let mut query = vec![
            ("sx", format!("{:?}", start.lng)),
            ("sy", format!("{:?}", start.lat)),
            ("ex", format!("{:?}", goal.lng)),
            ("ey", format!("{:?}", goal.lat)),
        ];
        if let Some(api_key) = &self.params.api_key {
            query.push(("apiKey", api_key.clone()));
        }

        let response = self.client.get(url).query(&query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::from_http_status(status, body));
        }

        let body: TransitResponse = serde_json::from_str(&response.text().await?)?;
        debug!("Transit provider proposed {} paths", body.paths.len());

        body.paths
            .into_iter()
            .next()
            .ok_or(DirectionsError::NoTransitPath)
    }
}
