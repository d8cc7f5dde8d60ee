use reqwest::StatusCode;
use thiserror::Error;

use crate::route_option::RouteOption;

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("Directions provider is not configured: {0}")]
    Configuration(String),

    #[error("Provider error: {code} - {message}")]
    Provider { code: i64, message: String },

    #[error("No route found for option {requested} (fallback {fallback} also absent)")]
    NoRoute {
        requested: RouteOption,
        fallback: RouteOption,
    },

    #[error("Transit provider proposed no path")]
    NoTransitPath,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

impl DirectionsError {
    /// Maps a failed HTTP exchange whose body is not a provider envelope.
    /// Rejected credentials are a server-side misconfiguration, not a
    /// provider answer about the route.
    pub fn from_http_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DirectionsError::Configuration(
                format!("Provider rejected the credentials ({status}): {body}"),
            ),
            _ => DirectionsError::Provider {
                code: status.as_u16().into(),
                message: body,
            },
        }
    }

    /// Whether a caller may retry the same request. Nothing is retried internally.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            DirectionsError::Provider { .. } | DirectionsError::Request(_)
        )
    }
}
