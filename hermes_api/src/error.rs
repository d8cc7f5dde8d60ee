use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use hermes_directions::directions_error::DirectionsError;
use serde::Serialize;
use tracing::error;

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    /// The directions provider rejected the request
    Upstream { code: i64, message: String },
    InternalServerError(String),
    NotFound(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<i64>,
}

impl From<DirectionsError> for ApiError {
    fn from(error: DirectionsError) -> Self {
        match error {
            DirectionsError::Provider { code, message } => ApiError::Upstream { code, message },
            DirectionsError::NoRoute { .. } | DirectionsError::NoTransitPath => {
                ApiError::NotFound(error.to_string())
            }
            DirectionsError::Configuration(_)
            | DirectionsError::Request(_)
            | DirectionsError::Deserialize(_) => ApiError::InternalServerError(error.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, code) = match self {
            ApiError::InternalServerError(message) => {
                error!("{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, None)
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message, None),
            ApiError::Upstream { code, message } => (StatusCode::BAD_REQUEST, message, Some(code)),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message, None),
        };

        (status, Json(ErrorBody { error, code })).into_response()
    }
}
