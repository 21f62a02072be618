//! Error types and handling for the `GeoProxy` API

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Domain error taxonomy for the proxy endpoints.
///
/// Every failure a handler can surface falls into one of three classes.
/// `Upstream` deliberately maps to 404 alongside `NotFound`: the API does
/// not distinguish "country does not exist" from "dependency unreachable".
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or out-of-range request parameters
    #[error("{0}")]
    InvalidInput(String),

    /// The requested resource does not exist upstream
    #[error("{0}")]
    NotFound(String),

    /// Transport failure or non-success status from a dependency
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    /// HTTP status this error maps to at the handler boundary
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::Upstream(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(json!({ "message": self.to_string() }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

/// Wrap a transport-level failure against a named upstream service
pub(crate) fn upstream_unreachable(service: &str, err: &reqwest::Error) -> ApiError {
    ApiError::Upstream(format!("{service} service unreachable: {err}"))
}
