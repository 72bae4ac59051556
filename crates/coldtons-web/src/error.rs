//! API error type with HTTP status mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use coldtons_catalog::CatalogError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing request input (400)
    #[error("{0}")]
    BadRequest(String),

    /// A catalogue needed for this request is not loaded (503)
    #[error("{0}")]
    Unavailable(String),

    /// Upstream service failure (502)
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Unavailable(_) => "UNAVAILABLE",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        match e {
            CatalogError::InvalidInput(_) | CatalogError::UnsupportedFormat(_) => {
                ApiError::BadRequest(e.to_string())
            }
            CatalogError::Upstream(_)
            | CatalogError::Timeout(_)
            | CatalogError::Malformed(_)
            | CatalogError::EmptyResult(_)
            | CatalogError::ColumnSchemaMismatch { .. } => ApiError::Upstream(e.to_string()),
            CatalogError::Export(_) => ApiError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }
        let body = ErrorBody { error: self.error_code(), message: self.to_string() };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_maps_to_bad_request() {
        let err: ApiError = CatalogError::InvalidInput("identifier must not be empty".into()).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let err: ApiError = CatalogError::UnsupportedFormat("xlsx".into()).into();
        assert_eq!(err.error_code(), "BAD_REQUEST");
    }

    #[test]
    fn test_upstream_failures_map_to_bad_gateway() {
        let err: ApiError = CatalogError::Timeout(std::time::Duration::from_secs(1)).into();
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_response_status() {
        let resp = ApiError::Unavailable("ATNF catalogue not loaded".into()).into_response();
        assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
    }
}
