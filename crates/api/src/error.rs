//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use processing::ProcessingError;
use store::StoreError;

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// Resource not found.
    NotFound(String),
    /// Bad request from the client.
    BadRequest(String),
    /// Domain validation error.
    Domain(DomainError),
    /// Order processing error.
    Processing(ProcessingError),
    /// Store error outside of processing.
    Store(StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Domain(err) => (domain_status(&err), err.to_string()),
            ApiError::Processing(err) => processing_error_to_response(err),
            ApiError::Store(err) => (store_status(&err), err.to_string()),
        };

        if status.is_server_error() {
            tracing::error!(%status, error = %message, "request failed");
        }

        let body = serde_json::json!({ "error": message });
        (status, axum::Json(body)).into_response()
    }
}

fn domain_status(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidQuantity { .. } => StatusCode::BAD_REQUEST,
        DomainError::InvalidStatusTransition { .. } => StatusCode::CONFLICT,
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::CustomerNotFound(_) => StatusCode::NOT_FOUND,
        StoreError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn processing_error_to_response(err: ProcessingError) -> (StatusCode, String) {
    let status = match &err {
        ProcessingError::Domain(domain_err) => domain_status(domain_err),
        ProcessingError::Store(store_err) => store_status(store_err),
        ProcessingError::RuleFailed { .. } => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}

impl From<ProcessingError> for ApiError {
    fn from(err: ProcessingError) -> Self {
        ApiError::Processing(err)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Store(err)
    }
}
