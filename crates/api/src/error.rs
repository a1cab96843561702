//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::{DomainError, ErrorClass};

/// API-level error type that maps to HTTP responses.
#[derive(Debug)]
pub enum ApiError {
    /// The payload could not be read as an order request.
    BadRequest(String),
    /// The order was refused by the fulfillment core.
    Domain(DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                serde_json::json!({ "error": msg }),
            ),
            ApiError::Domain(err) => {
                let status = domain_error_status(&err);
                if status.is_server_error() {
                    tracing::error!(error = %err, "order could not be processed");
                }
                (
                    status,
                    serde_json::json!({
                        "error": err.to_string(),
                        "violations": err.violations(),
                    }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Rejected requests are the client's to fix; transient ones are ours.
pub fn domain_error_status(err: &DomainError) -> StatusCode {
    match err.class() {
        ErrorClass::Rejected => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorClass::Transient => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Domain(err)
    }
}
