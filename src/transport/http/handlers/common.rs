use crate::app::ServiceError;
use crate::transport::http::types::{api_error, ApiError};
use axum::http::StatusCode;
use tracing::error;

/// Maps a service failure onto the response the client sees.
///
/// Validation messages go out verbatim. Storage failures are logged with their
/// detail and replaced by `fallback`, so driver text and connection settings
/// never leave the process.
pub fn service_error_response(err: ServiceError, fallback: &str) -> ApiError {
    match err {
        ServiceError::Validation(e) => api_error(StatusCode::BAD_REQUEST, e.to_string()),
        ServiceError::Storage(e) => {
            error!(error = %e, "{}", fallback);
            api_error(StatusCode::INTERNAL_SERVER_ERROR, fallback)
        }
    }
}
