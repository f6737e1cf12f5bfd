//! API error type with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::BackendError;

/// Gateway error response.
///
/// Carries the downstream's original message verbatim plus the gateway's
/// own request path, so a caller can tell which resource failed apart from
/// what went wrong downstream.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    path: String,
    message: String,
}

impl ApiError {
    /// Maps a backend error onto the gateway's response taxonomy.
    pub fn from_backend(path: impl Into<String>, err: BackendError) -> Self {
        let status = match &err {
            BackendError::NotFound(_) => StatusCode::NOT_FOUND,
            BackendError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            BackendError::UnexpectedStatus { .. } | BackendError::Transport(_) => {
                tracing::error!(error = %err, "unexpected backend failure");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        Self {
            status,
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Returns the HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "path": self.path,
            "status": self.status.as_u16(),
            "message": self.message,
        });
        (self.status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_maps_to_404() {
        let err = ApiError::from_backend(
            "/product-composite/13",
            BackendError::NotFound("No product found for productId: 13".to_string()),
        );
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn invalid_input_maps_to_422() {
        let err = ApiError::from_backend(
            "/product-composite",
            BackendError::InvalidInput("page size must be positive, got 0".to_string()),
        );
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unexpected_errors_map_to_500() {
        let err = ApiError::from_backend(
            "/product-composite/1",
            BackendError::UnexpectedStatus {
                status: 503,
                message: "unavailable".to_string(),
            },
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let err = ApiError::from_backend(
            "/product-composite/1",
            BackendError::Transport("connection refused".to_string()),
        );
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
