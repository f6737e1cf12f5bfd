//! Maps backend HTTP error responses into the domain error taxonomy.

use common::BackendError;
use reqwest::StatusCode;
use serde::Deserialize;

/// Error body produced by the backend services.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Extracts the `message` field from an error body, falling back to the
/// raw body text when it does not parse.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
        }) => message,
        _ => body.to_string(),
    }
}

/// Translates an error status into a domain error.
///
/// Only not-found and unprocessable-entity are turned into domain errors;
/// every other status is an operational anomaly carried through with its
/// original status and body.
pub(crate) fn translate_status(status: StatusCode, body: &str) -> BackendError {
    match status {
        StatusCode::NOT_FOUND => BackendError::NotFound(error_message(body)),
        StatusCode::UNPROCESSABLE_ENTITY => BackendError::InvalidInput(error_message(body)),
        _ => {
            tracing::warn!(
                status = status.as_u16(),
                body,
                "unexpected error response from backend"
            );
            BackendError::UnexpectedStatus {
                status: status.as_u16(),
                message: body.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_extracts_message_field() {
        let err = translate_status(
            StatusCode::NOT_FOUND,
            r#"{"timestamp":"2024-01-01T00:00:00Z","path":"/product/13","status":404,"message":"Product 13 not found"}"#,
        );
        assert_eq!(err, BackendError::NotFound("Product 13 not found".to_string()));
        assert_eq!(err.to_string(), "Product 13 not found");
    }

    #[test]
    fn unprocessable_entity_becomes_invalid_input() {
        let err = translate_status(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"Invalid productId: -1"}"#,
        );
        assert_eq!(
            err,
            BackendError::InvalidInput("Invalid productId: -1".to_string())
        );
    }

    #[test]
    fn unparseable_body_falls_back_to_raw_text() {
        let err = translate_status(StatusCode::NOT_FOUND, "upstream connect error");
        assert_eq!(err.to_string(), "upstream connect error");
    }

    #[test]
    fn body_without_message_field_falls_back_to_raw_text() {
        let err = translate_status(StatusCode::NOT_FOUND, r#"{"status":404}"#);
        assert_eq!(err.to_string(), r#"{"status":404}"#);
    }

    #[test]
    fn other_statuses_pass_through_unchanged() {
        let err = translate_status(StatusCode::SERVICE_UNAVAILABLE, "down for maintenance");
        assert_eq!(
            err,
            BackendError::UnexpectedStatus {
                status: 503,
                message: "down for maintenance".to_string(),
            }
        );
    }
}
