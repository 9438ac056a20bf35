//! Error handling module
//!
//! Centralized error types and HTTP response conversion.
//! Every failure leaves the service as an envelope (see `api::envelope`).

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::envelope::{Envelope, ResponseCode};
use crate::validation::{MissingParameter, ValidationErrors};

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Invalid data: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Malformed JSON body: {0}")]
    MalformedBody(String),

    #[error("Malformed query string: {0}")]
    MalformedQuery(String),

    /// `code` differs by call site: lookup and update answer `NF`, delete
    /// answers `PF`
    #[error("Event not found: {id}")]
    EventNotFound { id: String, code: ResponseCode },

    /// Answered with status 200, not 4xx
    #[error(transparent)]
    MissingParameter(#[from] MissingParameter),
}

impl AppError {
    /// Not-found as reported by lookup and update
    pub fn event_not_found(id: impl Into<String>) -> Self {
        Self::EventNotFound {
            id: id.into(),
            code: ResponseCode::NotFound,
        }
    }

    /// Not-found as reported by delete
    pub fn delete_target_not_found(id: impl Into<String>) -> Self {
        Self::EventNotFound {
            id: id.into(),
            code: ResponseCode::PreconditionFailed,
        }
    }

    /// HTTP status this error is answered with
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::MalformedBody(_) | AppError::MalformedQuery(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::EventNotFound { .. } => StatusCode::NOT_FOUND,
            AppError::MissingParameter(_) => StatusCode::OK,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match self {
            // 400 Bad Request
            AppError::Validation(errors) => Envelope::invalid(errors),
            AppError::MalformedBody(detail) => {
                tracing::debug!(%detail, "Rejected unreadable body");
                Envelope::failure(ResponseCode::BadRequest, "Invalid JSON body")
            }
            AppError::MalformedQuery(detail) => {
                tracing::debug!(%detail, "Rejected unreadable query string");
                Envelope::failure(ResponseCode::BadRequest, "Invalid query string")
            }

            // 404 Not Found
            AppError::EventNotFound { code, .. } => Envelope::failure(code, "Event not found!"),

            // 200 with a failure code
            AppError::MissingParameter(_) => {
                Envelope::failure(ResponseCode::PreconditionFailed, "Event ID is required!")
            }
        };

        (status, Json(envelope)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn render(error: AppError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_not_found_codes_per_call_site() {
        let (status, body) = render(AppError::event_not_found("9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "code": "NF", "message": "Event not found!" }));

        let (status, body) = render(AppError::delete_target_not_found("9")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "code": "PF", "message": "Event not found!" }));
    }

    #[tokio::test]
    async fn test_missing_parameter_is_200() {
        let (status, body) = render(MissingParameter("id").into()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "code": "PF", "message": "Event ID is required!" }));
    }

    #[tokio::test]
    async fn test_validation_is_400_with_errors() {
        let (status, body) = render(AppError::Validation(ValidationErrors::new())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "BR");
        assert_eq!(body["errors"], json!([]));
    }

    #[tokio::test]
    async fn test_unreadable_input_hides_detail() {
        let (status, body) = render(AppError::MalformedQuery("duplicate field `tipo`".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "code": "BR", "message": "Invalid query string" }));

        let (status, body) = render(AppError::MalformedBody("EOF while parsing".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({ "code": "BR", "message": "Invalid JSON body" }));
    }
}
