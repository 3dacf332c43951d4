use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::errors::{CoreError, CoreErrorKind};
use crate::i18n::{Translator, DEFAULT_LOCALE};

/// Error returned from handlers, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError {
    pub error: CoreError,
    /// Label used when the failure is logged, e.g. "people-graph"
    pub context: &'static str,
}

impl ApiError {
    pub fn new(context: &'static str, error: CoreError) -> Self {
        Self { error, context }
    }

    /// Rejection for requests without a valid session.
    pub fn unauthorized(context: &'static str) -> Self {
        let message = Translator::new(DEFAULT_LOCALE, Some("errors")).t("unauthorized");
        Self::new(context, CoreError::unauthorized(message))
    }

    pub fn status(&self) -> StatusCode {
        match self.error.kind() {
            CoreErrorKind::NotFound => StatusCode::NOT_FOUND,
            CoreErrorKind::Validation => StatusCode::BAD_REQUEST,
            CoreErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            CoreErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        Self::new("api", error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(context = self.context, error = %self.error, "request failed");
            Translator::new(DEFAULT_LOCALE, Some("errors")).t("internal")
        } else {
            tracing::debug!(context = self.context, error = %self.error, "request rejected");
            self.error.message().to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::Value;

    async fn body_of(error: ApiError) -> (StatusCode, Value) {
        let response = error.into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_status_mapping() {
        let cases = [
            (CoreError::not_found("Person", "1"), StatusCode::NOT_FOUND),
            (CoreError::validation("bad"), StatusCode::BAD_REQUEST),
            (CoreError::unauthorized("no"), StatusCode::UNAUTHORIZED),
            (CoreError::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (error, expected) in cases {
            assert_eq!(ApiError::new("test", error).status(), expected);
        }
    }

    #[tokio::test]
    async fn test_internal_error_body_is_generic() {
        let error = CoreError::internal("connection string secret=hunter2");
        let (status, body) = body_of(ApiError::new("people-graph", error)).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error" }));
        assert!(!body.to_string().contains("hunter2"));
    }

    #[tokio::test]
    async fn test_client_error_body_carries_message() {
        let error = CoreError::not_found("Person", "42");
        let (status, body) = body_of(ApiError::new("people-graph", error)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Person not found" }));

        let (status, body) = body_of(ApiError::unauthorized("auth")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({ "error": "Unauthorized" }));
    }
}
