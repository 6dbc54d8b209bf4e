/**
 * Error Conversion
 *
 * `IntoResponse` for `BackendError`, so handlers can return it directly.
 *
 * # Response Format
 *
 * Validation and conflict errors carry a list, as the web client expects:
 * ```json
 * { "errors": [ { "msg": "Please include a valid email address", "param": "email" } ] }
 * ```
 *
 * Everything else carries a single message:
 * ```json
 * { "msg": "Post not found" }
 * ```
 */

use axum::{
    response::{IntoResponse, Response},
    Json,
};

use crate::backend::error::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if self.is_internal() {
            tracing::error!("Request failed: {}", self);
        }

        let body = match self.field_errors() {
            Some(errors) => serde_json::json!({ "errors": errors }),
            None => serde_json::json!({ "msg": self.message() }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::error::types::{FieldError, SERVER_ERROR_MESSAGE};
    use axum::body::to_bytes;
    use axum::http::StatusCode;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_response() {
        let response = BackendError::validation(vec![
            FieldError::new("email", "Please include a valid email address"),
            FieldError::new("gender", "gender is required"),
        ])
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["errors"][0]["param"], "email");
        assert_eq!(body["errors"][1]["msg"], "gender is required");
    }

    #[tokio::test]
    async fn test_conflict_response() {
        let response = BackendError::conflict("User already exists").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "errors": [{ "msg": "User already exists" }] }));
    }

    #[tokio::test]
    async fn test_message_response() {
        let response = BackendError::not_found("Post not found").into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await, serde_json::json!({ "msg": "Post not found" }));
    }

    #[tokio::test]
    async fn test_internal_response_hides_details() {
        let response = BackendError::internal("pool timed out").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert_eq!(body, serde_json::json!({ "msg": SERVER_ERROR_MESSAGE }));
    }
}
