use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Per-field violation messages, keyed by the request field name.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("validation failed")]
    Validation(FieldErrors),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("unauthenticated")]
    Unauthenticated(&'static str),

    #[error("admin role required")]
    Forbidden,

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Every body mirrors the HTTP status in a `status` field.
        let (status, body) = match self {
            ApiError::Validation(fields) => {
                let status = StatusCode::UNPROCESSABLE_ENTITY;
                (
                    status,
                    json!({
                        "status": status.as_u16(),
                        "validation_error": fields,
                    }),
                )
            }
            ApiError::InvalidCredentials => {
                let status = StatusCode::UNAUTHORIZED;
                (
                    status,
                    json!({
                        "status": status.as_u16(),
                        "message": "Invalid Credentials !",
                    }),
                )
            }
            ApiError::Unauthenticated(message) => {
                let status = StatusCode::UNAUTHORIZED;
                (
                    status,
                    json!({
                        "status": status.as_u16(),
                        "message": message,
                    }),
                )
            }
            ApiError::Forbidden => {
                let status = StatusCode::FORBIDDEN;
                (
                    status,
                    json!({
                        "status": status.as_u16(),
                        "message": "Admin role required",
                    }),
                )
            }
            ApiError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (
                    status,
                    json!({
                        "status": status.as_u16(),
                        "message": "Internal server error",
                    }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: ApiError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_maps_to_422_with_field_messages() {
        let mut fields = FieldErrors::new();
        fields.insert(
            "email".into(),
            vec!["The email has already been taken.".into()],
        );
        let (status, body) = body_json(ApiError::Validation(fields)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["status"], 422);
        assert_eq!(
            body["validation_error"]["email"][0],
            "The email has already been taken."
        );
    }

    #[tokio::test]
    async fn invalid_credentials_is_401_with_original_message() {
        let (status, body) = body_json(ApiError::InvalidCredentials).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Invalid Credentials !");
    }

    #[tokio::test]
    async fn forbidden_is_403_admin_message() {
        let (status, body) = body_json(ApiError::Forbidden).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["status"], 403);
        assert_eq!(body["message"], "Admin role required");
    }

    #[tokio::test]
    async fn unauthenticated_is_401() {
        let (status, body) =
            body_json(ApiError::Unauthenticated("Missing Authorization header")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["message"], "Missing Authorization header");
    }
}
