//! HTTP Error Handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::ApplicationError;

/// 统一错误响应格式
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub errno: i32,
    pub error: String,
    pub code: &'static str,
    pub data: Option<()>,
}

impl ErrorResponse {
    pub fn new(errno: i32, code: &'static str, error: impl Into<String>) -> Self {
        Self {
            errno,
            error: error.into(),
            code,
            data: None,
        }
    }
}

/// 错误码定义
pub mod errno {
    pub const BAD_REQUEST: i32 = 400;
    pub const NOT_FOUND: i32 = 404;
    pub const CONFLICT: i32 = 409;
    pub const INTERNAL_ERROR: i32 = 500;
}

/// API 错误
///
/// HTTP 状态码始终为 200，错误信息放在 `errno` / `code` 中。
#[derive(Debug)]
pub enum ApiError {
    BadRequest { code: &'static str, message: String },
    NotFound { code: &'static str, message: String },
    Conflict(String),
    Internal(String),
}

impl ApiError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::BadRequest {
            code: "MalformedRequest",
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let response = match self {
            ApiError::BadRequest { code, message } => {
                tracing::warn!(errno = errno::BAD_REQUEST, code, error = %message, "Bad request");
                ErrorResponse::new(errno::BAD_REQUEST, code, message)
            }
            ApiError::NotFound { code, message } => {
                tracing::warn!(errno = errno::NOT_FOUND, code, error = %message, "Resource not found");
                ErrorResponse::new(errno::NOT_FOUND, code, message)
            }
            ApiError::Conflict(message) => {
                tracing::warn!(errno = errno::CONFLICT, error = %message, "Resource conflict");
                ErrorResponse::new(errno::CONFLICT, "Conflict", message)
            }
            ApiError::Internal(message) => {
                tracing::error!(errno = errno::INTERNAL_ERROR, error = %message, "Internal server error");
                // 内部细节只进日志
                ErrorResponse::new(errno::INTERNAL_ERROR, "InternalError", "Internal server error")
            }
        };

        (StatusCode::OK, Json(response)).into_response()
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::malformed(rejection.body_text())
    }
}

impl From<ApplicationError> for ApiError {
    fn from(e: ApplicationError) -> Self {
        let code = e.code();
        if e.is_validation() {
            return ApiError::BadRequest {
                code,
                message: e.to_string(),
            };
        }
        match e {
            ApplicationError::NotFound { .. } => ApiError::NotFound {
                code,
                message: e.to_string(),
            },
            ApplicationError::Conflict(message) => ApiError::Conflict(message),
            ApplicationError::RepositoryError(msg) => ApiError::Internal(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::RepositoryError;
    use crate::domain::book::BookError;
    use axum::body::to_bytes;

    async fn body_json(error: ApiError) -> serde_json::Value {
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_domain_error_maps_to_bad_request_with_code() {
        let error = ApiError::from(ApplicationError::from(BookError::InvalidYear("x".into())));
        let json = body_json(error).await;
        assert_eq!(json["errno"], 400);
        assert_eq!(json["code"], "InvalidBookYear");
        assert!(json["data"].is_null());
    }

    #[tokio::test]
    async fn test_not_found_maps_to_book_not_found() {
        let json = body_json(ApplicationError::not_found("Book", "abc").into()).await;
        assert_eq!(json["errno"], 404);
        assert_eq!(json["code"], "BookNotFound");
    }

    #[tokio::test]
    async fn test_conflict_maps_to_409() {
        let error: ApiError = ApplicationError::from(RepositoryError::Duplicate("abc".into())).into();
        let json = body_json(error).await;
        assert_eq!(json["errno"], 409);
        assert_eq!(json["code"], "Conflict");

        let json = body_json(ApplicationError::Conflict("Tag already exists: rust".into()).into()).await;
        assert_eq!(json["errno"], errno::CONFLICT);
        assert_eq!(json["error"], "Tag already exists: rust");
    }

    #[tokio::test]
    async fn test_new_validation_errors_map_to_bad_request() {
        use crate::domain::learning_path::LearningPathError;
        let error = ApiError::from(ApplicationError::from(LearningPathError::InvalidTitle("空".into())));
        let json = body_json(error).await;
        assert_eq!(json["errno"], 400);
        assert_eq!(json["code"], "InvalidLearningPathTitle");
    }

    #[tokio::test]
    async fn test_internal_details_are_hidden() {
        let error: ApiError = ApplicationError::HandlerNotRegistered("GetBook").into();
        let json = body_json(error).await;
        assert_eq!(json["errno"], 500);
        assert_eq!(json["error"], "Internal server error");
    }
}
