//! HTTP Handlers

use axum::{extract::rejection::JsonRejection, Json};

use super::dto::ApiResponse;
use super::error::ApiError;

mod book;
mod ping;
mod record;

pub use book::*;
pub use ping::*;
pub use record::*;

type ApiResult<T> = Result<Json<ApiResponse<T>>, ApiError>;

/// 请求体解析失败时返回 MalformedRequest 信封，而不是 axum 默认的 4xx 文本
fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(req)| req).map_err(ApiError::from)
}
