//! HTTP Middleware
//!
//! 传输层状态码日志。业务错误（errno != 0）在 `ApiError::into_response` 中记录。

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// 4xx/5xx 状态码记录日志，附带耗时
///
/// 业务接口总是返回 200，这里命中的通常是路由不存在、方法不匹配或 panic 之类的传输层问题
pub async fn error_logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;
    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::error!(%method, %uri, status = status.as_u16(), elapsed_ms, "HTTP server error");
    } else if status.is_client_error() {
        tracing::warn!(%method, %uri, status = status.as_u16(), elapsed_ms, "HTTP client error");
    }

    response
}
