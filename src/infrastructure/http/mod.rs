//! HTTP Layer - JSON API
//!
//! 所有响应使用 `{errno, error, code, data}` 信封，HTTP 状态码固定 200

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use error::ApiError;
pub use routes::create_routes;
pub use server::{HttpServer, ServerConfig};
pub use state::AppState;
