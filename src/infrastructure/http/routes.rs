//! HTTP Routes
//!
//! API Endpoints:
//! - /api/ping            GET   健康检查
//! - /api/book/create     POST  创建书籍
//! - /api/book/update     POST  按顺序应用字段更新
//! - /api/book/delete     POST  删除书籍
//! - /api/book/get        POST  获取书籍详情
//! - /api/book/list       GET   列出所有书籍
//! - /api/book/search     POST  按书名搜索
//!
//! 作者、分类、标签、在线课程、文档、学习路径各自挂在
//! `/api/{author,category,tag,online-course,documentation,learning-path}` 下：
//! - create  POST  创建
//! - get     POST  按 ID 获取
//! - list    GET   列出全部（按创建时间倒序）

use axum::{
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;

use super::handlers;
use super::state::AppState;
use crate::application::CatalogRecord;
use crate::domain::author::Author;
use crate::domain::book::{BookCategory, BookTag};
use crate::domain::course::OnlineCourse;
use crate::domain::documentation::Documentation;
use crate::domain::learning_path::LearningPath;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new().nest("/api", api_routes())
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .nest("/book", book_routes())
        .nest("/author", record_routes::<Author>(post(handlers::create_author)))
        .nest("/category", record_routes::<BookCategory>(post(handlers::create_category)))
        .nest("/tag", record_routes::<BookTag>(post(handlers::create_tag)))
        .nest(
            "/online-course",
            record_routes::<OnlineCourse>(post(handlers::create_online_course)),
        )
        .nest(
            "/documentation",
            record_routes::<Documentation>(post(handlers::create_documentation)),
        )
        .nest(
            "/learning-path",
            record_routes::<LearningPath>(post(handlers::create_learning_path)),
        )
}

/// Book 路由
fn book_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", post(handlers::create_book))
        .route("/update", post(handlers::update_book))
        .route("/delete", post(handlers::delete_book))
        .route("/get", post(handlers::get_book))
        .route("/list", get(handlers::list_books))
        .route("/search", post(handlers::search_books))
}

/// 目录记录路由：create / get / list
fn record_routes<T: CatalogRecord>(
    create: MethodRouter<Arc<AppState>>,
) -> Router<Arc<AppState>> {
    Router::new()
        .route("/create", create)
        .route("/get", post(handlers::get_record::<T>))
        .route("/list", get(handlers::list_records::<T>))
}
