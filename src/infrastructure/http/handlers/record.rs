//! Catalog Record HTTP Handlers
//!
//! 作者、分类、标签、课程、文档、学习路径的创建、获取和列表

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::{body, ApiResult};
use crate::application::{
    CatalogRecord, CreateAuthor, CreateCategory, CreateDocumentation, CreateLearningPath,
    CreateOnlineCourse, CreateTag, GetRecord, ListRecords,
};
use crate::domain::author::Author;
use crate::domain::book::{BookCategory, BookTag};
use crate::domain::course::OnlineCourse;
use crate::domain::documentation::Documentation;
use crate::domain::learning_path::LearningPath;
use crate::infrastructure::http::dto::{
    ApiResponse, CreateAuthorRequest, CreateDocumentationRequest, CreateLearningPathRequest,
    CreateOnlineCourseRequest, IdRequest, ListResponse, NameRequest,
};
use crate::infrastructure::http::state::AppState;

// ============================================================================
// Create
// ============================================================================

pub async fn create_author(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateAuthorRequest>, JsonRejection>,
) -> ApiResult<Author> {
    let req = body(payload)?;
    let author = state.commands.execute(CreateAuthor::from(req)).await?;
    Ok(Json(ApiResponse::success(author)))
}

/// 同名（不区分大小写）分类已存在时返回 409
pub async fn create_category(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NameRequest>, JsonRejection>,
) -> ApiResult<BookCategory> {
    let req = body(payload)?;
    let category = state.commands.execute(CreateCategory { name: req.name }).await?;
    Ok(Json(ApiResponse::success(category)))
}

pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NameRequest>, JsonRejection>,
) -> ApiResult<BookTag> {
    let req = body(payload)?;
    let tag = state.commands.execute(CreateTag { name: req.name }).await?;
    Ok(Json(ApiResponse::success(tag)))
}

pub async fn create_online_course(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateOnlineCourseRequest>, JsonRejection>,
) -> ApiResult<OnlineCourse> {
    let req = body(payload)?;
    let course = state.commands.execute(CreateOnlineCourse::from(req)).await?;
    Ok(Json(ApiResponse::success(course)))
}

pub async fn create_documentation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateDocumentationRequest>, JsonRejection>,
) -> ApiResult<Documentation> {
    let req = body(payload)?;
    let documentation = state.commands.execute(CreateDocumentation::from(req)).await?;
    Ok(Json(ApiResponse::success(documentation)))
}

pub async fn create_learning_path(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateLearningPathRequest>, JsonRejection>,
) -> ApiResult<LearningPath> {
    let req = body(payload)?;
    let path = state.commands.execute(CreateLearningPath::from(req)).await?;
    Ok(Json(ApiResponse::success(path)))
}

// ============================================================================
// Get / List
// ============================================================================

pub async fn get_record<T: CatalogRecord>(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> ApiResult<T> {
    let req = body(payload)?;
    let record = state.queries.execute(GetRecord::<T>::new(req.id)).await?;
    Ok(Json(ApiResponse::success(record)))
}

/// 按创建时间倒序列出
pub async fn list_records<T: CatalogRecord>(
    State(state): State<Arc<AppState>>,
) -> ApiResult<ListResponse<T>> {
    let records = state.queries.execute(ListRecords::<T>::new()).await?;
    Ok(Json(ApiResponse::success(ListResponse::from(records))))
}
