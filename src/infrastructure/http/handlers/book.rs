//! Book HTTP Handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use std::sync::Arc;

use super::{body, ApiResult};
use crate::application::{CreateBook, DeleteBook, GetBook, ListBooks, SearchBooks, UpdateBook};
use crate::infrastructure::http::dto::{
    ApiResponse, BookListResponse, BookResponse, CreateBookRequest, DeleteBookResponse,
    IdRequest, SearchBooksRequest, UpdateBookRequest,
};
use crate::infrastructure::http::state::AppState;

/// 创建书籍
pub async fn create_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> ApiResult<BookResponse> {
    let req = body(payload)?;
    let book = state.commands.execute(CreateBook::from(req)).await?;
    Ok(Json(ApiResponse::success(BookResponse::from(&book))))
}

/// 按顺序应用一组字段更新
pub async fn update_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> ApiResult<BookResponse> {
    let req = body(payload)?;
    let book = state
        .commands
        .execute(UpdateBook {
            book_id: req.id,
            updates: req.updates,
        })
        .await?;
    Ok(Json(ApiResponse::success(BookResponse::from(&book))))
}

pub async fn delete_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> ApiResult<DeleteBookResponse> {
    let req = body(payload)?;
    state
        .commands
        .execute(DeleteBook {
            book_id: req.id.clone(),
        })
        .await?;
    Ok(Json(ApiResponse::success(DeleteBookResponse {
        id: req.id,
        deleted: true,
    })))
}

pub async fn get_book(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> ApiResult<BookResponse> {
    let req = body(payload)?;
    let book = state.queries.execute(GetBook { book_id: req.id }).await?;
    Ok(Json(ApiResponse::success(BookResponse::from(&book))))
}

/// 列出所有书籍（按创建时间倒序）
pub async fn list_books(State(state): State<Arc<AppState>>) -> ApiResult<BookListResponse> {
    let books = state.queries.execute(ListBooks).await?;
    Ok(Json(ApiResponse::success(BookListResponse::from(books))))
}

/// 按书名搜索，空搜索词等同于列表
pub async fn search_books(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<SearchBooksRequest>, JsonRejection>,
) -> ApiResult<BookListResponse> {
    let req = body(payload)?;
    let books = state
        .queries
        .execute(SearchBooks {
            search_term: req.search_term,
        })
        .await?;
    Ok(Json(ApiResponse::success(BookListResponse::from(books))))
}
