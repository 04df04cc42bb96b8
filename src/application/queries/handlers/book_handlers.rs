//! Book Query Handlers

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::QueryHandler;
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, SearchCriteria};
use crate::application::queries::{GetBook, ListBooks, SearchBooks};
use crate::domain::book::Book;
use crate::domain::shared::EntityId;

// ============================================================================
// GetBook
// ============================================================================

pub struct GetBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl GetBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }
}

#[async_trait]
impl QueryHandler<GetBook> for GetBookHandler {
    async fn handle(&self, query: GetBook) -> Result<Book, ApplicationError> {
        let id = EntityId::parse(&query.book_id)?;
        self.book_repo
            .find_one_by_id(&id)
            .await
            .map_err(|e| ApplicationError::lookup("Book", &id, e))
    }
}

// ============================================================================
// ListBooks
// ============================================================================

pub struct ListBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl ListBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }
}

#[async_trait]
impl QueryHandler<ListBooks> for ListBooksHandler {
    async fn handle(&self, _query: ListBooks) -> Result<Vec<Book>, ApplicationError> {
        let books = self.book_repo.find_many().await?;
        tracing::debug!(count = books.len(), "Books listed");
        Ok(books)
    }
}

// ============================================================================
// SearchBooks
// ============================================================================

/// SearchBooks Handler - 按书名不区分大小写匹配，空搜索词返回全部
pub struct SearchBooksHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl SearchBooksHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }
}

#[async_trait]
impl QueryHandler<SearchBooks> for SearchBooksHandler {
    async fn handle(&self, query: SearchBooks) -> Result<Vec<Book>, ApplicationError> {
        let criteria = query
            .search_term
            .map(SearchCriteria::by_title)
            .unwrap_or_default();
        let books = self.book_repo.search(&criteria).await?;
        tracing::debug!(
            search_term = ?criteria.search_term,
            count = books.len(),
            "Books searched"
        );
        Ok(books)
    }
}
