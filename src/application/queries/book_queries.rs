//! Book Queries

use crate::application::bus::Query;
use crate::domain::book::Book;

/// 获取单本书籍
#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: String,
}

impl Query for GetBook {
    const NAME: &'static str = "GetBook";
    type Output = Book;
}

/// 列出全部书籍
#[derive(Debug, Clone, Default)]
pub struct ListBooks;

impl Query for ListBooks {
    const NAME: &'static str = "ListBooks";
    type Output = Vec<Book>;
}

/// 按书名搜索
#[derive(Debug, Clone, Default)]
pub struct SearchBooks {
    pub search_term: Option<String>,
}

impl Query for SearchBooks {
    const NAME: &'static str = "SearchBooks";
    type Output = Vec<Book>;
}
