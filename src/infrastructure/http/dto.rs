//! Data Transfer Objects

use serde::{Deserialize, Serialize};

use crate::application::{
    ContentOutline, CourseOutline, CreateAuthor, CreateBook, CreateDocumentation, CreateLearningPath,
    CreateOnlineCourse, DocumentationOutline, LearningResourceInput,
};
use crate::domain::book::{
    Book, BookAuthor, BookCategory, BookContent, BookSourceProps, BookTag, BookUpdate,
};

// ============================================================================
// 统一响应结构
// ============================================================================

/// 统一 API 响应格式
///
/// 成功时 `errno = 0`，`code` 省略；失败时见 `ApiError`。
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub errno: i32,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<&'static str>,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    /// 成功响应
    pub fn success(data: T) -> Self {
        Self {
            errno: 0,
            error: String::new(),
            code: None,
            data: Some(data),
        }
    }
}

// ============================================================================
// Book DTOs
// ============================================================================

/// 创建书籍请求，`authors` / `categories` / `tags` 是已创建记录的 ID
#[derive(Debug, Deserialize)]
pub struct CreateBookRequest {
    pub isbn: String,
    pub title: String,
    pub edition: f64,
    pub cover: String,
    pub year: f64,
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub sources: Vec<BookSourceProps>,
    pub contents: Vec<ContentOutline>,
}

impl From<CreateBookRequest> for CreateBook {
    fn from(req: CreateBookRequest) -> Self {
        Self {
            isbn: req.isbn,
            title: req.title,
            edition: req.edition,
            cover: req.cover,
            year: req.year,
            authors: req.authors,
            description: req.description,
            categories: req.categories,
            tags: req.tags,
            sources: req.sources,
            contents: req.contents,
        }
    }
}

/// 更新书籍请求，`updates` 形如 `[{ "field": "title", "value": "..." }]`
#[derive(Debug, Deserialize)]
pub struct UpdateBookRequest {
    pub id: String,
    pub updates: Vec<BookUpdate>,
}

/// 按 ID 操作的请求（获取、删除）
#[derive(Debug, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchBooksRequest {
    #[serde(default)]
    pub search_term: Option<String>,
}

/// 书籍响应
#[derive(Debug, Serialize)]
pub struct BookResponse {
    pub id: String,
    pub isbn: String,
    pub title: String,
    pub edition: u32,
    pub cover: String,
    pub year: i32,
    pub authors: Vec<BookAuthor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub categories: Vec<BookCategory>,
    pub tags: Vec<BookTag>,
    pub sources: Vec<BookSourceProps>,
    pub contents: Vec<BookContent>,
}

impl From<&Book> for BookResponse {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id().to_string(),
            isbn: book.isbn().to_string(),
            title: book.title().to_string(),
            edition: book.edition(),
            cover: book.cover().to_string(),
            year: book.year(),
            authors: book.authors().to_vec(),
            description: book.description().map(str::to_string),
            categories: book.categories().to_vec(),
            tags: book.tags().to_vec(),
            sources: book.sources().iter().map(BookSourceProps::from).collect(),
            contents: book.contents().to_vec(),
        }
    }
}

/// 书籍列表响应
#[derive(Debug, Serialize)]
pub struct BookListResponse {
    pub total: usize,
    pub books: Vec<BookResponse>,
}

impl From<Vec<Book>> for BookListResponse {
    fn from(books: Vec<Book>) -> Self {
        Self {
            total: books.len(),
            books: books.iter().map(BookResponse::from).collect(),
        }
    }
}

/// 删除书籍响应
#[derive(Debug, Serialize)]
pub struct DeleteBookResponse {
    pub id: String,
    pub deleted: bool,
}

// ============================================================================
// Shared Collection DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateAuthorRequest {
    pub first_name: String,
    #[serde(default)]
    pub last_name_1: Option<String>,
    #[serde(default)]
    pub last_name_2: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

impl From<CreateAuthorRequest> for CreateAuthor {
    fn from(req: CreateAuthorRequest) -> Self {
        Self {
            first_name: req.first_name,
            last_name_1: req.last_name_1,
            last_name_2: req.last_name_2,
            image: req.image,
        }
    }
}

/// 创建分类或标签
#[derive(Debug, Deserialize)]
pub struct NameRequest {
    pub name: String,
}

// ============================================================================
// Course / Documentation / Learning Path DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateOnlineCourseRequest {
    pub name: String,
    #[serde(default)]
    pub contents: Vec<CourseOutline>,
}

impl From<CreateOnlineCourseRequest> for CreateOnlineCourse {
    fn from(req: CreateOnlineCourseRequest) -> Self {
        Self {
            name: req.name,
            contents: req.contents,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateDocumentationRequest {
    pub name: String,
    #[serde(default)]
    pub contents: Vec<DocumentationOutline>,
}

impl From<CreateDocumentationRequest> for CreateDocumentation {
    fn from(req: CreateDocumentationRequest) -> Self {
        Self {
            name: req.name,
            contents: req.contents,
        }
    }
}

/// 创建学习路径请求
///
/// 资源形如 `{ "id", "name", "duration", "order", "type": "BOOK_CHAPTER", "book": "<id>" }`
#[derive(Debug, Deserialize)]
pub struct CreateLearningPathRequest {
    pub title: String,
    pub initial_date: String,
    #[serde(default)]
    pub resources: Vec<LearningResourceInput>,
}

impl From<CreateLearningPathRequest> for CreateLearningPath {
    fn from(req: CreateLearningPathRequest) -> Self {
        Self {
            title: req.title,
            initial_date: req.initial_date,
            resources: req.resources,
        }
    }
}

/// 记录列表响应
#[derive(Debug, Serialize)]
pub struct ListResponse<T: Serialize> {
    pub total: usize,
    pub items: Vec<T>,
}

impl<T: Serialize> From<Vec<T>> for ListResponse<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            total: items.len(),
            items,
        }
    }
}
