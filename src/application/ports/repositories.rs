//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite / 内存）

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use thiserror::Error;

use crate::domain::author::Author;
use crate::domain::book::{Book, BookCategory, BookTag};
use crate::domain::course::OnlineCourse;
use crate::domain::documentation::Documentation;
use crate::domain::learning_path::LearningPath;
use crate::domain::shared::{EntityId, Record};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Book Repository
// ============================================================================

/// 搜索条件
///
/// `search_term` 为空时匹配全部；否则按书名做不区分大小写的子串匹配。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SearchCriteria {
    #[serde(default)]
    pub search_term: Option<String>,
}

impl SearchCriteria {
    pub fn by_title(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
        }
    }

    /// 规范化后的搜索词（去空白、小写），空串视为无条件
    pub fn normalized_term(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase)
    }

    pub fn matches(&self, book: &Book) -> bool {
        match self.normalized_term() {
            Some(term) => book.title().to_lowercase().contains(&term),
            None => true,
        }
    }
}

/// Book Repository Port
///
/// `find_many` / `search` 按创建时间倒序返回。
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 插入一本书，ID 已存在时返回 `Duplicate`
    async fn insert_one(&self, book: &Book) -> Result<(), RepositoryError>;

    /// 批量插入
    async fn insert_many(&self, books: &[Book]) -> Result<(), RepositoryError>;

    /// 整体替换，返回是否命中
    async fn update(&self, book: &Book) -> Result<bool, RepositoryError>;

    /// 批量替换，全部命中时返回 true
    async fn update_many(&self, books: &[Book]) -> Result<bool, RepositoryError>;

    /// 根据 ID 查找，不存在时返回 `NotFound`
    async fn find_one_by_id(&self, id: &EntityId) -> Result<Book, RepositoryError>;

    /// 获取全部书籍
    async fn find_many(&self) -> Result<Vec<Book>, RepositoryError>;

    /// 按条件搜索
    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Book>, RepositoryError>;

    /// 删除，返回是否命中
    async fn delete_one(&self, id: &EntityId) -> Result<bool, RepositoryError>;

    /// 批量删除，至少删除一条时返回 true
    async fn delete_many(&self, ids: &[EntityId]) -> Result<bool, RepositoryError>;
}

// ============================================================================
// Catalog Records
// ============================================================================

/// 目录记录仓储（作者、分类、标签、课程、文档、学习路径）
///
/// 记录整体写入、整体读取，`find_many` 按创建时间倒序返回。
#[async_trait]
pub trait RecordRepositoryPort<T: Record>: Send + Sync {
    /// 插入，ID 已存在时返回 `Duplicate`
    async fn insert_one(&self, record: &T) -> Result<(), RepositoryError>;

    /// 根据 ID 查找，不存在时返回 `NotFound`
    async fn find_one_by_id(&self, id: &EntityId) -> Result<T, RepositoryError>;

    async fn find_many(&self) -> Result<Vec<T>, RepositoryError>;
}

/// 一个存储后端提供的全部仓储
#[derive(Clone)]
pub struct Repositories {
    pub books: Arc<dyn BookRepositoryPort>,
    pub authors: Arc<dyn RecordRepositoryPort<Author>>,
    pub categories: Arc<dyn RecordRepositoryPort<BookCategory>>,
    pub tags: Arc<dyn RecordRepositoryPort<BookTag>>,
    pub online_courses: Arc<dyn RecordRepositoryPort<OnlineCourse>>,
    pub documentations: Arc<dyn RecordRepositoryPort<Documentation>>,
    pub learning_paths: Arc<dyn RecordRepositoryPort<LearningPath>>,
}
