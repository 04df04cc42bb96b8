//! SQLite Persistence - SQLite 数据库持久化实现

mod book_repo;
mod database;
mod record_repo;

pub use book_repo::SqliteBookRepository;
pub use database::*;
pub use record_repo::SqliteRecordRepository;

use std::sync::Arc;

use crate::application::ports::Repositories;
use crate::domain::author::Author;
use crate::domain::book::{BookCategory, BookTag};
use crate::domain::course::OnlineCourse;
use crate::domain::documentation::Documentation;
use crate::domain::learning_path::LearningPath;

/// 共用一个连接池的全部 SQLite 仓储
pub fn repositories(pool: DbPool) -> Repositories {
    Repositories {
        books: Arc::new(SqliteBookRepository::new(pool.clone())),
        authors: Arc::new(SqliteRecordRepository::<Author>::new(pool.clone())),
        categories: Arc::new(SqliteRecordRepository::<BookCategory>::new(pool.clone())),
        tags: Arc::new(SqliteRecordRepository::<BookTag>::new(pool.clone())),
        online_courses: Arc::new(SqliteRecordRepository::<OnlineCourse>::new(pool.clone())),
        documentations: Arc::new(SqliteRecordRepository::<Documentation>::new(pool.clone())),
        learning_paths: Arc::new(SqliteRecordRepository::<LearningPath>::new(pool)),
    }
}
