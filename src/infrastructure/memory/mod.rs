//! Memory Layer - 内存实现
//!
//! 内存版仓储，用于测试和无需持久化的运行模式

mod book_repo;
mod record_repo;

pub use book_repo::InMemoryBookRepository;
pub use record_repo::InMemoryRecordRepository;

use crate::application::ports::Repositories;
use crate::domain::author::Author;
use crate::domain::book::{BookCategory, BookTag};
use crate::domain::course::OnlineCourse;
use crate::domain::documentation::Documentation;
use crate::domain::learning_path::LearningPath;

/// 一组空的内存仓储
pub fn repositories() -> Repositories {
    Repositories {
        books: InMemoryBookRepository::new().arc(),
        authors: InMemoryRecordRepository::<Author>::new().arc(),
        categories: InMemoryRecordRepository::<BookCategory>::new().arc(),
        tags: InMemoryRecordRepository::<BookTag>::new().arc(),
        online_courses: InMemoryRecordRepository::<OnlineCourse>::new().arc(),
        documentations: InMemoryRecordRepository::<Documentation>::new().arc(),
        learning_paths: InMemoryRecordRepository::<LearningPath>::new().arc(),
    }
}

#[cfg(test)]
pub(crate) use book_repo::tests::sample_book;
