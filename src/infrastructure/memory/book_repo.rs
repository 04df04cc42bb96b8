//! In-Memory Book Repository

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::ports::{BookRepositoryPort, RepositoryError, SearchCriteria};
use crate::domain::book::Book;
use crate::domain::shared::EntityId;

struct StoredBook {
    book: Book,
    /// 插入序号，用于模拟按创建时间倒序
    seq: u64,
}

/// 内存书籍仓储
pub struct InMemoryBookRepository {
    books: DashMap<EntityId, StoredBook>,
    next_seq: AtomicU64,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            books: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    fn collect_newest_first(&self, criteria: &SearchCriteria) -> Vec<Book> {
        let mut matched: Vec<(u64, Book)> = self
            .books
            .iter()
            .filter(|entry| criteria.matches(&entry.book))
            .map(|entry| (entry.seq, entry.book.clone()))
            .collect();
        matched.sort_by(|a, b| b.0.cmp(&a.0));
        matched.into_iter().map(|(_, book)| book).collect()
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryPort for InMemoryBookRepository {
    async fn insert_one(&self, book: &Book) -> Result<(), RepositoryError> {
        let id = *book.id();
        match self.books.entry(id) {
            Entry::Occupied(_) => return Err(RepositoryError::Duplicate(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert(StoredBook {
                    book: book.clone(),
                    seq: self.next_seq.fetch_add(1, Ordering::SeqCst),
                });
            }
        }
        tracing::debug!(book_id = %id, "Book stored in memory");
        Ok(())
    }

    async fn insert_many(&self, books: &[Book]) -> Result<(), RepositoryError> {
        for book in books {
            self.insert_one(book).await?;
        }
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<bool, RepositoryError> {
        match self.books.get_mut(book.id()) {
            Some(mut stored) => {
                stored.book = book.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn update_many(&self, books: &[Book]) -> Result<bool, RepositoryError> {
        let mut all_matched = true;
        for book in books {
            all_matched &= self.update(book).await?;
        }
        Ok(all_matched)
    }

    async fn find_one_by_id(&self, id: &EntityId) -> Result<Book, RepositoryError> {
        self.books
            .get(id)
            .map(|stored| stored.book.clone())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn find_many(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.collect_newest_first(&SearchCriteria::default()))
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.collect_newest_first(criteria))
    }

    async fn delete_one(&self, id: &EntityId) -> Result<bool, RepositoryError> {
        Ok(self.books.remove(id).is_some())
    }

    async fn delete_many(&self, ids: &[EntityId]) -> Result<bool, RepositoryError> {
        let removed = ids.iter().filter(|id| self.books.remove(*id).is_some()).count();
        Ok(removed > 0)
    }
}
