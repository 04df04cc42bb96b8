//! In-Memory Record Repository

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::application::ports::{RecordRepositoryPort, RepositoryError};
use crate::domain::shared::{EntityId, Record};

/// 内存记录仓储，每类记录一个实例
pub struct InMemoryRecordRepository<T> {
    records: DashMap<EntityId, (u64, T)>,
    next_seq: AtomicU64,
}

impl<T: Record> InMemoryRecordRepository<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<T: Record> Default for InMemoryRecordRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> RecordRepositoryPort<T> for InMemoryRecordRepository<T> {
    async fn insert_one(&self, record: &T) -> Result<(), RepositoryError> {
        let id = *record.id();
        match self.records.entry(id) {
            Entry::Occupied(_) => return Err(RepositoryError::Duplicate(id.to_string())),
            Entry::Vacant(slot) => {
                slot.insert((self.next_seq.fetch_add(1, Ordering::SeqCst), record.clone()));
            }
        }
        tracing::debug!(kind = T::KIND, id = %id, "Record stored in memory");
        Ok(())
    }

    async fn find_one_by_id(&self, id: &EntityId) -> Result<T, RepositoryError> {
        self.records
            .get(id)
            .map(|stored| stored.1.clone())
            .ok_or_else(|| RepositoryError::NotFound(id.to_string()))
    }

    async fn find_many(&self) -> Result<Vec<T>, RepositoryError> {
        let mut all: Vec<(u64, T)> = self
            .records
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        all.sort_by(|a, b| b.0.cmp(&a.0));
        Ok(all.into_iter().map(|(_, record)| record).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::book::BookTag;

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryRecordRepository::<BookTag>::new();
        let tag = BookTag::new("rust");
        repo.insert_one(&tag).await.unwrap();

        assert_eq!(repo.find_one_by_id(&tag.id).await.unwrap(), tag);
        assert!(matches!(
            repo.find_one_by_id(&EntityId::new()).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let repo = InMemoryRecordRepository::<BookTag>::new();
        let tag = BookTag::new("rust");
        repo.insert_one(&tag).await.unwrap();

        let renamed = BookTag {
            name: "async".to_string(),
            ..tag.clone()
        };
        assert!(matches!(
            repo.insert_one(&renamed).await,
            Err(RepositoryError::Duplicate(_))
        ));
        assert_eq!(repo.find_one_by_id(&tag.id).await.unwrap().name, "rust");
    }

    #[tokio::test]
    async fn test_find_many_newest_first() {
        let repo = InMemoryRecordRepository::<BookTag>::new();
        for name in ["a", "b", "c"] {
            repo.insert_one(&BookTag::new(name)).await.unwrap();
        }
        let names: Vec<_> = repo
            .find_many()
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["c", "b", "a"]);
    }
}
