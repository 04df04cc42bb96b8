//! SQLite Record Repository
//!
//! 所有目录记录共用一张 `records` 表，`collection` 列区分记录种类。
//! 文档读取后要再通过一次 `Record::check`。

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;
use std::marker::PhantomData;

use super::DbPool;
use crate::application::ports::{RecordRepositoryPort, RepositoryError};
use crate::domain::shared::{EntityId, Record};

/// SQLite 记录仓储
pub struct SqliteRecordRepository<T> {
    pool: DbPool,
    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SqliteRecordRepository<T> {
    pub fn new(pool: DbPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }
}

#[derive(FromRow)]
struct RecordRow {
    id: String,
    document: String,
}

impl RecordRow {
    fn rehydrate<T: Record>(self) -> Result<T, RepositoryError> {
        let record: T = serde_json::from_str(&self.document)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        record.check().map_err(|e| {
            tracing::error!(kind = T::KIND, id = %self.id, error = %e, "Stored record failed validation");
            RepositoryError::SerializationError(format!("{} {}: {}", T::KIND, self.id, e))
        })?;
        Ok(record)
    }
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

#[async_trait]
impl<T: Record> RecordRepositoryPort<T> for SqliteRecordRepository<T> {
    async fn insert_one(&self, record: &T) -> Result<(), RepositoryError> {
        let id = record.id();
        let document = serde_json::to_string(record)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;

        sqlx::query(
            "INSERT INTO records (collection, id, document, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(T::KIND)
        .bind(id.to_string())
        .bind(document)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            let duplicate = e
                .as_database_error()
                .map_or(false, |db| db.is_unique_violation());
            if duplicate {
                RepositoryError::Duplicate(id.to_string())
            } else {
                db_error(e)
            }
        })?;

        tracing::debug!(kind = T::KIND, id = %id, "Record inserted");
        Ok(())
    }

    async fn find_one_by_id(&self, id: &EntityId) -> Result<T, RepositoryError> {
        let row: Option<RecordRow> =
            sqlx::query_as("SELECT id, document FROM records WHERE collection = ? AND id = ?")
                .bind(T::KIND)
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(db_error)?;

        row.ok_or_else(|| RepositoryError::NotFound(id.to_string()))
            .and_then(RecordRow::rehydrate)
    }

    async fn find_many(&self) -> Result<Vec<T>, RepositoryError> {
        let rows: Vec<RecordRow> = sqlx::query_as(
            r#"
            SELECT id, document FROM records
            WHERE collection = ?
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(T::KIND)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(RecordRow::rehydrate).collect()
    }
}
