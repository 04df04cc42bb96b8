//! SQLite Book Repository
//!
//! 书籍以 JSON 文档形式存储（`BookProps` 形态），读取时重新走一遍 `create` 校验。

use async_trait::async_trait;
use chrono::Utc;
use sqlx::FromRow;

use super::DbPool;
use crate::application::ports::{BookRepositoryPort, RepositoryError, SearchCriteria};
use crate::domain::book::{self, Book, BookProps};
use crate::domain::shared::EntityId;

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookRow {
    id: String,
    document: String,
}

impl TryFrom<BookRow> for Book {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        let props: BookProps = serde_json::from_str(&row.document)
            .map_err(|e| RepositoryError::SerializationError(e.to_string()))?;
        let transition = book::create(props).map_err(|e| {
            tracing::error!(book_id = %row.id, error = %e, "Stored book failed validation");
            RepositoryError::SerializationError(format!("book {}: {}", row.id, e))
        })?;
        Ok(transition.book)
    }
}

fn to_document(book: &Book) -> Result<String, RepositoryError> {
    serde_json::to_string(&book.to_props())
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn db_error(e: sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(e.to_string())
}

fn insert_error(e: sqlx::Error, id: &EntityId) -> RepositoryError {
    let duplicate = e
        .as_database_error()
        .map_or(false, |db| db.is_unique_violation());
    if duplicate {
        RepositoryError::Duplicate(id.to_string())
    } else {
        db_error(e)
    }
}

const INSERT_BOOK: &str = r#"
    INSERT INTO books (id, title, document, created_at, updated_at)
    VALUES (?, ?, ?, ?, ?)
"#;

const UPDATE_BOOK: &str = r#"
    UPDATE books SET title = ?, document = ?, updated_at = ? WHERE id = ?
"#;

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn insert_one(&self, book: &Book) -> Result<(), RepositoryError> {
        let now = Utc::now().to_rfc3339();
        sqlx::query(INSERT_BOOK)
            .bind(book.id().to_string())
            .bind(book.title())
            .bind(to_document(book)?)
            .bind(&now)
            .bind(&now)
            .execute(&self.pool)
            .await
            .map_err(|e| insert_error(e, book.id()))?;

        tracing::debug!(book_id = %book.id(), "Book inserted");
        Ok(())
    }

    async fn insert_many(&self, books: &[Book]) -> Result<(), RepositoryError> {
        // 使用事务确保原子性
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let now = Utc::now().to_rfc3339();

        for book in books {
            sqlx::query(INSERT_BOOK)
                .bind(book.id().to_string())
                .bind(book.title())
                .bind(to_document(book)?)
                .bind(&now)
                .bind(&now)
                .execute(&mut *tx)
                .await
                .map_err(|e| insert_error(e, book.id()))?;
        }

        tx.commit().await.map_err(db_error)?;
        tracing::debug!(count = books.len(), "Books inserted");
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<bool, RepositoryError> {
        let result = sqlx::query(UPDATE_BOOK)
            .bind(book.title())
            .bind(to_document(book)?)
            .bind(Utc::now().to_rfc3339())
            .bind(book.id().to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_many(&self, books: &[Book]) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let now = Utc::now().to_rfc3339();
        let mut matched = 0u64;

        for book in books {
            let result = sqlx::query(UPDATE_BOOK)
                .bind(book.title())
                .bind(to_document(book)?)
                .bind(&now)
                .bind(book.id().to_string())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
            matched += result.rows_affected();
        }

        tx.commit().await.map_err(db_error)?;
        Ok(matched == books.len() as u64)
    }

    async fn find_one_by_id(&self, id: &EntityId) -> Result<Book, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as("SELECT id, document FROM books WHERE id = ?")
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error)?;

        row.ok_or_else(|| RepositoryError::NotFound(id.to_string()))
            .and_then(Book::try_from)
    }

    async fn find_many(&self) -> Result<Vec<Book>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            "SELECT id, document FROM books ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn search(&self, criteria: &SearchCriteria) -> Result<Vec<Book>, RepositoryError> {
        let Some(term) = criteria.normalized_term() else {
            return self.find_many().await;
        };

        // lower() 只折叠 ASCII 字母；书名不允许其他字母，\s 可匹配的 Unicode 空白没有大小写之分
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT id, document FROM books
            WHERE instr(lower(title), ?) > 0
            ORDER BY created_at DESC, rowid DESC
            "#,
        )
        .bind(term)
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn delete_one(&self, id: &EntityId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_many(&self, ids: &[EntityId]) -> Result<bool, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        let mut removed = 0u64;

        for id in ids {
            let result = sqlx::query("DELETE FROM books WHERE id = ?")
                .bind(id.to_string())
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
            removed += result.rows_affected();
        }

        tx.commit().await.map_err(db_error)?;
        Ok(removed > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::sample_book;
    use crate::infrastructure::persistence::sqlite::{create_pool, run_migrations, DatabaseConfig};

    async fn repo() -> SqliteBookRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteBookRepository::new(pool)
    }

    #[tokio::test]
    async fn test_insert_and_find_round_trip() {
        let repo = repo().await;
        let book = sample_book("Structure and Interpretation of Computer Programs");
        repo.insert_one(&book).await.unwrap();

        let found = repo.find_one_by_id(book.id()).await.unwrap();
        assert_eq!(found, book);
    }

    #[tokio::test]
    async fn test_duplicate_insert() {
        let repo = repo().await;
        let book = sample_book("Dune");
        repo.insert_one(&book).await.unwrap();
        assert!(matches!(
            repo.insert_one(&book).await,
            Err(RepositoryError::Duplicate(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_book() {
        let repo = repo().await;
        assert!(matches!(
            repo.find_one_by_id(&EntityId::new()).await,
            Err(RepositoryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_update_replaces_document() {
        let repo = repo().await;
        let book = sample_book("Dune");
        assert!(!repo.update(&book).await.unwrap());

        repo.insert_one(&book).await.unwrap();
        let renamed = book::update_title(&book, "Dune Messiah").unwrap().book;
        assert!(repo.update(&renamed).await.unwrap());
        assert_eq!(repo.find_one_by_id(book.id()).await.unwrap(), renamed);

        let other = sample_book("Children of Dune");
        assert!(!repo.update_many(&[renamed, other]).await.unwrap());
    }

    #[tokio::test]
    async fn test_find_many_and_search() {
        let repo = repo().await;
        repo.insert_many(&[
            sample_book("Programming Rust"),
            sample_book("Dune"),
            sample_book("Rust in Action"),
        ])
        .await
        .unwrap();

        let titles: Vec<_> = repo
            .find_many()
            .await
            .unwrap()
            .iter()
            .map(|b| b.title().to_string())
            .collect();
        assert_eq!(titles, vec!["Rust in Action", "Dune", "Programming Rust"]);

        let found = repo.search(&SearchCriteria::by_title("RUST")).await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].title(), "Rust in Action");

        let all = repo.search(&SearchCriteria::default()).await.unwrap();
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_search_title_with_unicode_whitespace() {
        let repo = repo().await;
        let book = sample_book("Rust\u{a0}Atomics");
        repo.insert_one(&book).await.unwrap();

        let found = repo
            .search(&SearchCriteria::by_title("RUST\u{a0}atomics"))
            .await
            .unwrap();
        assert_eq!(found, vec![book]);
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = repo().await;
        let a = sample_book("A");
        let b = sample_book("B");
        repo.insert_many(&[a.clone(), b.clone()]).await.unwrap();

        assert!(repo.delete_one(a.id()).await.unwrap());
        assert!(!repo.delete_one(a.id()).await.unwrap());
        assert!(repo.delete_many(&[*b.id(), EntityId::new()]).await.unwrap());
        assert!(repo.find_many().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupted_document_is_reported() {
        let repo = repo().await;
        let book = sample_book("Dune");
        let mut props = book.to_props();
        props.year = 1000.0;

        sqlx::query("INSERT INTO books (id, title, document, created_at, updated_at) VALUES (?, ?, ?, ?, ?)")
            .bind(book.id().to_string())
            .bind(book.title())
            .bind(serde_json::to_string(&props).unwrap())
            .bind(Utc::now().to_rfc3339())
            .bind(Utc::now().to_rfc3339())
            .execute(&repo.pool)
            .await
            .unwrap();

        assert!(matches!(
            repo.find_one_by_id(book.id()).await,
            Err(RepositoryError::SerializationError(_))
        ));
    }
}
