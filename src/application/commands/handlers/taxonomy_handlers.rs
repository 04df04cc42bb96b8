//! Author / Category / Tag Command Handlers

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::CommandHandler;
use crate::application::commands::{CreateAuthor, CreateCategory, CreateTag};
use crate::application::error::ApplicationError;
use crate::application::ports::RecordRepositoryPort;
use crate::domain::author::{Author, AuthorProps};
use crate::domain::book::{BookCategory, BookTag};
use crate::domain::shared::{EntityId, Record};

/// 名称去空白、小写后比较
fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

// ============================================================================
// CreateAuthor
// ============================================================================

pub struct CreateAuthorHandler {
    author_repo: Arc<dyn RecordRepositoryPort<Author>>,
}

impl CreateAuthorHandler {
    pub fn new(author_repo: Arc<dyn RecordRepositoryPort<Author>>) -> Self {
        Self { author_repo }
    }
}

#[async_trait]
impl CommandHandler<CreateAuthor> for CreateAuthorHandler {
    async fn handle(&self, command: CreateAuthor) -> Result<Author, ApplicationError> {
        let author = Author::create(AuthorProps {
            id: EntityId::new(),
            first_name: command.first_name,
            last_name_1: command.last_name_1,
            last_name_2: command.last_name_2,
            image: command.image,
        })?;
        self.author_repo.insert_one(&author).await?;

        tracing::info!(author_id = %author.id(), name = %author.full_name(), "Author created");
        Ok(author)
    }
}

// ============================================================================
// CreateCategory
// ============================================================================

/// CreateCategory Handler - 同名分类已存在时返回 Conflict
pub struct CreateCategoryHandler {
    category_repo: Arc<dyn RecordRepositoryPort<BookCategory>>,
}

impl CreateCategoryHandler {
    pub fn new(category_repo: Arc<dyn RecordRepositoryPort<BookCategory>>) -> Self {
        Self { category_repo }
    }
}

#[async_trait]
impl CommandHandler<CreateCategory> for CreateCategoryHandler {
    async fn handle(&self, command: CreateCategory) -> Result<BookCategory, ApplicationError> {
        let category = BookCategory::new(command.name);
        category.validate()?;

        let existing = self.category_repo.find_many().await?;
        if existing.iter().any(|c| same_name(&c.name, &category.name)) {
            return Err(ApplicationError::Conflict(format!(
                "Category already exists: {}",
                category.name
            )));
        }
        self.category_repo.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }
}

// ============================================================================
// CreateTag
// ============================================================================

/// CreateTag Handler - 同名标签已存在时返回 Conflict
pub struct CreateTagHandler {
    tag_repo: Arc<dyn RecordRepositoryPort<BookTag>>,
}

impl CreateTagHandler {
    pub fn new(tag_repo: Arc<dyn RecordRepositoryPort<BookTag>>) -> Self {
        Self { tag_repo }
    }
}

#[async_trait]
impl CommandHandler<CreateTag> for CreateTagHandler {
    async fn handle(&self, command: CreateTag) -> Result<BookTag, ApplicationError> {
        let tag = BookTag::new(command.name);
        tag.validate()?;

        let existing = self.tag_repo.find_many().await?;
        if existing.iter().any(|t| same_name(&t.name, &tag.name)) {
            return Err(ApplicationError::Conflict(format!("Tag already exists: {}", tag.name)));
        }
        self.tag_repo.insert_one(&tag).await?;

        tracing::info!(tag_id = %tag.id, name = %tag.name, "Tag created");
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bus::CommandBus;
    use crate::infrastructure::memory::InMemoryRecordRepository;

    fn setup() -> (
        Arc<InMemoryRecordRepository<Author>>,
        Arc<InMemoryRecordRepository<BookCategory>>,
        CommandBus,
    ) {
        let authors = InMemoryRecordRepository::<Author>::new().arc();
        let categories = InMemoryRecordRepository::<BookCategory>::new().arc();
        let bus = CommandBus::builder()
            .register::<CreateAuthor, _>(CreateAuthorHandler::new(authors.clone()))
            .unwrap()
            .register::<CreateCategory, _>(CreateCategoryHandler::new(categories.clone()))
            .unwrap()
            .register::<CreateTag, _>(CreateTagHandler::new(InMemoryRecordRepository::<BookTag>::new().arc()))
            .unwrap()
            .build();
        (authors, categories, bus)
    }

    #[tokio::test]
    async fn test_create_author() {
        let (authors, _, bus) = setup();
        let author = bus
            .execute(CreateAuthor {
                first_name: "Ada".to_string(),
                last_name_1: Some("Lovelace".to_string()),
                image: Some("https://cdn.example.com/ada.png".to_string()),
                ..CreateAuthor::default()
            })
            .await
            .unwrap();

        assert_eq!(authors.find_one_by_id(author.id()).await.unwrap(), author);

        let err = bus
            .execute(CreateAuthor {
                first_name: "Ada".to_string(),
                image: Some("ada.png".to_string()),
                ..CreateAuthor::default()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidAuthorImage");
        assert_eq!(authors.len(), 1);
    }

    #[tokio::test]
    async fn test_category_names_are_unique() {
        let (_, categories, bus) = setup();
        bus.execute(CreateCategory {
            name: "Software".to_string(),
        })
        .await
        .unwrap();

        let err = bus
            .execute(CreateCategory {
                name: " software ".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "Conflict");
        assert_eq!(categories.len(), 1);
    }

    #[tokio::test]
    async fn test_tag_name_required() {
        let (_, _, bus) = setup();
        let err = bus
            .execute(CreateTag {
                name: String::new(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidBookTagName");

        let tag = bus
            .execute(CreateTag {
                name: "rust".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(tag.name, "rust");
    }
}
