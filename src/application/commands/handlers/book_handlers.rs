//! Book Command Handlers

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::CommandHandler;
use crate::application::commands::{CreateBook, DeleteBook, UpdateBook};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, DomainEventPublisherPort, RecordRepositoryPort};
use crate::domain::author::Author;
use crate::domain::book::{self, Book, BookAuthor, BookCategory, BookProps, BookTag, Transition};
use crate::domain::shared::{EntityId, Record};

/// 按 ID 依次取回共享集合里的记录，保持调用方给出的顺序
async fn resolve<T: Record>(
    repo: &dyn RecordRepositoryPort<T>,
    ids: &[String],
) -> Result<Vec<T>, ApplicationError> {
    let mut records = Vec::with_capacity(ids.len());
    for raw in ids {
        let id = EntityId::parse(raw)?;
        let record = repo
            .find_one_by_id(&id)
            .await
            .map_err(|e| ApplicationError::lookup(T::KIND, &id, e))?;
        records.push(record);
    }
    Ok(records)
}

// ============================================================================
// CreateBook
// ============================================================================

/// CreateBook Handler - 解析引用、校验、落库、发布 BookCreated
pub struct CreateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    author_repo: Arc<dyn RecordRepositoryPort<Author>>,
    category_repo: Arc<dyn RecordRepositoryPort<BookCategory>>,
    tag_repo: Arc<dyn RecordRepositoryPort<BookTag>>,
    event_publisher: Arc<dyn DomainEventPublisherPort>,
}

impl CreateBookHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        author_repo: Arc<dyn RecordRepositoryPort<Author>>,
        category_repo: Arc<dyn RecordRepositoryPort<BookCategory>>,
        tag_repo: Arc<dyn RecordRepositoryPort<BookTag>>,
        event_publisher: Arc<dyn DomainEventPublisherPort>,
    ) -> Self {
        Self {
            book_repo,
            author_repo,
            category_repo,
            tag_repo,
            event_publisher,
        }
    }
}

#[async_trait]
impl CommandHandler<CreateBook> for CreateBookHandler {
    async fn handle(&self, command: CreateBook) -> Result<Book, ApplicationError> {
        let authors = resolve(self.author_repo.as_ref(), &command.authors).await?;
        let categories = resolve(self.category_repo.as_ref(), &command.categories).await?;
        let tags = resolve(self.tag_repo.as_ref(), &command.tags).await?;

        let props = BookProps {
            id: EntityId::new(),
            isbn: command.isbn,
            title: command.title,
            edition: command.edition,
            cover: command.cover,
            year: command.year,
            authors: authors.iter().map(BookAuthor::from).collect(),
            description: command.description,
            categories,
            tags,
            sources: command.sources,
            contents: command
                .contents
                .into_iter()
                .map(|outline| outline.into_content())
                .collect(),
        };

        let Transition { book, events } = book::create(props)?;
        self.book_repo.insert_one(&book).await?;
        self.event_publisher.publish(&events);

        tracing::info!(
            book_id = %book.id(),
            title = %book.title(),
            authors = book.authors().len(),
            "Book created"
        );

        Ok(book)
    }
}

// ============================================================================
// UpdateBook
// ============================================================================

/// UpdateBook Handler - 依次应用更新，全部成功后一次性落库
pub struct UpdateBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
    event_publisher: Arc<dyn DomainEventPublisherPort>,
}

impl UpdateBookHandler {
    pub fn new(
        book_repo: Arc<dyn BookRepositoryPort>,
        event_publisher: Arc<dyn DomainEventPublisherPort>,
    ) -> Self {
        Self {
            book_repo,
            event_publisher,
        }
    }
}

#[async_trait]
impl CommandHandler<UpdateBook> for UpdateBookHandler {
    async fn handle(&self, command: UpdateBook) -> Result<Book, ApplicationError> {
        let id = EntityId::parse(&command.book_id)?;
        let mut current = self
            .book_repo
            .find_one_by_id(&id)
            .await
            .map_err(|e| ApplicationError::lookup("Book", &id, e))?;

        let mut events = Vec::new();
        for update in command.updates {
            let field = update.field();
            let transition = book::apply(&current, update).map_err(|e| {
                tracing::debug!(book_id = %id, field, error = %e, "Book update rejected");
                e
            })?;
            current = transition.book;
            events.extend(transition.events);
        }

        if !self.book_repo.update(&current).await? {
            return Err(ApplicationError::not_found("Book", id));
        }
        self.event_publisher.publish(&events);

        tracing::info!(
            book_id = %id,
            events = events.len(),
            "Book updated"
        );

        Ok(current)
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler
pub struct DeleteBookHandler {
    book_repo: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(book_repo: Arc<dyn BookRepositoryPort>) -> Self {
        Self { book_repo }
    }
}

#[async_trait]
impl CommandHandler<DeleteBook> for DeleteBookHandler {
    async fn handle(&self, command: DeleteBook) -> Result<(), ApplicationError> {
        let id = EntityId::parse(&command.book_id)?;
        if !self.book_repo.delete_one(&id).await? {
            return Err(ApplicationError::not_found("Book", id));
        }

        tracing::info!(book_id = %id, "Book deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bus::{CommandBus, CommandHandler};
    use crate::application::commands::ContentOutline;
    use crate::domain::author::AuthorProps;
    use crate::domain::book::{BookContent, BookEvent, BookEventKind, BookSourceProps, BookUpdate};
    use crate::infrastructure::memory::{InMemoryBookRepository, InMemoryRecordRepository};
    use std::sync::Mutex;

    const AUTHOR_ID: &str = "0b3c6a4e-6f51-4a55-9a52-6f2f8a3c1e01";
    const CATEGORY_ID: &str = "0b3c6a4e-6f51-4a55-9a52-6f2f8a3c1e02";

    #[derive(Default)]
    struct RecordingPublisher {
        published: Mutex<Vec<BookEvent>>,
    }

    impl RecordingPublisher {
        fn names(&self) -> Vec<&'static str> {
            self.published.lock().unwrap().iter().map(|e| e.name()).collect()
        }
    }

    impl DomainEventPublisherPort for RecordingPublisher {
        fn publish(&self, events: &[BookEvent]) {
            self.published.lock().unwrap().extend_from_slice(events);
        }
    }

    fn create_command() -> CreateBook {
        CreateBook {
            isbn: "978-0-306-40615-7".to_string(),
            title: "Clean Architecture".to_string(),
            edition: 1.0,
            cover: "https://cdn.example.com/clean.png".to_string(),
            year: 2017.0,
            authors: vec![AUTHOR_ID.to_string()],
            description: None,
            categories: vec![CATEGORY_ID.to_string()],
            tags: vec![],
            sources: vec![BookSourceProps {
                url: "https://files.example.com/clean.pdf".to_string(),
                extension: "pdf".to_string(),
            }],
            contents: vec![
                ContentOutline::Chapter("Introduction".to_string()),
                ContentOutline::Section {
                    name: "Design Principles".to_string(),
                    chapters: vec!["SRP".to_string(), "OCP".to_string()],
                },
            ],
        }
    }

    async fn setup() -> (Arc<InMemoryBookRepository>, Arc<RecordingPublisher>, CommandBus) {
        let repo = InMemoryBookRepository::new().arc();
        let authors = InMemoryRecordRepository::<Author>::new().arc();
        let categories = InMemoryRecordRepository::<BookCategory>::new().arc();
        let tags = InMemoryRecordRepository::<BookTag>::new().arc();

        let author = Author::create(AuthorProps {
            id: EntityId::parse(AUTHOR_ID).unwrap(),
            first_name: "Robert".to_string(),
            last_name_1: Some("Martin".to_string()),
            ..AuthorProps::default()
        })
        .unwrap();
        authors.insert_one(&author).await.unwrap();
        let category = BookCategory {
            id: EntityId::parse(CATEGORY_ID).unwrap(),
            name: "Software".to_string(),
        };
        categories.insert_one(&category).await.unwrap();

        let publisher = Arc::new(RecordingPublisher::default());
        let create = CreateBookHandler::new(
            repo.clone(),
            authors,
            categories,
            tags,
            publisher.clone(),
        );
        let bus = CommandBus::builder()
            .register::<CreateBook, _>(create)
            .unwrap()
            .register::<UpdateBook, _>(UpdateBookHandler::new(repo.clone(), publisher.clone()))
            .unwrap()
            .register::<DeleteBook, _>(DeleteBookHandler::new(repo.clone()))
            .unwrap()
            .build();
        (repo, publisher, bus)
    }

    #[tokio::test]
    async fn test_create_book_persists_and_publishes() {
        let (repo, publisher, bus) = setup().await;

        let book = bus.execute(create_command()).await.unwrap();

        assert_eq!(repo.find_one_by_id(book.id()).await.unwrap(), book);
        assert_eq!(publisher.names(), vec!["book.created"]);
        match &book.contents()[1] {
            BookContent::Section(section) => {
                assert_eq!(section.chapters.len(), 2);
                assert_eq!(section.chapters[0].duration, 0);
                assert!(section.chapters[0].goals.is_empty());
            }
            other => panic!("unexpected content: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_book_copies_shared_records() {
        let (_repo, _publisher, bus) = setup().await;
        let book = bus.execute(create_command()).await.unwrap();

        assert_eq!(book.authors().len(), 1);
        assert_eq!(book.authors()[0].id.to_string(), AUTHOR_ID);
        assert_eq!(book.authors()[0].names, "Robert Martin");
        assert_eq!(book.categories()[0].name, "Software");
    }

    #[tokio::test]
    async fn test_create_book_unknown_reference() {
        let (repo, publisher, bus) = setup().await;

        let err = bus
            .execute(CreateBook {
                tags: vec![EntityId::new().to_string()],
                ..create_command()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "TagNotFound");

        let err = bus
            .execute(CreateBook {
                authors: vec!["Robert C. Martin".to_string()],
                ..create_command()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidId");

        let err = bus
            .execute(CreateBook {
                authors: vec![],
                ..create_command()
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "EmptyBookAuthors");

        assert!(repo.is_empty());
        assert!(publisher.names().is_empty());
    }

    #[tokio::test]
    async fn test_create_book_invalid_input_stores_nothing() {
        let (repo, publisher, bus) = setup().await;
        let command = CreateBook {
            year: 1200.0,
            ..create_command()
        };

        let err = bus.execute(command).await.unwrap_err();
        assert_eq!(err.code(), "InvalidBookYear");
        assert!(repo.is_empty());
        assert!(publisher.names().is_empty());
    }

    #[tokio::test]
    async fn test_update_book_applies_in_order() {
        let (repo, publisher, bus) = setup().await;
        let book = bus.execute(create_command()).await.unwrap();

        let updated = bus
            .execute(UpdateBook {
                book_id: book.id().to_string(),
                updates: vec![
                    BookUpdate::Title("Clean Code".to_string()),
                    BookUpdate::Edition(2.0),
                    BookUpdate::Title("Clean Code, 2nd ed.".to_string()),
                ],
            })
            .await
            .unwrap();

        assert_eq!(updated.title(), "Clean Code, 2nd ed.");
        assert_eq!(updated.edition(), 2);
        assert_eq!(repo.find_one_by_id(book.id()).await.unwrap(), updated);
        assert_eq!(
            publisher.names(),
            vec!["book.created", "book.metadata_updated", "book.metadata_updated"]
        );
    }

    #[tokio::test]
    async fn test_update_book_is_all_or_nothing() {
        let (repo, publisher, bus) = setup().await;
        let book = bus.execute(create_command()).await.unwrap();

        let err = bus
            .execute(UpdateBook {
                book_id: book.id().to_string(),
                updates: vec![
                    BookUpdate::Title("Renamed".to_string()),
                    BookUpdate::Cover("not a url".to_string()),
                ],
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), "InvalidBookCover");
        assert_eq!(repo.find_one_by_id(book.id()).await.unwrap().title(), "Clean Architecture");
        assert_eq!(publisher.names(), vec!["book.created"]);
    }

    #[tokio::test]
    async fn test_update_content_event_published() {
        let (_repo, publisher, bus) = setup().await;
        let book = bus.execute(create_command()).await.unwrap();

        bus.execute(UpdateBook {
            book_id: book.id().to_string(),
            updates: vec![BookUpdate::Content(vec![
                ContentOutline::Chapter("Only".to_string()).into_content(),
            ])],
        })
        .await
        .unwrap();

        let published = publisher.published.lock().unwrap();
        match &published[1].kind {
            BookEventKind::BookContentUpdated { changes } => {
                assert_eq!(changes.removed_sections, 1);
                assert_eq!(changes.added_chapters, 0);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_missing_book() {
        let (_repo, _publisher, bus) = setup().await;
        let err = bus
            .execute(UpdateBook {
                book_id: EntityId::new().to_string(),
                updates: vec![BookUpdate::Title("X".to_string())],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "BookNotFound");
    }

    #[tokio::test]
    async fn test_malformed_id_rejected() {
        let (_repo, _publisher, bus) = setup().await;
        let err = bus
            .execute(DeleteBook {
                book_id: "not-an-id".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidId");
    }

    #[tokio::test]
    async fn test_delete_book() {
        let (repo, _publisher, bus) = setup().await;
        let book = bus.execute(create_command()).await.unwrap();

        bus.execute(DeleteBook {
            book_id: book.id().to_string(),
        })
        .await
        .unwrap();
        assert!(repo.is_empty());

        let err = bus
            .execute(DeleteBook {
                book_id: book.id().to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "BookNotFound");
    }

    #[tokio::test]
    async fn test_handler_usable_without_bus() {
        let repo = InMemoryBookRepository::new().arc();
        let handler = DeleteBookHandler::new(repo);
        let err = handler
            .handle(DeleteBook {
                book_id: EntityId::new().to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "BookNotFound");
    }
}
