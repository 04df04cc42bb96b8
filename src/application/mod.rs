//! 应用层 - 用例编排
//!
//! 包含：
//! - bus: 命令/查询总线，按消息类型路由到唯一处理器
//! - ports: 六边形架构端口定义（BookRepository、RecordRepository、DomainEventPublisher）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod bus;
pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;

use std::sync::Arc;

// Re-exports
pub use bus::{
    Command, CommandBus, CommandBusBuilder, CommandHandler, DispatchError, Query, QueryBus,
    QueryBusBuilder, QueryHandler,
};

pub use commands::{
    // Book commands
    ContentOutline,
    CreateBook,
    DeleteBook,
    UpdateBook,
    // Shared collections
    CreateAuthor,
    CreateCategory,
    CreateTag,
    // Courses, documentation, learning paths
    CourseOutline,
    CreateDocumentation,
    CreateLearningPath,
    CreateOnlineCourse,
    DocumentationOutline,
    LearningResourceInput,
    // Handlers
    handlers::{
        CreateAuthorHandler, CreateBookHandler, CreateCategoryHandler, CreateDocumentationHandler,
        CreateLearningPathHandler, CreateOnlineCourseHandler, CreateTagHandler, DeleteBookHandler,
        UpdateBookHandler,
    },
};

pub use error::ApplicationError;

pub use ports::{
    BookRepositoryPort, DomainEventPublisherPort, RecordRepositoryPort, Repositories,
    RepositoryError, SearchCriteria,
};

pub use queries::{
    // Book queries
    GetBook,
    ListBooks,
    SearchBooks,
    // Record queries
    CatalogRecord,
    GetAuthor,
    GetCategory,
    GetDocumentation,
    GetLearningPath,
    GetOnlineCourse,
    GetRecord,
    GetTag,
    ListAuthors,
    ListCategories,
    ListDocumentations,
    ListLearningPaths,
    ListOnlineCourses,
    ListRecords,
    ListTags,
    // Handlers
    handlers::{
        GetBookHandler, GetRecordHandler, ListBooksHandler, ListRecordsHandler, SearchBooksHandler,
    },
};

/// 为一类记录注册“取一条”和“列出全部”两个查询
fn register_record_queries<T: CatalogRecord>(
    builder: QueryBusBuilder,
    repo: &Arc<dyn RecordRepositoryPort<T>>,
) -> Result<QueryBusBuilder, DispatchError> {
    builder
        .register::<GetRecord<T>, _>(GetRecordHandler::new(repo.clone()))?
        .register::<ListRecords<T>, _>(ListRecordsHandler::new(repo.clone()))
}

/// 装配命令总线和查询总线
pub fn build_buses(
    repos: &Repositories,
    event_publisher: Arc<dyn DomainEventPublisherPort>,
) -> Result<(CommandBus, QueryBus), DispatchError> {
    let commands = CommandBus::builder()
        .register::<CreateBook, _>(CreateBookHandler::new(
            repos.books.clone(),
            repos.authors.clone(),
            repos.categories.clone(),
            repos.tags.clone(),
            event_publisher.clone(),
        ))?
        .register::<UpdateBook, _>(UpdateBookHandler::new(repos.books.clone(), event_publisher))?
        .register::<DeleteBook, _>(DeleteBookHandler::new(repos.books.clone()))?
        .register::<CreateAuthor, _>(CreateAuthorHandler::new(repos.authors.clone()))?
        .register::<CreateCategory, _>(CreateCategoryHandler::new(repos.categories.clone()))?
        .register::<CreateTag, _>(CreateTagHandler::new(repos.tags.clone()))?
        .register::<CreateOnlineCourse, _>(CreateOnlineCourseHandler::new(
            repos.online_courses.clone(),
        ))?
        .register::<CreateDocumentation, _>(CreateDocumentationHandler::new(
            repos.documentations.clone(),
        ))?
        .register::<CreateLearningPath, _>(CreateLearningPathHandler::new(
            repos.learning_paths.clone(),
            repos.books.clone(),
            repos.online_courses.clone(),
            repos.documentations.clone(),
        ))?
        .build();

    let queries = QueryBus::builder()
        .register::<GetBook, _>(GetBookHandler::new(repos.books.clone()))?
        .register::<ListBooks, _>(ListBooksHandler::new(repos.books.clone()))?
        .register::<SearchBooks, _>(SearchBooksHandler::new(repos.books.clone()))?;
    let queries = register_record_queries(queries, &repos.authors)?;
    let queries = register_record_queries(queries, &repos.categories)?;
    let queries = register_record_queries(queries, &repos.tags)?;
    let queries = register_record_queries(queries, &repos.online_courses)?;
    let queries = register_record_queries(queries, &repos.documentations)?;
    let queries = register_record_queries(queries, &repos.learning_paths)?.build();

    tracing::debug!(
        commands = ?commands.registered(),
        queries = ?queries.registered(),
        "Buses assembled"
    );

    Ok((commands, queries))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::{memory, EventPublisher};

    #[test]
    fn test_every_message_has_a_handler() {
        let (commands, queries) =
            build_buses(&memory::repositories(), EventPublisher::new().arc()).unwrap();

        assert!(commands.is_registered::<CreateLearningPath>());
        assert!(queries.is_registered::<ListTags>());
        assert!(queries.is_registered::<GetLearningPath>());
        assert_eq!(commands.registered().len(), 9);
        assert_eq!(queries.registered().len(), 15);
    }
}
