//! Online Course / Documentation / Learning Path Command Handlers

use async_trait::async_trait;
use std::sync::Arc;

use crate::application::bus::CommandHandler;
use crate::application::commands::{CreateDocumentation, CreateLearningPath, CreateOnlineCourse};
use crate::application::error::ApplicationError;
use crate::application::ports::{BookRepositoryPort, RecordRepositoryPort};
use crate::domain::course::OnlineCourse;
use crate::domain::documentation::Documentation;
use crate::domain::learning_path::{
    LearningPath, LearningPathProps, LearningResourceProps, ResourceOrigin,
};
use crate::domain::shared::{EntityId, Record};

// ============================================================================
// CreateOnlineCourse
// ============================================================================

pub struct CreateOnlineCourseHandler {
    course_repo: Arc<dyn RecordRepositoryPort<OnlineCourse>>,
}

impl CreateOnlineCourseHandler {
    pub fn new(course_repo: Arc<dyn RecordRepositoryPort<OnlineCourse>>) -> Self {
        Self { course_repo }
    }
}

#[async_trait]
impl CommandHandler<CreateOnlineCourse> for CreateOnlineCourseHandler {
    async fn handle(&self, command: CreateOnlineCourse) -> Result<OnlineCourse, ApplicationError> {
        let contents = command
            .contents
            .into_iter()
            .map(|outline| outline.into_content())
            .collect();
        let course = OnlineCourse::create(EntityId::new(), command.name, contents)?;
        self.course_repo.insert_one(&course).await?;

        tracing::info!(
            course_id = %course.id(),
            name = %course.name(),
            contents = course.contents().len(),
            "Online course created"
        );
        Ok(course)
    }
}

// ============================================================================
// CreateDocumentation
// ============================================================================

pub struct CreateDocumentationHandler {
    documentation_repo: Arc<dyn RecordRepositoryPort<Documentation>>,
}

impl CreateDocumentationHandler {
    pub fn new(documentation_repo: Arc<dyn RecordRepositoryPort<Documentation>>) -> Self {
        Self { documentation_repo }
    }
}

#[async_trait]
impl CommandHandler<CreateDocumentation> for CreateDocumentationHandler {
    async fn handle(&self, command: CreateDocumentation) -> Result<Documentation, ApplicationError> {
        let contents = command
            .contents
            .into_iter()
            .map(|outline| outline.into_content())
            .collect();
        let documentation = Documentation::create(EntityId::new(), command.name, contents)?;
        self.documentation_repo.insert_one(&documentation).await?;

        tracing::info!(
            documentation_id = %documentation.id(),
            name = %documentation.name(),
            contents = documentation.contents().len(),
            "Documentation created"
        );
        Ok(documentation)
    }
}

// ============================================================================
// CreateLearningPath
// ============================================================================

/// CreateLearningPath Handler
///
/// 先校验路径本身，再确认每个资源引用的书籍、课程或文档存在。
/// 章节 / 课时是否真的属于被引用的资源不做检查。
pub struct CreateLearningPathHandler {
    learning_path_repo: Arc<dyn RecordRepositoryPort<LearningPath>>,
    book_repo: Arc<dyn BookRepositoryPort>,
    course_repo: Arc<dyn RecordRepositoryPort<OnlineCourse>>,
    documentation_repo: Arc<dyn RecordRepositoryPort<Documentation>>,
}

impl CreateLearningPathHandler {
    pub fn new(
        learning_path_repo: Arc<dyn RecordRepositoryPort<LearningPath>>,
        book_repo: Arc<dyn BookRepositoryPort>,
        course_repo: Arc<dyn RecordRepositoryPort<OnlineCourse>>,
        documentation_repo: Arc<dyn RecordRepositoryPort<Documentation>>,
    ) -> Self {
        Self {
            learning_path_repo,
            book_repo,
            course_repo,
            documentation_repo,
        }
    }

    async fn ensure_exists(&self, origin: &ResourceOrigin) -> Result<(), ApplicationError> {
        match origin {
            ResourceOrigin::BookChapter { book, .. } => self
                .book_repo
                .find_one_by_id(book)
                .await
                .map(|_| ())
                .map_err(|e| ApplicationError::lookup("Book", book, e)),
            ResourceOrigin::CourseClass { online_course, .. } => self
                .course_repo
                .find_one_by_id(online_course)
                .await
                .map(|_| ())
                .map_err(|e| ApplicationError::lookup(OnlineCourse::KIND, online_course, e)),
            ResourceOrigin::DocumentationSubtopic { documentation, .. } => self
                .documentation_repo
                .find_one_by_id(documentation)
                .await
                .map(|_| ())
                .map_err(|e| ApplicationError::lookup(Documentation::KIND, documentation, e)),
        }
    }
}

#[async_trait]
impl CommandHandler<CreateLearningPath> for CreateLearningPathHandler {
    async fn handle(&self, command: CreateLearningPath) -> Result<LearningPath, ApplicationError> {
        let resources = command
            .resources
            .into_iter()
            .map(|input| -> Result<LearningResourceProps, ApplicationError> {
                Ok(LearningResourceProps {
                    id: EntityId::parse(&input.id)?,
                    name: input.name,
                    duration: input.duration,
                    order: input.order,
                    origin: input.origin,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let path = LearningPath::create(LearningPathProps {
            id: EntityId::new(),
            title: command.title,
            initial_date: command.initial_date,
            resources,
        })?;

        for resource in path.resources() {
            self.ensure_exists(&resource.origin).await?;
        }
        self.learning_path_repo.insert_one(&path).await?;

        tracing::info!(
            learning_path_id = %path.id(),
            title = %path.title(),
            initial_date = %path.initial_date(),
            resources = path.resources().len(),
            total_duration = path.total_duration(),
            "Learning path created"
        );
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::bus::CommandBus;
    use crate::application::commands::{CourseOutline, DocumentationOutline, LearningResourceInput};
    use crate::domain::course::CourseContent;
    use crate::infrastructure::memory::{sample_book, InMemoryBookRepository, InMemoryRecordRepository};

    struct Fixture {
        books: Arc<InMemoryBookRepository>,
        courses: Arc<InMemoryRecordRepository<OnlineCourse>>,
        paths: Arc<InMemoryRecordRepository<LearningPath>>,
        bus: CommandBus,
    }

    fn setup() -> Fixture {
        let books = InMemoryBookRepository::new().arc();
        let courses = InMemoryRecordRepository::<OnlineCourse>::new().arc();
        let documentations = InMemoryRecordRepository::<Documentation>::new().arc();
        let paths = InMemoryRecordRepository::<LearningPath>::new().arc();

        let bus = CommandBus::builder()
            .register::<CreateOnlineCourse, _>(CreateOnlineCourseHandler::new(courses.clone()))
            .unwrap()
            .register::<CreateDocumentation, _>(CreateDocumentationHandler::new(documentations.clone()))
            .unwrap()
            .register::<CreateLearningPath, _>(CreateLearningPathHandler::new(
                paths.clone(),
                books.clone(),
                courses.clone(),
                documentations,
            ))
            .unwrap()
            .build();

        Fixture {
            books,
            courses,
            paths,
            bus,
        }
    }

    fn resource(name: &str, order: f64, origin: ResourceOrigin) -> LearningResourceInput {
        LearningResourceInput {
            id: EntityId::new().to_string(),
            name: name.to_string(),
            duration: 600.0,
            order,
            origin,
        }
    }

    #[tokio::test]
    async fn test_create_online_course() {
        let fx = setup();
        let course = fx
            .bus
            .execute(CreateOnlineCourse {
                name: "Async Rust".to_string(),
                contents: vec![
                    CourseOutline::Class("Welcome".to_string()),
                    CourseOutline::Section {
                        name: "Futures".to_string(),
                        classes: vec!["Poll".to_string(), "Wakers".to_string()],
                    },
                ],
            })
            .await
            .unwrap();

        assert_eq!(fx.courses.find_one_by_id(course.id()).await.unwrap(), course);
        match &course.contents()[1] {
            CourseContent::Section(section) => assert_eq!(section.classes.len(), 2),
            other => panic!("unexpected content: {:?}", other),
        }

        let err = fx
            .bus
            .execute(CreateOnlineCourse {
                name: "Async Rust".to_string(),
                contents: vec![CourseOutline::Class(String::new())],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidCourseClassName");
        assert_eq!(fx.courses.len(), 1);
    }

    #[tokio::test]
    async fn test_create_documentation_requires_title() {
        let fx = setup();
        let err = fx
            .bus
            .execute(CreateDocumentation {
                name: String::new(),
                contents: vec![DocumentationOutline::Subtopic("Intro".to_string())],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidDocumentationTitle");
    }

    #[tokio::test]
    async fn test_create_learning_path_checks_references() {
        let fx = setup();
        let book = sample_book("Clean Architecture");
        fx.books.insert_one(&book).await.unwrap();
        let documentation = fx
            .bus
            .execute(CreateDocumentation {
                name: "Tokio docs".to_string(),
                contents: vec![DocumentationOutline::Topic {
                    name: "Runtime".to_string(),
                    subtopics: vec!["Scheduler".to_string()],
                }],
            })
            .await
            .unwrap();

        let path = fx
            .bus
            .execute(CreateLearningPath {
                title: "Backend in Rust".to_string(),
                initial_date: "2024-03-01".to_string(),
                resources: vec![
                    resource(
                        "Scheduler",
                        2.0,
                        ResourceOrigin::DocumentationSubtopic {
                            documentation: *documentation.id(),
                            topic: Some("Runtime".to_string()),
                        },
                    ),
                    resource(
                        "Introduction",
                        1.0,
                        ResourceOrigin::BookChapter {
                            book: *book.id(),
                            section: None,
                        },
                    ),
                ],
            })
            .await
            .unwrap();

        assert_eq!(path.resources()[0].name, "Introduction");
        assert_eq!(path.total_duration(), 1200);
        assert_eq!(fx.paths.find_one_by_id(path.id()).await.unwrap(), path);

        let err = fx
            .bus
            .execute(CreateLearningPath {
                title: "Dangling".to_string(),
                initial_date: "2024-03-01".to_string(),
                resources: vec![resource(
                    "Missing",
                    1.0,
                    ResourceOrigin::CourseClass {
                        online_course: EntityId::new(),
                        section: None,
                    },
                )],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "OnlineCourseNotFound");
        assert_eq!(fx.paths.len(), 1);
    }

    #[tokio::test]
    async fn test_learning_path_validated_before_lookups() {
        let fx = setup();
        let err = fx
            .bus
            .execute(CreateLearningPath {
                title: "Plan".to_string(),
                initial_date: "someday".to_string(),
                resources: vec![resource(
                    "Missing",
                    1.0,
                    ResourceOrigin::BookChapter {
                        book: EntityId::new(),
                        section: None,
                    },
                )],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidLearningPathInitialDate");

        let err = fx
            .bus
            .execute(CreateLearningPath {
                title: "Plan".to_string(),
                initial_date: "2024-03-01".to_string(),
                resources: vec![LearningResourceInput {
                    id: "chapter-1".to_string(),
                    ..resource(
                        "Bad id",
                        1.0,
                        ResourceOrigin::BookChapter {
                            book: EntityId::new(),
                            section: None,
                        },
                    )
                }],
            })
            .await
            .unwrap_err();
        assert_eq!(err.code(), "InvalidId");
        assert!(fx.paths.is_empty());
    }
}
