//! Command Handlers 实现
//!
//! 所有 CommandHandler 的具体实现

mod book_handlers;
mod resource_handlers;
mod taxonomy_handlers;

pub use book_handlers::{CreateBookHandler, DeleteBookHandler, UpdateBookHandler};
pub use resource_handlers::{
    CreateDocumentationHandler, CreateLearningPathHandler, CreateOnlineCourseHandler,
};
pub use taxonomy_handlers::{CreateAuthorHandler, CreateCategoryHandler, CreateTagHandler};
