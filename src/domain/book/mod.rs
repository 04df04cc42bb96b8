//! Book Context - 书籍限界上下文
//!
//! 职责:
//! - Book 聚合的创建与逐字段更新（不可变记录 + 纯函数）
//! - 值对象与目录树校验
//! - 变更事件的产生

mod aggregate;
mod content;
mod entities;
mod errors;
mod events;
mod value_objects;

pub use aggregate::{
    apply, create, update_authors, update_categories, update_content, update_cover,
    update_description, update_edition, update_isbn, update_sources, update_tags, update_title,
    update_year, Book, BookProps, BookUpdate, Transition,
};
pub use content::{validate_contents, BookChapter, BookContent, BookSection, ContentTally};
pub use entities::{BookAuthor, BookCategory, BookTag};
pub use errors::BookError;
pub use events::{BookEvent, BookEventKind, ContentChanges, FieldChange};
pub use value_objects::{
    AuthorName, BookSource, BookSourceProps, BookTitle, BookYear, CategoryName, CoverUrl,
    Description, Edition, Isbn, SourceExtension, SourceUrl, TagName,
};
