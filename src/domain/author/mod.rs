//! Author Context - 作者
//!
//! 作者是共享集合，创建书籍时按 ID 引用

mod entity;
mod errors;

pub use entity::{Author, AuthorProps};
pub use errors::AuthorError;
