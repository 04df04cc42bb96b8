//! Domain Layer - 领域层
//!
//! - book: Book 聚合、值对象、内容树、领域事件
//! - author: 作者（共享集合）
//! - course: 在线课程及其大纲
//! - documentation: 技术文档
//! - learning_path: 跨资源的学习路径
//! - shared: 标识符、记录约定与声明式校验原语

pub mod author;
pub mod book;
pub mod course;
pub mod documentation;
pub mod learning_path;
pub mod shared;
