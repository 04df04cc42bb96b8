//! Learning Path Context - 学习路径
//!
//! 学习路径把书籍章节、课程课时、文档子主题串成一个有序计划，
//! 每个资源通过 `type` 标签指明出处。

mod aggregate;
mod errors;

pub use aggregate::{
    LearningPath, LearningPathProps, LearningResource, LearningResourceProps, ResourceOrigin,
};
pub use errors::LearningPathError;
