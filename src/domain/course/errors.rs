//! Course Context - Errors

use thiserror::Error;

/// 课程校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CourseError {
    #[error("无效的课程名称: {0}")]
    InvalidName(String),

    #[error("无效的课时名称: {0}")]
    InvalidClassName(String),

    #[error("无效的课程分节名称: {0}")]
    InvalidSectionName(String),
}

impl CourseError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidName(_) => "InvalidCourseName",
            Self::InvalidClassName(_) => "InvalidCourseClassName",
            Self::InvalidSectionName(_) => "InvalidCourseSectionName",
        }
    }
}
