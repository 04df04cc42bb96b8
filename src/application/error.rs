//! 应用层错误定义
//!
//! 统一的命令/查询错误类型

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::author::AuthorError;
use crate::domain::book::BookError;
use crate::domain::course::CourseError;
use crate::domain::documentation::DocumentationError;
use crate::domain::learning_path::LearningPathError;
use crate::domain::shared::{EntityId, InvalidIdError};

/// 应用层错误
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// 书籍校验失败
    #[error(transparent)]
    Domain(#[from] BookError),

    #[error(transparent)]
    Author(#[from] AuthorError),

    #[error(transparent)]
    Course(#[from] CourseError),

    #[error(transparent)]
    Documentation(#[from] DocumentationError),

    #[error(transparent)]
    LearningPath(#[from] LearningPathError),

    /// 标识符格式错误
    #[error(transparent)]
    InvalidId(#[from] InvalidIdError),

    /// 资源未找到
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// 与已有数据冲突（重复 ID、重名的分类或标签）
    #[error("Conflict: {0}")]
    Conflict(String),

    /// 仓储错误
    #[error("Repository error: {0}")]
    RepositoryError(String),

    /// 消息没有注册处理器（装配错误）
    #[error("No handler registered for {0}")]
    HandlerNotRegistered(&'static str),

    /// 内部错误
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ApplicationError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::InternalError(message.into())
    }

    /// 按 ID 查找失败时，仓储的 NotFound 转为带资源类型的 NotFound
    pub fn lookup(resource_type: &'static str, id: &EntityId, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => Self::not_found(resource_type, id),
            other => other.into(),
        }
    }

    /// 输入校验类错误（领域校验、标识符格式）
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::Domain(_)
                | Self::Author(_)
                | Self::Course(_)
                | Self::Documentation(_)
                | Self::LearningPath(_)
                | Self::InvalidId(_)
        )
    }

    /// 对外稳定的错误码
    pub fn code(&self) -> &'static str {
        match self {
            Self::Domain(e) => e.code(),
            Self::Author(e) => e.code(),
            Self::Course(e) => e.code(),
            Self::Documentation(e) => e.code(),
            Self::LearningPath(e) => e.code(),
            Self::InvalidId(e) => e.code(),
            Self::NotFound { resource_type, .. } => match *resource_type {
                "Book" => "BookNotFound",
                "Author" => "AuthorNotFound",
                "Category" => "CategoryNotFound",
                "Tag" => "TagNotFound",
                "OnlineCourse" => "OnlineCourseNotFound",
                "Documentation" => "DocumentationNotFound",
                "LearningPath" => "LearningPathNotFound",
                _ => "NotFound",
            },
            Self::Conflict(_) => "Conflict",
            Self::RepositoryError(_) => "RepositoryError",
            Self::HandlerNotRegistered(_) => "HandlerNotRegistered",
            Self::InternalError(_) => "InternalError",
        }
    }
}

impl From<RepositoryError> for ApplicationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Duplicate(_) => Self::Conflict(err.to_string()),
            RepositoryError::NotFound(id) => Self::NotFound {
                resource_type: "Entity",
                id,
            },
            RepositoryError::DatabaseError(_) | RepositoryError::SerializationError(_) => {
                Self::RepositoryError(err.to_string())
            }
        }
    }
}
