//! Learning Path Context - Errors

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LearningPathError {
    #[error("无效的学习路径标题: {0}")]
    InvalidTitle(String),

    #[error("无效的开始日期: {0}")]
    InvalidInitialDate(String),

    #[error("无效的资源时长: {0}")]
    InvalidResourceDuration(String),

    #[error("无效的资源顺序: {0}")]
    InvalidResourceOrder(String),
}

impl LearningPathError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTitle(_) => "InvalidLearningPathTitle",
            Self::InvalidInitialDate(_) => "InvalidLearningPathInitialDate",
            Self::InvalidResourceDuration(_) => "InvalidLearningPathResourceDuration",
            Self::InvalidResourceOrder(_) => "InvalidLearningPathResourceOrder",
        }
    }
}
