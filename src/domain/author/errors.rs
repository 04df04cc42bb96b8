//! Author Context - Errors

use thiserror::Error;

/// 作者校验错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthorError {
    #[error("无效的作者名: {0}")]
    InvalidFirstName(String),

    #[error("无效的作者姓氏: {0}")]
    InvalidLastName(String),

    #[error("无效的作者头像地址: {0}")]
    InvalidImage(String),
}

impl AuthorError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFirstName(_) => "InvalidAuthorFirstName",
            Self::InvalidLastName(_) => "InvalidAuthorLastName",
            Self::InvalidImage(_) => "InvalidAuthorImage",
        }
    }
}
