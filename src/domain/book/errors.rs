//! Book Context - Errors

use thiserror::Error;

/// 书籍校验错误
///
/// 每个变体对应一个字段，携带 schema 报告的问题描述。
/// `code()` 是对外稳定的错误码，HTTP 层原样返回。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookError {
    #[error("无效的 ISBN: {0}")]
    InvalidIsbn(String),

    #[error("无效的版次: {0}")]
    InvalidEdition(String),

    #[error("无效的书名: {0}")]
    InvalidTitle(String),

    #[error("无效的封面地址: {0}")]
    InvalidCover(String),

    #[error("无效的出版年份: {0}")]
    InvalidYear(String),

    #[error("无效的简介: {0}")]
    InvalidDescription(String),

    #[error("书籍至少需要一位作者")]
    EmptyAuthors,

    #[error("无效的作者姓名: {0}")]
    InvalidAuthorName(String),

    #[error("无效的分类名称: {0}")]
    InvalidCategoryName(String),

    #[error("无效的标签名称: {0}")]
    InvalidTagName(String),

    #[error("无效的来源地址: {0}")]
    InvalidSourceUrl(String),

    #[error("无效的来源格式: {0}")]
    InvalidSourceExtension(String),

    #[error("书籍目录不能为空")]
    EmptyContents,

    #[error("无效的章节名称: {0}")]
    InvalidChapterName(String),

    #[error("无效的分节: {0}")]
    InvalidSectionName(String),
}

impl BookError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidIsbn(_) => "InvalidISBN",
            Self::InvalidEdition(_) => "InvalidBookEdition",
            Self::InvalidTitle(_) => "InvalidBookTitle",
            Self::InvalidCover(_) => "InvalidBookCover",
            Self::InvalidYear(_) => "InvalidBookYear",
            Self::InvalidDescription(_) => "InvalidBookDescription",
            Self::EmptyAuthors => "EmptyBookAuthors",
            Self::InvalidAuthorName(_) => "InvalidBookAuthorName",
            Self::InvalidCategoryName(_) => "InvalidBookCategoryName",
            Self::InvalidTagName(_) => "InvalidBookTagName",
            Self::InvalidSourceUrl(_) => "InvalidBookSourceUrl",
            Self::InvalidSourceExtension(_) => "InvalidBookSourceExtension",
            Self::EmptyContents => "EmptyBookContents",
            Self::InvalidChapterName(_) => "InvalidBookContentChapterName",
            Self::InvalidSectionName(_) => "InvalidBookContentSectionName",
        }
    }
}
