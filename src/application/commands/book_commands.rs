//! Book Commands

use serde::Deserialize;

use crate::application::bus::Command;
use crate::domain::book::{Book, BookChapter, BookContent, BookSection, BookSourceProps, BookUpdate};

/// 目录大纲（创建时只给名称，ID 和章节属性由处理器生成）
///
/// 字符串表示章节，`{ name, chapters }` 表示分节。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ContentOutline {
    Chapter(String),
    Section { name: String, chapters: Vec<String> },
}

impl ContentOutline {
    pub fn into_content(self) -> BookContent {
        match self {
            Self::Chapter(name) => BookContent::Chapter(BookChapter::named(name)),
            Self::Section { name, chapters } => BookContent::Section(BookSection::new(
                name,
                chapters.into_iter().map(BookChapter::named).collect(),
            )),
        }
    }
}

/// 创建书籍命令
///
/// `authors` / `categories` / `tags` 是共享集合中已有记录的 ID，
/// 处理器按 ID 取回名称后冗余写入书籍文档。
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub isbn: String,
    pub title: String,
    pub edition: f64,
    pub cover: String,
    pub year: f64,
    pub authors: Vec<String>,
    pub description: Option<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub sources: Vec<BookSourceProps>,
    pub contents: Vec<ContentOutline>,
}

impl Command for CreateBook {
    const NAME: &'static str = "CreateBook";
    type Output = Book;
}

/// 更新书籍命令（按顺序应用，任一失败则整体不落库）
#[derive(Debug, Clone)]
pub struct UpdateBook {
    pub book_id: String,
    pub updates: Vec<BookUpdate>,
}

impl Command for UpdateBook {
    const NAME: &'static str = "UpdateBook";
    type Output = Book;
}

/// 删除书籍命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: String,
}

impl Command for DeleteBook {
    const NAME: &'static str = "DeleteBook";
    type Output = ();
}
