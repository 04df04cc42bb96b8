//! Book Context - 目录树
//!
//! 目录由章节（CHAPTER）和分节（SECTION）组成，分节下只能挂章节。
//! 标签集合由枚举封闭，未知标签在反序列化阶段即被拒绝。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::BookError;
use crate::domain::shared::{validate_each, validate_with_schema, EntityId, TextSchema};

static CONTENT_NAME_SCHEMA: Lazy<TextSchema> = Lazy::new(|| TextSchema::new().min(1));

/// 章节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookChapter {
    pub id: EntityId,
    pub name: String,
    /// 时长（秒）
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub goals: Vec<String>,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl BookChapter {
    /// 新建空章节（时长为 0，无目标和笔记）
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            duration: 0,
            goals: Vec::new(),
            notes: Vec::new(),
        }
    }
}

/// 分节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSection {
    pub id: EntityId,
    pub name: String,
    pub chapters: Vec<BookChapter>,
}

impl BookSection {
    pub fn new(name: impl Into<String>, chapters: Vec<BookChapter>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            chapters,
        }
    }
}

/// 目录节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BookContent {
    #[serde(rename = "BOOK_CHAPTER")]
    Chapter(BookChapter),
    #[serde(rename = "BOOK_SECTION")]
    Section(BookSection),
}

impl BookContent {
    pub fn id(&self) -> &EntityId {
        match self {
            Self::Chapter(chapter) => &chapter.id,
            Self::Section(section) => &section.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Chapter(chapter) => &chapter.name,
            Self::Section(section) => &section.name,
        }
    }

}

/// 顶层章节数与分节数（分节内的章节不计入）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentTally {
    pub chapters: usize,
    pub sections: usize,
}

impl ContentTally {
    pub fn of(contents: &[BookContent]) -> Self {
        contents.iter().fold(Self::default(), |mut tally, item| {
            match item {
                BookContent::Chapter(_) => tally.chapters += 1,
                BookContent::Section(_) => tally.sections += 1,
            }
            tally
        })
    }
}

/// 校验整个目录，非空，逐项 fail-fast
pub fn validate_contents(contents: &[BookContent]) -> Result<(), BookError> {
    if contents.is_empty() {
        return Err(BookError::EmptyContents);
    }
    validate_each(contents, |item| match item {
        BookContent::Chapter(chapter) => validate_chapter(chapter),
        BookContent::Section(section) => validate_section(section),
    })
}

fn validate_chapter(chapter: &BookChapter) -> Result<(), BookError> {
    validate_with_schema(&*CONTENT_NAME_SCHEMA, chapter.name.as_str(), BookError::InvalidChapterName)
        .map(|_| ())
}

fn validate_section(section: &BookSection) -> Result<(), BookError> {
    if section.chapters.is_empty() {
        return Err(BookError::InvalidSectionName(format!(
            "分节 \"{}\" 下没有章节",
            section.name
        )));
    }
    validate_with_schema(&*CONTENT_NAME_SCHEMA, section.name.as_str(), BookError::InvalidSectionName)?;
    validate_each(&section.chapters, validate_chapter)
}
