//! Book Context - Entities
//!
//! 分类和标签本身就是共享集合里的记录；作者在书中只冗余 ID 和全名。

use serde::{Deserialize, Serialize};

use super::{AuthorName, BookError, CategoryName, TagName};
use crate::domain::author::Author;
use crate::domain::shared::{EntityId, Record};

/// 作者
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookAuthor {
    pub id: EntityId,
    pub names: String,
}

impl BookAuthor {
    pub fn new(id: EntityId, names: impl Into<String>) -> Self {
        Self {
            id,
            names: names.into(),
        }
    }

    pub fn validate(&self) -> Result<(), BookError> {
        AuthorName::parse(&self.names).map(|_| ())
    }
}

impl From<&Author> for BookAuthor {
    fn from(author: &Author) -> Self {
        Self::new(*author.id(), author.full_name())
    }
}

/// 分类
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookCategory {
    pub id: EntityId,
    pub name: String,
}

impl BookCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), BookError> {
        CategoryName::parse(&self.name).map(|_| ())
    }
}

impl Record for BookCategory {
    const KIND: &'static str = "Category";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}

/// 标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTag {
    pub id: EntityId,
    pub name: String,
}

impl BookTag {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
        }
    }

    pub fn validate(&self) -> Result<(), BookError> {
        TagName::parse(&self.name).map(|_| ())
    }
}

impl Record for BookTag {
    const KIND: &'static str = "Tag";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn check(&self) -> Result<(), String> {
        self.validate().map_err(|e| e.to_string())
    }
}
