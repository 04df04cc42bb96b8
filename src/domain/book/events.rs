//! Book Context - Domain Events
//!
//! 事件是 `create` / `apply` 的返回值，由应用层发布后丢弃，不做持久化。

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{BookAuthor, BookSource, ContentTally};
use crate::domain::shared::EntityId;

/// 书籍领域事件
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookEvent {
    pub aggregate_id: EntityId,
    pub occurred_on: DateTime<Utc>,
    pub kind: BookEventKind,
}

impl BookEvent {
    pub fn new(aggregate_id: EntityId, kind: BookEventKind) -> Self {
        Self {
            aggregate_id,
            occurred_on: Utc::now(),
            kind,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum BookEventKind {
    BookCreated {
        isbn: String,
        title: String,
        authors: Vec<BookAuthor>,
        year: i32,
    },
    BookMetadataUpdated {
        changes: Vec<FieldChange>,
    },
    BookContentUpdated {
        changes: ContentChanges,
    },
    BookSourcesUpdated {
        added: Vec<BookSource>,
        removed: Vec<BookSource>,
    },
}

impl BookEventKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::BookCreated { .. } => "book.created",
            Self::BookMetadataUpdated { .. } => "book.metadata_updated",
            Self::BookContentUpdated { .. } => "book.content_updated",
            Self::BookSourcesUpdated { .. } => "book.sources_updated",
        }
    }
}

/// 单个元数据字段的变更
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange {
    pub field: &'static str,
    pub old_value: String,
    pub new_value: String,
}

/// 目录结构变化（只统计顶层节点数量）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ContentChanges {
    pub added_chapters: usize,
    pub removed_chapters: usize,
    pub added_sections: usize,
    pub removed_sections: usize,
}

impl ContentChanges {
    pub fn between(old: ContentTally, new: ContentTally) -> Self {
        Self {
            added_chapters: new.chapters.saturating_sub(old.chapters),
            removed_chapters: old.chapters.saturating_sub(new.chapters),
            added_sections: new.sections.saturating_sub(old.sections),
            removed_sections: old.sections.saturating_sub(new.sections),
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
