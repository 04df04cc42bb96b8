//! Documentation Context - 技术文档
//!
//! 文档由主题（DOCUMENTATION_TOPIC）和子主题（DOCUMENTATION_SUBTOPIC）组成。
//! 只有文档标题需要校验，主题结构按原样保存。

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::shared::{validate_with_schema, EntityId, Record, TextSchema};

static TITLE_SCHEMA: Lazy<TextSchema> = Lazy::new(|| TextSchema::new().min(1));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentationError {
    #[error("无效的文档标题: {0}")]
    InvalidTitle(String),
}

impl DocumentationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidTitle(_) => "InvalidDocumentationTitle",
        }
    }
}

/// 子主题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationSubtopic {
    pub id: EntityId,
    pub name: String,
    /// 阅读时长（秒）
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl DocumentationSubtopic {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            duration: 0,
            notes: Vec::new(),
        }
    }
}

/// 主题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentationTopic {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub subtopics: Vec<DocumentationSubtopic>,
}

impl DocumentationTopic {
    pub fn new(name: impl Into<String>, subtopics: Vec<DocumentationSubtopic>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            subtopics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocumentationContent {
    #[serde(rename = "DOCUMENTATION_SUBTOPIC")]
    Subtopic(DocumentationSubtopic),
    #[serde(rename = "DOCUMENTATION_TOPIC")]
    Topic(DocumentationTopic),
}

/// 技术文档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Documentation {
    id: EntityId,
    name: String,
    contents: Vec<DocumentationContent>,
}

impl Documentation {
    pub fn create(
        id: EntityId,
        name: impl Into<String>,
        contents: Vec<DocumentationContent>,
    ) -> Result<Self, DocumentationError> {
        let name = validate_with_schema(&*TITLE_SCHEMA, name.into().as_str(), DocumentationError::InvalidTitle)?;
        Ok(Self { id, name, contents })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[DocumentationContent] {
        &self.contents
    }
}

impl Record for Documentation {
    const KIND: &'static str = "Documentation";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn check(&self) -> Result<(), String> {
        validate_with_schema(&*TITLE_SCHEMA, self.name.as_str(), DocumentationError::InvalidTitle)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_required() {
        let err = Documentation::create(EntityId::new(), "", vec![]).unwrap_err();
        assert_eq!(err.code(), "InvalidDocumentationTitle");
    }

    #[test]
    fn test_topics_kept_as_given() {
        let docs = Documentation::create(
            EntityId::new(),
            "Tokio",
            vec![
                DocumentationContent::Subtopic(DocumentationSubtopic::named("Overview")),
                DocumentationContent::Topic(DocumentationTopic::new(
                    "Runtime",
                    vec![DocumentationSubtopic::named("Scheduler")],
                )),
            ],
        )
        .unwrap();

        let json = serde_json::to_value(&docs).unwrap();
        assert_eq!(json["name"], "Tokio");
        assert_eq!(json["contents"][0]["type"], "DOCUMENTATION_SUBTOPIC");
        assert_eq!(json["contents"][1]["subtopics"][0]["name"], "Scheduler");

        let back: Documentation = serde_json::from_value(json).unwrap();
        assert_eq!(back, docs);
    }
}
