//! Course Context - OnlineCourse

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::{CourseClass, CourseContent, CourseError};
use crate::domain::shared::{validate_each, validate_with_schema, EntityId, Record, TextSchema};

static NAME_SCHEMA: Lazy<TextSchema> = Lazy::new(|| TextSchema::new().min(1));

/// 在线课程
///
/// 课程名非空；大纲里每个课时和分节都要有名称，空分节允许存在。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OnlineCourse {
    id: EntityId,
    name: String,
    contents: Vec<CourseContent>,
}

impl OnlineCourse {
    pub fn create(
        id: EntityId,
        name: impl Into<String>,
        contents: Vec<CourseContent>,
    ) -> Result<Self, CourseError> {
        let name = validate_with_schema(&*NAME_SCHEMA, name.into().as_str(), CourseError::InvalidName)?;
        validate_each(&contents, validate_content)?;
        Ok(Self { id, name, contents })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contents(&self) -> &[CourseContent] {
        &self.contents
    }
}

fn validate_content(content: &CourseContent) -> Result<(), CourseError> {
    match content {
        CourseContent::Class(class) => validate_class(class),
        CourseContent::Section(section) => {
            validate_with_schema(&*NAME_SCHEMA, section.name.as_str(), CourseError::InvalidSectionName)?;
            validate_each(&section.classes, validate_class)
        }
    }
}

fn validate_class(class: &CourseClass) -> Result<(), CourseError> {
    validate_with_schema(&*NAME_SCHEMA, class.name.as_str(), CourseError::InvalidClassName).map(|_| ())
}

impl Record for OnlineCourse {
    const KIND: &'static str = "OnlineCourse";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn check(&self) -> Result<(), String> {
        Self::create(self.id, self.name.clone(), self.contents.clone())
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
