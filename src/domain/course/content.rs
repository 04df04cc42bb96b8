//! Course Context - 课程大纲
//!
//! 大纲由课时（COURSE_CLASS）和分节（COURSE_SECTION）组成，分节下只挂课时。

use serde::{Deserialize, Serialize};

use crate::domain::shared::EntityId;

/// 课时
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseClass {
    pub id: EntityId,
    pub name: String,
    /// 时长（秒）
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub notes: Vec<String>,
}

impl CourseClass {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            duration: 0,
            notes: Vec::new(),
        }
    }
}

/// 分节
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseSection {
    pub id: EntityId,
    pub name: String,
    #[serde(default)]
    pub classes: Vec<CourseClass>,
}

impl CourseSection {
    pub fn new(name: impl Into<String>, classes: Vec<CourseClass>) -> Self {
        Self {
            id: EntityId::new(),
            name: name.into(),
            classes,
        }
    }
}

/// 大纲节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CourseContent {
    #[serde(rename = "COURSE_CLASS")]
    Class(CourseClass),
    #[serde(rename = "COURSE_SECTION")]
    Section(CourseSection),
}
