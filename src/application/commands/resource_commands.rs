//! Online Course / Documentation / Learning Path Commands

use serde::Deserialize;

use crate::application::bus::Command;
use crate::domain::course::{CourseClass, CourseContent, CourseSection, OnlineCourse};
use crate::domain::documentation::{
    Documentation, DocumentationContent, DocumentationSubtopic, DocumentationTopic,
};
use crate::domain::learning_path::{LearningPath, ResourceOrigin};

/// 课程大纲，字符串表示课时，`{ name, classes }` 表示分节
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CourseOutline {
    Class(String),
    Section {
        name: String,
        #[serde(default)]
        classes: Vec<String>,
    },
}

impl CourseOutline {
    pub fn into_content(self) -> CourseContent {
        match self {
            Self::Class(name) => CourseContent::Class(CourseClass::named(name)),
            Self::Section { name, classes } => CourseContent::Section(CourseSection::new(
                name,
                classes.into_iter().map(CourseClass::named).collect(),
            )),
        }
    }
}

/// 文档大纲，字符串表示子主题，`{ name, subtopics }` 表示主题
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum DocumentationOutline {
    Subtopic(String),
    Topic {
        name: String,
        #[serde(default)]
        subtopics: Vec<String>,
    },
}

impl DocumentationOutline {
    pub fn into_content(self) -> DocumentationContent {
        match self {
            Self::Subtopic(name) => DocumentationContent::Subtopic(DocumentationSubtopic::named(name)),
            Self::Topic { name, subtopics } => DocumentationContent::Topic(DocumentationTopic::new(
                name,
                subtopics.into_iter().map(DocumentationSubtopic::named).collect(),
            )),
        }
    }
}

/// 创建在线课程命令
#[derive(Debug, Clone)]
pub struct CreateOnlineCourse {
    pub name: String,
    pub contents: Vec<CourseOutline>,
}

impl Command for CreateOnlineCourse {
    const NAME: &'static str = "CreateOnlineCourse";
    type Output = OnlineCourse;
}

/// 创建技术文档命令
#[derive(Debug, Clone)]
pub struct CreateDocumentation {
    pub name: String,
    pub contents: Vec<DocumentationOutline>,
}

impl Command for CreateDocumentation {
    const NAME: &'static str = "CreateDocumentation";
    type Output = Documentation;
}

/// 学习资源输入
///
/// `id` 是被引用的章节 / 课时 / 子主题的 ID，`type` 与出处字段一起决定引用的是哪个资源。
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LearningResourceInput {
    pub id: String,
    pub name: String,
    pub duration: f64,
    pub order: f64,
    #[serde(flatten)]
    pub origin: ResourceOrigin,
}

/// 创建学习路径命令，引用的书籍、课程、文档必须已存在
#[derive(Debug, Clone)]
pub struct CreateLearningPath {
    pub title: String,
    pub initial_date: String,
    pub resources: Vec<LearningResourceInput>,
}

impl Command for CreateLearningPath {
    const NAME: &'static str = "CreateLearningPath";
    type Output = LearningPath;
}
