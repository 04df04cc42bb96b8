//! Catalog Record Queries
//!
//! 作者、分类、标签、课程、文档、学习路径共用同一组查询：按 ID 取一条、列出全部。

use std::fmt;
use std::marker::PhantomData;

use crate::application::bus::Query;
use crate::domain::author::Author;
use crate::domain::book::{BookCategory, BookTag};
use crate::domain::course::OnlineCourse;
use crate::domain::documentation::Documentation;
use crate::domain::learning_path::LearningPath;
use crate::domain::shared::Record;

/// 可查询的目录记录，提供查询在总线上的名称
pub trait CatalogRecord: Record {
    const LIST_QUERY: &'static str;
    const GET_QUERY: &'static str;
}

macro_rules! catalog_record {
    ($record:ty, $list:literal, $get:literal) => {
        impl CatalogRecord for $record {
            const LIST_QUERY: &'static str = $list;
            const GET_QUERY: &'static str = $get;
        }
    };
}

catalog_record!(Author, "ListAuthors", "GetAuthor");
catalog_record!(BookCategory, "ListCategories", "GetCategory");
catalog_record!(BookTag, "ListTags", "GetTag");
catalog_record!(OnlineCourse, "ListOnlineCourses", "GetOnlineCourse");
catalog_record!(Documentation, "ListDocumentations", "GetDocumentation");
catalog_record!(LearningPath, "ListLearningPaths", "GetLearningPath");

/// 列出某类记录，最新创建的在前
pub struct ListRecords<T> {
    _record: PhantomData<fn() -> T>,
}

impl<T> ListRecords<T> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<T> Default for ListRecords<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: CatalogRecord> fmt::Debug for ListRecords<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(T::LIST_QUERY)
    }
}

impl<T: CatalogRecord> Query for ListRecords<T> {
    const NAME: &'static str = T::LIST_QUERY;
    type Output = Vec<T>;
}

/// 按 ID 获取一条记录
pub struct GetRecord<T> {
    pub id: String,
    _record: PhantomData<fn() -> T>,
}

impl<T> GetRecord<T> {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            _record: PhantomData,
        }
    }
}

impl<T: CatalogRecord> fmt::Debug for GetRecord<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct(T::GET_QUERY).field("id", &self.id).finish()
    }
}

impl<T: CatalogRecord> Query for GetRecord<T> {
    const NAME: &'static str = T::GET_QUERY;
    type Output = T;
}

pub type ListAuthors = ListRecords<Author>;
pub type GetAuthor = GetRecord<Author>;
pub type ListCategories = ListRecords<BookCategory>;
pub type GetCategory = GetRecord<BookCategory>;
pub type ListTags = ListRecords<BookTag>;
pub type GetTag = GetRecord<BookTag>;
pub type ListOnlineCourses = ListRecords<OnlineCourse>;
pub type GetOnlineCourse = GetRecord<OnlineCourse>;
pub type ListDocumentations = ListRecords<Documentation>;
pub type GetDocumentation = GetRecord<Documentation>;
pub type ListLearningPaths = ListRecords<LearningPath>;
pub type GetLearningPath = GetRecord<LearningPath>;
