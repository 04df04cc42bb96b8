//! Author / Category / Tag Commands

use crate::application::bus::Command;
use crate::domain::author::Author;
use crate::domain::book::{BookCategory, BookTag};

/// 创建作者命令
#[derive(Debug, Clone, Default)]
pub struct CreateAuthor {
    pub first_name: String,
    pub last_name_1: Option<String>,
    pub last_name_2: Option<String>,
    pub image: Option<String>,
}

impl Command for CreateAuthor {
    const NAME: &'static str = "CreateAuthor";
    type Output = Author;
}

/// 创建分类命令，名称不区分大小写唯一
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
}

impl Command for CreateCategory {
    const NAME: &'static str = "CreateCategory";
    type Output = BookCategory;
}

/// 创建标签命令，名称不区分大小写唯一
#[derive(Debug, Clone)]
pub struct CreateTag {
    pub name: String,
}

impl Command for CreateTag {
    const NAME: &'static str = "CreateTag";
    type Output = BookTag;
}
