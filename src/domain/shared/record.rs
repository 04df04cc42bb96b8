//! Shared Kernel - 可整体存取的目录记录
//!
//! 作者、分类、标签、课程、文档、学习路径都以整条 JSON 文档存储，
//! 仓储只依赖这里的约定，不关心具体类型。

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::EntityId;

/// 目录记录
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// 记录种类，同时用作存储集合名和 NotFound 的资源类型
    const KIND: &'static str;

    fn id(&self) -> &EntityId;

    /// 读取存量文档后重新校验，返回问题描述
    fn check(&self) -> Result<(), String>;
}
