//! Shared Kernel - 实体标识

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// 标识符格式错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("无效的标识符: \"{0}\"")]
pub struct InvalidIdError(pub String);

impl InvalidIdError {
    pub fn code(&self) -> &'static str {
        "InvalidId"
    }
}

/// 全局唯一实体标识
///
/// 相等性以规范字符串形式（小写、带连字符的 UUID）为准。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 从外部提供的字符串构造
    pub fn parse(value: &str) -> Result<Self, InvalidIdError> {
        Uuid::parse_str(value.trim())
            .map(Self)
            .map_err(|_| InvalidIdError(value.to_string()))
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.hyphenated())
    }
}

impl std::str::FromStr for EntityId {
    type Err = InvalidIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
