//! Author Context - Entity

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::AuthorError;
use crate::domain::shared::{validate_with_schema, EntityId, Record, TextSchema};

static NAME_SCHEMA: Lazy<TextSchema> = Lazy::new(|| TextSchema::new().min(1));
static IMAGE_SCHEMA: Lazy<TextSchema> = Lazy::new(|| TextSchema::new().url());

/// 作者（共享集合，书籍按 ID 引用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    id: EntityId,
    first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name_1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_name_2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image: Option<String>,
}

/// 未校验的作者数据
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthorProps {
    pub id: EntityId,
    pub first_name: String,
    pub last_name_1: Option<String>,
    pub last_name_2: Option<String>,
    pub image: Option<String>,
}

impl Author {
    /// 校验顺序: 名 → 第一姓氏 → 第二姓氏 → 头像，可选字段只在给出时校验
    pub fn create(props: AuthorProps) -> Result<Self, AuthorError> {
        let first_name =
            validate_with_schema(&*NAME_SCHEMA, props.first_name.as_str(), AuthorError::InvalidFirstName)?;
        let last_name_1 = props.last_name_1.as_deref().map(parse_last_name).transpose()?;
        let last_name_2 = props.last_name_2.as_deref().map(parse_last_name).transpose()?;
        let image = props
            .image
            .as_deref()
            .map(|image| validate_with_schema(&*IMAGE_SCHEMA, image, AuthorError::InvalidImage))
            .transpose()?;

        Ok(Self {
            id: props.id,
            first_name,
            last_name_1,
            last_name_2,
            image,
        })
    }

    /// 名和姓氏以空格连接，书籍里冗余保存的就是这个形式
    pub fn full_name(&self) -> String {
        std::iter::once(self.first_name.as_str())
            .chain(self.last_name_1.as_deref())
            .chain(self.last_name_2.as_deref())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn to_props(&self) -> AuthorProps {
        AuthorProps {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name_1: self.last_name_1.clone(),
            last_name_2: self.last_name_2.clone(),
            image: self.image.clone(),
        }
    }
}

fn parse_last_name(value: &str) -> Result<String, AuthorError> {
    validate_with_schema(&*NAME_SCHEMA, value, AuthorError::InvalidLastName)
}

impl Record for Author {
    const KIND: &'static str = "Author";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn check(&self) -> Result<(), String> {
        Self::create(self.to_props()).map(|_| ()).map_err(|e| e.to_string())
    }
}
