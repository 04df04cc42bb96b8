//! Book Context - Value Objects
//!
//! 每个值对象持有一个 schema 和一种错误，只能通过 `parse` 构造。

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use super::BookError;
use crate::domain::shared::{validate_with_schema, IntegerSchema, TextSchema};

static TITLE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^[a-zA-Z0-9\s\-:.,!?'"()]+$"#).expect("title pattern"));
static ISBN_13: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(978|979)[0-9]{10}$").expect("isbn-13 pattern"));
static ISBN_10: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{9}[0-9X]$").expect("isbn-10 pattern"));

static ISBN_SCHEMA: Lazy<TextSchema> =
    Lazy::new(|| TextSchema::new().refine(is_isbn, "ISBN 必须是 10 位或以 978/979 开头的 13 位"));
static TITLE_SCHEMA: Lazy<TextSchema> =
    Lazy::new(|| TextSchema::new().min(1).max(500).pattern(&TITLE_PATTERN));
static URL_SCHEMA: Lazy<TextSchema> = Lazy::new(|| TextSchema::new().url());
static NAME_SCHEMA: Lazy<TextSchema> = Lazy::new(|| TextSchema::new().min(1));

const EDITION_SCHEMA: IntegerSchema = IntegerSchema::new().min(1).max(u32::MAX as i64);
const YEAR_SCHEMA: IntegerSchema = IntegerSchema::new().min(1450).max(3000);

/// 去掉连字符和空白后，匹配 ISBN-13 或 ISBN-10（校验位不区分大小写）
fn is_isbn(value: &str) -> bool {
    let cleaned: String = value
        .chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect();
    ISBN_13.is_match(&cleaned) || ISBN_10.is_match(&cleaned)
}

macro_rules! text_value_object {
    ($(#[$meta:meta])* $name:ident, $schema:expr, $error:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(value: &str) -> Result<Self, BookError> {
                validate_with_schema(&*$schema, value, $error).map(Self)
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

text_value_object!(
    /// ISBN，保存调用方给出的原始写法（连字符、空格保留）
    Isbn,
    ISBN_SCHEMA,
    BookError::InvalidIsbn
);
text_value_object!(
    /// 书名: 1-500 个字符，仅允许字母、数字、空白和常见标点
    BookTitle,
    TITLE_SCHEMA,
    BookError::InvalidTitle
);
text_value_object!(
    /// 封面地址（绝对 URL）
    CoverUrl,
    URL_SCHEMA,
    BookError::InvalidCover
);
text_value_object!(Description, NAME_SCHEMA, BookError::InvalidDescription);
text_value_object!(AuthorName, NAME_SCHEMA, BookError::InvalidAuthorName);
text_value_object!(CategoryName, NAME_SCHEMA, BookError::InvalidCategoryName);
text_value_object!(TagName, NAME_SCHEMA, BookError::InvalidTagName);
text_value_object!(
    /// 来源文件地址（绝对 URL）
    SourceUrl,
    URL_SCHEMA,
    BookError::InvalidSourceUrl
);

/// 版次，从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Edition(u32);

impl Edition {
    pub fn parse(value: f64) -> Result<Self, BookError> {
        let edition = validate_with_schema(&EDITION_SCHEMA, &value, BookError::InvalidEdition)?;
        u32::try_from(edition)
            .map(Self)
            .map_err(|e| BookError::InvalidEdition(e.to_string()))
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

/// 出版年份，1450-3000（含）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookYear(i32);

impl BookYear {
    pub fn parse(value: f64) -> Result<Self, BookError> {
        let year = validate_with_schema(&YEAR_SCHEMA, &value, BookError::InvalidYear)?;
        i32::try_from(year)
            .map(Self)
            .map_err(|e| BookError::InvalidYear(e.to_string()))
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

/// 来源文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceExtension {
    Pdf,
    Epub,
}

impl SourceExtension {
    pub fn parse(value: &str) -> Result<Self, BookError> {
        match value {
            "pdf" => Ok(Self::Pdf),
            "epub" => Ok(Self::Epub),
            other => Err(BookError::InvalidSourceExtension(format!(
                "不支持的格式 \"{}\"，可选值: pdf, epub",
                other
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Epub => "epub",
        }
    }
}

/// 未校验的来源引用（请求体和存储文档中的形态）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookSourceProps {
    pub url: String,
    pub extension: String,
}

/// 已校验的来源引用，相等性按 url + extension
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct BookSource {
    url: SourceUrl,
    extension: SourceExtension,
}

impl BookSource {
    pub fn parse(props: &BookSourceProps) -> Result<Self, BookError> {
        Ok(Self {
            url: SourceUrl::parse(&props.url)?,
            extension: SourceExtension::parse(&props.extension)?,
        })
    }

    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    pub fn extension(&self) -> SourceExtension {
        self.extension
    }
}

impl From<&BookSource> for BookSourceProps {
    fn from(source: &BookSource) -> Self {
        Self {
            url: source.url().to_string(),
            extension: source.extension().as_str().to_string(),
        }
    }
}
