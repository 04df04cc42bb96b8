//! Learning Path Context - Aggregate Root

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::LearningPathError;
use crate::domain::shared::{validate_with_schema, EntityId, IntegerSchema, Record, TextSchema};

static TITLE_SCHEMA: Lazy<TextSchema> = Lazy::new(|| TextSchema::new().min(1));

const DURATION_SCHEMA: IntegerSchema = IntegerSchema::new().min(0).max(u32::MAX as i64);
const ORDER_SCHEMA: IntegerSchema = IntegerSchema::new().min(0).max(u32::MAX as i64);

/// 资源出处
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ResourceOrigin {
    #[serde(rename = "BOOK_CHAPTER")]
    BookChapter {
        book: EntityId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section: Option<String>,
    },
    #[serde(rename = "COURSE_CLASS")]
    CourseClass {
        online_course: EntityId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        section: Option<String>,
    },
    #[serde(rename = "DOCUMENTATION_SUBTOPIC")]
    DocumentationSubtopic {
        documentation: EntityId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        topic: Option<String>,
    },
}

/// 学习资源
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningResource {
    pub id: EntityId,
    pub name: String,
    /// 时长（秒）
    pub duration: u32,
    pub order: u32,
    #[serde(flatten)]
    pub origin: ResourceOrigin,
}

/// 未校验的学习资源，数字字段用 f64 承载
#[derive(Debug, Clone, PartialEq)]
pub struct LearningResourceProps {
    pub id: EntityId,
    pub name: String,
    pub duration: f64,
    pub order: f64,
    pub origin: ResourceOrigin,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LearningPathProps {
    pub id: EntityId,
    pub title: String,
    /// RFC 3339 时间或 `YYYY-MM-DD` 日期
    pub initial_date: String,
    pub resources: Vec<LearningResourceProps>,
}

/// 学习路径聚合根
///
/// 资源按 `order` 升序保存，顺序相同的保持提交时的先后。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningPath {
    id: EntityId,
    title: String,
    initial_date: DateTime<Utc>,
    resources: Vec<LearningResource>,
}

impl LearningPath {
    /// 校验顺序: 标题 → 开始日期 → 各资源（时长、顺序）
    pub fn create(props: LearningPathProps) -> Result<Self, LearningPathError> {
        let title = validate_with_schema(&*TITLE_SCHEMA, props.title.as_str(), LearningPathError::InvalidTitle)?;
        let initial_date = parse_initial_date(&props.initial_date)?;
        let mut resources = props
            .resources
            .into_iter()
            .map(parse_resource)
            .collect::<Result<Vec<_>, _>>()?;
        resources.sort_by_key(|resource| resource.order);

        Ok(Self {
            id: props.id,
            title,
            initial_date,
            resources,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn initial_date(&self) -> DateTime<Utc> {
        self.initial_date
    }

    pub fn resources(&self) -> &[LearningResource] {
        &self.resources
    }

    /// 全部资源的总时长（秒）
    pub fn total_duration(&self) -> u64 {
        self.resources.iter().map(|r| u64::from(r.duration)).sum()
    }
}

fn parse_initial_date(value: &str) -> Result<DateTime<Utc>, LearningPathError> {
    let value = value.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| Utc.from_utc_datetime(&midnight))
        .ok_or_else(|| LearningPathError::InvalidInitialDate(format!("无法解析 \"{}\"", value)))
}

fn parse_resource(props: LearningResourceProps) -> Result<LearningResource, LearningPathError> {
    let duration = validate_with_schema(&DURATION_SCHEMA, &props.duration, LearningPathError::InvalidResourceDuration)?;
    let order = validate_with_schema(&ORDER_SCHEMA, &props.order, LearningPathError::InvalidResourceOrder)?;
    Ok(LearningResource {
        id: props.id,
        name: props.name,
        duration: u32::try_from(duration)
            .map_err(|e| LearningPathError::InvalidResourceDuration(e.to_string()))?,
        order: u32::try_from(order).map_err(|e| LearningPathError::InvalidResourceOrder(e.to_string()))?,
        origin: props.origin,
    })
}

impl Record for LearningPath {
    const KIND: &'static str = "LearningPath";

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn check(&self) -> Result<(), String> {
        validate_with_schema(&*TITLE_SCHEMA, self.title.as_str(), LearningPathError::InvalidTitle)
            .map(|_| ())
            .map_err(|e| e.to_string())
    }
}
