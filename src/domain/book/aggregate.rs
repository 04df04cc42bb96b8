//! Book Context - Aggregate Root

use serde::{Deserialize, Serialize};

use super::{
    validate_contents, BookAuthor, BookCategory, BookContent, BookError, BookEvent, BookEventKind,
    BookSource, BookSourceProps, BookTag, BookTitle, BookYear, ContentChanges, ContentTally,
    CoverUrl, Description, Edition, FieldChange, Isbn,
};
use crate::domain::shared::{validate_each, EntityId};

/// Book 聚合根
///
/// 不变量:
/// - 每个字段都通过各自的校验，作者和目录非空
/// - 只能通过 `create` 构造，只能通过 `apply` 产生新版本
/// - `apply` 不修改原记录，失败时原记录保持不变
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Book {
    id: EntityId,
    isbn: Isbn,
    title: BookTitle,
    edition: Edition,
    cover: CoverUrl,
    year: BookYear,
    authors: Vec<BookAuthor>,
    description: Option<Description>,
    categories: Vec<BookCategory>,
    tags: Vec<BookTag>,
    sources: Vec<BookSource>,
    contents: Vec<BookContent>,
}

/// 未校验的书籍数据，也是存储文档的形态
///
/// `edition` / `year` 用 f64 承载，带小数的输入交给 schema 拒绝而不是被截断。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookProps {
    pub id: EntityId,
    pub isbn: String,
    pub title: String,
    pub edition: f64,
    pub cover: String,
    pub year: f64,
    pub authors: Vec<BookAuthor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<BookCategory>,
    #[serde(default)]
    pub tags: Vec<BookTag>,
    #[serde(default)]
    pub sources: Vec<BookSourceProps>,
    pub contents: Vec<BookContent>,
}

/// 单字段更新
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "field", content = "value", rename_all = "snake_case")]
pub enum BookUpdate {
    Title(String),
    Isbn(String),
    Edition(f64),
    Cover(String),
    Year(f64),
    Authors(Vec<BookAuthor>),
    Description(String),
    Categories(Vec<BookCategory>),
    Tags(Vec<BookTag>),
    Sources(Vec<BookSourceProps>),
    Content(Vec<BookContent>),
}

impl BookUpdate {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Title(_) => "title",
            Self::Isbn(_) => "isbn",
            Self::Edition(_) => "edition",
            Self::Cover(_) => "cover",
            Self::Year(_) => "year",
            Self::Authors(_) => "authors",
            Self::Description(_) => "description",
            Self::Categories(_) => "categories",
            Self::Tags(_) => "tags",
            Self::Sources(_) => "sources",
            Self::Content(_) => "content",
        }
    }
}

/// 一次状态迁移的结果: 新记录 + 本次产生的事件
#[derive(Debug, Clone)]
pub struct Transition {
    pub book: Book,
    pub events: Vec<BookEvent>,
}

/// 校验并创建书籍，成功时产生一个 `BookCreated` 事件
///
/// 校验顺序固定，遇到第一个失败立即返回:
/// ISBN → 版次 → 书名 → 封面 → 年份 → 作者 → 简介 → 分类 → 标签 → 来源 → 目录
pub fn create(props: BookProps) -> Result<Transition, BookError> {
    let isbn = Isbn::parse(&props.isbn)?;
    let edition = Edition::parse(props.edition)?;
    let title = BookTitle::parse(&props.title)?;
    let cover = CoverUrl::parse(&props.cover)?;
    let year = BookYear::parse(props.year)?;
    validate_authors(&props.authors)?;
    let description = props
        .description
        .as_deref()
        .map(Description::parse)
        .transpose()?;
    validate_each(&props.categories, BookCategory::validate)?;
    validate_each(&props.tags, BookTag::validate)?;
    let sources = parse_sources(&props.sources)?;
    validate_contents(&props.contents)?;

    let book = Book {
        id: props.id,
        isbn,
        title,
        edition,
        cover,
        year,
        authors: props.authors,
        description,
        categories: props.categories,
        tags: props.tags,
        sources,
        contents: props.contents,
    };

    let created = BookEvent::new(
        book.id,
        BookEventKind::BookCreated {
            isbn: book.isbn.to_string(),
            title: book.title.to_string(),
            authors: book.authors.clone(),
            year: book.year.value(),
        },
    );

    Ok(Transition {
        book,
        events: vec![created],
    })
}

/// 对一个字段应用更新，返回新记录和事件
///
/// 书名、ISBN 的更新总是产生 `BookMetadataUpdated`；
/// 来源和目录只在确有变化时产生事件；其余字段不产生事件。
pub fn apply(book: &Book, update: BookUpdate) -> Result<Transition, BookError> {
    let mut next = book.clone();
    let mut events = Vec::new();

    match update {
        BookUpdate::Title(value) => {
            next.title = BookTitle::parse(&value)?;
            events.push(metadata_updated(
                book,
                "title",
                book.title.as_str(),
                next.title.as_str(),
            ));
        }
        BookUpdate::Isbn(value) => {
            next.isbn = Isbn::parse(&value)?;
            events.push(metadata_updated(
                book,
                "isbn",
                book.isbn.as_str(),
                next.isbn.as_str(),
            ));
        }
        BookUpdate::Edition(value) => next.edition = Edition::parse(value)?,
        BookUpdate::Cover(value) => next.cover = CoverUrl::parse(&value)?,
        BookUpdate::Year(value) => next.year = BookYear::parse(value)?,
        BookUpdate::Authors(authors) => {
            validate_authors(&authors)?;
            next.authors = authors;
        }
        BookUpdate::Description(value) => next.description = Some(Description::parse(&value)?),
        BookUpdate::Categories(categories) => {
            validate_each(&categories, BookCategory::validate)?;
            next.categories = categories;
        }
        BookUpdate::Tags(tags) => {
            validate_each(&tags, BookTag::validate)?;
            next.tags = tags;
        }
        BookUpdate::Sources(values) => {
            next.sources = parse_sources(&values)?;
            let added: Vec<BookSource> = next
                .sources
                .iter()
                .filter(|source| !book.sources.contains(source))
                .cloned()
                .collect();
            let removed: Vec<BookSource> = book
                .sources
                .iter()
                .filter(|source| !next.sources.contains(source))
                .cloned()
                .collect();
            if !added.is_empty() || !removed.is_empty() {
                events.push(BookEvent::new(
                    book.id,
                    BookEventKind::BookSourcesUpdated { added, removed },
                ));
            }
        }
        BookUpdate::Content(contents) => {
            validate_contents(&contents)?;
            let changes = ContentChanges::between(
                ContentTally::of(&book.contents),
                ContentTally::of(&contents),
            );
            next.contents = contents;
            if !changes.is_empty() {
                events.push(BookEvent::new(
                    book.id,
                    BookEventKind::BookContentUpdated { changes },
                ));
            }
        }
    }

    Ok(Transition { book: next, events })
}

pub fn update_title(book: &Book, title: impl Into<String>) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Title(title.into()))
}

pub fn update_isbn(book: &Book, isbn: impl Into<String>) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Isbn(isbn.into()))
}

pub fn update_edition(book: &Book, edition: f64) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Edition(edition))
}

pub fn update_cover(book: &Book, cover: impl Into<String>) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Cover(cover.into()))
}

pub fn update_year(book: &Book, year: f64) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Year(year))
}

pub fn update_authors(book: &Book, authors: Vec<BookAuthor>) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Authors(authors))
}

pub fn update_description(
    book: &Book,
    description: impl Into<String>,
) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Description(description.into()))
}

pub fn update_categories(
    book: &Book,
    categories: Vec<BookCategory>,
) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Categories(categories))
}

pub fn update_tags(book: &Book, tags: Vec<BookTag>) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Tags(tags))
}

pub fn update_sources(
    book: &Book,
    sources: Vec<BookSourceProps>,
) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Sources(sources))
}

pub fn update_content(book: &Book, contents: Vec<BookContent>) -> Result<Transition, BookError> {
    apply(book, BookUpdate::Content(contents))
}

fn validate_authors(authors: &[BookAuthor]) -> Result<(), BookError> {
    if authors.is_empty() {
        return Err(BookError::EmptyAuthors);
    }
    validate_each(authors, BookAuthor::validate)
}

fn parse_sources(sources: &[BookSourceProps]) -> Result<Vec<BookSource>, BookError> {
    sources.iter().map(BookSource::parse).collect()
}

fn metadata_updated(book: &Book, field: &'static str, old: &str, new: &str) -> BookEvent {
    BookEvent::new(
        book.id,
        BookEventKind::BookMetadataUpdated {
            changes: vec![FieldChange {
                field,
                old_value: old.to_string(),
                new_value: new.to_string(),
            }],
        },
    )
}

impl Book {
    /// 导出为未校验形态（用于持久化，`create(book.to_props())` 得到相同的记录）
    pub fn to_props(&self) -> BookProps {
        BookProps {
            id: self.id,
            isbn: self.isbn.to_string(),
            title: self.title.to_string(),
            edition: f64::from(self.edition.value()),
            cover: self.cover.to_string(),
            year: f64::from(self.year.value()),
            authors: self.authors.clone(),
            description: self.description.as_ref().map(ToString::to_string),
            categories: self.categories.clone(),
            tags: self.tags.clone(),
            sources: self.sources.iter().map(BookSourceProps::from).collect(),
            contents: self.contents.clone(),
        }
    }

    // Getters
    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    pub fn title(&self) -> &str {
        self.title.as_str()
    }

    pub fn edition(&self) -> u32 {
        self.edition.value()
    }

    pub fn cover(&self) -> &str {
        self.cover.as_str()
    }

    pub fn year(&self) -> i32 {
        self.year.value()
    }

    pub fn authors(&self) -> &[BookAuthor] {
        &self.authors
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_ref().map(Description::as_str)
    }

    pub fn categories(&self) -> &[BookCategory] {
        &self.categories
    }

    pub fn tags(&self) -> &[BookTag] {
        &self.tags
    }

    pub fn sources(&self) -> &[BookSource] {
        &self.sources
    }

    pub fn contents(&self) -> &[BookContent] {
        &self.contents
    }
}
