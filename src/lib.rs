//! Catalog - 书籍目录后端
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Book: 聚合根、值对象、内容树（章节/分节）、领域事件
//! - Author / Course / Documentation / LearningPath: 共享集合里的目录记录
//! - Shared: 实体 ID、声明式校验、Record 约定
//!
//! 应用层 (application/):
//! - Bus: 命令/查询总线，按消息类型分发到唯一处理器
//! - Ports: BookRepository, RecordRepository, DomainEventPublisher
//! - Commands / Queries: CQRS 处理器
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: JSON API
//! - Persistence: SQLite 文档存储
//! - Memory: 内存仓储
//! - Events: broadcast 事件发布

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
