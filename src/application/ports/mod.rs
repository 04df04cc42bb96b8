//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod event_publisher;
mod repositories;

pub use event_publisher::DomainEventPublisherPort;
pub use repositories::{
    BookRepositoryPort, RecordRepositoryPort, Repositories, RepositoryError, SearchCriteria,
};
