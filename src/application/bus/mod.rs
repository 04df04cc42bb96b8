//! CQRS 分发
//!
//! 命令总线与查询总线，均按消息类型路由到唯一的处理器。

mod command_bus;
mod query_bus;

use thiserror::Error;

pub use command_bus::{Command, CommandBus, CommandBusBuilder, CommandHandler};
pub use query_bus::{Query, QueryBus, QueryBusBuilder, QueryHandler};

/// 总线装配错误（启动阶段）
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    #[error("Handler already registered for {0}")]
    DuplicateHandler(&'static str),
}
