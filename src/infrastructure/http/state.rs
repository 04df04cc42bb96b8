//! Application State
//!
//! 路由共享的状态：命令总线和查询总线

use std::sync::Arc;

use crate::application::{build_buses, CommandBus, DispatchError, DomainEventPublisherPort, QueryBus, Repositories};

/// 应用状态
///
/// HTTP handler 只通过总线访问用例，不直接持有仓储
pub struct AppState {
    pub commands: CommandBus,
    pub queries: QueryBus,
}

impl AppState {
    /// 创建应用状态，装配全部 handler
    pub fn new(
        repos: &Repositories,
        event_publisher: Arc<dyn DomainEventPublisherPort>,
    ) -> Result<Self, DispatchError> {
        let (commands, queries) = build_buses(repos, event_publisher)?;
        Ok(Self { commands, queries })
    }
}
