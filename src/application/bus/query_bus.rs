//! Query Bus - 查询分发
//!
//! 与命令总线结构一致，键为查询类型的 `TypeId`。

use async_trait::async_trait;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use super::DispatchError;
use crate::application::ApplicationError;

/// 查询（读操作）
pub trait Query: Send + 'static {
    const NAME: &'static str;

    type Output: Send + 'static;
}

/// 查询处理器
#[async_trait]
pub trait QueryHandler<Q: Query>: Send + Sync {
    async fn handle(&self, query: Q) -> Result<Q::Output, ApplicationError>;
}

#[async_trait]
trait ErasedQueryHandler: Send + Sync {
    async fn handle_erased(
        &self,
        query: Box<dyn Any + Send>,
    ) -> Result<Box<dyn Any + Send>, ApplicationError>;
}

struct TypedQueryHandler<Q, H> {
    handler: H,
    _query: PhantomData<fn(Q)>,
}

#[async_trait]
impl<Q, H> ErasedQueryHandler for TypedQueryHandler<Q, H>
where
    Q: Query,
    H: QueryHandler<Q>,
{
    async fn handle_erased(
        &self,
        query: Box<dyn Any + Send>,
    ) -> Result<Box<dyn Any + Send>, ApplicationError> {
        let query = query
            .downcast::<Q>()
            .map_err(|_| ApplicationError::internal(format!("query type mismatch: {}", Q::NAME)))?;
        let output = self.handler.handle(*query).await?;
        Ok(Box::new(output))
    }
}

/// 查询总线构建器
#[derive(Default)]
pub struct QueryBusBuilder {
    handlers: HashMap<TypeId, (&'static str, Arc<dyn ErasedQueryHandler>)>,
}

impl QueryBusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册处理器，同一查询类型重复注册返回 `DuplicateHandler`
    pub fn register<Q, H>(mut self, handler: H) -> Result<Self, DispatchError>
    where
        Q: Query,
        H: QueryHandler<Q> + 'static,
    {
        let type_id = TypeId::of::<Q>();
        if self.handlers.contains_key(&type_id) {
            return Err(DispatchError::DuplicateHandler(Q::NAME));
        }

        let handler = TypedQueryHandler {
            handler,
            _query: PhantomData,
        };
        self.handlers.insert(type_id, (Q::NAME, Arc::new(handler)));
        tracing::debug!(query = Q::NAME, "Query handler registered");
        Ok(self)
    }

    pub fn build(self) -> QueryBus {
        QueryBus {
            handlers: self.handlers,
        }
    }
}

/// 查询总线
pub struct QueryBus {
    handlers: HashMap<TypeId, (&'static str, Arc<dyn ErasedQueryHandler>)>,
}

impl QueryBus {
    pub fn builder() -> QueryBusBuilder {
        QueryBusBuilder::new()
    }

    pub async fn execute<Q: Query>(&self, query: Q) -> Result<Q::Output, ApplicationError> {
        let Some((_, handler)) = self.handlers.get(&TypeId::of::<Q>()) else {
            tracing::error!(query = Q::NAME, "No handler registered for query");
            return Err(ApplicationError::HandlerNotRegistered(Q::NAME));
        };

        tracing::debug!(query = Q::NAME, "Dispatching query");
        let output = handler.handle_erased(Box::new(query)).await?;
        output
            .downcast::<Q::Output>()
            .map(|output| *output)
            .map_err(|_| ApplicationError::internal(format!("output type mismatch: {}", Q::NAME)))
    }

    pub fn is_registered<Q: Query>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<Q>())
    }

    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }
}
