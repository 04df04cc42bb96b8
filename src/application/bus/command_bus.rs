//! Command Bus - 命令分发
//!
//! 以命令类型的 `TypeId` 为键，每种命令恰好对应一个处理器。
//! 注册只发生在构建阶段，`build()` 之后表只读。

use async_trait::async_trait;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use super::DispatchError;
use crate::application::ApplicationError;

/// 命令（写操作）
pub trait Command: Send + 'static {
    /// 用于日志和错误信息的名称
    const NAME: &'static str;

    type Output: Send + 'static;
}

/// 命令处理器
#[async_trait]
pub trait CommandHandler<C: Command>: Send + Sync {
    async fn handle(&self, command: C) -> Result<C::Output, ApplicationError>;
}

#[async_trait]
trait ErasedCommandHandler: Send + Sync {
    async fn handle_erased(
        &self,
        command: Box<dyn Any + Send>,
    ) -> Result<Box<dyn Any + Send>, ApplicationError>;
}

struct TypedCommandHandler<C, H> {
    handler: H,
    _command: PhantomData<fn(C)>,
}

#[async_trait]
impl<C, H> ErasedCommandHandler for TypedCommandHandler<C, H>
where
    C: Command,
    H: CommandHandler<C>,
{
    async fn handle_erased(
        &self,
        command: Box<dyn Any + Send>,
    ) -> Result<Box<dyn Any + Send>, ApplicationError> {
        let command = command
            .downcast::<C>()
            .map_err(|_| ApplicationError::internal(format!("command type mismatch: {}", C::NAME)))?;
        let output = self.handler.handle(*command).await?;
        Ok(Box::new(output))
    }
}

/// 命令总线构建器
#[derive(Default)]
pub struct CommandBusBuilder {
    handlers: HashMap<TypeId, (&'static str, Arc<dyn ErasedCommandHandler>)>,
}

impl CommandBusBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册处理器，同一命令类型重复注册返回 `DuplicateHandler`
    pub fn register<C, H>(mut self, handler: H) -> Result<Self, DispatchError>
    where
        C: Command,
        H: CommandHandler<C> + 'static,
    {
        let type_id = TypeId::of::<C>();
        if self.handlers.contains_key(&type_id) {
            return Err(DispatchError::DuplicateHandler(C::NAME));
        }

        let handler = TypedCommandHandler {
            handler,
            _command: PhantomData,
        };
        self.handlers.insert(type_id, (C::NAME, Arc::new(handler)));
        tracing::debug!(command = C::NAME, "Command handler registered");
        Ok(self)
    }

    pub fn build(self) -> CommandBus {
        CommandBus {
            handlers: self.handlers,
        }
    }
}

/// 命令总线
pub struct CommandBus {
    handlers: HashMap<TypeId, (&'static str, Arc<dyn ErasedCommandHandler>)>,
}

impl CommandBus {
    pub fn builder() -> CommandBusBuilder {
        CommandBusBuilder::new()
    }

    /// 分发命令到已注册的处理器，只调用一次
    pub async fn execute<C: Command>(&self, command: C) -> Result<C::Output, ApplicationError> {
        let Some((_, handler)) = self.handlers.get(&TypeId::of::<C>()) else {
            tracing::error!(command = C::NAME, "No handler registered for command");
            return Err(ApplicationError::HandlerNotRegistered(C::NAME));
        };

        tracing::debug!(command = C::NAME, "Dispatching command");
        let output = handler.handle_erased(Box::new(command)).await?;
        output
            .downcast::<C::Output>()
            .map(|output| *output)
            .map_err(|_| ApplicationError::internal(format!("output type mismatch: {}", C::NAME)))
    }

    pub fn is_registered<C: Command>(&self) -> bool {
        self.handlers.contains_key(&TypeId::of::<C>())
    }

    /// 已注册的命令名称
    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.values().map(|(name, _)| *name).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Rename {
        name: String,
    }

    impl Command for Rename {
        const NAME: &'static str = "Rename";
        type Output = String;
    }

    struct Archive;

    impl Command for Archive {
        const NAME: &'static str = "Archive";
        type Output = ();
    }

    struct RenameHandler {
        calls: Arc<AtomicUsize>,
        prefix: &'static str,
    }

    #[async_trait]
    impl CommandHandler<Rename> for RenameHandler {
        async fn handle(&self, command: Rename) -> Result<String, ApplicationError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(format!("{}{}", self.prefix, command.name))
        }
    }

    struct FailingArchive;

    #[async_trait]
    impl CommandHandler<Archive> for FailingArchive {
        async fn handle(&self, _command: Archive) -> Result<(), ApplicationError> {
            Err(ApplicationError::not_found("Book", "42"))
        }
    }

    fn rename_handler(calls: &Arc<AtomicUsize>, prefix: &'static str) -> RenameHandler {
        RenameHandler {
            calls: Arc::clone(calls),
            prefix,
        }
    }

    #[tokio::test]
    async fn test_execute_invokes_handler_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let bus = CommandBus::builder()
            .register::<Rename, _>(rename_handler(&calls, "renamed: "))
            .unwrap()
            .build();

        let output = bus.execute(Rename { name: "dune".into() }).await.unwrap();
        assert_eq!(output, "renamed: dune");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unregistered_command() {
        let calls = Arc::new(AtomicUsize::new(0));
        let bus = CommandBus::builder()
            .register::<Rename, _>(rename_handler(&calls, ""))
            .unwrap()
            .build();

        let err = bus.execute(Archive).await.unwrap_err();
        assert!(matches!(err, ApplicationError::HandlerNotRegistered("Archive")));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_handler_error_is_passed_through() {
        let bus = CommandBus::builder()
            .register::<Archive, _>(FailingArchive)
            .unwrap()
            .build();

        let err = bus.execute(Archive).await.unwrap_err();
        assert_eq!(err.code(), "BookNotFound");
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let calls = Arc::new(AtomicUsize::new(0));
        let result = CommandBus::builder()
            .register::<Rename, _>(rename_handler(&calls, "a"))
            .unwrap()
            .register::<Rename, _>(rename_handler(&calls, "b"));

        assert!(matches!(result, Err(DispatchError::DuplicateHandler("Rename"))));
    }

    #[test]
    fn test_registered_names() {
        let calls = Arc::new(AtomicUsize::new(0));
        let bus = CommandBus::builder()
            .register::<Rename, _>(rename_handler(&calls, ""))
            .unwrap()
            .register::<Archive, _>(FailingArchive)
            .unwrap()
            .build();

        assert!(bus.is_registered::<Rename>());
        assert_eq!(bus.registered(), vec!["Archive", "Rename"]);
    }
}
