//! Event Publisher Port - 领域事件出站端口

use crate::domain::book::BookEvent;

/// 领域事件发布端口
///
/// 发布是尽力而为的，没有订阅者时事件直接丢弃，不影响命令结果。
pub trait DomainEventPublisherPort: Send + Sync {
    fn publish(&self, events: &[BookEvent]);
}
