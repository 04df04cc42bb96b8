//! Event Publisher Implementation
//!
//! 基于 broadcast 通道的领域事件推送

use std::sync::Arc;
use tokio::sync::broadcast;

use crate::application::ports::DomainEventPublisherPort;
use crate::domain::book::BookEvent;

/// 事件发布器
pub struct EventPublisher {
    channel: broadcast::Sender<BookEvent>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { channel: tx }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// 订阅书籍事件
    pub fn subscribe(&self) -> broadcast::Receiver<BookEvent> {
        self.channel.subscribe()
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

impl DomainEventPublisherPort for EventPublisher {
    fn publish(&self, events: &[BookEvent]) {
        for event in events {
            tracing::info!(
                book_id = %event.aggregate_id,
                event = event.name(),
                "Domain event"
            );
            if let Err(e) = self.channel.send(event.clone()) {
                tracing::debug!(
                    book_id = %event.aggregate_id,
                    error = %e,
                    "Failed to publish event (no receivers)"
                );
            }
        }
    }
}
