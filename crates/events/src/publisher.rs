//! Fire-and-forget event publishing onto named outbound channels.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::event::DeletionEvent;

/// Outbound channel, one per entity type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Products,
    Recommendations,
    Reviews,
}

impl Channel {
    /// All channels, in the order deletion events are published.
    pub const ALL: [Channel; 3] = [Channel::Products, Channel::Recommendations, Channel::Reviews];

    /// Returns the channel name used on the wire and in metrics.
    pub fn name(&self) -> &'static str {
        match self {
            Channel::Products => "products",
            Channel::Recommendations => "recommendations",
            Channel::Reviews => "reviews",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Publisher of deletion events onto outbound channels.
///
/// Publishing is best-effort: it never blocks on downstream consumption,
/// carries no acknowledgment, and a failed enqueue must not fail the
/// operation that triggered it.
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Emits one event onto the given channel.
    async fn publish(&self, channel: Channel, event: DeletionEvent);
}

#[derive(Debug, Default)]
struct BusState {
    subscribers: HashMap<Channel, Vec<UnboundedSender<DeletionEvent>>>,
    published: HashMap<Channel, Vec<DeletionEvent>>,
}

/// In-process event bus over per-channel mpsc subscribers.
///
/// Keeps a log of everything published so tests can assert on delivery
/// without consuming the channels.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventBus {
    state: Arc<RwLock<BusState>>,
}

impl InMemoryEventBus {
    /// Creates a new bus with no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a subscriber on a channel and returns its receiving end.
    pub fn subscribe(&self, channel: Channel) -> UnboundedReceiver<DeletionEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.state
            .write()
            .unwrap()
            .subscribers
            .entry(channel)
            .or_default()
            .push(tx);
        rx
    }

    /// Returns a snapshot of everything published on a channel.
    pub fn published(&self, channel: Channel) -> Vec<DeletionEvent> {
        self.state
            .read()
            .unwrap()
            .published
            .get(&channel)
            .cloned()
            .unwrap_or_default()
    }

    /// Returns the number of events published on a channel.
    pub fn published_count(&self, channel: Channel) -> usize {
        self.state
            .read()
            .unwrap()
            .published
            .get(&channel)
            .map_or(0, Vec::len)
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventBus {
    async fn publish(&self, channel: Channel, event: DeletionEvent) {
        let mut state = self.state.write().unwrap();
        state
            .published
            .entry(channel)
            .or_default()
            .push(event.clone());

        // Dropped receivers are pruned here rather than treated as failures.
        if let Some(senders) = state.subscribers.get_mut(&channel) {
            senders.retain(|tx| tx.send(event.clone()).is_ok());
        }

        metrics::counter!("deletion_events_published_total", "channel" => channel.name())
            .increment(1);
        tracing::debug!(%channel, key = %event.key, "deletion event published");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::ProductId;

    #[tokio::test]
    async fn publish_reaches_subscriber() {
        let bus = InMemoryEventBus::new();
        let mut rx = bus.subscribe(Channel::Products);

        let event = DeletionEvent::new(ProductId::new(1));
        bus.publish(Channel::Products, event.clone()).await;

        assert_eq!(rx.recv().await.unwrap(), event);
        assert_eq!(bus.published_count(Channel::Products), 1);
    }

    #[tokio::test]
    async fn publish_without_subscribers_is_recorded() {
        let bus = InMemoryEventBus::new();
        bus.publish(Channel::Reviews, DeletionEvent::new(ProductId::new(2)))
            .await;

        assert_eq!(bus.published_count(Channel::Reviews), 1);
        assert_eq!(bus.published_count(Channel::Products), 0);
    }

    #[tokio::test]
    async fn dropped_subscriber_does_not_fail_publish() {
        let bus = InMemoryEventBus::new();
        let rx = bus.subscribe(Channel::Recommendations);
        drop(rx);

        bus.publish(
            Channel::Recommendations,
            DeletionEvent::new(ProductId::new(3)),
        )
        .await;
        bus.publish(
            Channel::Recommendations,
            DeletionEvent::new(ProductId::new(4)),
        )
        .await;

        assert_eq!(bus.published_count(Channel::Recommendations), 2);
    }

    #[tokio::test]
    async fn channels_are_isolated() {
        let bus = InMemoryEventBus::new();
        let mut products = bus.subscribe(Channel::Products);
        let mut reviews = bus.subscribe(Channel::Reviews);

        bus.publish(Channel::Products, DeletionEvent::new(ProductId::new(5)))
            .await;

        assert_eq!(products.recv().await.unwrap().key, ProductId::new(5));
        assert!(reviews.try_recv().is_err());
    }
}
