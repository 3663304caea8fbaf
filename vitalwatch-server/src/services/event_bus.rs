use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};

use crate::models::Reading;

/// Fired once per committed vitals reading.
pub const READING_CREATED: &str = "reading.created";

#[derive(Clone, Debug)]
pub enum EventPayload {
    ReadingCreated(Reading),
}

/// Subscription point the pipeline exposes to its host: a handler subscribes to
/// a topic and receives every record published on it after the write commits.
///
/// Subscriptions are unbounded queues, so a slow subscriber delays events but
/// never loses them.
#[derive(Default)]
pub struct EventBus {
    subscribers: Arc<RwLock<HashMap<String, Vec<mpsc::UnboundedSender<EventPayload>>>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            subscribers: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Deliver `payload` to every live subscriber of `event_type`, returning how
    /// many received it. Subscribers whose receiver is gone are pruned.
    pub async fn publish(&self, event_type: &str, payload: EventPayload) -> usize {
        let mut subscribers = self.subscribers.write().await;
        let Some(senders) = subscribers.get_mut(event_type) else {
            return 0;
        };

        senders.retain(|sender| sender.send(payload.clone()).is_ok());
        senders.len()
    }

    pub async fn subscribe(&self, event_type: &str) -> mpsc::UnboundedReceiver<EventPayload> {
        let (sender, receiver) = mpsc::unbounded_channel();

        self.subscribers
            .write()
            .await
            .entry(event_type.to_string())
            .or_default()
            .push(sender);

        receiver
    }
}
