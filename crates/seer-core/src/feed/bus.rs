use std::sync::mpsc::{self, Receiver, Sender};

use crate::events::FeedEvent;

/// Fan-out channel for [`FeedEvent`]s. Publishing never blocks; subscribers
/// whose receiver has been dropped are pruned on the next publish.
#[derive(Debug, Default)]
pub struct FeedEventBus {
    subscribers: Vec<Sender<FeedEvent>>,
}

impl FeedEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self) -> Receiver<FeedEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    pub fn publish(&mut self, event: FeedEvent) {
        tracing::trace!(?event, subscribers = self.subscribers.len(), "feed event");
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}
