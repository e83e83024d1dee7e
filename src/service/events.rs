//! Publish lifecycle events
//!
//! An in-process event bus built on `tokio::sync::broadcast`. The
//! publishing service emits events as a publish moves through its
//! lifecycle; any number of subscribers (status bars, activity feeds,
//! logs) can observe them. Emitting is non-blocking: if nobody is
//! listening the event is dropped, and lagging subscribers miss old
//! events rather than stalling the publisher.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::sink::PublishReceipt;

pub type EventReceiver = broadcast::Receiver<ComposerEvent>;

/// Broadcast bus for composer events.
#[derive(Clone)]
pub struct EventBus {
    sender: broadcast::Sender<ComposerEvent>,
}

impl EventBus {
    /// Create a bus with the given per-subscriber buffer capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> EventReceiver {
        self.sender.subscribe()
    }

    /// Emit an event to all subscribers. Never blocks; events emitted with
    /// no subscribers are dropped.
    pub fn emit(&self, event: ComposerEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

/// Events emitted while a draft is being published.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComposerEvent {
    /// A publish attempt passed eligibility and was handed to the sink
    PublishStarted {
        post_id: String,
        platforms: Vec<String>,
    },

    /// The sink accepted the post; the draft has been reset
    PublishCompleted {
        post_id: String,
        receipt: PublishReceipt,
    },

    /// The sink rejected the post; the draft is preserved
    PublishFailed { post_id: String, error: String },
}
