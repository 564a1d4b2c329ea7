//! Store change events and the broadcast event bus
//!
//! Every mutation of the shot store emits a `StoreEvent`. Live subscriptions
//! (session lists, session records, club history) listen on the bus and
//! recompute their snapshot whenever an event for their owner arrives.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Store change notifications
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreEvent {
    /// A batch of shot records was committed
    BatchUploaded {
        owner_id: String,
        batch_id: String,
        shot_count: usize,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A batch of shot records was deleted
    BatchDeleted {
        owner_id: String,
        batch_id: String,
        deleted: u64,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl StoreEvent {
    /// Event type name as serialized in the `type` tag
    pub fn event_type(&self) -> &str {
        match self {
            StoreEvent::BatchUploaded { .. } => "BatchUploaded",
            StoreEvent::BatchDeleted { .. } => "BatchDeleted",
        }
    }

    /// Owner the event concerns
    pub fn owner_id(&self) -> &str {
        match self {
            StoreEvent::BatchUploaded { owner_id, .. } => owner_id,
            StoreEvent::BatchDeleted { owner_id, .. } => owner_id,
        }
    }
}

/// Event bus for store change notifications
///
/// Wraps `tokio::broadcast`, providing:
/// - Non-blocking publish (slow subscribers don't block producers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
/// - Lagged message detection for slow subscribers
///
/// Subscriptions recompute a full snapshot per event, so a lagged receiver
/// resyncs on the next event it does see.
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<StoreEvent>,
    capacity: usize,
}

impl EventBus {
    /// Creates a new EventBus with the given channel capacity
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx, capacity }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)`, or `Err` if no subscribers are
    /// listening (the event is dropped, which is fine for notifications).
    pub fn emit(
        &self,
        event: StoreEvent,
    ) -> Result<usize, broadcast::error::SendError<StoreEvent>> {
        self.tx.send(event)
    }

    /// Configured channel capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Current number of subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
