//! Event types for the collection event system
//!
//! Provides the shared CollectionEvent definitions and the EventBus used to
//! propagate store mutations to every dependent surface (collection
//! dropdown, song-select list, persistence task).

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::debug;

use crate::model::CollectionId;

/// Collection change events
///
/// Every effective write to the CollectionStore emits exactly one event
/// (idempotent membership writes that change nothing emit none).
/// Subscribers receive events in write order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CollectionEvent {
    /// A collection was created (empty membership)
    CollectionAdded {
        id: CollectionId,
        name: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A collection was deleted; its membership set is gone with it.
    ///
    /// Any surface holding this id as its selection must fall back to the
    /// all-beatmaps state when it observes this event.
    CollectionRemoved {
        id: CollectionId,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A collection's display name changed (the id is stable across renames)
    CollectionRenamed {
        id: CollectionId,
        new_name: String,
        timestamp: chrono::DateTime<chrono::Utc>,
    },

    /// A beatmap entered (`added == true`) or left a collection's members
    MembershipChanged {
        id: CollectionId,
        hash: String,
        added: bool,
        timestamp: chrono::DateTime<chrono::Utc>,
    },
}

impl CollectionEvent {
    /// The collection this event concerns
    pub fn collection_id(&self) -> CollectionId {
        match self {
            CollectionEvent::CollectionAdded { id, .. }
            | CollectionEvent::CollectionRemoved { id, .. }
            | CollectionEvent::CollectionRenamed { id, .. }
            | CollectionEvent::MembershipChanged { id, .. } => *id,
        }
    }
}

/// Central event distribution bus for collection changes
///
/// Uses tokio::broadcast internally, providing:
/// - Non-blocking publish (slow subscribers don't block writers)
/// - Multiple concurrent subscribers
/// - Automatic cleanup when subscribers drop
/// - Per-receiver delivery in send order; a subscriber that has observed
///   write W2's event has already received W1's
#[derive(Clone)]
pub struct EventBus {
    tx: broadcast::Sender<CollectionEvent>,
}

impl EventBus {
    /// Creates a new EventBus with the specified channel capacity
    ///
    /// Capacity is the number of events buffered per subscriber before old
    /// events are dropped (a lagged subscriber sees `RecvError::Lagged`).
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        debug!("event bus initialized with capacity {}", capacity);
        Self { tx }
    }

    /// Subscribe to all future events
    ///
    /// Events emitted before subscription are not received.
    pub fn subscribe(&self) -> broadcast::Receiver<CollectionEvent> {
        self.tx.subscribe()
    }

    /// Emit an event to all subscribers
    ///
    /// Returns `Ok(subscriber_count)` if at least one subscriber exists.
    pub fn emit(
        &self,
        event: CollectionEvent,
    ) -> Result<usize, broadcast::error::SendError<CollectionEvent>> {
        self.tx.send(event)
    }

    /// Emit an event, ignoring whether anyone is listening
    pub fn emit_lossy(&self, event: CollectionEvent) {
        // No receivers is OK (e.g. a store used standalone in tests)
        let _ = self.tx.send(event);
    }

    /// Current number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
