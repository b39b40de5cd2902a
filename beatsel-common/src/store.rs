//! Observable collection store
//!
//! Single source of truth for all Collection records. Every mutation goes
//! through this API so subscriber notification is guaranteed: writers are
//! serialized by the inner lock and the matching event is emitted before
//! the lock is released, so notification order always matches write order
//! and no reader can observe a torn name/members pair.
//!
//! Operations on an unknown id are silent no-ops, never errors: a writer
//! may race a deletion performed by another surface (e.g. the management
//! dialog) and must not fail for it.

use std::sync::RwLock;

use chrono::Utc;
use tracing::debug;

use crate::events::{CollectionEvent, EventBus};
use crate::model::{Collection, CollectionId};

/// Default event-bus capacity when none is configured
pub const DEFAULT_EVENT_CAPACITY: usize = 128;

/// Persistent, observable set of collections.
///
/// In-memory authoritative state; durability is provided by the
/// persistence task mirroring emitted events into sqlite (see
/// [`crate::persistence`]). Insertion order is preserved and is the
/// iteration order of [`CollectionStore::all`].
pub struct CollectionStore {
    collections: RwLock<Vec<Collection>>,
    bus: EventBus,
}

impl CollectionStore {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_EVENT_CAPACITY)
    }

    /// Create a store whose event bus buffers `capacity` events per subscriber
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            collections: RwLock::new(Vec::new()),
            bus: EventBus::new(capacity),
        }
    }

    /// Replace the store contents from persisted state.
    ///
    /// Called once at startup before anything subscribes; emits no events.
    pub fn restore(&self, collections: Vec<Collection>) {
        let mut guard = self.collections.write().unwrap();
        *guard = collections;
    }

    /// Create a collection with empty membership. Always succeeds.
    pub fn add(&self, name: impl Into<String>) -> CollectionId {
        let collection = Collection::new(name);
        let id = collection.id;
        let name = collection.name.clone();

        let mut guard = self.collections.write().unwrap();
        guard.push(collection);
        debug!("collection added: {} ({})", name, id);
        self.bus.emit_lossy(CollectionEvent::CollectionAdded {
            id,
            name,
            timestamp: Utc::now(),
        });
        id
    }

    /// Delete a collection. Silent no-op if `id` is unknown.
    pub fn remove(&self, id: CollectionId) {
        let mut guard = self.collections.write().unwrap();
        let before = guard.len();
        guard.retain(|c| c.id != id);
        if guard.len() == before {
            return;
        }
        debug!("collection removed: {}", id);
        self.bus.emit_lossy(CollectionEvent::CollectionRemoved {
            id,
            timestamp: Utc::now(),
        });
    }

    /// Set a collection's display name. Silent no-op if `id` is unknown.
    ///
    /// No uniqueness or non-empty validation: any string is a valid name.
    pub fn rename(&self, id: CollectionId, new_name: impl Into<String>) {
        let new_name = new_name.into();
        let mut guard = self.collections.write().unwrap();
        let Some(collection) = guard.iter_mut().find(|c| c.id == id) else {
            return;
        };
        collection.name = new_name.clone();
        debug!("collection renamed: {} -> '{}'", id, new_name);
        self.bus.emit_lossy(CollectionEvent::CollectionRenamed {
            id,
            new_name,
            timestamp: Utc::now(),
        });
    }

    /// Add a beatmap hash to a collection's members.
    ///
    /// Idempotent: adding an existing member changes nothing and emits no
    /// event. Silent no-op if `id` is unknown.
    pub fn add_member(&self, id: CollectionId, hash: impl Into<String>) {
        let hash = hash.into();
        let mut guard = self.collections.write().unwrap();
        let Some(collection) = guard.iter_mut().find(|c| c.id == id) else {
            return;
        };
        if !collection.members.insert(hash.clone()) {
            return;
        }
        debug!("beatmap {} added to collection {}", hash, id);
        self.bus.emit_lossy(CollectionEvent::MembershipChanged {
            id,
            hash,
            added: true,
            timestamp: Utc::now(),
        });
    }

    /// Remove a beatmap hash from a collection's members.
    ///
    /// Idempotent: removing a non-member changes nothing and emits no
    /// event. Silent no-op if `id` is unknown.
    pub fn remove_member(&self, id: CollectionId, hash: &str) {
        let mut guard = self.collections.write().unwrap();
        let Some(collection) = guard.iter_mut().find(|c| c.id == id) else {
            return;
        };
        if !collection.members.remove(hash) {
            return;
        }
        debug!("beatmap {} removed from collection {}", hash, id);
        self.bus.emit_lossy(CollectionEvent::MembershipChanged {
            id,
            hash: hash.to_string(),
            added: false,
            timestamp: Utc::now(),
        });
    }

    /// Snapshot of all collections in insertion order.
    ///
    /// Stable for the duration of one consumer computation: the snapshot is
    /// taken under the read lock and cannot mutate under the caller.
    pub fn all(&self) -> Vec<Collection> {
        self.collections.read().unwrap().clone()
    }

    /// Snapshot of a single collection
    pub fn get(&self, id: CollectionId) -> Option<Collection> {
        self.collections
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// Live display name of a collection, `None` if it no longer exists
    pub fn name_of(&self, id: CollectionId) -> Option<String> {
        self.collections
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.clone())
    }

    /// Whether `hash` is currently a member of collection `id`
    ///
    /// Point read against live state, never a cached snapshot.
    pub fn contains(&self, id: CollectionId, hash: &str) -> bool {
        self.collections
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .is_some_and(|c| c.members.contains(hash))
    }

    /// Current member count of collection `id`, `None` if it no longer exists
    pub fn member_count(&self, id: CollectionId) -> Option<usize> {
        self.collections
            .read()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.members.len())
    }

    /// Number of collections in the store
    pub fn len(&self) -> usize {
        self.collections.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Subscribe to change events (add/remove/rename/membership)
    pub fn subscribe(&self) -> tokio::sync::broadcast::Receiver<CollectionEvent> {
        self.bus.subscribe()
    }
}

impl Default for CollectionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_writes_are_noops() {
        let store = CollectionStore::new();
        let ghost = CollectionId::new();

        store.remove(ghost);
        store.rename(ghost, "renamed");
        store.add_member(ghost, "abc123");
        store.remove_member(ghost, "abc123");

        assert!(store.is_empty());
        assert_eq!(store.name_of(ghost), None);
    }

    #[test]
    fn idempotent_membership_emits_one_event() {
        let store = CollectionStore::new();
        let id = store.add("1");
        let mut rx = store.subscribe();

        store.add_member(id, "abc123");
        store.add_member(id, "abc123");

        assert!(matches!(
            rx.try_recv(),
            Ok(CollectionEvent::MembershipChanged { added: true, .. })
        ));
        // Second add was a no-op: nothing further on the bus.
        assert!(rx.try_recv().is_err());
        assert_eq!(store.member_count(id), Some(1));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let store = CollectionStore::new();
        store.add("b");
        store.add("a");
        store.add("c");

        let names: Vec<String> = store.all().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }
}
