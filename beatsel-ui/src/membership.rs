//! Add/remove-from-collection affordance and toggle
//!
//! Decides, for the currently active beatmap and a dropdown item, whether
//! the per-item button shows "add", "remove", or nothing; and performs the
//! toggle through the store. Membership is always read fresh at call time
//! so a toggle right after an external membership change acts on the
//! current state, never a cached one.

use std::sync::{Arc, RwLock};

use tracing::debug;

use beatsel_common::{ActiveBeatmap, CollectionId, CollectionStore};

use crate::dropdown::DropdownItem;

/// Semantic state of the per-item add/remove button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleAffordance {
    /// No button: pseudo-item, or no real beatmap active
    Hidden,
    /// Active beatmap is not a member; toggling adds it
    Add,
    /// Active beatmap is a member; toggling removes it
    Remove,
}

pub struct MembershipController {
    store: Arc<CollectionStore>,
    active: RwLock<ActiveBeatmap>,
}

impl MembershipController {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self {
            store,
            active: RwLock::new(ActiveBeatmap::none()),
        }
    }

    /// Update the active beatmap (song-select wheel movement, or reset to
    /// the placeholder)
    pub fn set_active(&self, active: ActiveBeatmap) {
        *self.active.write().unwrap() = active;
    }

    pub fn active(&self) -> ActiveBeatmap {
        self.active.read().unwrap().clone()
    }

    /// True iff a real beatmap is active and `item` is a concrete
    /// collection (never for the pseudo-items)
    pub fn can_toggle(&self, item: &DropdownItem) -> bool {
        !self.active.read().unwrap().is_placeholder()
            && matches!(item, DropdownItem::Collection(_))
    }

    /// Whether the active beatmap is currently a member of collection `id`
    pub fn is_member(&self, id: CollectionId) -> bool {
        match self.active.read().unwrap().hash() {
            Some(hash) => self.store.contains(id, hash),
            None => false,
        }
    }

    /// Add the active beatmap to collection `id` if it is not a member,
    /// remove it otherwise. No-op when the placeholder beatmap is active.
    pub fn toggle(&self, id: CollectionId) {
        let active = self.active();
        let Some(hash) = active.hash() else {
            return;
        };
        if self.store.contains(id, hash) {
            debug!("toggle: removing {} from collection {}", hash, id);
            self.store.remove_member(id, hash);
        } else {
            debug!("toggle: adding {} to collection {}", hash, id);
            self.store.add_member(id, hash);
        }
    }

    /// Button state for a dropdown item
    pub fn affordance(&self, item: &DropdownItem) -> ToggleAffordance {
        if !self.can_toggle(item) {
            return ToggleAffordance::Hidden;
        }
        match item {
            DropdownItem::Collection(id) if self.is_member(*id) => ToggleAffordance::Remove,
            DropdownItem::Collection(_) => ToggleAffordance::Add,
            _ => ToggleAffordance::Hidden,
        }
    }
}
