//! Song-select filter control facade
//!
//! Ties the collection dropdown and the membership controller to one
//! shared store, the way the song-select screen consumes them.

use std::sync::Arc;

use tokio::sync::broadcast;

use beatsel_common::{ActiveBeatmap, CollectionEvent, CollectionStore};

use crate::dropdown::{CollectionDropdown, DropdownItem};
use crate::filter::FilterCriteria;
use crate::membership::{MembershipController, ToggleAffordance};

pub struct FilterControl {
    dropdown: CollectionDropdown,
    membership: MembershipController,
}

impl FilterControl {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self {
            dropdown: CollectionDropdown::new(Arc::clone(&store)),
            membership: MembershipController::new(store),
        }
    }

    pub fn dropdown(&self) -> &CollectionDropdown {
        &self.dropdown
    }

    pub fn dropdown_mut(&mut self) -> &mut CollectionDropdown {
        &mut self.dropdown
    }

    pub fn membership(&self) -> &MembershipController {
        &self.membership
    }

    pub fn set_active_beatmap(&self, active: ActiveBeatmap) {
        self.membership.set_active(active);
    }

    /// Criteria for the song-select list, from the current selection
    pub fn create_criteria(&self) -> FilterCriteria {
        self.dropdown.create_criteria()
    }

    /// Button state for a dropdown item
    pub fn affordance(&self, item: &DropdownItem) -> ToggleAffordance {
        self.membership.affordance(item)
    }

    /// Toggle the active beatmap's membership for a collection item.
    /// No effect on pseudo-items or when no real beatmap is active.
    pub fn toggle(&self, item: &DropdownItem) {
        if let DropdownItem::Collection(id) = item {
            if self.membership.can_toggle(item) {
                self.membership.toggle(*id);
            }
        }
    }

    /// Apply one store notification
    pub fn handle_event(&mut self, event: &CollectionEvent) {
        self.dropdown.handle_event(event);
    }

    /// Drain all pending notifications from `rx`
    pub fn pump(&mut self, rx: &mut broadcast::Receiver<CollectionEvent>) {
        self.dropdown.pump(rx);
    }
}
