//! Collection dropdown view-model
//!
//! Derives the ordered dropdown item list from the store, tracks the
//! collapsed/expanded state, and owns the current filter selection.
//! Items carry only the collection id; the displayed text and member
//! count are resolved from the store at read time, so a rename shows up
//! on the next read without the item being recreated.

use std::sync::Arc;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;
use tracing::debug;

use beatsel_common::{CollectionEvent, CollectionId, CollectionStore};

use crate::filter::{CollectionFilter, FilterCriteria, ALL_BEATMAPS_LABEL};

/// Label of the trailing management pseudo-item
pub const MANAGE_COLLECTIONS_LABEL: &str = "Manage collections...";

/// One selectable entry in the dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropdownItem {
    /// Leading pseudo-item: no collection filter
    AllBeatmaps,
    /// One item per live collection, in store order
    Collection(CollectionId),
    /// Trailing pseudo-item: opens the management surface, never filters
    ManageCollections,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropdownState {
    #[default]
    Collapsed,
    Expanded,
}

/// Invoked when the management pseudo-item is selected
pub type ManageCollectionsLauncher = Box<dyn Fn() + Send + Sync>;

/// Reactive view-model for the collection filter dropdown
pub struct CollectionDropdown {
    store: Arc<CollectionStore>,
    selection: CollectionFilter,
    state: DropdownState,
    launcher: Option<ManageCollectionsLauncher>,
}

impl CollectionDropdown {
    pub fn new(store: Arc<CollectionStore>) -> Self {
        Self {
            store,
            selection: CollectionFilter::AllBeatmaps,
            state: DropdownState::Collapsed,
            launcher: None,
        }
    }

    /// Register the management-surface launcher
    pub fn on_manage_collections(&mut self, launcher: impl Fn() + Send + Sync + 'static) {
        self.launcher = Some(Box::new(launcher));
    }

    /// The ordered item list: all-beatmaps, one item per live collection
    /// in store order, manage-collections last
    pub fn items(&self) -> Vec<DropdownItem> {
        let mut items = vec![DropdownItem::AllBeatmaps];
        items.extend(
            self.store
                .all()
                .into_iter()
                .map(|c| DropdownItem::Collection(c.id)),
        );
        items.push(DropdownItem::ManageCollections);
        items
    }

    /// Displayed text for an item, resolved live from the store.
    ///
    /// An item whose collection vanished resolves to an empty string; such
    /// an item no longer appears in [`CollectionDropdown::items`].
    pub fn item_text(&self, item: &DropdownItem) -> String {
        match item {
            DropdownItem::AllBeatmaps => ALL_BEATMAPS_LABEL.to_string(),
            DropdownItem::Collection(id) => self.store.name_of(*id).unwrap_or_default(),
            DropdownItem::ManageCollections => MANAGE_COLLECTIONS_LABEL.to_string(),
        }
    }

    /// Live member count for a collection item, `None` for pseudo-items
    /// and vanished collections
    pub fn item_member_count(&self, item: &DropdownItem) -> Option<usize> {
        match item {
            DropdownItem::Collection(id) => self.store.member_count(*id),
            _ => None,
        }
    }

    pub fn state(&self) -> DropdownState {
        self.state
    }

    /// Expand the item list (header activation)
    pub fn open(&mut self) {
        self.state = DropdownState::Expanded;
    }

    /// Collapse without changing the selection
    pub fn dismiss(&mut self) {
        self.state = DropdownState::Collapsed;
    }

    /// Select an item and collapse.
    ///
    /// All-beatmaps and collection items become the active filter.
    /// The manage item only invokes the launcher; the previous selection,
    /// and with it the active filter and header, stay untouched.
    ///
    /// A collection item whose collection was removed between display and
    /// selection falls back to all-beatmaps: no dangling id is ever stored.
    pub fn select(&mut self, item: DropdownItem) {
        match item {
            DropdownItem::AllBeatmaps => {
                self.selection = CollectionFilter::AllBeatmaps;
            }
            DropdownItem::Collection(id) if self.store.get(id).is_some() => {
                debug!("collection filter selected: {}", id);
                self.selection = CollectionFilter::Collection(id);
            }
            DropdownItem::Collection(id) => {
                debug!("collection {} vanished before selection, filter reset", id);
                self.selection = CollectionFilter::AllBeatmaps;
            }
            DropdownItem::ManageCollections => {
                debug!("manage collections requested");
                if let Some(launcher) = &self.launcher {
                    launcher();
                }
            }
        }
        self.state = DropdownState::Collapsed;
    }

    pub fn selection(&self) -> CollectionFilter {
        self.selection
    }

    /// Header text, resolved live from the current selection
    pub fn header_text(&self) -> String {
        self.create_criteria().header_text()
    }

    /// Build the criteria the song-select list filters by
    pub fn create_criteria(&self) -> FilterCriteria {
        FilterCriteria::new(Arc::clone(&self.store), self.selection)
    }

    /// Apply one store notification.
    ///
    /// Removal of the selected collection resets the selection to
    /// all-beatmaps within the same notification cycle. Other events need
    /// no state change here: items, labels and header resolve live.
    pub fn handle_event(&mut self, event: &CollectionEvent) {
        if let CollectionEvent::CollectionRemoved { id, .. } = event {
            if self.selection.collection_id() == Some(*id) {
                debug!("selected collection {} removed, filter reset", id);
                self.selection = CollectionFilter::AllBeatmaps;
            }
        }
    }

    /// Drain all pending notifications from `rx`.
    ///
    /// On lag the receiver may have dropped a removal event, so the
    /// selection is revalidated against the store.
    pub fn pump(&mut self, rx: &mut broadcast::Receiver<CollectionEvent>) {
        loop {
            match rx.try_recv() {
                Ok(event) => self.handle_event(&event),
                Err(TryRecvError::Lagged(_)) => self.revalidate_selection(),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    fn revalidate_selection(&mut self) {
        if let Some(id) = self.selection.collection_id() {
            if self.store.get(id).is_none() {
                self.selection = CollectionFilter::AllBeatmaps;
            }
        }
    }
}
