//! Filter criteria derived from the collection selection

use std::sync::Arc;

use beatsel_common::{Beatmap, CollectionId, CollectionStore};

/// Header label when no collection filter is active, and the fallback when
/// a selected collection vanishes before its removal event is processed
pub const ALL_BEATMAPS_LABEL: &str = "All beatmaps";

/// The filterable selection states.
///
/// "Manage collections" is deliberately absent: it is a dropdown action,
/// never a filter, so it cannot be represented here at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollectionFilter {
    #[default]
    AllBeatmaps,
    Collection(CollectionId),
}

impl CollectionFilter {
    /// The selected collection id, if a concrete collection is selected
    pub fn collection_id(&self) -> Option<CollectionId> {
        match self {
            CollectionFilter::AllBeatmaps => None,
            CollectionFilter::Collection(id) => Some(*id),
        }
    }
}

/// Predicate over beatmaps for the song-select list.
///
/// Membership and the displayed name are re-resolved against the live
/// store on every call, so runtime membership changes and renames are
/// reflected without rebuilding the criteria.
#[derive(Clone)]
pub struct FilterCriteria {
    store: Arc<CollectionStore>,
    filter: CollectionFilter,
}

impl FilterCriteria {
    pub fn new(store: Arc<CollectionStore>, filter: CollectionFilter) -> Self {
        Self { store, filter }
    }

    pub fn filter(&self) -> CollectionFilter {
        self.filter
    }

    /// Whether `beatmap` passes the active filter
    pub fn matches(&self, beatmap: &Beatmap) -> bool {
        match self.filter {
            CollectionFilter::AllBeatmaps => true,
            CollectionFilter::Collection(id) => self.store.contains(id, &beatmap.md5_hash),
        }
    }

    /// Display name for the active filter, resolved live.
    ///
    /// A vanished collection resolves to the all-beatmaps label, so the
    /// header never shows a dangling name even before the removal event
    /// reaches the dropdown.
    pub fn header_text(&self) -> String {
        match self.filter {
            CollectionFilter::AllBeatmaps => ALL_BEATMAPS_LABEL.to_string(),
            CollectionFilter::Collection(id) => self
                .store
                .name_of(id)
                .unwrap_or_else(|| ALL_BEATMAPS_LABEL.to_string()),
        }
    }
}
