//! # Beatsel UI - song-select filter control
//!
//! View-model logic for filtering the song-select list by beatmap
//! collection:
//! - Filter criteria (collection selection -> predicate over beatmaps)
//! - Membership controller (add/remove-from-collection affordance)
//! - Collection dropdown view-model (item list, header, selection)
//! - FilterControl facade tying the three together
//!
//! Rendering, input dispatch and persistence live elsewhere; everything
//! here reads and writes collections exclusively through the shared
//! [`beatsel_common::CollectionStore`].

pub mod control;
pub mod dropdown;
pub mod filter;
pub mod membership;

pub use control::FilterControl;
pub use dropdown::{CollectionDropdown, DropdownItem, DropdownState, MANAGE_COLLECTIONS_LABEL};
pub use filter::{CollectionFilter, FilterCriteria, ALL_BEATMAPS_LABEL};
pub use membership::{MembershipController, ToggleAffordance};
