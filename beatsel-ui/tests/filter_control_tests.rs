//! Filter control behavior tests, mirroring the song-select scenarios:
//! dropdown contents, header display, manage-collections inertness, and
//! the add/remove-from-collection button.

use std::sync::Arc;

use beatsel_common::{ActiveBeatmap, Beatmap, CollectionStore};
use beatsel_ui::{
    CollectionFilter, DropdownItem, FilterControl, ToggleAffordance, ALL_BEATMAPS_LABEL,
    MANAGE_COLLECTIONS_LABEL,
};

fn beatmap(hash: &str) -> Beatmap {
    Beatmap {
        md5_hash: hash.to_string(),
        title: "Song".to_string(),
        artist: "Artist".to_string(),
        difficulty_name: "Normal".to_string(),
    }
}

#[test]
fn empty_store_shows_only_pseudo_items() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));

    let dropdown = control.dropdown();
    let items = dropdown.items();
    assert_eq!(
        items,
        vec![DropdownItem::AllBeatmaps, DropdownItem::ManageCollections]
    );
    assert_eq!(dropdown.item_text(&items[0]), ALL_BEATMAPS_LABEL);
    assert_eq!(dropdown.item_text(&items[1]), MANAGE_COLLECTIONS_LABEL);
    assert_eq!(dropdown.header_text(), ALL_BEATMAPS_LABEL);
}

#[test]
fn added_collections_appear_before_manage_item() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));

    store.add("1");
    store.add("2");

    let dropdown = control.dropdown();
    let labels: Vec<String> = dropdown
        .items()
        .iter()
        .map(|i| dropdown.item_text(i))
        .collect();
    assert_eq!(
        labels,
        vec![ALL_BEATMAPS_LABEL, "1", "2", MANAGE_COLLECTIONS_LABEL]
    );
}

#[test]
fn removed_collection_disappears_from_items() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));

    let first = store.add("1");
    store.add("2");
    store.remove(first);

    let dropdown = control.dropdown();
    let labels: Vec<String> = dropdown
        .items()
        .iter()
        .map(|i| dropdown.item_text(i))
        .collect();
    assert!(labels.contains(&"2".to_string()));
    assert!(!labels.contains(&"1".to_string()));
}

#[test]
fn rename_updates_header_without_changing_selection() {
    let store = Arc::new(CollectionStore::new());
    let mut control = FilterControl::new(Arc::clone(&store));

    let id = store.add("1");
    control.dropdown_mut().open();
    control.dropdown_mut().select(DropdownItem::Collection(id));

    store.rename(id, "First");

    let dropdown = control.dropdown();
    assert_eq!(dropdown.header_text(), "First");
    assert_eq!(dropdown.selection(), CollectionFilter::Collection(id));
    assert_eq!(
        dropdown.item_text(&DropdownItem::Collection(id)),
        "First",
        "item text resolves the live name without recreation"
    );
}

#[test]
fn selecting_manage_collections_is_inert() {
    use std::sync::atomic::{AtomicUsize, Ordering};

    let store = Arc::new(CollectionStore::new());
    let mut control = FilterControl::new(Arc::clone(&store));
    let launches = Arc::new(AtomicUsize::new(0));
    {
        let launches = Arc::clone(&launches);
        control.dropdown_mut().on_manage_collections(move || {
            launches.fetch_add(1, Ordering::SeqCst);
        });
    }

    let id = store.add("1");
    control.dropdown_mut().open();
    control.dropdown_mut().select(DropdownItem::Collection(id));

    control.dropdown_mut().open();
    control.dropdown_mut().select(DropdownItem::ManageCollections);

    assert_eq!(launches.load(Ordering::SeqCst), 1);
    let criteria = control.create_criteria();
    assert_eq!(
        criteria.filter(),
        CollectionFilter::Collection(id),
        "manage must not change the active filter"
    );
    assert_eq!(criteria.header_text(), "1");
}

#[test]
fn dropdown_state_machine_transitions() {
    use beatsel_ui::DropdownState;

    let store = Arc::new(CollectionStore::new());
    let mut control = FilterControl::new(Arc::clone(&store));

    assert_eq!(control.dropdown().state(), DropdownState::Collapsed);

    control.dropdown_mut().open();
    assert_eq!(control.dropdown().state(), DropdownState::Expanded);

    control.dropdown_mut().dismiss();
    assert_eq!(control.dropdown().state(), DropdownState::Collapsed);

    control.dropdown_mut().open();
    control.dropdown_mut().select(DropdownItem::AllBeatmaps);
    assert_eq!(
        control.dropdown().state(),
        DropdownState::Collapsed,
        "any selection collapses the dropdown"
    );
}

#[test]
fn all_beatmaps_item_has_no_toggle_button() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));
    control.set_active_beatmap(ActiveBeatmap::with_hash("aaa"));

    assert_eq!(
        control.affordance(&DropdownItem::AllBeatmaps),
        ToggleAffordance::Hidden
    );
    assert_eq!(
        control.affordance(&DropdownItem::ManageCollections),
        ToggleAffordance::Hidden
    );
}

#[test]
fn button_disabled_without_active_beatmap() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));
    let id = store.add("1");
    let item = DropdownItem::Collection(id);

    assert!(!control.membership().can_toggle(&item));
    assert_eq!(control.affordance(&item), ToggleAffordance::Hidden);

    control.set_active_beatmap(ActiveBeatmap::with_hash("aaa"));
    assert!(control.membership().can_toggle(&item));
    assert_eq!(control.affordance(&item), ToggleAffordance::Add);

    control.set_active_beatmap(ActiveBeatmap::none());
    assert!(!control.membership().can_toggle(&item));
    assert_eq!(control.affordance(&item), ToggleAffordance::Hidden);
}

#[test]
fn button_follows_external_membership_changes() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));
    let id = store.add("1");
    let item = DropdownItem::Collection(id);
    control.set_active_beatmap(ActiveBeatmap::with_hash("aaa"));

    assert_eq!(control.affordance(&item), ToggleAffordance::Add);

    // Another surface (e.g. the management dialog) mutates the set.
    store.add_member(id, "aaa");
    assert_eq!(control.affordance(&item), ToggleAffordance::Remove);

    store.remove_member(id, "aaa");
    assert_eq!(control.affordance(&item), ToggleAffordance::Add);
}

#[test]
fn toggle_adds_then_removes_the_active_beatmap() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));
    let id = store.add("1");
    let item = DropdownItem::Collection(id);
    control.set_active_beatmap(ActiveBeatmap::with_hash("aaa"));

    control.toggle(&item);
    assert!(store.contains(id, "aaa"));
    assert_eq!(control.affordance(&item), ToggleAffordance::Remove);

    control.toggle(&item);
    assert!(!store.contains(id, "aaa"));
    assert_eq!(control.affordance(&item), ToggleAffordance::Add);
    assert_eq!(store.member_count(id), Some(0), "round trip restores state");
}

#[test]
fn toggle_acts_on_fresh_membership() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));
    let id = store.add("1");
    let item = DropdownItem::Collection(id);
    control.set_active_beatmap(ActiveBeatmap::with_hash("aaa"));

    control.toggle(&item);
    assert!(store.contains(id, "aaa"));

    // External clear between toggles: the next toggle must add, not remove.
    store.remove_member(id, "aaa");
    control.toggle(&item);
    assert!(store.contains(id, "aaa"));
}

#[test]
fn criteria_resolves_membership_live() {
    let store = Arc::new(CollectionStore::new());
    let mut control = FilterControl::new(Arc::clone(&store));
    let id = store.add("1");
    control.dropdown_mut().select(DropdownItem::Collection(id));

    let criteria = control.create_criteria();
    assert!(!criteria.matches(&beatmap("aaa")));

    // Membership changes after the criteria was built must be visible.
    store.add_member(id, "aaa");
    assert!(criteria.matches(&beatmap("aaa")));
    assert!(!criteria.matches(&beatmap("bbb")));

    store.remove_member(id, "aaa");
    assert!(!criteria.matches(&beatmap("aaa")));
}

#[test]
fn all_beatmaps_criteria_accepts_everything() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));

    let criteria = control.create_criteria();
    assert!(criteria.matches(&beatmap("aaa")));
    assert!(criteria.matches(&beatmap("bbb")));
    assert_eq!(criteria.header_text(), ALL_BEATMAPS_LABEL);
}

#[test]
fn member_counts_resolve_live() {
    let store = Arc::new(CollectionStore::new());
    let control = FilterControl::new(Arc::clone(&store));
    let id = store.add("1");
    let item = DropdownItem::Collection(id);

    assert_eq!(control.dropdown().item_member_count(&item), Some(0));
    store.add_member(id, "aaa");
    store.add_member(id, "bbb");
    assert_eq!(control.dropdown().item_member_count(&item), Some(2));
    assert_eq!(
        control.dropdown().item_member_count(&DropdownItem::AllBeatmaps),
        None
    );
}
