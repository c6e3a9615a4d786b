//! Several views sharing one file-backed store, across restarts.

use std::sync::Arc;

use calboard_core::storage::FileStorage;
use calboard_core::{EventPatch, EventStore, NewEvent, StoreBinding};
use chrono::{TimeZone, Utc};

#[test]
fn test_views_stay_in_sync_and_changes_survive_restart() {
    let dir = tempfile::tempdir().unwrap();
    let storage = Arc::new(FileStorage::new(dir.path()));

    let store = Arc::new(EventStore::open(storage.clone()));
    let month_view = StoreBinding::attach(Arc::clone(&store));
    let date_picker = StoreBinding::attach(Arc::clone(&store));
    assert_eq!(month_view.events().len(), 4);

    let start = Utc.with_ymd_and_hms(2024, 6, 21, 12, 0, 0).unwrap();
    let lunch = date_picker.add_event(
        NewEvent::lasting_one_hour("Lunch", start)
            .with_description("Created via date picker")
            .with_color("#f59e0b"),
    );
    assert!(month_view.events().contains(&lunch));

    let moved = start + chrono::Duration::days(1);
    assert!(month_view.update_event(
        &lunch.id,
        EventPatch::reschedule(moved, moved + chrono::Duration::hours(2))
    ));
    assert!(month_view.delete_event("1"));

    drop(month_view);
    drop(date_picker);
    drop(store);

    let reopened = EventStore::open(storage);
    let events = reopened.events();
    assert_eq!(events.len(), 4);
    assert!(events.iter().all(|e| e.id != "1"));

    let lunch_after = reopened.get_event(&lunch.id).unwrap();
    assert_eq!(lunch_after.start, moved);
    assert_eq!(lunch_after.duration(), chrono::Duration::hours(2));
    assert_eq!(lunch_after.display_color(), "#f59e0b");
}

#[test]
fn test_corrupt_file_is_replaced_by_next_mutation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("calendar-events.json");
    std::fs::write(&path, "[{\"broken\":").unwrap();

    let store = EventStore::open(Arc::new(FileStorage::new(dir.path())));
    assert_eq!(store.len(), 4);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[{\"broken\":");

    store.clear_all_events();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}
