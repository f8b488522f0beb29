//! End-to-end selection and composition against the JSON file store.

use daylog::compose::{ComposeError, CompositionRequest, DumpComposer};
use daylog::events::{self, NewEvent};
use daylog::layout::{Layout, available_layouts};
use daylog::selector::{PhotoSelector, PhotoSet, SelectError};
use daylog::store::{DumpStore, JsonStore};
use daylog::types::{Dump, ImageRef};
use std::fs;
use tempfile::TempDir;

fn photos(count: usize) -> Vec<ImageRef> {
    (1..=count)
        .map(|n| ImageRef::new(format!("photos/beach-{n:02}.jpg")))
        .collect()
}

/// A store with one event holding `count` photos. Returns the event id.
fn store_with_event(tmp: &TempDir, count: usize) -> (JsonStore, String) {
    let mut store = JsonStore::open(tmp.path().join(".daylog")).unwrap();
    let event = events::register_event(
        &mut store,
        NewEvent {
            title: "Beach day".to_string(),
            date: "2025-06-01".to_string(),
            ..Default::default()
        },
    )
    .unwrap();
    if count > 0 {
        events::attach_photos(&mut store, &event.id, photos(count), 10).unwrap();
    }
    (store, event.id)
}

fn selector_for(store: &JsonStore, event_id: &str) -> Result<PhotoSelector, SelectError> {
    PhotoSelector::new(PhotoSet::new(store.get_photos(event_id).unwrap()))
}

fn compose(store: &mut JsonStore, request: CompositionRequest) -> Result<Dump, ComposeError> {
    DumpComposer::new(store).compose(request)
}

#[test]
fn five_photos_compose_default_grid4() {
    let tmp = TempDir::new().unwrap();
    let (mut store, event_id) = store_with_event(&tmp, 5);

    let selector = selector_for(&store, &event_id).unwrap();
    assert_eq!(available_layouts(selector.photo_set().len()), vec![Layout::Grid4]);
    assert_eq!(selector.selected(), &photos(4)[..]);
    assert!(selector.is_composable());

    let dump = compose(&mut store, CompositionRequest::from_selector(&event_id, &selector)).unwrap();
    assert_eq!(dump.photos.len(), 4);
    assert_eq!(store.get_dump(&event_id).unwrap(), Some(dump));
}

#[test]
fn nine_photos_switch_to_grid9() {
    let tmp = TempDir::new().unwrap();
    let (mut store, event_id) = store_with_event(&tmp, 9);

    let mut selector = selector_for(&store, &event_id).unwrap();
    assert_eq!(available_layouts(9), Layout::ALL.to_vec());

    selector.change_layout(Layout::Grid9);
    assert_eq!(selector.selected(), &photos(9)[..]);
    assert!(selector.is_composable());

    let dump = compose(&mut store, CompositionRequest::from_selector(&event_id, &selector)).unwrap();
    assert_eq!(dump.layout, Layout::Grid9);
    assert_eq!(dump.photos, photos(9));
}

#[test]
fn three_photos_cannot_start_a_selection() {
    let tmp = TempDir::new().unwrap();
    let (store, event_id) = store_with_event(&tmp, 3);

    let err = selector_for(&store, &event_id).unwrap_err();
    assert_eq!(
        err,
        SelectError::InsufficientPhotos {
            available: 3,
            required: 4
        }
    );
}

#[test]
fn grid6_fills_then_rejects_a_seventh() {
    let all = photos(8);

    let mut selector = PhotoSelector::new(PhotoSet::new(all.clone())).unwrap();
    selector.change_layout(Layout::Grid6);
    selector.toggle(&all[5]).unwrap();
    assert_eq!(selector.selected().len(), 5);

    selector.toggle(&all[6]).unwrap();
    assert_eq!(selector.selected().len(), 6);
    assert!(selector.is_composable());

    let before = selector.selected().to_vec();
    assert_eq!(
        selector.toggle(&all[7]),
        Err(SelectError::SelectionFull { limit: 6 })
    );
    assert_eq!(selector.selected(), &before[..]);
}

#[test]
fn frameless_compose_hides_title() {
    let tmp = TempDir::new().unwrap();
    let (mut store, event_id) = store_with_event(&tmp, 4);
    let selector = selector_for(&store, &event_id).unwrap();

    let request = CompositionRequest::from_selector(&event_id, &selector)
        .with_title("Trip", true)
        .with_frame(false);
    let dump = compose(&mut store, request).unwrap();

    assert!(!dump.show_title);
    assert!(!dump.show_memo);
    assert!(!dump.show_frame);
    assert_eq!(dump.visible_title(), None);
}

#[test]
fn second_compose_replaces_the_first() {
    let tmp = TempDir::new().unwrap();
    let (mut store, event_id) = store_with_event(&tmp, 6);
    let mut selector = selector_for(&store, &event_id).unwrap();

    compose(&mut store, CompositionRequest::from_selector(&event_id, &selector)).unwrap();
    selector.change_layout(Layout::Grid6);
    let second =
        compose(&mut store, CompositionRequest::from_selector(&event_id, &selector)).unwrap();

    let dump_files = fs::read_dir(store.root().join("dumps")).unwrap().count();
    assert_eq!(dump_files, 1);
    assert_eq!(store.get_dump(&event_id).unwrap(), Some(second));
}

#[test]
fn incomplete_selection_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    let (mut store, event_id) = store_with_event(&tmp, 6);
    let mut selector = selector_for(&store, &event_id).unwrap();
    let first = selector.selected()[0].clone();
    selector.toggle(&first).unwrap();
    assert!(!selector.is_composable());

    let err = compose(&mut store, CompositionRequest::from_selector(&event_id, &selector))
        .unwrap_err();
    assert!(matches!(
        err,
        ComposeError::IncompleteSelection {
            required: 4,
            actual: 3
        }
    ));
    assert_eq!(store.get_dump(&event_id).unwrap(), None);
}

#[test]
fn composed_photos_match_selection_order() {
    let tmp = TempDir::new().unwrap();
    let (mut store, event_id) = store_with_event(&tmp, 7);
    let all = photos(7);
    let mut selector = selector_for(&store, &event_id).unwrap();

    // Swap the first default pick for the last photo: it moves to the end.
    selector.toggle(&all[0]).unwrap();
    selector.toggle(&all[6]).unwrap();
    let expected = vec![all[1].clone(), all[2].clone(), all[3].clone(), all[6].clone()];
    assert_eq!(selector.selected(), &expected[..]);

    let dump = compose(&mut store, CompositionRequest::from_selector(&event_id, &selector)).unwrap();
    assert_eq!(dump.photos, expected);

    let reloaded = store.get_dump(&event_id).unwrap().unwrap();
    assert_eq!(reloaded.photos, expected);
}

#[test]
fn deleting_the_event_removes_its_dump() {
    let tmp = TempDir::new().unwrap();
    let (mut store, event_id) = store_with_event(&tmp, 4);
    let selector = selector_for(&store, &event_id).unwrap();
    compose(&mut store, CompositionRequest::from_selector(&event_id, &selector)).unwrap();

    events::delete_event(&mut store, &event_id).unwrap();
    assert_eq!(store.get_dump(&event_id).unwrap(), None);
    assert!(store.get_photos(&event_id).unwrap().is_empty());
    assert!(events::gallery(&store).unwrap().is_empty());
}
