//! Shared test utilities for the daylog test suite.
//!
//! Photos are numbered from one so fixtures read the same way the CLI
//! numbers them: `photo_set(5)` holds `photo-1` … `photo-5`.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mut store = seeded_store("ev1", 6);
//! let selector = PhotoSelector::new(photo_set(6)).unwrap();
//! ```

use crate::layout::Layout;
use crate::selector::PhotoSet;
use crate::store::{EventStore, MemoryStore};
use crate::types::{Dump, DumpStyle, Event, ImageRef};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use std::ops::RangeInclusive;

// =========================================================================
// Photos
// =========================================================================

/// `photo-{n}` references for every `n` in the range.
pub fn photo_refs(numbers: RangeInclusive<usize>) -> Vec<ImageRef> {
    numbers.map(|n| ImageRef::new(format!("photo-{n}"))).collect()
}

/// A photo set of `count` photos, `photo-1` first.
pub fn photo_set(count: usize) -> PhotoSet {
    PhotoSet::new(photo_refs(1..=count))
}

// =========================================================================
// Records
// =========================================================================

/// Fixed timestamp so composed records compare equal across runs.
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 18, 30, 0).unwrap()
}

/// An event with the given id on `date` (`YYYY-MM-DD`).
pub fn sample_event(id: &str, date: &str) -> Event {
    Event {
        id: id.to_string(),
        title: format!("Event {id}"),
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap_or_else(|_| panic!("bad fixture date '{date}'")),
        start_time: None,
        end_time: None,
        memo: None,
    }
}

/// A framed grid4 dump of the first four fixture photos.
pub fn sample_dump(event_id: &str) -> Dump {
    Dump {
        id: format!("dump-{event_id}"),
        event_id: event_id.to_string(),
        layout: Layout::Grid4,
        title: "Trip".to_string(),
        memo: "Best day".to_string(),
        show_title: true,
        show_memo: true,
        show_frame: true,
        style: DumpStyle::default(),
        photos: photo_refs(1..=4),
        created_at: fixed_now(),
    }
}

// =========================================================================
// Stores
// =========================================================================

/// A memory store holding one event with `photo_count` photos.
pub fn seeded_store(event_id: &str, photo_count: usize) -> MemoryStore {
    let mut store = MemoryStore::new();
    store
        .insert_event(&sample_event(event_id, "2025-05-01"))
        .unwrap();
    store
        .save_photos(event_id, &photo_refs(1..=photo_count))
        .unwrap();
    store
}
