//! Event registry: registration, photo attachment, listings, deletion.
//!
//! An event must have a title and a calendar date; start/end times and a
//! memo are optional. Photos are attached in upload order and capped per
//! event. Deleting an event removes its photos and dump with it, so no
//! orphaned records remain in the store.

use crate::selector::PhotoSet;
use crate::store::{EventStore, StoreError};
use crate::types::{Dump, Event, ImageRef, generate_id};
use chrono::{NaiveDate, NaiveTime, Utc};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Error, Debug)]
pub enum EventError {
    #[error("Event title is required")]
    MissingTitle,
    #[error("Invalid date '{0}' (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("Invalid time '{0}' (expected HH:MM)")]
    InvalidTime(String),
    #[error("Event not found: {0}")]
    NotFound(String),
    #[error("At least one photo is required")]
    NoPhotos,
    #[error("No photo numbered {number} (event has {count})")]
    NoSuchPhoto { number: usize, count: usize },
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// User input for a new event, as typed into a form.
#[derive(Debug, Clone, Default)]
pub struct NewEvent {
    pub title: String,
    pub date: String,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub memo: Option<String>,
}

fn parse_date(raw: &str) -> Result<NaiveDate, EventError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| EventError::InvalidDate(raw.to_string()))
}

fn parse_time(raw: Option<&str>) -> Result<Option<NaiveTime>, EventError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => NaiveTime::parse_from_str(value, "%H:%M")
            .map(Some)
            .map_err(|_| EventError::InvalidTime(value.to_string())),
    }
}

/// Validate and store a new event. Returns the stored record.
pub fn register_event<S: EventStore>(store: &mut S, input: NewEvent) -> Result<Event, EventError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(EventError::MissingTitle);
    }
    let event = Event {
        id: generate_id(Utc::now()),
        title: title.to_string(),
        date: parse_date(&input.date)?,
        start_time: parse_time(input.start_time.as_deref())?,
        end_time: parse_time(input.end_time.as_deref())?,
        memo: input.memo.filter(|m| !m.trim().is_empty()),
    };
    store.insert_event(&event)?;
    info!(event_id = %event.id, date = %event.date, "event registered");
    Ok(event)
}

/// Result of attaching photos to an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttachReport {
    /// Photos newly stored.
    pub added: usize,
    /// References already stored for the event, or repeated in the upload.
    pub duplicates: usize,
    /// Photos discarded because the event was at its cap.
    pub dropped: usize,
    /// Photos stored for the event afterwards.
    pub total: usize,
}

/// Append photos to an event, keeping at most `max` in total.
///
/// Existing photos are never touched, even when a lowered cap leaves the
/// event above `max`. New photos go after them in the order given; repeated
/// references are skipped so stored numbering matches selection numbering.
/// Photos beyond the cap are dropped. The event must end up with at least
/// one photo.
pub fn attach_photos<S: EventStore>(
    store: &mut S,
    event_id: &str,
    photos: impl IntoIterator<Item = ImageRef>,
    max: usize,
) -> Result<AttachReport, EventError> {
    if store.get_event(event_id)?.is_none() {
        return Err(EventError::NotFound(event_id.to_string()));
    }
    let mut stored = store.get_photos(event_id)?;
    let mut seen: HashSet<ImageRef> = stored.iter().cloned().collect();
    let room = max.saturating_sub(stored.len());

    let mut added = 0;
    let mut duplicates = 0;
    let mut dropped = 0;
    for photo in photos {
        if !seen.insert(photo.clone()) {
            duplicates += 1;
        } else if added < room {
            stored.push(photo);
            added += 1;
        } else {
            dropped += 1;
        }
    }
    if stored.is_empty() {
        return Err(EventError::NoPhotos);
    }

    if dropped > 0 {
        warn!(event_id, dropped, max, "photo limit reached, extra photos dropped");
    }
    if duplicates > 0 {
        debug!(event_id, duplicates, "repeated photo references skipped");
    }
    if added > 0 {
        store.save_photos(event_id, &stored)?;
    }
    info!(event_id, added, total = stored.len(), "photos attached");
    Ok(AttachReport {
        added,
        duplicates,
        dropped,
        total: stored.len(),
    })
}

/// Remove the photo numbered `number` (1-based) from an event.
///
/// Numbers follow [`PhotoSet`], as `photos list` prints them. The remaining
/// photos keep their order. A stored dump is left as composed:
/// it holds its own copy of the references it shows.
pub fn remove_photo<S: EventStore>(
    store: &mut S,
    event_id: &str,
    number: usize,
) -> Result<ImageRef, EventError> {
    if store.get_event(event_id)?.is_none() {
        return Err(EventError::NotFound(event_id.to_string()));
    }
    let mut stored = PhotoSet::new(store.get_photos(event_id)?).as_slice().to_vec();
    if number == 0 || number > stored.len() {
        return Err(EventError::NoSuchPhoto {
            number,
            count: stored.len(),
        });
    }
    let removed = stored.remove(number - 1);
    store.save_photos(event_id, &stored)?;
    info!(event_id, number, remaining = stored.len(), "photo removed");
    Ok(removed)
}

/// An event with its photo count and whether a dump exists.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub event: Event,
    pub photo_count: usize,
    pub has_dump: bool,
}

/// All events, newest date first. Events on the same date keep
/// registration order.
pub fn list_events<S: EventStore>(store: &S) -> Result<Vec<EventSummary>, EventError> {
    let mut events = store.list_events()?;
    events.sort_by(|a, b| b.date.cmp(&a.date));
    events
        .into_iter()
        .map(|event| -> Result<EventSummary, EventError> {
            let photo_count = store.get_photos(&event.id)?.len();
            let has_dump = store.get_dump(&event.id)?.is_some();
            Ok(EventSummary {
                event,
                photo_count,
                has_dump,
            })
        })
        .collect()
}

/// A gallery card: an event that has photos.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryEntry {
    pub event: Event,
    pub cover: ImageRef,
    pub photo_count: usize,
    pub dump: Option<Dump>,
}

/// Events with at least one photo, newest date first, with their cover photo.
pub fn gallery<S: EventStore>(store: &S) -> Result<Vec<GalleryEntry>, EventError> {
    let mut events = store.list_events()?;
    events.sort_by(|a, b| b.date.cmp(&a.date));
    let mut entries = Vec::new();
    for event in events {
        let photos = store.get_photos(&event.id)?;
        let Some(cover) = photos.first().cloned() else {
            continue;
        };
        let dump = store.get_dump(&event.id)?;
        entries.push(GalleryEntry {
            event,
            cover,
            photo_count: photos.len(),
            dump,
        });
    }
    Ok(entries)
}

/// Delete an event together with its photos and dump.
pub fn delete_event<S: EventStore>(store: &mut S, event_id: &str) -> Result<(), EventError> {
    if !store.remove_event(event_id)? {
        return Err(EventError::NotFound(event_id.to_string()));
    }
    store.remove_photos(event_id)?;
    store.remove_dump(event_id)?;
    info!(event_id, "event deleted with its photos and dump");
    Ok(())
}
