//! Store traits and shared error type.
//!
//! [`DumpStore`] is the whole contract the composition core relies on.
//! [`EventStore`] extends it with the registry operations (listing,
//! inserting and removing records) that the event workflow needs.

use crate::types::{Dump, Event, ImageRef};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Corrupt record at {path}: {source}")]
    Corrupt {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Store is read-only")]
    ReadOnly,
}

/// Lookups and writes required by the dump composer.
pub trait DumpStore {
    /// The event with this id, if registered.
    fn get_event(&self, event_id: &str) -> Result<Option<Event>, StoreError>;

    /// Ordered photos for an event. Empty when none were attached.
    fn get_photos(&self, event_id: &str) -> Result<Vec<ImageRef>, StoreError>;

    /// The dump currently stored for an event.
    fn get_dump(&self, event_id: &str) -> Result<Option<Dump>, StoreError>;

    /// Persist a dump keyed by `dump.event_id`, replacing any previous one.
    fn save_dump(&mut self, dump: &Dump) -> Result<(), StoreError>;
}

/// Registry operations on top of [`DumpStore`].
pub trait EventStore: DumpStore {
    /// All events in registration order.
    fn list_events(&self) -> Result<Vec<Event>, StoreError>;

    fn insert_event(&mut self, event: &Event) -> Result<(), StoreError>;

    /// Remove an event record. Returns whether it existed.
    fn remove_event(&mut self, event_id: &str) -> Result<bool, StoreError>;

    /// Replace the photo list of an event.
    fn save_photos(&mut self, event_id: &str, photos: &[ImageRef]) -> Result<(), StoreError>;

    fn remove_photos(&mut self, event_id: &str) -> Result<(), StoreError>;

    fn remove_dump(&mut self, event_id: &str) -> Result<(), StoreError>;
}
