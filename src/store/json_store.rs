//! Directory-backed JSON store.
//!
//! # Layout
//!
//! ```text
//! .daylog/
//! ├── events.json            # [Event], registration order
//! ├── photos/
//! │   └── <event-id>.json    # [image-ref], upload order
//! └── dumps/
//!     └── <event-id>.json    # Dump, latest composition only
//! ```
//!
//! Missing files read as "nothing stored". Files that exist but fail to parse
//! are reported as [`StoreError::Corrupt`] rather than silently reset, since
//! unlike a cache these records cannot be regenerated.
//!
//! Writes go to a `.tmp` sibling which is then renamed over the target, so a
//! failure mid-write never leaves a half-written record behind.

use super::backend::{DumpStore, EventStore, StoreError};
use crate::types::{Dump, Event, ImageRef};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

const EVENTS_FILENAME: &str = "events.json";
const PHOTOS_DIR: &str = "photos";
const DUMPS_DIR: &str = "dumps";

#[derive(Debug, Clone)]
pub struct JsonStore {
    root: PathBuf,
}

impl JsonStore {
    /// Open a store rooted at `root`, creating the directory tree if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(root.join(PHOTOS_DIR))?;
        fs::create_dir_all(root.join(DUMPS_DIR))?;
        debug!(root = %root.display(), "json store opened");
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn events_path(&self) -> PathBuf {
        self.root.join(EVENTS_FILENAME)
    }

    fn photos_path(&self, event_id: &str) -> PathBuf {
        self.root.join(PHOTOS_DIR).join(record_filename(event_id))
    }

    fn dump_path(&self, event_id: &str) -> PathBuf {
        self.root.join(DUMPS_DIR).join(record_filename(event_id))
    }
}

/// File name for a per-event record. Path separators in ids are replaced so
/// a record can never escape its directory.
fn record_filename(event_id: &str) -> String {
    let safe: String = event_id
        .chars()
        .map(|c| match c {
            '/' | '\\' | '\0' => '_',
            _ => c,
        })
        .collect();
    match safe.as_str() {
        "" | "." | ".." => format!("_{safe}.json"),
        _ => format!("{safe}.json"),
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| StoreError::Corrupt {
            path: path.to_path_buf(),
            source,
        })
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), StoreError> {
    let json = serde_json::to_string_pretty(value)?;
    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path)?;
    debug!(path = %path.display(), "record written");
    Ok(())
}

fn remove_if_exists(path: &Path) -> Result<(), StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

impl DumpStore for JsonStore {
    fn get_event(&self, event_id: &str) -> Result<Option<Event>, StoreError> {
        Ok(self.list_events()?.into_iter().find(|e| e.id == event_id))
    }

    fn get_photos(&self, event_id: &str) -> Result<Vec<ImageRef>, StoreError> {
        Ok(read_json(&self.photos_path(event_id))?.unwrap_or_default())
    }

    fn get_dump(&self, event_id: &str) -> Result<Option<Dump>, StoreError> {
        read_json(&self.dump_path(event_id))
    }

    fn save_dump(&mut self, dump: &Dump) -> Result<(), StoreError> {
        write_json(&self.dump_path(&dump.event_id), dump)
    }
}

impl EventStore for JsonStore {
    fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(read_json(&self.events_path())?.unwrap_or_default())
    }

    fn insert_event(&mut self, event: &Event) -> Result<(), StoreError> {
        let mut events = self.list_events()?;
        events.retain(|e| e.id != event.id);
        events.push(event.clone());
        write_json(&self.events_path(), &events)
    }

    fn remove_event(&mut self, event_id: &str) -> Result<bool, StoreError> {
        let mut events = self.list_events()?;
        let before = events.len();
        events.retain(|e| e.id != event_id);
        if events.len() == before {
            return Ok(false);
        }
        write_json(&self.events_path(), &events)?;
        Ok(true)
    }

    fn save_photos(&mut self, event_id: &str, photos: &[ImageRef]) -> Result<(), StoreError> {
        write_json(&self.photos_path(event_id), photos)
    }

    fn remove_photos(&mut self, event_id: &str) -> Result<(), StoreError> {
        remove_if_exists(&self.photos_path(event_id))
    }

    fn remove_dump(&mut self, event_id: &str) -> Result<(), StoreError> {
        remove_if_exists(&self.dump_path(event_id))
    }
}
