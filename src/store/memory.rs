//! In-memory store.
//!
//! Holds everything in ordered maps. Used when embedding the composer in a
//! process that owns its own persistence, and throughout the test suite.
//! [`MemoryStore::read_only`] makes every write fail, which is how callers
//! exercise the persistence-failure path.

use super::backend::{DumpStore, EventStore, StoreError};
use crate::types::{Dump, Event, ImageRef};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    events: Vec<Event>,
    photos: BTreeMap<String, Vec<ImageRef>>,
    dumps: BTreeMap<String, Dump>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject all subsequent writes with [`StoreError::ReadOnly`].
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Number of stored dumps.
    pub fn dump_count(&self) -> usize {
        self.dumps.len()
    }

    fn check_writable(&self) -> Result<(), StoreError> {
        if self.read_only {
            Err(StoreError::ReadOnly)
        } else {
            Ok(())
        }
    }
}

impl DumpStore for MemoryStore {
    fn get_event(&self, event_id: &str) -> Result<Option<Event>, StoreError> {
        Ok(self.events.iter().find(|e| e.id == event_id).cloned())
    }

    fn get_photos(&self, event_id: &str) -> Result<Vec<ImageRef>, StoreError> {
        Ok(self.photos.get(event_id).cloned().unwrap_or_default())
    }

    fn get_dump(&self, event_id: &str) -> Result<Option<Dump>, StoreError> {
        Ok(self.dumps.get(event_id).cloned())
    }

    fn save_dump(&mut self, dump: &Dump) -> Result<(), StoreError> {
        self.check_writable()?;
        self.dumps.insert(dump.event_id.clone(), dump.clone());
        Ok(())
    }
}

impl EventStore for MemoryStore {
    fn list_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.events.clone())
    }

    fn insert_event(&mut self, event: &Event) -> Result<(), StoreError> {
        self.check_writable()?;
        self.events.retain(|e| e.id != event.id);
        self.events.push(event.clone());
        Ok(())
    }

    fn remove_event(&mut self, event_id: &str) -> Result<bool, StoreError> {
        self.check_writable()?;
        let before = self.events.len();
        self.events.retain(|e| e.id != event_id);
        Ok(self.events.len() != before)
    }

    fn save_photos(&mut self, event_id: &str, photos: &[ImageRef]) -> Result<(), StoreError> {
        self.check_writable()?;
        self.photos.insert(event_id.to_string(), photos.to_vec());
        Ok(())
    }

    fn remove_photos(&mut self, event_id: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.photos.remove(event_id);
        Ok(())
    }

    fn remove_dump(&mut self, event_id: &str) -> Result<(), StoreError> {
        self.check_writable()?;
        self.dumps.remove(event_id);
        Ok(())
    }
}
