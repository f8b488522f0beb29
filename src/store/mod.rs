//! Persistence boundary for events, photos and dumps.
//!
//! | Piece | Role |
//! |---|---|
//! | [`DumpStore`] | The four lookups/writes the composer needs |
//! | [`EventStore`] | Registry plumbing used by [`events`](crate::events) |
//! | [`JsonStore`] | Directory of JSON files, one record per key |
//! | [`MemoryStore`] | In-process maps, for embedding and tests |
//!
//! Every store is keyed by event id and keeps at most one dump per event:
//! saving a dump replaces whatever was stored before, last write wins.

pub mod backend;
pub mod json_store;
pub mod memory;

pub use backend::{DumpStore, EventStore, StoreError};
pub use json_store::JsonStore;
pub use memory::MemoryStore;
