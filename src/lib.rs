//! # Daylog
//!
//! Register the events of a day, attach their photos, and compose a photo
//! dump: a framed grid of a fixed number of photos with an optional title
//! and memo, saved once per event.
//!
//! # Architecture: Select, Then Commit
//!
//! A dump is built in two steps with a single hand-off between them:
//!
//! ```text
//! 1. Select   PhotoSet + Layout  →  PhotoSelector       (in memory, editable)
//! 2. Compose  CompositionRequest →  Dump → DumpStore    (validated, persisted once)
//! ```
//!
//! Selection is free to pass through incomplete states while the user edits.
//! Composition is the only durable action: it validates the whole request in
//! memory and writes exactly once, so a failed compose leaves nothing behind.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | The fixed grid family (`grid4`, `grid6`, `grid8`, `grid9`), availability and cell geometry |
//! | [`selector`] | Ordered photo set and the toggle-based selection session |
//! | [`compose`] | Composition requests, visibility normalization, persisting the dump |
//! | [`events`] | Event registration, photo attachment, listings, cascading delete |
//! | [`store`] | Storage traits with JSON-file and in-memory implementations |
//! | [`render`] | HTML rendering of a dump using Maud |
//! | [`config`] | `daylog.toml` loading, validation, and the background palette |
//! | [`types`] | Shared records: `Event`, `Dump`, `DumpStyle`, `ImageRef` |
//! | [`output`] | CLI output formatting |
//! | [`logging`] | `tracing` subscriber setup for the binary |
//!
//! # Design Decisions
//!
//! ## One Dump Per Event, Last Write Wins
//!
//! Dumps are keyed by event id. Composing again overwrites the previous dump
//! without merging or versioning. There is a single writer, so no conflict
//! detection is performed.
//!
//! ## The Frame Gates All Text
//!
//! Turning the frame off forces both the title and memo flags off. Text the
//! user hides is discarded rather than stored behind a `false` flag; see
//! [`compose`] for the full table.
//!
//! ## Photos Are Opaque References
//!
//! The core never decodes images. An [`types::ImageRef`] is whatever the
//! caller uses to locate a photo (a path, a URL, a data URL), kept verbatim
//! and shown in CLI output by a short content digest.
//!
//! ## Storage Behind a Trait
//!
//! The composer only needs [`store::DumpStore`]: read an event, read its
//! photos, write a dump. The CLI uses [`store::JsonStore`]; tests and
//! embedders use [`store::MemoryStore`].

pub mod compose;
pub mod config;
pub mod events;
pub mod layout;
pub mod logging;
pub mod output;
pub mod render;
pub mod selector;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
