//! Dump composition: the single commit point of the workflow.
//!
//! The selection step hands the composer a [`CompositionRequest`] carrying
//! everything the dump needs: layout, ordered photos, style and text. The
//! composer validates the request completely in memory, normalizes the
//! visibility flags, and only then writes the dump once. A failed compose
//! leaves the store untouched.
//!
//! ## Visibility rules
//!
//! The frame gates all decorative text:
//!
//! ```text
//! show_frame  show_title(in)  ->  show_title(out)  title(stored)
//! false       any                 false            ""
//! true        false               false            ""
//! true        true                true             title as given
//! ```
//!
//! The same applies to the memo. Hidden text is discarded rather than kept
//! alongside a `false` flag, so re-enabling the frame later cannot bring back
//! text the user had chosen to hide.

use crate::layout::Layout;
use crate::selector::PhotoSelector;
use crate::store::{DumpStore, StoreError};
use crate::types::{Dump, DumpStyle, ImageRef, generate_id};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Select exactly {required} photos (currently {actual})")]
    IncompleteSelection { required: usize, actual: usize },
    #[error("Event not found: {0}")]
    MissingEvent(String),
    #[error("Photo {0} does not belong to this event")]
    ForeignPhoto(String),
    #[error("Photo {0} is selected more than once")]
    DuplicatePhoto(String),
    #[error("Could not read event records: {0}")]
    Lookup(#[source] StoreError),
    #[error("Could not save dump: {0}")]
    Persistence(#[source] StoreError),
}

/// Everything needed to compose a dump, handed over from the selection step.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionRequest {
    pub event_id: String,
    pub layout: Layout,
    /// Selected photos in display order.
    pub photos: Vec<ImageRef>,
    pub style: DumpStyle,
    pub title: String,
    pub memo: String,
    pub show_title: bool,
    pub show_memo: bool,
    pub show_frame: bool,
}

impl CompositionRequest {
    /// Start a request from raw parts, with default style, no text and the
    /// frame shown.
    pub fn new(event_id: impl Into<String>, layout: Layout, photos: Vec<ImageRef>) -> Self {
        Self {
            event_id: event_id.into(),
            layout,
            photos,
            style: DumpStyle::default(),
            title: String::new(),
            memo: String::new(),
            show_title: false,
            show_memo: false,
            show_frame: true,
        }
    }

    /// Freeze the current state of a selector into a request.
    pub fn from_selector(event_id: impl Into<String>, selector: &PhotoSelector) -> Self {
        Self::new(event_id, selector.layout(), selector.selected().to_vec())
    }

    pub fn with_style(mut self, style: DumpStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>, show: bool) -> Self {
        self.title = title.into();
        self.show_title = show;
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>, show: bool) -> Self {
        self.memo = memo.into();
        self.show_memo = show;
        self
    }

    pub fn with_frame(mut self, show: bool) -> Self {
        self.show_frame = show;
        self
    }
}

/// Visibility flags after the frame gate has been applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub show_title: bool,
    pub show_memo: bool,
    pub show_frame: bool,
}

/// Apply the frame gate: without a frame neither title nor memo is shown.
pub fn normalize_visibility(show_title: bool, show_memo: bool, show_frame: bool) -> Visibility {
    Visibility {
        show_title: show_frame && show_title,
        show_memo: show_frame && show_memo,
        show_frame,
    }
}

/// Commits composition requests to a [`DumpStore`].
pub struct DumpComposer<'s, S: DumpStore> {
    store: &'s mut S,
}

impl<'s, S: DumpStore> DumpComposer<'s, S> {
    pub fn new(store: &'s mut S) -> Self {
        Self { store }
    }

    /// Compose and persist a dump stamped with the current time.
    pub fn compose(&mut self, request: CompositionRequest) -> Result<Dump, ComposeError> {
        self.compose_at(request, Utc::now())
    }

    /// Compose and persist a dump stamped with `now`.
    ///
    /// Validation order: photo count, event existence, photo membership and
    /// uniqueness. The store is written exactly once, after all checks pass,
    /// and any previous dump for the event is replaced.
    #[instrument(skip_all, fields(event_id = %request.event_id, layout = %request.layout))]
    pub fn compose_at(
        &mut self,
        request: CompositionRequest,
        now: DateTime<Utc>,
    ) -> Result<Dump, ComposeError> {
        let required = request.layout.required_count();
        if request.photos.len() != required {
            return Err(ComposeError::IncompleteSelection {
                required,
                actual: request.photos.len(),
            });
        }

        let event = self
            .store
            .get_event(&request.event_id)
            .map_err(ComposeError::Lookup)?
            .ok_or_else(|| ComposeError::MissingEvent(request.event_id.clone()))?;

        let available: HashSet<ImageRef> = self
            .store
            .get_photos(&event.id)
            .map_err(ComposeError::Lookup)?
            .into_iter()
            .collect();
        let mut seen = HashSet::new();
        for photo in &request.photos {
            if !available.contains(photo) {
                return Err(ComposeError::ForeignPhoto(photo.digest()));
            }
            if !seen.insert(photo) {
                return Err(ComposeError::DuplicatePhoto(photo.digest()));
            }
        }

        let visibility =
            normalize_visibility(request.show_title, request.show_memo, request.show_frame);
        let dump = Dump {
            id: generate_id(now),
            event_id: event.id,
            layout: request.layout,
            title: if visibility.show_title {
                request.title
            } else {
                String::new()
            },
            memo: if visibility.show_memo {
                request.memo
            } else {
                String::new()
            },
            show_title: visibility.show_title,
            show_memo: visibility.show_memo,
            show_frame: visibility.show_frame,
            style: request.style.clamped(),
            photos: request.photos,
            created_at: now,
        };

        self.store
            .save_dump(&dump)
            .map_err(ComposeError::Persistence)?;
        info!(dump_id = %dump.id, photos = dump.photos.len(), "dump composed");
        Ok(dump)
    }
}
