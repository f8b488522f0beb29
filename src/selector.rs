//! Interactive photo selection for a dump.
//!
//! A [`PhotoSelector`] holds the event's [`PhotoSet`], the active layout and
//! the ordered subset of photos picked so far. Insertion order is display
//! order: a photo's number is its position in the selection plus one, looked
//! up on demand, so numbers shift automatically as photos are removed.
//!
//! Editing may leave the selection short of the layout's count; only
//! [`PhotoSelector::is_composable`] selections can be handed to the composer.

use crate::layout::Layout;
use crate::types::ImageRef;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectError {
    #[error("Not enough photos: {available} available, at least {required} needed")]
    InsufficientPhotos { available: usize, required: usize },
    #[error("You may select exactly {limit} photos")]
    SelectionFull { limit: usize },
    #[error("Photo is not part of this event: {0}")]
    UnknownPhoto(String),
}

/// Ordered photos of one event. Order drives default selection and numbering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PhotoSet {
    photos: Vec<ImageRef>,
}

impl PhotoSet {
    /// Build a set, keeping the first occurrence of any repeated reference.
    pub fn new(photos: impl IntoIterator<Item = ImageRef>) -> Self {
        let mut unique: Vec<ImageRef> = Vec::new();
        for photo in photos {
            if !unique.contains(&photo) {
                unique.push(photo);
            }
        }
        Self { photos: unique }
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn contains(&self, photo: &ImageRef) -> bool {
        self.photos.contains(photo)
    }

    pub fn as_slice(&self) -> &[ImageRef] {
        &self.photos
    }

    /// Photo at a 1-based position, as numbered in listings.
    pub fn get_numbered(&self, number: usize) -> Option<&ImageRef> {
        number.checked_sub(1).and_then(|index| self.photos.get(index))
    }

    /// The first `count` photos, clipped to what is available.
    fn leading(&self, count: usize) -> Vec<ImageRef> {
        self.photos.iter().take(count).cloned().collect()
    }
}

/// Outcome of a successful toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
}

/// Selection state for one composition session.
#[derive(Debug, Clone)]
pub struct PhotoSelector {
    photo_set: PhotoSet,
    layout: Layout,
    selected: Vec<ImageRef>,
}

impl PhotoSelector {
    /// Start a session on `grid4` with the first four photos selected.
    pub fn new(photo_set: PhotoSet) -> Result<Self, SelectError> {
        Self::with_layout(photo_set, Layout::MINIMUM)
    }

    /// Start a session on `layout` with its default selection.
    ///
    /// Fails with [`SelectError::InsufficientPhotos`] when the set cannot
    /// fill even the smallest layout; no selector is created in that case.
    pub fn with_layout(photo_set: PhotoSet, layout: Layout) -> Result<Self, SelectError> {
        let required = Layout::MINIMUM.required_count();
        if photo_set.len() < required {
            return Err(SelectError::InsufficientPhotos {
                available: photo_set.len(),
                required,
            });
        }
        let selected = photo_set.leading(layout.required_count());
        debug!(layout = %layout, selected = selected.len(), "selection initialized");
        Ok(Self {
            photo_set,
            layout,
            selected,
        })
    }

    pub fn photo_set(&self) -> &PhotoSet {
        &self.photo_set
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn selected(&self) -> &[ImageRef] {
        &self.selected
    }

    /// Switch layout and reset the selection to the first photos in source
    /// order, clipped to the photos available.
    ///
    /// Any manual picks are discarded, even when `layout` is the current one.
    pub fn change_layout(&mut self, layout: Layout) {
        self.layout = layout;
        self.selected = self.photo_set.leading(layout.required_count());
        debug!(layout = %layout, selected = self.selected.len(), "layout changed");
    }

    /// Add or remove a photo.
    ///
    /// Removing always succeeds. Adding appends to the end and fails with
    /// [`SelectError::SelectionFull`] once the layout's count is reached,
    /// leaving the selection untouched.
    pub fn toggle(&mut self, photo: &ImageRef) -> Result<Toggle, SelectError> {
        if let Some(index) = self.selected.iter().position(|p| p == photo) {
            self.selected.remove(index);
            debug!(photo = %photo.digest(), remaining = self.selected.len(), "photo deselected");
            return Ok(Toggle::Removed);
        }
        if !self.photo_set.contains(photo) {
            return Err(SelectError::UnknownPhoto(photo.digest()));
        }
        let limit = self.layout.required_count();
        if self.selected.len() >= limit {
            return Err(SelectError::SelectionFull { limit });
        }
        self.selected.push(photo.clone());
        debug!(photo = %photo.digest(), selected = self.selected.len(), "photo selected");
        Ok(Toggle::Added)
    }

    /// Whether the selection holds exactly the layout's required count.
    pub fn is_composable(&self) -> bool {
        self.selected.len() == self.layout.required_count()
    }

    /// 1-based position of `photo` in the selection, `None` when unselected.
    pub fn number_of(&self, photo: &ImageRef) -> Option<usize> {
        self.selected.iter().position(|p| p == photo).map(|i| i + 1)
    }

    /// How many more photos must be picked before composing.
    pub fn remaining(&self) -> usize {
        self.layout
            .required_count()
            .saturating_sub(self.selected.len())
    }
}
