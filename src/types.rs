//! Shared records persisted by the store and consumed by renderers.
//!
//! These types are serialized to JSON (camelCase keys) and must stay stable:
//! a stored [`Dump`] is the contract a renderer reproduces pixel-for-pixel.

use crate::layout::Layout;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Smallest and largest pixel value accepted for gap and corner radius.
pub const STYLE_PX_RANGE: (u32, u32) = (0, 32);

/// Opaque handle to encoded image bytes (usually an embedded data URL).
///
/// Identity is the reference string itself. The core never decodes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short SHA-256 prefix, used to identify a photo in CLI output without
    /// printing a multi-megabyte data URL.
    pub fn digest(&self) -> String {
        let digest = Sha256::digest(self.0.as_bytes());
        format!("{:x}", digest)[..12].to_string()
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImageRef {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ImageRef {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A registered day event that photos and a dump attach to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: String,
    pub title: String,
    /// Calendar date, serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<NaiveTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
}

/// Visual styling frozen into a dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpStyle {
    pub background_color: String,
    pub font_family: String,
    /// Gap between grid cells in px (0-32).
    pub image_gap: u32,
    /// Corner radius of each cell in px (0-32).
    pub image_radius: u32,
}

impl DumpStyle {
    /// Build a style, clamping the pixel values into range.
    pub fn new(
        background_color: impl Into<String>,
        font_family: impl Into<String>,
        image_gap: u32,
        image_radius: u32,
    ) -> Self {
        Self {
            background_color: background_color.into(),
            font_family: font_family.into(),
            image_gap,
            image_radius,
        }
        .clamped()
    }

    /// Return a copy with gap and radius clamped into [`STYLE_PX_RANGE`].
    pub fn clamped(mut self) -> Self {
        let (min, max) = STYLE_PX_RANGE;
        self.image_gap = self.image_gap.clamp(min, max);
        self.image_radius = self.image_radius.clamp(min, max);
        self
    }
}

impl Default for DumpStyle {
    fn default() -> Self {
        Self {
            background_color: "#fefefe".to_string(),
            font_family: "Inter".to_string(),
            image_gap: 12,
            image_radius: 16,
        }
    }
}

/// The immutable result of a composition, one per event.
///
/// Invariants established by the composer:
/// - `photos.len() == layout.required_count()`
/// - `show_frame == false` implies `show_title == false && show_memo == false`
/// - hidden title/memo text is stored as an empty string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dump {
    pub id: String,
    pub event_id: String,
    pub layout: Layout,
    pub title: String,
    pub memo: String,
    pub show_title: bool,
    pub show_memo: bool,
    pub show_frame: bool,
    pub style: DumpStyle,
    pub photos: Vec<ImageRef>,
    pub created_at: DateTime<Utc>,
}

impl Dump {
    /// Title text a renderer should display, if any.
    pub fn visible_title(&self) -> Option<&str> {
        (self.show_frame && self.show_title && !self.title.is_empty()).then_some(&self.title)
    }

    /// Memo text a renderer should display, if any.
    pub fn visible_memo(&self) -> Option<&str> {
        (self.show_frame && self.show_memo && !self.memo.is_empty()).then_some(&self.memo)
    }
}

/// Generate a record id: unix milliseconds followed by nine random hex chars.
pub fn generate_id(now: DateTime<Utc>) -> String {
    let suffix = uuid::Uuid::new_v4().simple().to_string();
    format!("{}{}", now.timestamp_millis(), &suffix[..9])
}
