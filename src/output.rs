//! CLI output formatting.
//!
//! # Information-First Display
//!
//! Every entity leads with its semantic identity: events by positional index
//! and title, photos by their 1-based number. Storage details (ids, digests,
//! raw references) follow as indented context lines. The numbers printed here
//! are the numbers `compose --pick` accepts.
//!
//! # Output Format
//!
//! ## Events
//!
//! ```text
//! 001 Beach day (2025-06-01 10:00-18:00) [dump]
//!     Id: 1717171717171a1b2c3d4e
//!     Photos: 6
//! ```
//!
//! ## Photos
//!
//! ```text
//! 001 a1b2c3d4e5f6
//!     Source: photos/beach-01.jpg
//! ```
//!
//! ## Dump
//!
//! ```text
//! Dump 1717171717171a1b2c3d4e (grid4, 2x2)
//!     Title: Trip
//!     Memo: (hidden)
//!     Frame: on
//!     Style: #fefefe, Inter, gap 12px, radius 16px
//!     001 a1b2c3d4e5f6
//!     002 0f9e8d7c6b5a
//! ```
//!
//! # Architecture
//!
//! Each view has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure and do no I/O.

use crate::events::{AttachReport, EventSummary, GalleryEntry};
use crate::layout::Layout;
use crate::types::{Dump, Event, ImageRef};

/// Longest raw reference shown on a `Source:` line.
const SOURCE_MAX: usize = 60;

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate_source(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}

/// `2025-06-01`, `2025-06-01 10:00`, or `2025-06-01 10:00-18:00`.
fn event_when(event: &Event) -> String {
    let date = event.date.format("%Y-%m-%d").to_string();
    let start = event.start_time.map(|t| t.format("%H:%M").to_string());
    let end = event.end_time.map(|t| t.format("%H:%M").to_string());
    match (start, end) {
        (Some(s), Some(e)) => format!("{date} {s}-{e}"),
        (Some(s), None) => format!("{date} {s}"),
        (None, Some(e)) => format!("{date} -{e}"),
        (None, None) => date,
    }
}

/// A numbered photo: digest on the header, raw reference as context.
fn photo_lines(number: usize, photo: &ImageRef, depth: usize) -> Vec<String> {
    vec![
        format!("{}{} {}", indent(depth), format_index(number), photo.digest()),
        format!(
            "{}Source: {}",
            indent(depth + 1),
            truncate_source(photo.as_str(), SOURCE_MAX)
        ),
    ]
}

fn shown_or_hidden(text: &str, shown: bool) -> String {
    match (shown, text.is_empty()) {
        (false, _) => "(hidden)".to_string(),
        (true, true) => "(empty)".to_string(),
        (true, false) => text.to_string(),
    }
}

// ============================================================================
// Events
// ============================================================================

/// Format the event list.
pub fn format_event_list(events: &[EventSummary]) -> Vec<String> {
    if events.is_empty() {
        return vec!["No events".to_string()];
    }
    let mut lines = Vec::new();
    for (i, summary) in events.iter().enumerate() {
        let marker = if summary.has_dump { " [dump]" } else { "" };
        lines.push(format!(
            "{} {} ({}){}",
            format_index(i + 1),
            summary.event.title,
            event_when(&summary.event),
            marker
        ));
        lines.push(format!("{}Id: {}", indent(1), summary.event.id));
        lines.push(format!("{}Photos: {}", indent(1), summary.photo_count));
        if let Some(memo) = &summary.event.memo {
            lines.push(format!("{}Memo: {}", indent(1), memo));
        }
    }
    lines
}

pub fn print_event_list(events: &[EventSummary]) {
    for line in format_event_list(events) {
        println!("{}", line);
    }
}

/// Format a freshly registered event.
pub fn format_event_created(event: &Event) -> Vec<String> {
    vec![
        format!("Created {} ({})", event.title, event_when(event)),
        format!("{}Id: {}", indent(1), event.id),
    ]
}

pub fn print_event_created(event: &Event) {
    for line in format_event_created(event) {
        println!("{}", line);
    }
}

// ============================================================================
// Photos
// ============================================================================

/// Format an event's photos, numbered from one.
pub fn format_photo_list(photos: &[ImageRef]) -> Vec<String> {
    if photos.is_empty() {
        return vec!["No photos".to_string()];
    }
    photos
        .iter()
        .enumerate()
        .flat_map(|(i, photo)| photo_lines(i + 1, photo, 0))
        .collect()
}

pub fn print_photo_list(photos: &[ImageRef]) {
    for line in format_photo_list(photos) {
        println!("{}", line);
    }
}

/// Format the outcome of attaching photos.
pub fn format_attach_report(report: &AttachReport, max: usize) -> Vec<String> {
    let mut lines = vec![format!(
        "Added {} photos ({} total)",
        report.added, report.total
    )];
    if report.duplicates > 0 {
        lines.push(format!(
            "{}Skipped {} already attached",
            indent(1),
            report.duplicates
        ));
    }
    if report.dropped > 0 {
        lines.push(format!(
            "{}Dropped {} over the limit of {}",
            indent(1),
            report.dropped,
            max
        ));
    }
    lines
}

pub fn print_attach_report(report: &AttachReport, max: usize) {
    for line in format_attach_report(report, max) {
        println!("{}", line);
    }
}

// ============================================================================
// Layouts
// ============================================================================

/// Format the layouts offered for `photo_count` photos.
pub fn format_layouts(layouts: &[Layout], photo_count: usize) -> Vec<String> {
    let mut lines = vec![format!("Layouts for {} photos", photo_count)];
    for layout in layouts {
        let geometry = layout.geometry();
        lines.push(format!(
            "{}{} {}x{} ({} photos)",
            indent(1),
            layout.id(),
            geometry.columns,
            geometry.rows,
            layout.required_count()
        ));
    }
    lines
}

pub fn print_layouts(layouts: &[Layout], photo_count: usize) {
    for line in format_layouts(layouts, photo_count) {
        println!("{}", line);
    }
}

// ============================================================================
// Dumps
// ============================================================================

/// Format a composed dump with its photos in selection order.
pub fn format_dump(dump: &Dump) -> Vec<String> {
    let geometry = dump.layout.geometry();
    let mut lines = vec![format!(
        "Dump {} ({}, {}x{})",
        dump.id, dump.layout, geometry.columns, geometry.rows
    )];
    lines.push(format!(
        "{}Title: {}",
        indent(1),
        shown_or_hidden(&dump.title, dump.show_title)
    ));
    lines.push(format!(
        "{}Memo: {}",
        indent(1),
        shown_or_hidden(&dump.memo, dump.show_memo)
    ));
    lines.push(format!(
        "{}Frame: {}",
        indent(1),
        if dump.show_frame { "on" } else { "off" }
    ));
    lines.push(format!(
        "{}Style: {}, {}, gap {}px, radius {}px",
        indent(1),
        dump.style.background_color,
        dump.style.font_family,
        dump.style.image_gap,
        dump.style.image_radius
    ));
    for (i, photo) in dump.photos.iter().enumerate() {
        lines.push(format!(
            "{}{} {}",
            indent(1),
            format_index(i + 1),
            photo.digest()
        ));
    }
    lines
}

pub fn print_dump(dump: &Dump) {
    for line in format_dump(dump) {
        println!("{}", line);
    }
}

// ============================================================================
// Gallery
// ============================================================================

/// Format gallery cards: events with photos, newest first.
pub fn format_gallery(entries: &[GalleryEntry]) -> Vec<String> {
    if entries.is_empty() {
        return vec!["Gallery is empty".to_string()];
    }
    let mut lines = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!(
            "{} {} ({} photos)",
            format_index(i + 1),
            entry.event.title,
            entry.photo_count
        ));
        lines.push(format!("{}Date: {}", indent(1), event_when(&entry.event)));
        lines.push(format!("{}Cover: {}", indent(1), entry.cover.digest()));
        match &entry.dump {
            Some(dump) => lines.push(format!("{}Dump: {}", indent(1), dump.layout)),
            None => lines.push(format!("{}Dump: none", indent(1))),
        }
    }
    lines
}

pub fn print_gallery(entries: &[GalleryEntry]) {
    for line in format_gallery(entries) {
        println!("{}", line);
    }
}
