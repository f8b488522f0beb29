//! Layout catalog: the fixed family of photo-count grids.
//!
//! Every layout requires an exact number of photos and arranges them
//! row-major in square cells:
//!
//! | Layout | Photos | Columns | Rows |
//! |--------|--------|---------|------|
//! | `grid4` | 4 | 2 | 2 |
//! | `grid6` | 6 | 2 | 3 |
//! | `grid8` | 8 | 2 | 4 |
//! | `grid9` | 9 | 3 | 3 |
//!
//! All functions here are pure. The geometry helpers let any renderer place
//! cells deterministically for a given content width and gap.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    #[error("Unsupported layout: {0} (expected one of grid4, grid6, grid8, grid9)")]
    UnsupportedLayout(String),
}

/// A grid layout requiring an exact photo count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Grid4,
    Grid6,
    Grid8,
    Grid9,
}

impl Layout {
    /// Every layout, smallest first.
    pub const ALL: [Layout; 4] = [Layout::Grid4, Layout::Grid6, Layout::Grid8, Layout::Grid9];

    /// The layout every selection session starts with.
    pub const MINIMUM: Layout = Layout::Grid4;

    pub fn id(self) -> &'static str {
        match self {
            Layout::Grid4 => "grid4",
            Layout::Grid6 => "grid6",
            Layout::Grid8 => "grid8",
            Layout::Grid9 => "grid9",
        }
    }

    /// Exact number of photos a dump in this layout holds.
    pub fn required_count(self) -> usize {
        match self {
            Layout::Grid4 => 4,
            Layout::Grid6 => 6,
            Layout::Grid8 => 8,
            Layout::Grid9 => 9,
        }
    }

    pub fn columns(self) -> usize {
        match self {
            Layout::Grid9 => 3,
            _ => 2,
        }
    }

    pub fn rows(self) -> usize {
        self.required_count() / self.columns()
    }

    pub fn geometry(self) -> GridGeometry {
        GridGeometry {
            columns: self.columns(),
            rows: self.rows(),
            cell_aspect: (1, 1),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Layout {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Layout::ALL
            .into_iter()
            .find(|layout| layout.id() == s)
            .ok_or_else(|| LayoutError::UnsupportedLayout(s.to_string()))
    }
}

/// Layouts usable with `available` photos, smallest first.
///
/// `grid4` is always offered: callers are expected to block entry with fewer
/// than four photos before they get here. Every other layout is offered only
/// when there are at least as many photos as it requires.
pub fn available_layouts(available: usize) -> Vec<Layout> {
    Layout::ALL
        .into_iter()
        .filter(|&layout| layout == Layout::MINIMUM || available >= layout.required_count())
        .collect()
}

/// Shape of a layout's grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    pub columns: usize,
    pub rows: usize,
    /// Cell aspect ratio as (width, height).
    pub cell_aspect: (u32, u32),
}

/// Pixel rectangle of one grid cell, relative to the grid's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl GridGeometry {
    /// Side length of a cell for a content width and gap.
    ///
    /// Uses integer division; a gap wider than the content yields zero.
    /// Arithmetic saturates, and a zero-column geometry counts as one column.
    pub fn cell_width(&self, content_width: u32, gap: u32) -> u32 {
        let columns = (self.columns as u32).max(1);
        content_width.saturating_sub(gap.saturating_mul(columns - 1)) / columns
    }

    fn cell_height(&self, cell_width: u32) -> u32 {
        let (aspect_w, aspect_h) = self.cell_aspect;
        (cell_width as f64 * aspect_h as f64 / aspect_w as f64).round() as u32
    }

    /// Total grid height for a content width and gap.
    pub fn height(&self, content_width: u32, gap: u32) -> u32 {
        let rows = self.rows as u32;
        self.cell_height(self.cell_width(content_width, gap))
            .saturating_mul(rows)
            .saturating_add(gap.saturating_mul(rows.saturating_sub(1)))
    }

    /// Cell rectangles in selection order (row-major).
    ///
    /// # Examples
    /// ```
    /// # use daylog::layout::Layout;
    /// let cells = Layout::Grid4.geometry().cells(412, 12);
    /// assert_eq!(cells.len(), 4);
    /// assert_eq!((cells[1].x, cells[1].width), (212, 200));
    /// assert_eq!(cells[2].y, 212);
    /// ```
    pub fn cells(&self, content_width: u32, gap: u32) -> Vec<CellRect> {
        let width = self.cell_width(content_width, gap);
        let height = self.cell_height(width);
        (0..self.rows * self.columns)
            .map(|index| {
                let row = (index / self.columns) as u32;
                let column = (index % self.columns) as u32;
                CellRect {
                    x: column.saturating_mul(width.saturating_add(gap)),
                    y: row.saturating_mul(height.saturating_add(gap)),
                    width,
                    height,
                }
            })
            .collect()
    }
}
