//! HTML rendering of a composed dump.
//!
//! A dump renders to a single framed card:
//!
//! ```text
//! div.dump                 background + font, padding/shadow when framed
//! ├── h2.dump-title        framed, title shown, title non-empty
//! ├── div.dump-grid        repeat(columns, 1fr), gap
//! │   └── div.dump-cell    square, border-radius, shadow when framed
//! │       └── img          photo reference, selection order
//! └── p.dump-memo          framed, memo shown, memo non-empty
//! ```
//!
//! Nothing else is conditional. Styling that depends on the dump is written
//! as inline `style` attributes so the fragment can be embedded anywhere;
//! [`render_document`] adds a page shell around it.
//!
//! Uses [maud](https://maud.lambda.xyz/) so all text is escaped.

use crate::types::Dump;
use maud::{DOCTYPE, Markup, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

const FRAME_PADDING_PX: u32 = 32;
const FRAME_SHADOW: &str = "0 10px 15px -3px rgba(0,0,0,0.1), 0 4px 6px -4px rgba(0,0,0,0.1)";
const CELL_SHADOW: &str = "0 4px 6px -1px rgba(0,0,0,0.1), 0 2px 4px -2px rgba(0,0,0,0.1)";
const PHOTO_STYLE: &str = "width: 100%; height: 100%; object-fit: cover; display: block;";

const PAGE_CSS: &str = "\
body { margin: 0; padding: 24px; background: #f3f4f6; }
.dump { max-width: 720px; margin: 0 auto; box-sizing: border-box; }
.dump-title { margin: 0 0 24px; text-align: center; color: #1f2937; }
.dump-memo { margin: 24px 0 0; text-align: center; font-style: italic; color: #374151; }
";

fn container_style(dump: &Dump) -> String {
    let mut style = format!(
        "background-color: {}; font-family: {};",
        dump.style.background_color, dump.style.font_family
    );
    if dump.show_frame {
        style.push_str(&format!(
            " padding: {FRAME_PADDING_PX}px; border-radius: 16px; box-shadow: {FRAME_SHADOW};"
        ));
    }
    style
}

fn grid_style(dump: &Dump) -> String {
    format!(
        "display: grid; grid-template-columns: repeat({}, 1fr); gap: {}px;",
        dump.layout.columns(),
        dump.style.image_gap
    )
}

fn cell_style(dump: &Dump) -> String {
    let (aspect_w, aspect_h) = dump.layout.geometry().cell_aspect;
    let mut style = format!(
        "aspect-ratio: {aspect_w} / {aspect_h}; overflow: hidden; border-radius: {}px;",
        dump.style.image_radius
    );
    if dump.show_frame {
        style.push_str(&format!(" box-shadow: {CELL_SHADOW};"));
    }
    style
}

/// Render the dump card as an embeddable fragment.
pub fn render_dump(dump: &Dump) -> Markup {
    let cell = cell_style(dump);
    html! {
        div.dump style=(container_style(dump)) data-layout=(dump.layout.id()) {
            @if let Some(title) = dump.visible_title() {
                h2.dump-title { (title) }
            }
            div.dump-grid style=(grid_style(dump)) {
                @for (index, photo) in dump.photos.iter().enumerate() {
                    div.dump-cell style=(cell) {
                        img src=(photo.as_str()) alt={ "Photo " (index + 1) } style=(PHOTO_STYLE);
                    }
                }
            }
            @if let Some(memo) = dump.visible_memo() {
                p.dump-memo { (memo) }
            }
        }
    }
}

/// Render the dump as a standalone HTML page.
pub fn render_document(dump: &Dump) -> Markup {
    let title = dump.visible_title().unwrap_or("Photo dump");
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PAGE_CSS) }
            }
            body {
                (render_dump(dump))
            }
        }
    }
}

/// Write [`render_document`] output to `path`.
pub fn write_document(dump: &Dump, path: &Path) -> Result<(), RenderError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, render_document(dump).into_string())?;
    Ok(())
}
