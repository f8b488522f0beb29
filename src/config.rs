//! Configuration module.
//!
//! Handles loading, validating, and merging `daylog.toml`. Stock defaults are
//! the base layer; a `daylog.toml` in the working root overrides any subset of
//! them.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! store_dir = ".daylog"     # Where events, photos and dumps are kept
//!
//! [style]                   # Default dump style
//! background_color = "#fefefe"
//! font_family = "Inter"
//! image_gap = 12            # px between cells (0-32)
//! image_radius = 16         # px corner radius (0-32)
//!
//! [photos]
//! max_per_event = 10        # Upload cap per event (at least 4)
//!
//! [[palette]]               # Named background presets
//! name = "white"
//! color = "#fefefe"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [style]
//! image_gap = 4
//! ```
//!
//! Unknown keys are rejected to catch typos early. Arrays (the palette)
//! replace the default array wholesale rather than merging entry by entry.

use crate::types::{DumpStyle, STYLE_PX_RANGE};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file looked up in the working root.
pub const CONFIG_FILENAME: &str = "daylog.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Configuration loaded from `daylog.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DaylogConfig {
    /// Store directory, relative to the working root.
    pub store_dir: String,
    /// Style applied to new dumps unless overridden per compose.
    pub style: StyleConfig,
    /// Photo attachment limits.
    pub photos: PhotosConfig,
    /// Named background color presets.
    pub palette: Vec<PaletteColor>,
}

impl Default for DaylogConfig {
    fn default() -> Self {
        Self {
            store_dir: ".daylog".to_string(),
            style: StyleConfig::default(),
            photos: PhotosConfig::default(),
            palette: default_palette(),
        }
    }
}

impl DaylogConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min_px, max_px) = STYLE_PX_RANGE;
        if !(min_px..=max_px).contains(&self.style.image_gap) {
            return Err(ConfigError::Validation(format!(
                "style.image_gap must be {min_px}-{max_px}"
            )));
        }
        if !(min_px..=max_px).contains(&self.style.image_radius) {
            return Err(ConfigError::Validation(format!(
                "style.image_radius must be {min_px}-{max_px}"
            )));
        }
        if self.style.font_family.trim().is_empty() {
            return Err(ConfigError::Validation(
                "style.font_family must not be empty".into(),
            ));
        }
        if !is_hex_color(&self.style.background_color) {
            return Err(ConfigError::Validation(format!(
                "style.background_color '{}' is not a hex color",
                self.style.background_color
            )));
        }
        if self.photos.max_per_event < 4 {
            return Err(ConfigError::Validation(
                "photos.max_per_event must be at least 4".into(),
            ));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Validation("palette must not be empty".into()));
        }
        for preset in &self.palette {
            if !is_hex_color(&preset.color) {
                return Err(ConfigError::Validation(format!(
                    "palette color '{}' ({}) is not a hex color",
                    preset.name, preset.color
                )));
            }
        }
        if self.store_dir.trim().is_empty() {
            return Err(ConfigError::Validation(
                "store_dir must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Resolve a `--background` argument: a palette name or a hex color.
    pub fn resolve_color(&self, value: &str) -> Option<String> {
        if let Some(preset) = self.palette.iter().find(|p| p.name == value) {
            return Some(preset.color.clone());
        }
        is_hex_color(value).then(|| value.to_string())
    }
}

/// Default dump style.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleConfig {
    pub background_color: String,
    pub font_family: String,
    pub image_gap: u32,
    pub image_radius: u32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        let style = DumpStyle::default();
        Self {
            background_color: style.background_color,
            font_family: style.font_family,
            image_gap: style.image_gap,
            image_radius: style.image_radius,
        }
    }
}

impl StyleConfig {
    pub fn to_style(&self) -> DumpStyle {
        DumpStyle::new(
            self.background_color.clone(),
            self.font_family.clone(),
            self.image_gap,
            self.image_radius,
        )
    }
}

/// Photo attachment limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PhotosConfig {
    /// Maximum photos stored per event; extra uploads are dropped.
    pub max_per_event: usize,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self { max_per_event: 10 }
    }
}

/// A named background color preset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaletteColor {
    pub name: String,
    pub color: String,
}

fn default_palette() -> Vec<PaletteColor> {
    [
        ("white", "#fefefe"),
        ("cream", "#fef7ed"),
        ("beige", "#f5f5dc"),
        ("light-gray", "#f8f9fa"),
        ("warm-white", "#fffcf7"),
        ("soft-pink", "#fef2f2"),
    ]
    .into_iter()
    .map(|(name, color)| PaletteColor {
        name: name.to_string(),
        color: color.to_string(),
    })
    .collect()
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(value: &str) -> bool {
    match value.strip_prefix('#') {
        Some(hex) => {
            (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
        }
        None => false,
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(DaylogConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config does not serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay, arrays included, replace base values.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `daylog.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<DaylogConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: DaylogConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `daylog.toml` in `root`, layered over stock defaults.
pub fn load_config(root: &Path) -> Result<DaylogConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `daylog.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Daylog Configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory holding events, photos and dumps, relative to this file.
store_dir = ".daylog"

# ---------------------------------------------------------------------------
# Default dump style (each compose may override it)
# ---------------------------------------------------------------------------
[style]
background_color = "#fefefe"
font_family = "Inter"

# Gap between grid cells in px (0-32).
image_gap = 12

# Corner radius of each cell in px (0-32).
image_radius = 16

# ---------------------------------------------------------------------------
# Photos
# ---------------------------------------------------------------------------
[photos]
# Photos kept per event. Uploads beyond this are dropped.
# Must be at least 4, the size of the smallest layout.
max_per_event = 10

# ---------------------------------------------------------------------------
# Background presets, usable by name: daylog compose --background cream
# Declaring any [[palette]] entry replaces the whole list.
# ---------------------------------------------------------------------------
[[palette]]
name = "white"
color = "#fefefe"

[[palette]]
name = "cream"
color = "#fef7ed"

[[palette]]
name = "beige"
color = "#f5f5dc"

[[palette]]
name = "light-gray"
color = "#f8f9fa"

[[palette]]
name = "warm-white"
color = "#fffcf7"

[[palette]]
name = "soft-pink"
color = "#fef2f2"
"##
}
