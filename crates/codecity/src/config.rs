//! Configuration types for CodeCity layout and rendering.
//!
//! All types implement [`serde::Deserialize`] so they can be loaded from a
//! TOML file; every field has a default, so a partial file (or none at all)
//! is valid.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining all sections.
//! - [`LayoutConfig`] - Layout mode, canvas size and treemap padding.
//! - [`StreetConfig`] - Road and footprint settings for the street layout.
//! - [`StyleConfig`] - Age gradient, label and background colors.
//! - [`LabelConfig`] - Container label font and placement.
//!
//! # Example
//!
//! ```
//! # use codecity::config::{AppConfig, LayoutMode};
//! let config = AppConfig::default();
//! assert_eq!(config.layout().mode(), LayoutMode::Treemap);
//! assert_eq!(config.layout().canvas_size(), 1500.0);
//! assert!(config.style().young_color().is_ok());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use codecity_core::{
    color::Color,
    draw::{FontFace, LabelFont},
};

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    layout: LayoutConfig,

    #[serde(default)]
    street: StreetConfig,

    #[serde(default)]
    style: StyleConfig,

    #[serde(default)]
    label: LabelConfig,
}

impl AppConfig {
    pub fn new(
        layout: LayoutConfig,
        street: StreetConfig,
        style: StyleConfig,
        label: LabelConfig,
    ) -> Self {
        Self {
            layout,
            street,
            style,
            label,
        }
    }

    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn street(&self) -> &StreetConfig {
        &self.street
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn label(&self) -> &LabelConfig {
        &self.label
    }

    /// Overrides the layout mode (builder style).
    pub fn with_layout_mode(mut self, mode: LayoutMode) -> Self {
        self.layout.mode = mode;
        self
    }

    /// Enables or disables container labels (builder style).
    pub fn with_labels(mut self, enabled: bool) -> Self {
        self.label.enabled = enabled;
        self
    }

    /// Checks numeric settings that would make a layout meaningless.
    ///
    /// # Errors
    ///
    /// Returns a message naming the first offending setting.
    pub fn validate(&self) -> Result<(), String> {
        let layout = &self.layout;
        if !layout.canvas_size.is_finite() || layout.canvas_size <= 0.0 {
            return Err(format!(
                "layout.canvas_size must be positive, got {}",
                layout.canvas_size
            ));
        }
        for (name, value) in [
            ("layout.outer_padding", layout.outer_padding),
            ("layout.inner_padding", layout.inner_padding),
            ("street.road_width", self.street.road_width),
            ("street.road_height", self.street.road_height),
            ("label.vertical_offset", self.label.vertical_offset),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        for (name, value) in [
            ("street.footprint_scale", self.street.footprint_scale),
            ("label.char_width", self.label.char_width),
            ("label.font_size", self.label.font_size),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be positive, got {value}"));
            }
        }
        Ok(())
    }
}

/// Which layout engine turns the element tree into primitives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Nested rectangles on a square canvas, stacked vertically.
    #[default]
    Treemap,
    /// Buildings lined up along both sides of recursive streets.
    Street,
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Treemap => write!(f, "treemap"),
            Self::Street => write!(f, "street"),
        }
    }
}

/// Layout mode and treemap geometry.
#[derive(Debug, Clone, Deserialize)]
pub struct LayoutConfig {
    #[serde(default)]
    mode: LayoutMode,

    /// Side length of the square canvas.
    #[serde(default = "default_canvas_size")]
    canvas_size: f32,

    /// Padding between a container's edge and its children.
    #[serde(default = "default_outer_padding")]
    outer_padding: f32,

    /// Padding between sibling rectangles.
    #[serde(default = "default_inner_padding")]
    inner_padding: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::default(),
            canvas_size: default_canvas_size(),
            outer_padding: default_outer_padding(),
            inner_padding: default_inner_padding(),
        }
    }
}

impl LayoutConfig {
    pub fn new(mode: LayoutMode, canvas_size: f32, outer_padding: f32, inner_padding: f32) -> Self {
        Self {
            mode,
            canvas_size,
            outer_padding,
            inner_padding,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn canvas_size(&self) -> f32 {
        self.canvas_size
    }

    pub fn outer_padding(&self) -> f32 {
        self.outer_padding
    }

    pub fn inner_padding(&self) -> f32 {
        self.inner_padding
    }
}

fn default_canvas_size() -> f32 {
    1500.0
}

fn default_outer_padding() -> f32 {
    30.0
}

fn default_inner_padding() -> f32 {
    20.0
}

/// Street layout settings.
#[derive(Debug, Clone, Deserialize)]
pub struct StreetConfig {
    /// Width of the road between the two sides of a street.
    #[serde(default = "default_road_width")]
    road_width: f32,

    /// Thickness of the road slab.
    #[serde(default = "default_road_height")]
    road_height: f32,

    /// Multiplier from element weight to building side length.
    #[serde(default = "default_footprint_scale")]
    footprint_scale: f32,
}

impl Default for StreetConfig {
    fn default() -> Self {
        Self {
            road_width: default_road_width(),
            road_height: default_road_height(),
            footprint_scale: default_footprint_scale(),
        }
    }
}

impl StreetConfig {
    pub fn new(road_width: f32, road_height: f32, footprint_scale: f32) -> Self {
        Self {
            road_width,
            road_height,
            footprint_scale,
        }
    }

    pub fn road_width(&self) -> f32 {
        self.road_width
    }

    pub fn road_height(&self) -> f32 {
        self.road_height
    }

    pub fn footprint_scale(&self) -> f32 {
        self.footprint_scale
    }
}

fn default_road_width() -> f32 {
    20.0
}

fn default_road_height() -> f32 {
    1.0
}

fn default_footprint_scale() -> f32 {
    1.0
}

/// Color settings.
///
/// Colors are kept as strings and parsed on access so a bad value is
/// reported with the setting it came from.
#[derive(Debug, Clone, Deserialize)]
pub struct StyleConfig {
    /// Color of elements that are new in the selected version.
    #[serde(default = "default_young_color")]
    young_color: String,

    /// Color approached by the oldest elements.
    #[serde(default = "default_old_color")]
    old_color: String,

    #[serde(default = "default_label_color")]
    label_color: String,

    /// Background of exported plans; transparent when unset.
    #[serde(default)]
    background_color: Option<String>,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            young_color: default_young_color(),
            old_color: default_old_color(),
            label_color: default_label_color(),
            background_color: None,
        }
    }
}

impl StyleConfig {
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn young_color(&self) -> Result<Color, String> {
        parse_color("young_color", &self.young_color)
    }

    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn old_color(&self) -> Result<Color, String> {
        parse_color("old_color", &self.old_color)
    }

    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn label_color(&self) -> Result<Color, String> {
        parse_color("label_color", &self.label_color)
    }

    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed.
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_deref()
            .map(|color| parse_color("background_color", color))
            .transpose()
    }
}

fn parse_color(setting: &str, value: &str) -> Result<Color, String> {
    Color::new(value).map_err(|err| format!("Invalid {setting} in config: {err}"))
}

fn default_young_color() -> String {
    "yellow".to_string()
}

fn default_old_color() -> String {
    "blue".to_string()
}

fn default_label_color() -> String {
    "white".to_string()
}

/// Container label settings.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelConfig {
    #[serde(default = "default_true")]
    enabled: bool,

    /// Estimated width of one character; a container gets a label only when
    /// its rectangle is at least this wide per character of its name.
    #[serde(default = "default_char_width")]
    char_width: f32,

    #[serde(default = "default_font_family")]
    font_family: String,

    #[serde(default = "default_font_size")]
    font_size: f32,

    /// Extrusion depth of the label text.
    #[serde(default = "default_label_depth")]
    depth: f32,

    /// Gap between the container's top and the label.
    #[serde(default = "default_vertical_offset")]
    vertical_offset: f32,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            char_width: default_char_width(),
            font_family: default_font_family(),
            font_size: default_font_size(),
            depth: default_label_depth(),
            vertical_offset: default_vertical_offset(),
        }
    }
}

impl LabelConfig {
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn char_width(&self) -> f32 {
        self.char_width
    }

    pub fn font_family(&self) -> &str {
        &self.font_family
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn depth(&self) -> f32 {
        self.depth
    }

    pub fn vertical_offset(&self) -> f32 {
        self.vertical_offset
    }

    /// Returns the font labels are built with, or
    /// [`LabelFont::Unavailable`] when no font family is configured.
    pub fn font(&self) -> LabelFont {
        if self.font_family.trim().is_empty() {
            return LabelFont::Unavailable;
        }
        LabelFont::Loaded(FontFace::new(
            self.font_family.clone(),
            self.font_size,
            self.depth,
        ))
    }
}

fn default_true() -> bool {
    true
}

fn default_char_width() -> f32 {
    5.0
}

fn default_font_family() -> String {
    "sans-serif".to_string()
}

fn default_font_size() -> f32 {
    5.0
}

fn default_label_depth() -> f32 {
    0.01
}

fn default_vertical_offset() -> f32 {
    0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.layout().outer_padding(), 30.0);
        assert_eq!(config.layout().inner_padding(), 20.0);
        assert_eq!(config.street().road_width(), 20.0);
        assert_eq!(config.label().char_width(), 5.0);
        assert!(config.label().enabled());
        assert_eq!(config.style().background_color(), Ok(None));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_color_names_setting() {
        let style = StyleConfig {
            old_color: "not-a-color".to_string(),
            ..StyleConfig::default()
        };
        let err = style.old_color().unwrap_err();
        assert!(err.contains("old_color"), "{err}");
    }

    #[test]
    fn test_validate_rejects_non_positive_canvas() {
        let config = AppConfig::new(
            LayoutConfig::new(LayoutMode::Treemap, 0.0, 30.0, 20.0),
            StreetConfig::default(),
            StyleConfig::default(),
            LabelConfig::default(),
        );
        let err = config.validate().unwrap_err();
        assert!(err.contains("canvas_size"), "{err}");
    }

    #[test]
    fn test_validate_rejects_negative_padding() {
        let config = AppConfig::new(
            LayoutConfig::new(LayoutMode::Treemap, 100.0, -1.0, 20.0),
            StreetConfig::default(),
            StyleConfig::default(),
            LabelConfig::default(),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_layout_mode(LayoutMode::Street)
            .with_labels(false);
        assert_eq!(config.layout().mode(), LayoutMode::Street);
        assert!(!config.label().enabled());
    }

    #[test]
    fn test_blank_font_family_is_unavailable() {
        let config: AppConfig = serde_json::from_str(r#"{"label": {"font_family": " "}}"#).unwrap();
        assert!(config.label().enabled());
        assert!(!config.label().font().is_available());
    }

    #[test]
    fn test_label_font_when_enabled() {
        let font = LabelConfig::default().font();
        let face = font.face().unwrap();
        assert_eq!(face.family(), "sans-serif");
        assert_eq!(face.size(), 5.0);
    }
}
