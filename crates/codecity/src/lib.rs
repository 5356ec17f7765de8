//! CodeCity - lays out a codebase's structure as a 3D city.
//!
//! Each element of a structural tree (packages, classes, interfaces) becomes
//! a building: its footprint grows with its size, its height with its method
//! count and its color with its age across versions. Two layouts are
//! available: a nested treemap where children stand on top of their
//! container, and a street layout where children line both sides of their
//! container's road.
//!
//! The output is a flat list of [`Primitive`](codecity_core::draw::Primitive)s
//! that a renderer can draw directly, plus SVG and JSON exports.

pub mod city;
pub mod config;
pub mod export;
pub mod input;
pub mod layout;
pub mod pick;

mod error;

pub use codecity_core::{color, draw, element, geometry};

pub use error::CodeCityError;

use log::{debug, info, trace};

use codecity_core::element::Element;

use city::{CityLayout, VisibilityFilter};
use config::AppConfig;
use export::{Exporter, json::JsonExporter, svg::SvgExporter};
use input::{CityInput, Selection};
use layout::{EngineBuilder, hierarchy::Hierarchy, palette::ColorEncoder, synth::LabelStyle};

/// Builder for laying out and rendering code cities.
///
/// # Examples
///
/// ```rust
/// use codecity::{CityBuilder, config::AppConfig, input::Selection};
///
/// let source = r#"{"name": "Root", "type": "CONTAINER", "children": [
///     {"name": "A", "type": "CLASS", "methodsCount": 10},
///     {"name": "B", "type": "CLASS", "methodsCount": 0}
/// ]}"#;
///
/// let builder = CityBuilder::new(AppConfig::default().with_labels(false));
/// let root = builder.parse(source, &Selection::default()).unwrap();
/// let city = builder.layout(&root).unwrap();
/// assert_eq!(city.len(), 3);
///
/// let svg = builder.render_svg(&city).unwrap();
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct CityBuilder {
    config: AppConfig,
}

impl CityBuilder {
    /// Create a new city builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Parse JSON input and select the element tree to lay out.
    ///
    /// # Errors
    ///
    /// Returns [`CodeCityError::Parse`] for malformed input and
    /// [`CodeCityError::History`] when the selection does not exist.
    pub fn parse(&self, source: &str, selection: &Selection) -> Result<Element, CodeCityError> {
        info!("Parsing input");
        let input = CityInput::parse(source)?;
        let root = input.resolve(selection)?;
        debug!(root = root.name(), elements = root.count(); "Input parsed successfully");
        trace!(root:?; "Selected element tree");
        Ok(root)
    }

    /// Lay out `root` with the configured mode.
    ///
    /// # Errors
    ///
    /// Returns [`CodeCityError::Config`] for invalid settings and
    /// [`CodeCityError::Structure`] when a non-container element has
    /// children.
    pub fn layout(&self, root: &Element) -> Result<CityLayout, CodeCityError> {
        self.config.validate().map_err(CodeCityError::Config)?;
        let style = self.config.style();
        let encoder = ColorEncoder::for_root(
            style.young_color().map_err(CodeCityError::Config)?,
            style.old_color().map_err(CodeCityError::Config)?,
            root,
        );
        let label = self.config.label();
        let labels = if label.enabled() {
            LabelStyle::new(
                label.font(),
                label.char_width(),
                style.label_color().map_err(CodeCityError::Config)?,
                label.vertical_offset(),
            )
        } else {
            LabelStyle::disabled()
        };

        let mode = self.config.layout().mode();
        info!(mode:%, elements = root.count(); "Building city layout");
        let mut hierarchy = Hierarchy::build(root)?;
        let engine = EngineBuilder::from_config(&self.config)
            .with_labels(labels)
            .build(mode);
        let primitives = engine.calculate(&mut hierarchy, &encoder);
        info!(primitives = primitives.len(); "Layout calculated");

        Ok(CityLayout::new(
            mode,
            self.config.layout().canvas_size(),
            primitives,
        ))
    }

    /// Render a layout to an SVG plan, showing everything.
    ///
    /// # Errors
    ///
    /// Returns [`CodeCityError::Config`] for an invalid color setting and
    /// [`CodeCityError::Export`] if rendering fails.
    pub fn render_svg(&self, layout: &CityLayout) -> Result<String, CodeCityError> {
        self.render_svg_filtered(layout, VisibilityFilter::all())
    }

    /// Render a layout to an SVG plan, showing only what `filter` selects.
    ///
    /// # Errors
    ///
    /// Returns [`CodeCityError::Config`] for an invalid color setting and
    /// [`CodeCityError::Export`] if rendering fails.
    pub fn render_svg_filtered(
        &self,
        layout: &CityLayout,
        filter: VisibilityFilter,
    ) -> Result<String, CodeCityError> {
        let style = self.config.style();
        let exporter = SvgExporter::new(style.label_color().map_err(CodeCityError::Config)?)
            .with_background(style.background_color().map_err(CodeCityError::Config)?)
            .with_filter(filter);
        Ok(exporter.render(layout)?)
    }

    /// Render a layout to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`CodeCityError::Export`] if serialization fails.
    pub fn render_json(&self, layout: &CityLayout) -> Result<String, CodeCityError> {
        Ok(JsonExporter::new().with_pretty(true).render(layout)?)
    }
}
