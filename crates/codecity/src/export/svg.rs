//! Top-down plan of a city.
//!
//! The plan looks straight down the Y axis: world `x` runs right and world
//! `z` runs down the page. Volumes are painted from the lowest top face to
//! the highest so taller buildings cover what lies beneath them; labels
//! come last.

use log::{debug, info};
use svg::{
    Document,
    node::{Text as SvgText, element as svg_element},
};

use codecity_core::{
    color::Color,
    draw::{Primitive, PrimitiveKind},
};

use super::{Error, Exporter};
use crate::city::{CityLayout, VisibilityFilter};

const MARGIN: f32 = 20.0;

/// Renders a [`CityLayout`] as an SVG plan.
#[derive(Debug, Clone)]
pub struct SvgExporter {
    background: Option<Color>,
    label_color: Color,
    filter: VisibilityFilter,
}

impl SvgExporter {
    pub fn new(label_color: Color) -> Self {
        Self {
            background: None,
            label_color,
            filter: VisibilityFilter::all(),
        }
    }

    pub fn with_background(mut self, background: Option<Color>) -> Self {
        self.background = background;
        self
    }

    pub fn with_filter(mut self, filter: VisibilityFilter) -> Self {
        self.filter = filter;
        self
    }

    fn render_volume(&self, primitive: &Primitive) -> Option<Box<dyn svg::Node>> {
        let dimensions = primitive.dimensions();
        let position = primitive.position();
        let transform = format!(
            "translate({} {}) rotate({})",
            position.x(),
            position.z(),
            -primitive.rotation().to_degrees()
        );

        let node: Box<dyn svg::Node> = match primitive.kind() {
            PrimitiveKind::Box => Box::new(
                svg_element::Rectangle::new()
                    .set("x", -dimensions.width() / 2.0)
                    .set("y", -dimensions.depth() / 2.0)
                    .set("width", dimensions.width())
                    .set("height", dimensions.depth())
                    .set("fill", &primitive.color())
                    .set("stroke", "black")
                    .set("stroke-width", 0.5)
                    .set("transform", transform)
                    .set("data-element", primitive.owner().index().to_string())
                    .set("data-key", primitive.visibility_key()),
            ),
            PrimitiveKind::Cylinder { radius } => Box::new(
                svg_element::Circle::new()
                    .set("cx", 0.0)
                    .set("cy", 0.0)
                    .set("r", *radius)
                    .set("fill", &primitive.color())
                    .set("stroke", "black")
                    .set("stroke-width", 0.5)
                    .set("transform", transform)
                    .set("data-element", primitive.owner().index().to_string())
                    .set("data-key", primitive.visibility_key()),
            ),
            PrimitiveKind::Label { .. } => return None,
        };
        Some(node)
    }

    fn render_label(&self, primitive: &Primitive) -> Option<svg_element::Text> {
        let PrimitiveKind::Label { text } = primitive.kind() else {
            return None;
        };
        let position = primitive.position();
        let dimensions = primitive.dimensions();
        Some(
            svg_element::Text::new("")
                .set("x", position.x() - dimensions.width() / 2.0)
                .set("y", position.z())
                .set("dominant-baseline", "text-after-edge")
                .set("font-size", dimensions.height())
                .set("fill", &self.label_color)
                .add(SvgText::new(text.as_str())),
        )
    }
}

impl Exporter for SvgExporter {
    fn render(&self, layout: &CityLayout) -> Result<String, Error> {
        let visible: Vec<&Primitive> = layout.visible(&self.filter).collect();
        let half = layout.canvas_size() / 2.0;
        let (min_x, min_z, max_x, max_z) =
            plan_bounds(&visible).unwrap_or((-half, -half, half, half));
        let width = max_x - min_x + 2.0 * MARGIN;
        let height = max_z - min_z + 2.0 * MARGIN;
        if !width.is_finite() || !height.is_finite() {
            return Err(Error::Render(format!(
                "plan extent is not finite: {width} x {height}"
            )));
        }

        debug!(width, height, primitives = visible.len(); "Rendering SVG plan");

        let mut doc = Document::new()
            .set(
                "viewBox",
                format!("{} {} {} {}", min_x - MARGIN, min_z - MARGIN, width, height),
            )
            .set("width", width)
            .set("height", height);

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", min_x - MARGIN)
                    .set("y", min_z - MARGIN)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background),
            );
        }

        let mut volumes: Vec<&Primitive> = visible
            .iter()
            .copied()
            .filter(|primitive| !primitive.is_label())
            .collect();
        // Stable, so equal tops keep layout order.
        volumes.sort_by(|a, b| a.top().total_cmp(&b.top()));

        let mut group = svg_element::Group::new().set("data-layer", "volumes");
        for primitive in volumes {
            if let Some(node) = self.render_volume(primitive) {
                group = group.add(node);
            }
        }
        doc = doc.add(group);

        let mut labels = svg_element::Group::new().set("data-layer", "labels");
        for primitive in visible.iter().filter(|primitive| primitive.is_label()) {
            if let Some(text) = self.render_label(primitive) {
                labels = labels.add(text);
            }
        }
        doc = doc.add(labels);

        let rendered = doc.to_string();
        info!(bytes = rendered.len(); "SVG plan rendered");
        Ok(rendered)
    }
}

/// Returns `(min_x, min_z, max_x, max_z)` over the rotated footprints of
/// `primitives`, or `None` when there are none.
fn plan_bounds(primitives: &[&Primitive]) -> Option<(f32, f32, f32, f32)> {
    primitives
        .iter()
        .map(|primitive| {
            let dimensions = primitive.dimensions();
            let (sin, cos) = primitive.rotation().sin_cos();
            let (half_w, half_d) = (dimensions.width() / 2.0, dimensions.depth() / 2.0);
            let extent_x = cos.abs() * half_w + sin.abs() * half_d;
            let extent_z = sin.abs() * half_w + cos.abs() * half_d;
            let position = primitive.position();
            (
                position.x() - extent_x,
                position.z() - extent_z,
                position.x() + extent_x,
                position.z() + extent_z,
            )
        })
        .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
}
