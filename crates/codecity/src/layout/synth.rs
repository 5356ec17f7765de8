//! Turning annotated treemap nodes into renderable primitives.

use log::{debug, warn};

use codecity_core::{
    color::Color,
    draw::{LabelFont, Primitive, PrimitiveKind},
    geometry::{Size3, Vec3},
};

use super::{
    hierarchy::Hierarchy,
    palette::ColorEncoder,
    policy::{Geometry, policy},
};

/// Smallest extent a primitive is drawn with; zero-sized rectangles and flat
/// bands are widened to this.
pub const MIN_EXTENT: f32 = 0.01;

/// How container labels are built.
#[derive(Debug, Clone)]
pub struct LabelStyle {
    enabled: bool,
    font: LabelFont,
    char_width: f32,
    color: Color,
    vertical_offset: f32,
}

impl LabelStyle {
    pub fn new(font: LabelFont, char_width: f32, color: Color, vertical_offset: f32) -> Self {
        Self {
            enabled: true,
            font,
            char_width,
            color,
            vertical_offset,
        }
    }

    /// A style that never emits labels.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::new(LabelFont::Unavailable, 5.0, Color::default(), 0.0)
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn font(&self) -> &LabelFont {
        &self.font
    }

    /// Returns true if a container `width` wide has room for `name`.
    pub fn fits(&self, name: &str, width: f32) -> bool {
        !name.is_empty() && width >= self.char_width * name.chars().count() as f32
    }
}

/// Emits one volume per node, plus a label for containers wide enough to
/// carry their name.
///
/// Planar coordinates are shifted by half the canvas so the city is centered
/// on the origin; the treemap's `y` axis becomes world `z` and band heights
/// become world `y`.
#[derive(Debug, Clone)]
pub struct PrimitiveSynthesizer {
    canvas_size: f32,
    labels: LabelStyle,
}

impl PrimitiveSynthesizer {
    pub fn new(canvas_size: f32, labels: LabelStyle) -> Self {
        Self {
            canvas_size,
            labels,
        }
    }

    /// Builds primitives in pre-order. Labels directly follow their
    /// container and are attached to it.
    pub fn synthesize(&self, hierarchy: &Hierarchy<'_>, encoder: &ColorEncoder) -> Vec<Primitive> {
        let half = self.canvas_size / 2.0;
        let mut primitives = Vec::with_capacity(hierarchy.len());
        let mut skipped_labels = 0;

        for index in hierarchy.preorder() {
            let node = hierarchy.node(index);
            let element = node.element();
            let rect = node.rect();
            let band = node.band();

            let width = rect.width().max(MIN_EXTENT);
            let depth = rect.depth().max(MIN_EXTENT);
            let thickness = band.thickness().max(MIN_EXTENT);
            let center = rect.center();
            let position = Vec3::new(
                center.x() - half,
                band.z0() + thickness / 2.0,
                center.y() - half,
            );

            let (kind, dimensions) = match policy(element.kind()).geometry() {
                Geometry::Box => (PrimitiveKind::Box, Size3::new(width, thickness, depth)),
                Geometry::Cylinder => {
                    let radius = width.min(depth) / 2.0;
                    (
                        PrimitiveKind::Cylinder { radius },
                        Size3::new(radius * 2.0, thickness, radius * 2.0),
                    )
                }
            };

            let volume_index = primitives.len();
            primitives.push(Primitive::new(
                kind,
                dimensions,
                position,
                encoder.color(element.life_span()),
                hierarchy.id(index),
                element.name(),
            ));

            if !self.labels.enabled
                || !element.is_container()
                || !self.labels.fits(element.name(), rect.width()) {
                continue;
            }
            let Some(face) = self.labels.font.face() else {
                skipped_labels += 1;
                continue;
            };

            let text_size = face.measure(element.name());
            // Upright on the container's front edge, just above its top.
            let label_position = Vec3::new(
                rect.x0() - half + text_size.width() / 2.0,
                band.z1() + self.labels.vertical_offset + text_size.height() / 2.0,
                rect.y1() - half,
            );
            primitives.push(
                Primitive::new(
                    PrimitiveKind::Label {
                        text: element.name().to_string(),
                    },
                    text_size,
                    label_position,
                    self.labels.color,
                    hierarchy.id(index),
                    element.name(),
                )
                .attached_to(volume_index),
            );
        }

        if skipped_labels > 0 {
            warn!(skipped_labels; "No label font available, container labels omitted");
        }
        debug!(primitives = primitives.len(); "Primitives synthesized");
        primitives
    }
}
