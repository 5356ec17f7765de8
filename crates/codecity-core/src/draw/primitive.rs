//! Renderable primitives emitted by the layout engines.

use serde::Serialize;

use crate::{
    color::Color,
    element::ElementId,
    geometry::{Size3, Vec3},
};

/// The geometry of a [`Primitive`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PrimitiveKind {
    /// An axis-aligned box (before rotation) spanning the primitive's dimensions.
    Box,
    /// An upright cylinder; its height is the primitive's `y` dimension.
    Cylinder { radius: f32 },
    /// Flat text lying on a container.
    Label { text: String },
}

/// One positioned, colored shape with a back-reference to its source element.
///
/// `position` is the world-space center of the volume. `rotation` is the
/// rotation around the world Y axis, in radians. Labels carry the index of
/// the primitive they belong to in `attached_to`, so a scene graph can nest
/// them under their container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Primitive {
    kind: PrimitiveKind,
    dimensions: Size3,
    position: Vec3,
    rotation: f32,
    color: Color,
    owner: ElementId,
    visibility_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    attached_to: Option<usize>,
}

impl Primitive {
    /// Creates an unrotated primitive.
    pub fn new(
        kind: PrimitiveKind,
        dimensions: Size3,
        position: Vec3,
        color: Color,
        owner: ElementId,
        visibility_key: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            dimensions,
            position,
            rotation: 0.0,
            color,
            owner,
            visibility_key: visibility_key.into(),
            attached_to: None,
        }
    }

    /// Sets the rotation around the vertical axis (builder style).
    pub fn with_rotation(mut self, rotation: f32) -> Self {
        self.rotation = rotation;
        self
    }

    /// Nests this primitive under the primitive at `parent` (builder style).
    pub fn attached_to(mut self, parent: usize) -> Self {
        self.attached_to = Some(parent);
        self
    }

    pub fn kind(&self) -> &PrimitiveKind {
        &self.kind
    }

    pub fn dimensions(&self) -> Size3 {
        self.dimensions
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the id of the element this primitive was built from.
    pub fn owner(&self) -> ElementId {
        self.owner
    }

    /// Returns the key an external visibility filter toggles this primitive by.
    pub fn visibility_key(&self) -> &str {
        &self.visibility_key
    }

    /// Returns the index of the primitive this one is nested under, if any.
    pub fn parent(&self) -> Option<usize> {
        self.attached_to
    }

    pub fn is_label(&self) -> bool {
        matches!(self.kind, PrimitiveKind::Label { .. })
    }

    /// Returns the world-space height of the primitive's top face.
    pub fn top(&self) -> f32 {
        self.position.y() + self.dimensions.height() / 2.0
    }
}
