//! Age coloring.

use codecity_core::{color::Color, element::Element};

/// Maps an element's life span onto a gradient from a "young" color to an
/// "old" one.
///
/// The ratio is `life_span / (reference + 1)`, where the reference is the
/// life span of the root of the tree being drawn, clamped to `[0, 1]`.
/// Elements as old as the root therefore approach, but never quite reach,
/// the old color.
#[derive(Debug, Clone, Copy)]
pub struct ColorEncoder {
    young: Color,
    old: Color,
    reference: u32,
}

impl ColorEncoder {
    pub fn new(young: Color, old: Color, reference: u32) -> Self {
        Self {
            young,
            old,
            reference,
        }
    }

    /// Uses `root`'s life span as the reference.
    pub fn for_root(young: Color, old: Color, root: &Element) -> Self {
        Self::new(young, old, root.life_span())
    }

    pub fn reference(&self) -> u32 {
        self.reference
    }

    /// Returns the interpolation ratio for `life_span`.
    pub fn ratio(&self, life_span: u32) -> f32 {
        (life_span as f32 / (self.reference as f32 + 1.0)).clamp(0.0, 1.0)
    }

    pub fn color(&self, life_span: u32) -> Color {
        self.young.lerp(self.old, self.ratio(life_span))
    }
}
