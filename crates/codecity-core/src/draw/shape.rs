//! Composable shapes for street layouts.

use crate::geometry::{Size3, Transform, Vec3};

/// A volume with its own extents plus a rotation and position in its parent's
/// frame.
///
/// Shapes are values: [`Shape::transformed`] returns a new shape and never
/// touches the original, so composing the same children twice yields the
/// same result.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Shape {
    size: Size3,
    rotation: f32,
    position: Vec3,
}

impl Shape {
    /// Creates an unrotated shape centered at the origin.
    pub fn new(size: Size3) -> Self {
        Self {
            size,
            rotation: 0.0,
            position: Vec3::ZERO,
        }
    }

    /// Returns the extents of the shape in its own (unrotated) frame.
    pub fn size(&self) -> Size3 {
        self.size
    }

    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Returns the shape's current placement as a transform.
    pub fn transform(&self) -> Transform {
        Transform::new(self.rotation, self.position)
    }

    /// Returns a copy of this shape moved by `transform`, applied after the
    /// shape's current placement: the shape is rotated around the parent
    /// origin, then translated.
    pub fn transformed(&self, transform: Transform) -> Self {
        let placed = self.transform().then(transform);
        Self {
            size: self.size,
            rotation: placed.rotation(),
            position: placed.translation(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_shape_new_is_at_origin() {
        let shape = Shape::new(Size3::new(1.0, 2.0, 3.0));
        assert_eq!(shape.position(), Vec3::ZERO);
        assert_eq!(shape.rotation(), 0.0);
        assert_eq!(shape.transform(), Transform::IDENTITY);
    }

    #[test]
    fn test_shape_transformed_leaves_original() {
        let shape = Shape::new(Size3::new(10.0, 5.0, 20.0));
        let moved = shape.transformed(Transform::new(FRAC_PI_2, Vec3::new(3.0, 0.0, 0.0)));

        assert_eq!(shape.position(), Vec3::ZERO);
        assert_eq!(moved.size(), shape.size());
        assert_approx_eq!(f32, moved.rotation(), FRAC_PI_2);
        assert_approx_eq!(f32, moved.position().x(), 3.0);
    }

    #[test]
    fn test_shape_transformed_rotates_offset_position() {
        let shape = Shape::new(Size3::new(1.0, 1.0, 1.0))
            .transformed(Transform::translation_only(Vec3::new(2.0, 0.0, 0.0)));
        let rotated = shape.transformed(Transform::new(-FRAC_PI_2, Vec3::ZERO));

        assert_approx_eq!(f32, rotated.position().x(), 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, rotated.position().z(), 2.0, epsilon = 1e-6);
    }
}
