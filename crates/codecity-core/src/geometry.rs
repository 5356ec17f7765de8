//! Geometric primitives for city layout and positioning.
//!
//! This module provides the geometric types used throughout CodeCity for
//! partitioning the ground plane, stacking height bands and composing 3D
//! transforms.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate on the ground plane
//! - [`Rect`] - A ground-plane footprint defined by `x0..x1` and `y0..y1`
//! - [`Band`] - A vertical extent `z0..z1` assigned to a node
//! - [`Vec3`] - A 3D coordinate or offset in world space
//! - [`Size3`] - Width, height and depth of a volume
//! - [`Transform`] - A rotation around the vertical axis followed by a translation
//!
//! # Coordinate System
//!
//! Layout happens on a 2D canvas and is then lifted into a Y-up world:
//!
//! ```text
//!        +Y (up)
//!         │
//!         │
//!         └──────► +X      canvas x ──► world x
//!        ╱                 canvas y ──► world z
//!      +Z                  height band ──► world y
//! ```
//!
//! Rotations are expressed in radians around the world Y axis and follow the
//! right-hand rule: a positive angle turns `+X` towards `-Z`.

use serde::Serialize;

/// A 2D point on the ground plane.
///
/// # Examples
///
/// ```
/// # use codecity_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// A rectangular footprint on the ground plane.
///
/// Rectangles are stored as the treemap stores them: `x0 <= x1` and
/// `y0 <= y1`. A rectangle whose extent collapsed to zero on either axis is
/// [degenerate](Rect::is_degenerate) and has zero area.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    x0: f32,
    y0: f32,
    x1: f32,
    y1: f32,
}

impl Rect {
    /// Creates a rectangle from its corner coordinates.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Creates a square rectangle `[0, side] x [0, side]`.
    pub fn square(side: f32) -> Self {
        Self::new(0.0, 0.0, side, side)
    }

    pub fn x0(self) -> f32 {
        self.x0
    }

    pub fn y0(self) -> f32 {
        self.y0
    }

    pub fn x1(self) -> f32 {
        self.x1
    }

    pub fn y1(self) -> f32 {
        self.y1
    }

    /// Returns the extent along the canvas x axis
    pub fn width(self) -> f32 {
        self.x1 - self.x0
    }

    /// Returns the extent along the canvas y axis (world depth)
    pub fn depth(self) -> f32 {
        self.y1 - self.y0
    }

    pub fn area(self) -> f32 {
        self.width() * self.depth()
    }

    /// Returns the center point of the rectangle
    pub fn center(self) -> Point {
        Point::new((self.x0 + self.x1) / 2.0, (self.y0 + self.y1) / 2.0)
    }

    /// Returns true if either extent is zero (or negative).
    pub fn is_degenerate(self) -> bool {
        self.width() <= 0.0 || self.depth() <= 0.0
    }

    /// Shrinks the rectangle by `padding` on every side.
    ///
    /// When the padding exceeds half of an extent, that extent collapses to
    /// its midpoint instead of turning negative.
    ///
    /// # Examples
    ///
    /// ```
    /// # use codecity_core::geometry::Rect;
    /// let rect = Rect::new(0.0, 0.0, 100.0, 10.0);
    ///
    /// let inner = rect.inset(2.0);
    /// assert_eq!(inner.width(), 96.0);
    /// assert_eq!(inner.depth(), 6.0);
    ///
    /// let collapsed = rect.inset(8.0);
    /// assert_eq!(collapsed.depth(), 0.0);
    /// assert_eq!(collapsed.y0(), 5.0);
    /// ```
    pub fn inset(self, padding: f32) -> Self {
        let (mut x0, mut y0) = (self.x0 + padding, self.y0 + padding);
        let (mut x1, mut y1) = (self.x1 - padding, self.y1 - padding);
        if x1 < x0 {
            x0 = (x0 + x1) / 2.0;
            x1 = x0;
        }
        if y1 < y0 {
            y0 = (y0 + y1) / 2.0;
            y1 = y0;
        }
        Self { x0, y0, x1, y1 }
    }

    /// Returns true if the interiors of the two rectangles intersect.
    ///
    /// Rectangles that only share an edge do not overlap.
    pub fn overlaps(self, other: Rect) -> bool {
        self.x0 < other.x1 && other.x0 < self.x1 && self.y0 < other.y1 && other.y0 < self.y1
    }

    /// Returns true if `other` lies within this rectangle, allowing `tolerance`
    /// of floating-point slack on every edge.
    pub fn contains(self, other: Rect, tolerance: f32) -> bool {
        other.x0 >= self.x0 - tolerance
            && other.y0 >= self.y0 - tolerance
            && other.x1 <= self.x1 + tolerance
            && other.y1 <= self.y1 + tolerance
    }
}

/// A vertical extent `[z0, z1)` stacked above a parent's band.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Band {
    z0: f32,
    z1: f32,
}

impl Band {
    pub fn new(z0: f32, z1: f32) -> Self {
        Self { z0, z1 }
    }

    /// Creates a band starting at `base` with the given thickness.
    pub fn stacked_on(base: f32, thickness: f32) -> Self {
        Self::new(base, base + thickness)
    }

    pub fn z0(self) -> f32 {
        self.z0
    }

    pub fn z1(self) -> f32 {
        self.z1
    }

    pub fn thickness(self) -> f32 {
        self.z1 - self.z0
    }

    /// Returns the vertical midpoint of the band
    pub fn mid(self) -> f32 {
        (self.z0 + self.z1) / 2.0
    }
}

/// A 3D vector in world space (Y up).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Vec3 {
    x: f32,
    y: f32,
    z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    pub fn z(self) -> f32 {
        self.z
    }

    pub fn add(self, other: Vec3) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    pub fn sub(self, other: Vec3) -> Self {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Rotates the vector around the world Y axis by `angle` radians.
    ///
    /// # Examples
    ///
    /// ```
    /// # use codecity_core::geometry::Vec3;
    /// # use float_cmp::assert_approx_eq;
    /// let v = Vec3::new(1.0, 2.0, 0.0);
    /// let rotated = v.rotate_y(std::f32::consts::FRAC_PI_2);
    ///
    /// assert_approx_eq!(f32, rotated.x(), 0.0, epsilon = 1e-6);
    /// assert_approx_eq!(f32, rotated.y(), 2.0);
    /// assert_approx_eq!(f32, rotated.z(), -1.0, epsilon = 1e-6);
    /// ```
    pub fn rotate_y(self, angle: f32) -> Self {
        if angle == 0.0 {
            return self;
        }
        let (sin, cos) = angle.sin_cos();
        Self::new(
            self.x * cos + self.z * sin,
            self.y,
            -self.x * sin + self.z * cos,
        )
    }
}

/// Represents the extents of a volume: width (x), height (y) and depth (z).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size3 {
    width: f32,
    height: f32,
    depth: f32,
}

impl Size3 {
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Returns the extent along the world x axis
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the extent along the world y axis
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns the extent along the world z axis
    pub fn depth(self) -> f32 {
        self.depth
    }

    /// Returns the size seen after a quarter turn around the vertical axis:
    /// width and depth swap, height is unchanged.
    pub fn quarter_turned(self) -> Self {
        Self::new(self.depth, self.height, self.width)
    }

    /// Returns a new size with the maximum of each extent
    pub fn max(self, other: Size3) -> Self {
        Self::new(
            self.width.max(other.width),
            self.height.max(other.height),
            self.depth.max(other.depth),
        )
    }

    /// Returns true if any extent is zero or negative
    pub fn is_empty(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0 || self.depth <= 0.0
    }
}

/// A rigid transform: rotate around the world Y axis, then translate.
///
/// Transforms compose with [`Transform::then`], which is how locally built
/// geometry is carried into a parent's coordinate frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Transform {
    rotation: f32,
    translation: Vec3,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        rotation: 0.0,
        translation: Vec3::ZERO,
    };

    pub fn new(rotation: f32, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// A pure translation.
    pub fn translation_only(translation: Vec3) -> Self {
        Self::new(0.0, translation)
    }

    /// Rotation around the Y axis in radians
    pub fn rotation(self) -> f32 {
        self.rotation
    }

    pub fn translation(self) -> Vec3 {
        self.translation
    }

    /// Maps a point through this transform.
    pub fn apply(self, point: Vec3) -> Vec3 {
        point.rotate_y(self.rotation).add(self.translation)
    }

    /// Returns the transform equivalent to applying `self` first and then
    /// `outer`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use codecity_core::geometry::{Transform, Vec3};
    /// # use float_cmp::assert_approx_eq;
    /// let local = Transform::translation_only(Vec3::new(1.0, 0.0, 0.0));
    /// let parent = Transform::new(std::f32::consts::PI, Vec3::new(10.0, 0.0, 0.0));
    ///
    /// let world = local.then(parent);
    /// let origin = world.apply(Vec3::ZERO);
    /// assert_approx_eq!(f32, origin.x(), 9.0, epsilon = 1e-5);
    /// ```
    pub fn then(self, outer: Transform) -> Self {
        Self {
            rotation: self.rotation + outer.rotation,
            translation: self
                .translation
                .rotate_y(outer.rotation)
                .add(outer.translation),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_2, PI};

    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_rect_dimensions() {
        let rect = Rect::new(10.0, 20.0, 40.0, 30.0);
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.depth(), 10.0);
        assert_eq!(rect.area(), 300.0);
        assert_eq!(rect.center(), Point::new(25.0, 25.0));
    }

    #[test]
    fn test_rect_inset_collapses_to_midpoint() {
        let rect = Rect::new(0.0, 0.0, 10.0, 100.0);
        let inner = rect.inset(6.0);

        assert_eq!(inner.x0(), 5.0);
        assert_eq!(inner.x1(), 5.0);
        assert_eq!(inner.y0(), 6.0);
        assert_eq!(inner.y1(), 94.0);
        assert!(inner.is_degenerate());
        assert_eq!(inner.area(), 0.0);
    }

    #[test]
    fn test_rect_negative_inset_grows() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        let outer = rect.inset(-5.0);
        assert_eq!(outer, Rect::new(5.0, 5.0, 25.0, 25.0));
    }

    #[test]
    fn test_rect_overlaps() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 20.0, 10.0);
        let crossing = Rect::new(5.0, 5.0, 15.0, 15.0);

        assert!(!a.overlaps(touching));
        assert!(a.overlaps(crossing));
        assert!(crossing.overlaps(a));
    }

    #[test]
    fn test_rect_contains_with_tolerance() {
        let outer = Rect::square(100.0);
        let inner = Rect::new(0.0, 0.0, 100.0001, 50.0);
        assert!(!outer.contains(inner, 0.0));
        assert!(outer.contains(inner, 0.001));
    }

    #[test]
    fn test_band_stacking() {
        let parent = Band::stacked_on(0.0, 15.0);
        let child = Band::stacked_on(parent.z1(), 20.0);

        assert_eq!(child.z0(), 15.0);
        assert_eq!(child.z1(), 35.0);
        assert_eq!(child.thickness(), 20.0);
        assert_eq!(child.mid(), 25.0);
    }

    #[test]
    fn test_vec3_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        assert_eq!(a.add(b), Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(b.sub(a), Vec3::new(3.0, 3.0, 3.0));
        assert_eq!(a.scale(2.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(b), 32.0);
        assert_approx_eq!(f32, Vec3::new(3.0, 0.0, 4.0).length(), 5.0);
    }

    #[test]
    fn test_vec3_rotate_y_quarter_turns() {
        let v = Vec3::new(1.0, 0.0, 0.0);

        let left = v.rotate_y(FRAC_PI_2);
        assert_approx_eq!(f32, left.x(), 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, left.z(), -1.0, epsilon = 1e-6);

        let right = v.rotate_y(-FRAC_PI_2);
        assert_approx_eq!(f32, right.x(), 0.0, epsilon = 1e-6);
        assert_approx_eq!(f32, right.z(), 1.0, epsilon = 1e-6);

        let back = v.rotate_y(PI);
        assert_approx_eq!(f32, back.x(), -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_size3_quarter_turned() {
        let size = Size3::new(10.0, 5.0, 30.0);
        let turned = size.quarter_turned();
        assert_eq!(turned, Size3::new(30.0, 5.0, 10.0));
        assert_eq!(turned.quarter_turned(), size);
    }

    #[test]
    fn test_size3_max_and_empty() {
        let a = Size3::new(1.0, 8.0, 3.0);
        let b = Size3::new(4.0, 2.0, 6.0);
        assert_eq!(a.max(b), Size3::new(4.0, 8.0, 6.0));
        assert!(!a.is_empty());
        assert!(Size3::new(1.0, 0.0, 1.0).is_empty());
        assert!(Size3::default().is_empty());
    }

    #[test]
    fn test_transform_identity() {
        let p = Vec3::new(3.0, 4.0, 5.0);
        assert_eq!(Transform::IDENTITY.apply(p), p);
        assert_eq!(
            Transform::IDENTITY.then(Transform::IDENTITY),
            Transform::IDENTITY
        );
    }

    #[test]
    fn test_transform_then_matches_sequential_apply() {
        let inner = Transform::new(FRAC_PI_2, Vec3::new(2.0, 1.0, 0.0));
        let outer = Transform::new(-FRAC_PI_2, Vec3::new(10.0, 0.0, 5.0));
        let p = Vec3::new(1.0, 0.0, 3.0);

        let sequential = outer.apply(inner.apply(p));
        let composed = inner.then(outer).apply(p);

        assert_approx_eq!(f32, sequential.x(), composed.x(), epsilon = 1e-5);
        assert_approx_eq!(f32, sequential.y(), composed.y(), epsilon = 1e-5);
        assert_approx_eq!(f32, sequential.z(), composed.z(), epsilon = 1e-5);
    }
}
