//! Street layout: lining buildings up along one side of a road.
//!
//! An [`AxisComposer`] places pre-built child shapes one after another along
//! the container's X axis, each turned a quarter so its depth runs along the
//! street. The non-mirrored side turns children by `-π/2` and pushes them to
//! the container's `+z` edge; the mirrored side turns by `+π/2` and pushes
//! them to `-z`. Both sides bottom-align children.
//!
//! A [`Street`] puts a non-mirrored and a mirrored side on either side of a
//! road.

use std::f32::consts::FRAC_PI_2;

use codecity_core::{
    draw::Shape,
    geometry::{Size3, Transform, Vec3},
};

/// Where one child ended up inside its side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    offset: f32,
    transform: Transform,
    shape: Shape,
}

impl Placement {
    /// Returns the distance along the street at which the child starts.
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Returns the transform that was applied to the child.
    pub fn transform(&self) -> Transform {
        self.transform
    }

    /// Returns the child after placement.
    pub fn shape(&self) -> Shape {
        self.shape
    }
}

/// A composed side: its bounding shape plus the placed children.
#[derive(Debug, Clone, PartialEq)]
pub struct SideLayout {
    container: Shape,
    placements: Vec<Placement>,
}

impl SideLayout {
    pub fn container(&self) -> Shape {
        self.container
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }
}

/// Lines children up along one side of a street.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AxisComposer {
    mirrored: bool,
}

impl AxisComposer {
    pub fn new(mirrored: bool) -> Self {
        Self { mirrored }
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    /// Returns the extents of a side holding `children`: their depths summed
    /// along X, the tallest height and the widest width across.
    pub fn extent(&self, children: &[Shape]) -> Size3 {
        children.iter().fold(Size3::default(), |acc, child| {
            let size = child.size();
            Size3::new(
                acc.width() + size.depth(),
                acc.height().max(size.height()),
                acc.depth().max(size.width()),
            )
        })
    }

    /// Places `children` in order. The inputs are left untouched, so
    /// composing the same children twice gives the same result.
    pub fn compose(&self, children: &[Shape]) -> SideLayout {
        let extent = self.extent(children);
        let (x_len, y_len, z_len) = (extent.width(), extent.height(), extent.depth());
        let rotation = if self.mirrored { FRAC_PI_2 } else { -FRAC_PI_2 };

        let mut offset = 0.0;
        let mut placements = Vec::with_capacity(children.len());
        for child in children {
            let size = child.size();
            let (x, y, z) = (size.width(), size.height(), size.depth());
            let across = if self.mirrored {
                -(z_len - x) / 2.0
            } else {
                -(x - z_len) / 2.0
            };
            let transform = Transform::new(
                rotation,
                Vec3::new(-(x_len - z) / 2.0 + offset, (y - y_len) / 2.0, across),
            );
            placements.push(Placement {
                offset,
                transform,
                shape: child.transformed(transform),
            });
            offset += z;
        }

        SideLayout {
            container: Shape::new(extent),
            placements,
        }
    }
}

/// A road with a non-mirrored side on its `-z` bank and a mirrored side on
/// its `+z` bank, so both rows of buildings line the road.
#[derive(Debug, Clone, PartialEq)]
pub struct StreetLayout {
    container: Shape,
    left: SideLayout,
    right: SideLayout,
    left_transform: Transform,
    right_transform: Transform,
    road: Shape,
}

impl StreetLayout {
    pub fn container(&self) -> Shape {
        self.container
    }

    /// The non-mirrored side.
    pub fn left(&self) -> &SideLayout {
        &self.left
    }

    /// The mirrored side.
    pub fn right(&self) -> &SideLayout {
        &self.right
    }

    /// Places the left side's frame inside the street.
    pub fn left_transform(&self) -> Transform {
        self.left_transform
    }

    /// Places the right side's frame inside the street.
    pub fn right_transform(&self) -> Transform {
        self.right_transform
    }

    /// The road slab, positioned in the street's frame.
    pub fn road(&self) -> Shape {
        self.road
    }
}

/// Builds two-sided streets.
#[derive(Debug, Clone, Copy)]
pub struct Street {
    road_width: f32,
    road_height: f32,
}

impl Street {
    pub fn new(road_width: f32, road_height: f32) -> Self {
        Self {
            road_width,
            road_height,
        }
    }

    /// Composes both sides and centers the whole street on the origin.
    ///
    /// Sides start at the same end of the street; the road runs along X
    /// between them, at ground level.
    pub fn compose(&self, left: &[Shape], right: &[Shape]) -> StreetLayout {
        let left = AxisComposer::new(false).compose(left);
        let right = AxisComposer::new(true).compose(right);
        let (left_size, right_size) = (left.container.size(), right.container.size());

        let width = left_size.width().max(right_size.width()).max(self.road_width);
        let height = left_size
            .height()
            .max(right_size.height())
            .max(self.road_height);
        let depth = left_size.depth() + self.road_width + right_size.depth();

        let left_transform = Transform::translation_only(Vec3::new(
            (left_size.width() - width) / 2.0,
            (left_size.height() - height) / 2.0,
            (left_size.depth() - depth) / 2.0,
        ));
        let right_transform = Transform::translation_only(Vec3::new(
            (right_size.width() - width) / 2.0,
            (right_size.height() - height) / 2.0,
            (depth - right_size.depth()) / 2.0,
        ));
        let road = Shape::new(Size3::new(width, self.road_height, self.road_width)).transformed(
            Transform::translation_only(Vec3::new(
                0.0,
                (self.road_height - height) / 2.0,
                (left_size.depth() - right_size.depth()) / 2.0,
            )),
        );

        StreetLayout {
            container: Shape::new(Size3::new(width, height, depth)),
            left,
            right,
            left_transform,
            right_transform,
            road,
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn buildings(sizes: &[(f32, f32, f32)]) -> Vec<Shape> {
        sizes
            .iter()
            .map(|(w, h, d)| Shape::new(Size3::new(*w, *h, *d)))
            .collect()
    }

    #[test]
    fn test_side_extent_and_offsets() {
        let children = buildings(&[(10.0, 5.0, 10.0), (20.0, 8.0, 20.0), (30.0, 3.0, 30.0)]);
        let side = AxisComposer::new(false).compose(&children);

        let size = side.container().size();
        assert_approx_eq!(f32, size.width(), 60.0);
        assert_approx_eq!(f32, size.height(), 8.0);
        assert_approx_eq!(f32, size.depth(), 30.0);

        let offsets: Vec<f32> = side.placements().iter().map(Placement::offset).collect();
        assert_eq!(offsets, vec![0.0, 10.0, 30.0]);
    }

    #[test]
    fn test_children_are_bottom_aligned() {
        let children = buildings(&[(10.0, 5.0, 10.0), (20.0, 8.0, 20.0)]);
        let side = AxisComposer::new(false).compose(&children);

        for placement in side.placements() {
            let shape = placement.shape();
            let bottom = shape.position().y() - shape.size().height() / 2.0;
            assert_approx_eq!(f32, bottom, -4.0);
        }
    }

    #[test]
    fn test_non_mirrored_side_turns_and_hugs_positive_z() {
        // A 4 x 1 x 2 building in a side that is 8 deep.
        let children = buildings(&[(4.0, 1.0, 2.0), (8.0, 1.0, 6.0)]);
        let side = AxisComposer::new(false).compose(&children);

        let first = side.placements()[0];
        assert_approx_eq!(f32, first.transform().rotation(), -FRAC_PI_2);
        let translation = first.transform().translation();
        assert_approx_eq!(f32, translation.x(), -(8.0 - 2.0) / 2.0);
        assert_approx_eq!(f32, translation.z(), -(4.0 - 8.0) / 2.0);
    }

    #[test]
    fn test_mirrored_side_turns_the_other_way() {
        let children = buildings(&[(4.0, 1.0, 2.0), (8.0, 1.0, 6.0)]);
        let side = AxisComposer::new(true).compose(&children);

        let first = side.placements()[0];
        assert_approx_eq!(f32, first.transform().rotation(), FRAC_PI_2);
        assert_approx_eq!(f32, first.transform().translation().z(), -(8.0 - 4.0) / 2.0);
    }

    #[test]
    fn test_empty_side() {
        let side = AxisComposer::new(false).compose(&[]);
        assert!(side.placements().is_empty());
        assert!(side.container().size().is_empty());
    }

    #[test]
    fn test_street_puts_road_between_sides() {
        let left = buildings(&[(10.0, 5.0, 10.0)]);
        let right = buildings(&[(6.0, 9.0, 6.0), (6.0, 2.0, 6.0)]);
        let street = Street::new(20.0, 1.0).compose(&left, &right);

        let size = street.container().size();
        assert_approx_eq!(f32, size.width(), 20.0);
        assert_approx_eq!(f32, size.height(), 9.0);
        assert_approx_eq!(f32, size.depth(), 10.0 + 20.0 + 6.0);

        let left_z = street.left_transform().translation().z();
        let right_z = street.right_transform().translation().z();
        let road_z = street.road().position().z();
        assert!(left_z < road_z && road_z < right_z);

        // Road sits on the ground.
        let road = street.road();
        assert_approx_eq!(
            f32,
            road.position().y() - road.size().height() / 2.0,
            -size.height() / 2.0
        );
    }

    mod proptest_tests {
        use super::*;

        fn shapes_strategy() -> impl Strategy<Value = Vec<Shape>> {
            prop::collection::vec((1.0f32..50.0, 0.0f32..80.0, 1.0f32..50.0), 0..8).prop_map(
                |sizes| {
                    sizes
                        .into_iter()
                        .map(|(w, h, d)| Shape::new(Size3::new(w, h, d)))
                        .collect()
                },
            )
        }

        fn check_compose_is_pure(children: &[Shape], mirrored: bool) -> Result<(), TestCaseError> {
            let composer = AxisComposer::new(mirrored);
            let before = children.to_vec();
            let first = composer.compose(children);
            let second = composer.compose(children);
            prop_assert_eq!(children, before.as_slice());
            prop_assert_eq!(first, second);
            Ok(())
        }

        fn check_offsets_increase(children: &[Shape], mirrored: bool) -> Result<(), TestCaseError> {
            let side = AxisComposer::new(mirrored).compose(children);
            let mut expected = 0.0;
            for (placement, child) in side.placements().iter().zip(children) {
                prop_assert!((placement.offset() - expected).abs() < 1e-3);
                expected += child.size().depth();
            }
            prop_assert!((side.container().size().width() - expected).abs() < 1e-3);
            Ok(())
        }

        fn check_children_within_side(
            children: &[Shape],
            mirrored: bool,
        ) -> Result<(), TestCaseError> {
            let side = AxisComposer::new(mirrored).compose(children);
            let extent = side.container().size();
            for placement in side.placements() {
                let shape = placement.shape();
                // A quarter turn swaps the footprint axes.
                let footprint = shape.size().quarter_turned();
                let center = shape.position();
                prop_assert!(center.x() - footprint.width() / 2.0 >= -extent.width() / 2.0 - 1e-2);
                prop_assert!(center.x() + footprint.width() / 2.0 <= extent.width() / 2.0 + 1e-2);
                prop_assert!(center.z() - footprint.depth() / 2.0 >= -extent.depth() / 2.0 - 1e-2);
                prop_assert!(center.z() + footprint.depth() / 2.0 <= extent.depth() / 2.0 + 1e-2);
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn compose_is_pure(children in shapes_strategy(), mirrored in any::<bool>()) {
                check_compose_is_pure(&children, mirrored)?;
            }

            #[test]
            fn offsets_increase(children in shapes_strategy(), mirrored in any::<bool>()) {
                check_offsets_increase(&children, mirrored)?;
            }

            #[test]
            fn children_within_side(children in shapes_strategy(), mirrored in any::<bool>()) {
                check_children_within_side(&children, mirrored)?;
            }
        }
    }
}
