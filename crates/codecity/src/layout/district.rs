//! Street-mode city: every container becomes a street lined with its
//! children.
//!
//! Blocks are built bottom-up, since a container's extent depends on its
//! children's. Leaves become square buildings whose side is their weight
//! times the footprint scale. A container's children alternate between the
//! two sides of its street, in name order. World transforms are then
//! composed top-down and flattened into primitives.

use log::debug;

use codecity_core::{
    draw::{Primitive, PrimitiveKind, Shape},
    geometry::{Size3, Transform, Vec3},
};

use super::{
    engines::CityEngine,
    extrude::element_height,
    hierarchy::Hierarchy,
    palette::ColorEncoder,
    policy::{Geometry, policy},
    street::Street,
    synth::MIN_EXTENT,
    weight::element_weight,
};

/// A laid-out subtree in its own frame, centered on the origin.
#[derive(Debug, Clone, Default)]
struct Block {
    size: Size3,
    content: Content,
}

#[derive(Debug, Clone, Default)]
enum Content {
    #[default]
    Building,
    Street {
        road: Shape,
        /// Child arena indices with their transform into this block's frame.
        children: Vec<(Transform, usize)>,
    },
}

/// Lays out a hierarchy as nested two-sided streets.
#[derive(Debug, Clone, Copy)]
pub struct StreetEngine {
    street: Street,
    footprint_scale: f32,
}

impl StreetEngine {
    pub fn new(road_width: f32, road_height: f32, footprint_scale: f32) -> Self {
        Self {
            street: Street::new(road_width, road_height),
            footprint_scale,
        }
    }

    /// Returns one block per arena index.
    fn blocks(&self, hierarchy: &Hierarchy<'_>) -> Vec<Block> {
        let mut blocks = vec![Block::default(); hierarchy.len()];
        // Children always follow their parent in the arena.
        for index in (0..hierarchy.len()).rev() {
            let block = self.block(hierarchy, index, &blocks);
            blocks[index] = block;
        }
        blocks
    }

    fn block(&self, hierarchy: &Hierarchy<'_>, index: usize, blocks: &[Block]) -> Block {
        let node = hierarchy.node(index);
        if node.children().is_empty() {
            let element = node.element();
            let side = (element_weight(element) * self.footprint_scale).max(MIN_EXTENT);
            let height = element_height(element).max(MIN_EXTENT);
            return Block {
                size: Size3::new(side, height, side),
                content: Content::Building,
            };
        }

        let mut left = Vec::new();
        let mut right = Vec::new();
        for (position, child) in node.children().iter().enumerate() {
            if position % 2 == 0 {
                left.push(*child);
            } else {
                right.push(*child);
            }
        }
        let shapes = |side: &[usize]| -> Vec<Shape> {
            side.iter()
                .map(|child| Shape::new(blocks[*child].size))
                .collect()
        };
        let layout = self.street.compose(&shapes(&left), &shapes(&right));

        let mut children = Vec::with_capacity(left.len() + right.len());
        for (child, placement) in left.into_iter().zip(layout.left().placements()) {
            children.push((placement.transform().then(layout.left_transform()), child));
        }
        for (child, placement) in right.into_iter().zip(layout.right().placements()) {
            children.push((placement.transform().then(layout.right_transform()), child));
        }

        Block {
            size: layout.container().size(),
            content: Content::Street {
                road: layout.road(),
                children,
            },
        }
    }

    fn flatten(
        &self,
        hierarchy: &Hierarchy<'_>,
        encoder: &ColorEncoder,
        blocks: &[Block],
        world: Transform,
    ) -> Vec<Primitive> {
        let mut primitives = Vec::with_capacity(blocks.len());
        let mut stack = vec![(0, world)];

        while let Some((index, world)) = stack.pop() {
            let block = &blocks[index];
            let element = hierarchy.node(index).element();
            let id = hierarchy.id(index);
            let color = encoder.color(element.life_span());

            match &block.content {
                Content::Building => {
                    let (kind, dimensions) = match policy(element.kind()).geometry() {
                        Geometry::Box => (PrimitiveKind::Box, block.size),
                        Geometry::Cylinder => {
                            let radius = block.size.width().min(block.size.depth()) / 2.0;
                            (
                                PrimitiveKind::Cylinder { radius },
                                Size3::new(radius * 2.0, block.size.height(), radius * 2.0),
                            )
                        }
                    };
                    primitives.push(
                        Primitive::new(
                            kind,
                            dimensions,
                            world.translation(),
                            color,
                            id,
                            element.name(),
                        )
                        .with_rotation(world.rotation()),
                    );
                }
                Content::Street { road, children } => {
                    let placed = road.transformed(world);
                    primitives.push(
                        Primitive::new(
                            PrimitiveKind::Box,
                            road.size(),
                            placed.position(),
                            color,
                            id,
                            element.name(),
                        )
                        .with_rotation(placed.rotation()),
                    );
                    // Reversed, so children are emitted in street order.
                    stack.extend(
                        children
                            .iter()
                            .rev()
                            .map(|(transform, child)| (*child, transform.then(world))),
                    );
                }
            }
        }
        primitives
    }
}

impl CityEngine for StreetEngine {
    fn calculate(&self, hierarchy: &mut Hierarchy<'_>, encoder: &ColorEncoder) -> Vec<Primitive> {
        let blocks = self.blocks(hierarchy);
        let size = blocks[0].size;
        debug!(
            width = size.width(),
            height = size.height(),
            depth = size.depth();
            "District composed"
        );

        // Stand the city on the ground plane.
        let world = Transform::translation_only(Vec3::new(0.0, size.height() / 2.0, 0.0));
        self.flatten(hierarchy, encoder, &blocks, world)
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use codecity_core::{color::Color, element::Element};

    use super::*;

    fn encoder() -> ColorEncoder {
        ColorEncoder::new(Color::new("yellow").unwrap(), Color::new("blue").unwrap(), 0)
    }

    fn city(root: &Element) -> Vec<Primitive> {
        let mut hierarchy = Hierarchy::build(root).unwrap();
        StreetEngine::new(20.0, 1.0, 1.0).calculate(&mut hierarchy, &encoder())
    }

    #[test]
    fn test_single_leaf_is_one_building() {
        let root = Element::class("Solo", 3);
        let primitives = city(&root);

        assert_eq!(primitives.len(), 1);
        let building = &primitives[0];
        assert_approx_eq!(f32, building.dimensions().width(), 10.0);
        assert_approx_eq!(f32, building.dimensions().height(), 15.0);
        assert_approx_eq!(f32, building.position().y(), 7.5);
    }

    #[test]
    fn test_container_becomes_road_with_buildings() {
        let root = Element::container(
            "Root",
            vec![
                Element::class("A", 10),
                Element::class("B", 25),
                Element::interface("C", 1),
            ],
        );
        let primitives = city(&root);

        assert_eq!(primitives.len(), 4);
        let road = &primitives[0];
        assert_eq!(road.visibility_key(), "Root");
        assert_approx_eq!(f32, road.dimensions().height(), 1.0);
        // Road lies on the ground.
        assert_approx_eq!(f32, road.position().y() - 0.5, 0.0, epsilon = 1e-4);

        // A and C share the -z bank, B is across the road.
        let z = |name: &str| {
            primitives
                .iter()
                .find(|primitive| primitive.visibility_key() == name)
                .unwrap()
                .position()
                .z()
        };
        assert!(z("A") < road.position().z());
        assert!(z("C") < road.position().z());
        assert!(z("B") > road.position().z());

        let c = primitives
            .iter()
            .find(|primitive| primitive.visibility_key() == "C")
            .unwrap();
        assert!(matches!(c.kind(), PrimitiveKind::Cylinder { .. }));
    }

    #[test]
    fn test_buildings_stand_on_ground() {
        let root = Element::container(
            "Root",
            vec![
                Element::container("pkg", vec![Element::class("A", 12), Element::class("B", 1)]),
                Element::class("C", 40),
            ],
        );
        for primitive in city(&root) {
            let bottom = primitive.position().y() - primitive.dimensions().height() / 2.0;
            assert_approx_eq!(f32, bottom, 0.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_deep_chain_is_flattened() {
        const DEPTH: usize = 100_000;

        let mut root = Element::class("leaf", 1);
        for level in (0..DEPTH).rev() {
            root = Element::container(format!("c{level}"), vec![root]);
        }
        let primitives = city(&root);

        assert_eq!(primitives.len(), DEPTH + 1);
        assert_eq!(primitives[0].visibility_key(), "c0");
        assert_eq!(primitives[DEPTH].visibility_key(), "leaf");
    }

    mod proptest_tests {
        use super::*;
        use crate::layout::hierarchy::tests::element_tree_strategy;

        fn check_one_primitive_per_element(root: &Element) -> Result<(), TestCaseError> {
            let primitives = city(root);
            prop_assert_eq!(primitives.len(), root.count());

            let mut owners: Vec<_> = primitives.iter().map(Primitive::owner).collect();
            owners.sort();
            owners.dedup();
            prop_assert_eq!(owners.len(), root.count());
            Ok(())
        }

        proptest! {
            #[test]
            fn one_primitive_per_element(root in element_tree_strategy()) {
                check_one_primitive_per_element(&root)?;
            }
        }
    }
}
