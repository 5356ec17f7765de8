//! Vertical bands: each element sits on top of its parent.

use codecity_core::{element::Element, geometry::Band};

use super::{
    hierarchy::Hierarchy,
    policy::{HeightRule, policy},
};

/// Returns the band thickness of `element`.
pub fn element_height(element: &Element) -> f32 {
    match policy(element.kind()).height() {
        HeightRule::Fixed(height) => height,
        HeightRule::MethodsScaled { per_method, min } => {
            (element.methods_count() as f32 * per_method).max(min)
        }
    }
}

/// Stacks every node's band on its parent's: the root starts at zero, and
/// each child's `z0` equals its parent's `z1`.
#[derive(Debug, Default, Clone, Copy)]
pub struct VerticalExtruder;

impl VerticalExtruder {
    pub fn new() -> Self {
        Self
    }

    pub fn extrude(&self, hierarchy: &mut Hierarchy<'_>) {
        // Pre-order guarantees every parent band is set before its children.
        for index in hierarchy.preorder() {
            let node = hierarchy.node(index);
            let base = node.parent().map_or(0.0, |parent| hierarchy.node(parent).band().z1());
            let band = Band::stacked_on(base, element_height(node.element()));
            hierarchy.node_mut(index).set_band(band);
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use codecity_core::element::ElementKind;

    use super::*;

    #[test]
    fn test_element_heights() {
        assert_eq!(element_height(&Element::class("A", 0)), 15.0);
        assert_eq!(element_height(&Element::class("A", 4)), 20.0);
        assert_eq!(element_height(&Element::interface("I", 2)), 15.0);
        assert_eq!(element_height(&Element::container("pkg", Vec::new())), 15.0);
        assert_eq!(element_height(&Element::new(ElementKind::Other, "E")), 0.0);
    }

    #[test]
    fn test_bands_stack_on_parent() {
        let root = Element::container(
            "root",
            vec![
                Element::container("pkg", vec![Element::class("A", 4)]),
                Element::class("B", 0),
            ],
        );
        let mut hierarchy = Hierarchy::build(&root).unwrap();
        VerticalExtruder::new().extrude(&mut hierarchy);

        let band = |name: &str| {
            let (_, node) = hierarchy.find(name).unwrap();
            node.band()
        };

        assert_approx_eq!(f32, band("root").z0(), 0.0);
        assert_approx_eq!(f32, band("root").z1(), 15.0);
        assert_approx_eq!(f32, band("pkg").z0(), 15.0);
        assert_approx_eq!(f32, band("pkg").z1(), 30.0);
        assert_approx_eq!(f32, band("A").z0(), 30.0);
        assert_approx_eq!(f32, band("A").z1(), 50.0);
        assert_approx_eq!(f32, band("B").z0(), 15.0);
        assert_approx_eq!(f32, band("B").z1(), 30.0);
    }

    mod proptest_tests {
        use super::*;
        use crate::layout::hierarchy::tests::element_tree_strategy;

        fn check_child_sits_on_parent(root: &Element) -> Result<(), TestCaseError> {
            let mut hierarchy = Hierarchy::build(root).unwrap();
            VerticalExtruder::new().extrude(&mut hierarchy);

            for index in hierarchy.preorder() {
                let node = hierarchy.node(index);
                prop_assert!(node.band().z1() >= node.band().z0());
                match node.parent() {
                    Some(parent) => {
                        prop_assert_eq!(node.band().z0(), hierarchy.node(parent).band().z1());
                    }
                    None => prop_assert_eq!(node.band().z0(), 0.0),
                }
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn child_sits_on_parent(root in element_tree_strategy()) {
                check_child_sits_on_parent(&root)?;
            }
        }
    }
}
