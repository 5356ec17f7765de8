//! Relative area weights.

use log::debug;

use codecity_core::element::Element;

use super::policy::{WeightRule, policy};

/// Method-count thresholds; each one is also the weight it maps to.
pub const WEIGHT_STEPS: [u32; 5] = [10, 20, 30, 40, 50];

/// Returns the smallest step that is not below `methods_count`.
///
/// Counts above the last step are clamped to it.
pub fn step_weight(methods_count: u32) -> u32 {
    let last = WEIGHT_STEPS[WEIGHT_STEPS.len() - 1];
    match WEIGHT_STEPS.iter().copied().find(|step| methods_count <= *step) {
        Some(step) => step,
        None => {
            debug!(methods_count, clamped_to = last; "Method count above weight table");
            last
        }
    }
}

/// Returns the area weight of `element` on its own, excluding descendants.
///
/// Containers weigh more the more children they have, which leaves room for
/// the padding around each child.
pub fn element_weight(element: &Element) -> f32 {
    match policy(element.kind()).weight() {
        WeightRule::MethodSteps => step_weight(element.methods_count()) as f32,
        WeightRule::PerChild { per_child, base } => {
            per_child * element.children().len() as f32 + base
        }
        WeightRule::Constant(weight) => weight,
    }
}

#[cfg(test)]
mod tests {
    use codecity_core::element::ElementKind;

    use super::*;

    #[test]
    fn test_step_weight_picks_smallest_step_at_or_above() {
        assert_eq!(step_weight(0), 10);
        assert_eq!(step_weight(10), 10);
        assert_eq!(step_weight(11), 20);
        assert_eq!(step_weight(15), 20);
        assert_eq!(step_weight(50), 50);
    }

    #[test]
    fn test_step_weight_clamps_above_table() {
        assert_eq!(step_weight(51), 50);
        assert_eq!(step_weight(u32::MAX), 50);
    }

    #[test]
    fn test_container_weight_counts_children() {
        let container = Element::container(
            "pkg",
            vec![
                Element::class("A", 1),
                Element::class("B", 2),
                Element::other("C"),
            ],
        );
        assert_eq!(element_weight(&container), 40.0);
        assert_eq!(element_weight(&Element::container("empty", Vec::new())), 10.0);
    }

    #[test]
    fn test_type_like_weight_uses_steps() {
        assert_eq!(element_weight(&Element::class("A", 15)), 20.0);
        assert_eq!(element_weight(&Element::interface("I", 31)), 40.0);
    }

    #[test]
    fn test_other_weight_is_constant() {
        let other = Element::new(ElementKind::Other, "E").with_methods_count(99);
        assert_eq!(element_weight(&other), 10.0);
    }
}
