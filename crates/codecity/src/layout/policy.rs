//! Per-kind sizing rules.
//!
//! Every stage that treats element kinds differently reads the same table
//! here, so adding a kind means adding one [`KindPolicy`] row.

use codecity_core::element::ElementKind;

/// How much area an element claims, before children are added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WeightRule {
    /// The smallest step that is not below the method count.
    MethodSteps,
    /// `per_child * children + base`.
    PerChild { per_child: f32, base: f32 },
    Constant(f32),
}

/// How tall an element's band is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeightRule {
    Fixed(f32),
    /// `max(methods * per_method, min)`.
    MethodsScaled { per_method: f32, min: f32 },
}

/// The volume an element is drawn as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Geometry {
    Box,
    /// Upright cylinder inscribed in the element's footprint.
    Cylinder,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KindPolicy {
    weight: WeightRule,
    height: HeightRule,
    geometry: Geometry,
}

impl KindPolicy {
    pub fn weight(self) -> WeightRule {
        self.weight
    }

    pub fn height(self) -> HeightRule {
        self.height
    }

    pub fn geometry(self) -> Geometry {
        self.geometry
    }
}

/// Returns the sizing rules for `kind`.
pub const fn policy(kind: ElementKind) -> KindPolicy {
    match kind {
        ElementKind::Container => KindPolicy {
            weight: WeightRule::PerChild {
                per_child: 10.0,
                base: 10.0,
            },
            height: HeightRule::Fixed(15.0),
            geometry: Geometry::Box,
        },
        ElementKind::Class => KindPolicy {
            weight: WeightRule::MethodSteps,
            height: HeightRule::MethodsScaled {
                per_method: 5.0,
                min: 15.0,
            },
            geometry: Geometry::Box,
        },
        ElementKind::Interface => KindPolicy {
            weight: WeightRule::MethodSteps,
            height: HeightRule::MethodsScaled {
                per_method: 5.0,
                min: 15.0,
            },
            geometry: Geometry::Cylinder,
        },
        ElementKind::Other => KindPolicy {
            weight: WeightRule::Constant(10.0),
            height: HeightRule::Fixed(0.0),
            geometry: Geometry::Box,
        },
    }
}
