//! The finished layout and the queries a viewer runs against it.

use std::collections::HashSet;

use serde::Serialize;

use codecity_core::{
    draw::Primitive,
    element::{Element, ElementId, ElementIndex},
    geometry::Vec3,
};

use crate::{
    config::LayoutMode,
    pick::{Ray, intersect},
};

/// Positioned primitives for one element tree.
#[derive(Debug, Clone, Serialize)]
pub struct CityLayout {
    mode: LayoutMode,
    canvas_size: f32,
    primitives: Vec<Primitive>,
}

impl CityLayout {
    pub fn new(mode: LayoutMode, canvas_size: f32, primitives: Vec<Primitive>) -> Self {
        Self {
            mode,
            canvas_size,
            primitives,
        }
    }

    pub fn mode(&self) -> LayoutMode {
        self.mode
    }

    pub fn canvas_size(&self) -> f32 {
        self.canvas_size
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// Iterates over the primitives `filter` lets through. A label is shown
    /// only when the primitive it is attached to is.
    pub fn visible<'s>(
        &'s self,
        filter: &'s VisibilityFilter,
    ) -> impl Iterator<Item = &'s Primitive> {
        self.primitives.iter().filter(move |primitive| {
            let owner_visible = primitive
                .parent()
                .and_then(|parent| self.primitives.get(parent))
                .is_none_or(|parent| filter.is_visible(parent));
            owner_visible && filter.is_visible(primitive)
        })
    }

    /// Returns the nearest visible primitive hit by `ray`.
    pub fn pick(&self, ray: &Ray, filter: &VisibilityFilter) -> Option<Hit> {
        self.primitives
            .iter()
            .enumerate()
            .filter(|(_, primitive)| filter.is_visible(primitive))
            .filter_map(|(index, primitive)| {
                intersect(primitive, ray).map(|distance| Hit {
                    index,
                    owner: primitive.owner(),
                    distance,
                    point: ray.at(distance),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }

    /// Returns the point a camera should look at to focus on the element
    /// named `name`: the center of its volume.
    pub fn focus(&self, name: &str) -> Option<Vec3> {
        self.primitives
            .iter()
            .find(|primitive| !primitive.is_label() && primitive.visibility_key() == name)
            .map(Primitive::position)
    }

    /// Returns the primitives built from the element `id`.
    pub fn primitives_of(&self, id: ElementId) -> impl Iterator<Item = &Primitive> {
        self.primitives
            .iter()
            .filter(move |primitive| primitive.owner() == id)
    }
}

/// A picked primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    index: usize,
    owner: ElementId,
    distance: f32,
    point: Vec3,
}

impl Hit {
    /// Returns the index of the primitive in [`CityLayout::primitives`].
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn owner(&self) -> ElementId {
        self.owner
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Returns the world-space point where the ray met the primitive.
    pub fn point(&self) -> Vec3 {
        self.point
    }

    /// Resolves the picked primitive back to the element it was built from.
    ///
    /// `index` must be built over the same tree that was laid out.
    pub fn element<'e>(&self, index: &ElementIndex<'e>) -> Option<&'e Element> {
        index.get(self.owner)
    }
}

/// Selects primitives by visibility key.
///
/// Primitives with an empty key are always visible.
#[derive(Debug, Clone, Default)]
pub struct VisibilityFilter {
    selected: Option<HashSet<String>>,
}

impl VisibilityFilter {
    /// A filter that shows everything.
    pub fn all() -> Self {
        Self::default()
    }

    /// A filter that shows only the given keys.
    pub fn only<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            selected: Some(keys.into_iter().map(Into::into).collect()),
        }
    }

    pub fn is_visible(&self, primitive: &Primitive) -> bool {
        let key = primitive.visibility_key();
        key.is_empty()
            || self
                .selected
                .as_ref()
                .is_none_or(|selected| selected.contains(key))
    }
}
