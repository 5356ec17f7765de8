//! An arena view of the element tree that the layout stages annotate.
//!
//! Nodes are stored in the element tree's original pre-order, so a node's
//! position in the arena is its [`ElementId`]. Child lists are sorted by
//! name; [`Hierarchy::preorder`] walks that sorted order.

use std::cmp::Ordering;

use log::debug;

use codecity_core::{
    element::{Element, ElementId},
    geometry::{Band, Rect},
};

use super::weight::element_weight;
use crate::error::CodeCityError;

/// One element plus everything the layout stages compute for it.
#[derive(Debug, Clone)]
pub struct HierarchyNode<'a> {
    element: &'a Element,
    parent: Option<usize>,
    children: Vec<usize>,
    depth: usize,
    weight: f32,
    value: f32,
    cell: Rect,
    rect: Rect,
    band: Band,
}

impl<'a> HierarchyNode<'a> {
    pub fn element(&self) -> &'a Element {
        self.element
    }

    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Returns child indices in layout (name) order.
    pub fn children(&self) -> &[usize] {
        &self.children
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the element's own weight.
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Returns the weight of the whole subtree rooted here.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Returns the tile the parent allotted to this node, before padding.
    pub fn cell(&self) -> Rect {
        self.cell
    }

    /// Returns the node's final planar rectangle.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn band(&self) -> Band {
        self.band
    }

    pub(crate) fn set_cell(&mut self, cell: Rect) {
        self.cell = cell;
    }

    pub(crate) fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    pub(crate) fn set_band(&mut self, band: Band) {
        self.band = band;
    }
}

/// The element tree flattened into an arena.
#[derive(Debug, Clone)]
pub struct Hierarchy<'a> {
    nodes: Vec<HierarchyNode<'a>>,
}

impl<'a> Hierarchy<'a> {
    /// Flattens `root`, sorts children by name and sums subtree weights.
    ///
    /// # Errors
    ///
    /// Returns [`CodeCityError::Structure`] if a non-container element has
    /// children.
    pub fn build(root: &'a Element) -> Result<Self, CodeCityError> {
        let mut nodes = Vec::with_capacity(root.count());
        collect(root, &mut nodes)?;

        for index in 0..nodes.len() {
            let mut children = std::mem::take(&mut nodes[index].children);
            children.sort_by(|a, b| {
                compare_names(nodes[*a].element.name(), nodes[*b].element.name())
            });
            nodes[index].children = children;
        }

        // Children always follow their parent in pre-order.
        for index in (0..nodes.len()).rev() {
            let children_value: f32 = nodes[index]
                .children
                .iter()
                .map(|child| nodes[*child].value)
                .sum();
            nodes[index].value = nodes[index].weight + children_value;
        }

        debug!(nodes = nodes.len(), total_weight = nodes[0].value; "Hierarchy built");
        Ok(Self { nodes })
    }

    pub fn root(&self) -> &HierarchyNode<'a> {
        &self.nodes[0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the node at arena `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of bounds.
    pub fn node(&self, index: usize) -> &HierarchyNode<'a> {
        &self.nodes[index]
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> &mut HierarchyNode<'a> {
        &mut self.nodes[index]
    }

    /// Returns the arena index of the node with `id`.
    pub fn index_of(&self, id: ElementId) -> Option<usize> {
        (id.index() < self.nodes.len()).then_some(id.index())
    }

    /// Returns the element id of the node at arena `index`.
    pub fn id(&self, index: usize) -> ElementId {
        ElementId::new(index)
    }

    /// Returns arena indices in pre-order over the sorted child lists.
    pub fn preorder(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            order.push(index);
            stack.extend(self.nodes[index].children.iter().rev());
        }
        order
    }

    /// Finds the first node, in arena order, whose element has `name`.
    pub fn find(&self, name: &str) -> Option<(usize, &HierarchyNode<'a>)> {
        self.nodes
            .iter()
            .enumerate()
            .find(|(_, node)| node.element.name() == name)
    }
}

fn collect<'a>(
    root: &'a Element,
    nodes: &mut Vec<HierarchyNode<'a>>,
) -> Result<(), CodeCityError> {
    let mut stack = vec![(root, None, 0)];
    while let Some((element, parent, depth)) = stack.pop() {
        if !element.is_container() && !element.children().is_empty() {
            return Err(CodeCityError::Structure(format!(
                "`{}` is a {} element but has {} children",
                element.name(),
                element.kind(),
                element.children().len()
            )));
        }

        let index = nodes.len();
        nodes.push(HierarchyNode {
            element,
            parent,
            children: Vec::with_capacity(element.children().len()),
            depth,
            weight: element_weight(element),
            value: 0.0,
            cell: Rect::default(),
            rect: Rect::default(),
            band: Band::default(),
        });
        if let Some(parent) = parent {
            nodes[parent].children.push(index);
        }

        stack.extend(
            element
                .children()
                .iter()
                .rev()
                .map(|child| (child, Some(index), depth + 1)),
        );
    }
    Ok(())
}

/// Orders sibling names case-insensitively, falling back to a byte-wise
/// comparison so that the order is total.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    a.chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase))
        .then_with(|| a.cmp(b))
}
