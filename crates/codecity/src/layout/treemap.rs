//! Padded binary treemap.
//!
//! The root covers the square `[0, size]²`. Every container reserves
//! `outer_padding` along its edges and tiles the rest among its children by
//! recursive binary splits; each child then gives up half of
//! `inner_padding` on every side, so neighbouring siblings end up a full
//! `inner_padding` apart.
//!
//! A binary split divides an ordered run of children at the point where
//! the cumulative weight is closest to half, then cuts the rectangle along
//! its longer side in proportion to the two halves' weights. Sibling order
//! is never changed, and tiles always cover the available area exactly.

use log::{debug, trace};

use codecity_core::geometry::Rect;

use super::hierarchy::{Hierarchy, HierarchyNode};

/// Assigns each node's allotted [`cell`](HierarchyNode::cell) and padded
/// [`rect`](HierarchyNode::rect).
#[derive(Debug, Clone, Copy)]
pub struct TreemapPartitioner {
    size: f32,
    outer_padding: f32,
    inner_padding: f32,
}

impl TreemapPartitioner {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            outer_padding: 0.0,
            inner_padding: 0.0,
        }
    }

    pub fn with_outer_padding(mut self, padding: f32) -> Self {
        self.outer_padding = padding;
        self
    }

    pub fn with_inner_padding(mut self, padding: f32) -> Self {
        self.inner_padding = padding;
        self
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    /// Returns the region a container with final rectangle `rect` tiles
    /// among its children.
    pub fn content_area(&self, rect: Rect) -> Rect {
        rect.inset(self.outer_padding - self.inner_padding / 2.0)
    }

    pub fn partition(&self, hierarchy: &mut Hierarchy<'_>) {
        let half_inner = self.inner_padding / 2.0;

        for index in hierarchy.preorder() {
            let node = hierarchy.node_mut(index);
            let rect = match node.parent() {
                None => {
                    let canvas = Rect::square(self.size);
                    node.set_cell(canvas);
                    canvas
                }
                Some(_) => node.cell().inset(half_inner),
            };
            node.set_rect(rect);

            let node = hierarchy.node(index);
            if node.children().is_empty() {
                continue;
            }

            let area = self.content_area(rect);
            trace!(node = index, area:?; "Tiling children");
            let cells = tile_binary(hierarchy, node, area);
            for (child, cell) in cells {
                hierarchy.node_mut(child).set_cell(cell);
            }
        }

        debug!(nodes = hierarchy.len(), size = self.size; "Treemap partitioned");
    }
}

/// Splits `area` among `parent`'s children, keeping their order.
fn tile_binary(
    hierarchy: &Hierarchy<'_>,
    parent: &HierarchyNode<'_>,
    area: Rect,
) -> Vec<(usize, Rect)> {
    let children = parent.children();
    let mut sums = Vec::with_capacity(children.len() + 1);
    sums.push(0.0_f32);
    for child in children {
        let previous = sums[sums.len() - 1];
        sums.push(previous + hierarchy.node(*child).value());
    }

    let splitter = BinarySplit {
        children,
        sums: &sums,
    };
    let mut cells = Vec::with_capacity(children.len());
    splitter.split(0, children.len(), sums[children.len()], area, &mut cells);
    cells
}

struct BinarySplit<'s> {
    children: &'s [usize],
    /// `sums[i]` is the total weight of `children[..i]`.
    sums: &'s [f32],
}

impl BinarySplit<'_> {
    fn split(&self, i: usize, j: usize, value: f32, area: Rect, cells: &mut Vec<(usize, Rect)>) {
        if j - i == 1 {
            cells.push((self.children[i], area));
            return;
        }

        let offset = self.sums[i];
        let target = value / 2.0 + offset;

        // First k in (i, j) with sums[k] >= target.
        let mut k = i + 1;
        let mut hi = j - 1;
        while k < hi {
            let mid = (k + hi) / 2;
            if self.sums[mid] < target {
                k = mid + 1;
            } else {
                hi = mid;
            }
        }
        if target - self.sums[k - 1] < self.sums[k] - target && i + 1 < k {
            k -= 1;
        }

        let left_value = self.sums[k] - offset;
        let right_value = value - left_value;
        let (x0, y0, x1, y1) = (area.x0(), area.y0(), area.x1(), area.y1());

        if x1 - x0 > y1 - y0 {
            let xk = if value > 0.0 {
                (x0 * right_value + x1 * left_value) / value
            } else {
                x1
            };
            self.split(i, k, left_value, Rect::new(x0, y0, xk, y1), cells);
            self.split(k, j, right_value, Rect::new(xk, y0, x1, y1), cells);
        } else {
            let yk = if value > 0.0 {
                (y0 * right_value + y1 * left_value) / value
            } else {
                y1
            };
            self.split(i, k, left_value, Rect::new(x0, y0, x1, yk), cells);
            self.split(k, j, right_value, Rect::new(x0, yk, x1, y1), cells);
        }
    }
}
