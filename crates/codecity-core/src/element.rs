//! The structural tree consumed by the layout.
//!
//! An [`Element`] is one node of a codebase's structure: a container (package,
//! directory, module), a class, an interface, or some other leaf kind. Only
//! containers carry children.
//!
//! Elements are plain input data. The layout never mutates them and never
//! stores references to them inside its output; output primitives refer back
//! to their source through an [`ElementId`], resolved with an
//! [`ElementIndex`].
//!
//! # Example
//!
//! ```
//! # use codecity_core::element::{Element, ElementIndex, ElementKind};
//! let root = Element::container(
//!     "app",
//!     vec![Element::class("Service", 12), Element::interface("Repository", 3)],
//! );
//!
//! let index = ElementIndex::new(&root);
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.root().name(), "app");
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of a structural element.
///
/// Unknown kinds in serialized input (for example `ENUM`) deserialize to
/// [`ElementKind::Other`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ElementKind {
    /// A grouping node (package, directory) whose children are laid out inside it.
    Container,
    Class,
    Interface,
    /// Any other leaf kind.
    #[default]
    #[serde(other)]
    Other,
}

impl ElementKind {
    /// Returns true for the kinds whose size is driven by `methodsCount`.
    pub fn is_type_like(self) -> bool {
        matches!(self, Self::Class | Self::Interface)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Container => "CONTAINER",
            Self::Class => "CLASS",
            Self::Interface => "INTERFACE",
            Self::Other => "OTHER",
        };
        f.write_str(name)
    }
}

/// One node of the input structural tree.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    #[serde(rename = "type", default)]
    kind: ElementKind,

    #[serde(default)]
    name: String,

    /// Fully qualified path, when the producer provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    full_path: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,

    #[serde(default)]
    methods_count: u32,

    /// Number of prior versions that already contained this element's path.
    #[serde(default)]
    life_span: u32,
}

impl Element {
    /// Creates an element of the given kind with no children and zeroed metrics.
    pub fn new(kind: ElementKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            full_path: None,
            children: Vec::new(),
            methods_count: 0,
            life_span: 0,
        }
    }

    /// Creates a container element holding `children`.
    pub fn container(name: impl Into<String>, children: Vec<Element>) -> Self {
        Self::new(ElementKind::Container, name).with_children(children)
    }

    /// Creates a class element with the given method count.
    pub fn class(name: impl Into<String>, methods_count: u32) -> Self {
        Self::new(ElementKind::Class, name).with_methods_count(methods_count)
    }

    /// Creates an interface element with the given method count.
    pub fn interface(name: impl Into<String>, methods_count: u32) -> Self {
        Self::new(ElementKind::Interface, name).with_methods_count(methods_count)
    }

    /// Creates a leaf element of an unspecified kind.
    pub fn other(name: impl Into<String>) -> Self {
        Self::new(ElementKind::Other, name)
    }

    pub fn with_children(mut self, children: Vec<Element>) -> Self {
        self.children = children;
        self
    }

    pub fn with_methods_count(mut self, methods_count: u32) -> Self {
        self.methods_count = methods_count;
        self
    }

    pub fn with_life_span(mut self, life_span: u32) -> Self {
        self.life_span = life_span;
        self
    }

    pub fn with_full_path(mut self, full_path: impl Into<String>) -> Self {
        self.full_path = Some(full_path.into());
        self
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn full_path(&self) -> Option<&str> {
        self.full_path.as_deref()
    }

    /// Returns the children in their original order.
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    pub fn methods_count(&self) -> u32 {
        self.methods_count
    }

    pub fn life_span(&self) -> u32 {
        self.life_span
    }

    /// Returns true if this is a container.
    pub fn is_container(&self) -> bool {
        self.kind == ElementKind::Container
    }

    /// Counts this element and all of its descendants.
    pub fn count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(element) = stack.pop() {
            count += 1;
            stack.extend(element.children.iter());
        }
        count
    }

    /// Returns the depth of the deepest leaf, with a lone element at height 0.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut stack = vec![(self, 0)];
        while let Some((element, depth)) = stack.pop() {
            height = height.max(depth);
            stack.extend(element.children.iter().map(|child| (child, depth + 1)));
        }
        height
    }
}

impl Drop for Element {
    // Trees built from snapshot histories can be arbitrarily deep; unlink
    // descendants onto a heap stack instead of dropping them recursively.
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut element) = pending.pop() {
            pending.append(&mut element.children);
        }
    }
}

/// Identifies an element by its position in a pre-order walk of the tree,
/// children visited in their original order. The root is always `ElementId(0)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ElementId(usize);

impl ElementId {
    pub const ROOT: Self = Self(0);

    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A non-owning lookup from [`ElementId`] to the element it names.
///
/// The index borrows the tree; it is built once per layout request and lets
/// picking or tooltip code recover the source element of any primitive.
#[derive(Debug, Clone)]
pub struct ElementIndex<'a> {
    elements: Vec<&'a Element>,
}

impl<'a> ElementIndex<'a> {
    /// Builds the index by walking `root` in pre-order.
    pub fn new(root: &'a Element) -> Self {
        let mut elements = Vec::with_capacity(root.count());
        let mut stack = vec![root];
        while let Some(element) = stack.pop() {
            elements.push(element);
            stack.extend(element.children().iter().rev());
        }
        Self { elements }
    }

    /// Returns the element with the given id, if it belongs to this tree.
    pub fn get(&self, id: ElementId) -> Option<&'a Element> {
        self.elements.get(id.index()).copied()
    }

    pub fn root(&self) -> &'a Element {
        self.elements[0]
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Iterates over `(id, element)` pairs in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &'a Element)> + '_ {
        self.elements
            .iter()
            .enumerate()
            .map(|(index, element)| (ElementId::new(index), *element))
    }

    /// Finds the first element (in pre-order) with the given name.
    pub fn find_by_name(&self, name: &str) -> Option<(ElementId, &'a Element)> {
        self.iter().find(|(_, element)| element.name() == name)
    }
}
