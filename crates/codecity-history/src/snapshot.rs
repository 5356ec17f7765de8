//! Wire model of a single analysed version.

use serde::Deserialize;

use codecity_core::element::ElementKind;

/// The structure of a project at one version.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSnapshot {
    name: String,
    version: String,
    #[serde(default)]
    data: Vec<NodeRecord>,
}

impl ProjectSnapshot {
    /// Creates a snapshot without going through JSON.
    ///
    /// ```
    /// # use codecity_core::element::ElementKind;
    /// # use codecity_history::{History, NodeRecord, ProjectSnapshot, ROOT_PATH};
    /// let snapshot = ProjectSnapshot::new(
    ///     "demo",
    ///     "v1",
    ///     vec![
    ///         NodeRecord::new(None, "demo", ElementKind::Container).with_children(["demo.A"]),
    ///         NodeRecord::new(Some("demo.A"), "A", ElementKind::Class).with_methods_count(3),
    ///     ],
    /// );
    ///
    /// let history = History::from_snapshots(vec![snapshot]).unwrap();
    /// let tree = history.hierarchy(ROOT_PATH, 0).unwrap();
    /// assert_eq!(tree.children()[0].methods_count(), 3);
    /// ```
    pub fn new(name: impl Into<String>, version: impl Into<String>, data: Vec<NodeRecord>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            data,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub(crate) fn into_data(self) -> Vec<NodeRecord> {
        self.data
    }
}

/// One element of a snapshot. Containers reference children by path.
///
/// A record without a `fullPath` is the project root.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    #[serde(default)]
    full_path: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    kind: ElementKind,
    #[serde(default)]
    children: Vec<String>,
    #[serde(default)]
    methods_count: u32,
}

impl NodeRecord {
    pub fn new(full_path: Option<&str>, name: impl Into<String>, kind: ElementKind) -> Self {
        Self {
            full_path: full_path.map(str::to_string),
            name: name.into(),
            kind,
            children: Vec::new(),
            methods_count: 0,
        }
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_methods_count(mut self, methods_count: u32) -> Self {
        self.methods_count = methods_count;
        self
    }

    pub fn full_path(&self) -> Option<&str> {
        self.full_path.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }

    pub fn methods_count(&self) -> u32 {
        self.methods_count
    }
}
