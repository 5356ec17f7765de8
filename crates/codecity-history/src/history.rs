//! Merging snapshots into a per-path history.

use indexmap::{IndexMap, IndexSet};
use log::{debug, info, trace, warn};

use codecity_core::element::{Element, ElementKind};

use crate::{
    error::HistoryError,
    snapshot::{NodeRecord, ProjectSnapshot},
};

/// The path under which the record without a `fullPath` is stored.
pub const ROOT_PATH: &str = "Project Root";

/// A record as it appeared in one version, with its derived life span.
#[derive(Debug, Clone)]
struct VersionedRecord {
    record: NodeRecord,
    life_span: u32,
}

/// Every path seen across a sequence of snapshots, with the record of each
/// version it appears in.
///
/// Paths and versions keep the order in which they were first seen.
#[derive(Debug, Clone)]
pub struct History {
    name: String,
    versions: Vec<String>,
    paths: IndexMap<String, IndexMap<String, VersionedRecord>>,
}

impl History {
    /// Merges snapshots in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Empty`] when `snapshots` is empty.
    pub fn from_snapshots(snapshots: Vec<ProjectSnapshot>) -> Result<Self, HistoryError> {
        let Some(first) = snapshots.first() else {
            return Err(HistoryError::Empty);
        };
        let name = first.name().to_string();
        let versions: Vec<String> = snapshots
            .iter()
            .map(|snapshot| snapshot.version().to_string())
            .collect();

        let mut paths: IndexMap<String, IndexMap<String, VersionedRecord>> = IndexMap::new();
        for snapshot in snapshots {
            let version = snapshot.version().to_string();
            for record in snapshot.into_data() {
                let path = record.full_path().unwrap_or(ROOT_PATH).to_string();
                let seen = paths.entry(path).or_default();
                let life_span = seen.keys().filter(|v| **v != version).count() as u32;
                seen.insert(version.clone(), VersionedRecord { record, life_span });
            }
        }

        info!(
            project = name,
            versions = versions.len(),
            paths = paths.len();
            "Snapshot history merged"
        );

        Ok(Self {
            name,
            versions,
            paths,
        })
    }

    /// Decodes a JSON array of snapshots and merges them.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::Json`] for malformed input and
    /// [`HistoryError::Empty`] for an empty array.
    pub fn from_json(json: &str) -> Result<Self, HistoryError> {
        let snapshots: Vec<ProjectSnapshot> = serde_json::from_str(json)?;
        Self::from_snapshots(snapshots)
    }

    /// Returns the project name, taken from the first snapshot.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the version labels in snapshot order.
    pub fn versions(&self) -> &[String] {
        &self.versions
    }

    /// Iterates over every path seen in any version.
    ///
    /// This is the default visibility selection: everything visible.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// Returns the life span of `path` in the version at `version_index`.
    pub fn life_span(&self, path: &str, version_index: usize) -> Option<u32> {
        let version = self.versions.get(version_index)?;
        self.paths
            .get(path)?
            .get(version)
            .map(|versioned| versioned.life_span)
    }

    /// Builds the element tree rooted at `root_path` for one version.
    ///
    /// Children that do not exist in the selected version are skipped with a
    /// warning.
    ///
    /// # Errors
    ///
    /// - [`HistoryError::UnknownVersion`] if `version_index` is out of range
    /// - [`HistoryError::UnknownPath`] if `root_path` is absent from that version
    /// - [`HistoryError::Cycle`] if a container is reachable from itself
    /// - [`HistoryError::SharedPath`] if a path is listed under two parents
    /// - [`HistoryError::ChildrenOnLeaf`] if a non-container lists children
    pub fn hierarchy(
        &self,
        root_path: &str,
        version_index: usize,
    ) -> Result<Element, HistoryError> {
        let version = self
            .versions
            .get(version_index)
            .ok_or(HistoryError::UnknownVersion {
                index: version_index,
                available: self.versions.len(),
            })?;

        let nodes = self.walk(root_path, version)?;
        let tree = assemble(&nodes).ok_or_else(|| HistoryError::UnknownPath {
            path: root_path.to_string(),
            version: version.clone(),
        })?;
        debug!(
            root = root_path,
            version = version.as_str(),
            elements = nodes.len();
            "Hierarchy materialised"
        );
        Ok(tree)
    }

    fn lookup(&self, path: &str, version: &str) -> Option<&VersionedRecord> {
        self.paths.get(path)?.get(version)
    }

    /// Visits the path graph depth-first from `root_path` and returns the
    /// reachable records in pre-order, each with the arena indices of its
    /// children.
    fn walk<'p>(
        &'p self,
        root_path: &str,
        version: &str,
    ) -> Result<Vec<Node<'p>>, HistoryError> {
        let (root_key, _) =
            self.paths
                .get_key_value(root_path)
                .ok_or_else(|| HistoryError::UnknownPath {
                    path: root_path.to_string(),
                    version: version.to_string(),
                })?;

        let mut nodes: Vec<Node<'p>> = Vec::new();
        // Child path to the parent it was first placed under.
        let mut placed: IndexMap<&'p str, &'p str> = IndexMap::new();
        let mut ancestors: IndexSet<&'p str> = IndexSet::new();
        let mut stack = vec![Step::Enter {
            path: root_key.as_str(),
            parent: None,
        }];

        while let Some(step) = stack.pop() {
            let (path, parent) = match step {
                Step::Leave => {
                    ancestors.pop();
                    continue;
                }
                Step::Enter { path, parent } => (path, parent),
            };

            if ancestors.contains(path) {
                return Err(HistoryError::Cycle {
                    path: path.to_string(),
                });
            }
            let parent_path = parent.map(|index| nodes[index].path);
            if let (Some(first), Some(second)) = (placed.get(path), parent_path) {
                return Err(HistoryError::SharedPath {
                    path: path.to_string(),
                    first: first.to_string(),
                    second: second.to_string(),
                });
            }

            let Some(versioned) = self.lookup(path, version) else {
                return Err(HistoryError::UnknownPath {
                    path: path.to_string(),
                    version: version.to_string(),
                });
            };
            let record = &versioned.record;
            if record.kind() != ElementKind::Container && !record.children().is_empty() {
                return Err(HistoryError::ChildrenOnLeaf {
                    path: path.to_string(),
                    kind: record.kind(),
                });
            }

            trace!(path, life_span = versioned.life_span; "Materialising element");

            let index = nodes.len();
            nodes.push(Node {
                path,
                versioned,
                children: Vec::new(),
            });
            if let Some(parent) = parent {
                nodes[parent].children.push(index);
            }
            if let Some(parent_path) = parent_path {
                placed.insert(path, parent_path);
            }
            ancestors.insert(path);
            stack.push(Step::Leave);

            let mut children: IndexSet<&'p str> = IndexSet::new();
            for child in record.children() {
                if !children.insert(child.as_str()) {
                    debug!(
                        parent = path,
                        child = child.as_str();
                        "Ignoring duplicate child entry"
                    );
                }
            }
            children.retain(|child| {
                let present = self.lookup(child, version).is_some();
                if !present {
                    warn!(parent = path, child, version; "Skipping missing child");
                }
                present
            });
            // Reversed, so the first child is visited first.
            stack.extend(
                children
                    .into_iter()
                    .rev()
                    .map(|child| Step::Enter {
                        path: child,
                        parent: Some(index),
                    }),
            );
        }

        Ok(nodes)
    }
}

/// One reachable record during a walk.
struct Node<'p> {
    path: &'p str,
    versioned: &'p VersionedRecord,
    children: Vec<usize>,
}

enum Step<'p> {
    Enter { path: &'p str, parent: Option<usize> },
    Leave,
}

/// Builds the element tree from walked nodes, leaves first.
fn assemble(nodes: &[Node<'_>]) -> Option<Element> {
    let mut built: Vec<Option<Element>> = Vec::with_capacity(nodes.len());
    built.resize_with(nodes.len(), || None);

    // Pre-order puts every child after its parent.
    for (index, node) in nodes.iter().enumerate().rev() {
        let children = node
            .children
            .iter()
            .filter_map(|child| built[*child].take())
            .collect();
        let record = &node.versioned.record;
        built[index] = Some(
            Element::new(record.kind(), record.name())
                .with_full_path(node.path)
                .with_children(children)
                .with_methods_count(record.methods_count())
                .with_life_span(node.versioned.life_span),
        );
    }

    built.into_iter().next().flatten()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn root(children: &[&str]) -> NodeRecord {
        NodeRecord::new(None, "project", ElementKind::Container).with_children(children.to_vec())
    }

    fn class(path: &str, methods: u32) -> NodeRecord {
        let name = path.rsplit('.').next().unwrap_or(path);
        NodeRecord::new(Some(path), name, ElementKind::Class).with_methods_count(methods)
    }

    fn history() -> History {
        History::from_snapshots(vec![
            ProjectSnapshot::new("project", "v1", vec![root(&["p.A"]), class("p.A", 1)]),
            ProjectSnapshot::new(
                "project",
                "v2",
                vec![root(&["p.A", "p.B"]), class("p.A", 2), class("p.B", 5)],
            ),
            ProjectSnapshot::new(
                "project",
                "v3",
                vec![root(&["p.A", "p.B"]), class("p.A", 3), class("p.B", 6)],
            ),
        ])
        .unwrap()
    }

    #[test]
    fn test_empty_history_is_rejected() {
        let result = History::from_snapshots(Vec::new());
        assert!(matches!(result, Err(HistoryError::Empty)));
    }

    #[test]
    fn test_versions_and_paths_keep_order() {
        let history = history();
        assert_eq!(history.name(), "project");
        assert_eq!(history.versions(), ["v1", "v2", "v3"]);
        assert_eq!(
            history.paths().collect::<Vec<_>>(),
            vec![ROOT_PATH, "p.A", "p.B"]
        );
    }

    #[test]
    fn test_life_span_counts_prior_versions() {
        let history = history();
        assert_eq!(history.life_span(ROOT_PATH, 0), Some(0));
        assert_eq!(history.life_span(ROOT_PATH, 2), Some(2));
        assert_eq!(history.life_span("p.A", 2), Some(2));
        assert_eq!(history.life_span("p.B", 1), Some(0));
        assert_eq!(history.life_span("p.B", 2), Some(1));
        assert_eq!(history.life_span("p.B", 0), None);
        assert_eq!(history.life_span("p.A", 9), None);
    }

    #[test]
    fn test_hierarchy_materialises_version() {
        let history = history();
        let tree = history.hierarchy(ROOT_PATH, 2).unwrap();

        assert_eq!(tree.kind(), ElementKind::Container);
        assert_eq!(tree.full_path(), Some(ROOT_PATH));
        assert_eq!(tree.life_span(), 2);
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.children()[1].name(), "B");
        assert_eq!(tree.children()[1].methods_count(), 6);
        assert_eq!(tree.children()[1].life_span(), 1);
    }

    #[test]
    fn test_hierarchy_unknown_version() {
        let err = history().hierarchy(ROOT_PATH, 3).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::UnknownVersion {
                index: 3,
                available: 3
            }
        ));
    }

    #[test]
    fn test_hierarchy_unknown_root() {
        let err = history().hierarchy("p.B", 0).unwrap_err();
        assert!(matches!(err, HistoryError::UnknownPath { .. }));
    }

    #[test]
    fn test_hierarchy_from_sub_root() {
        let tree = history().hierarchy("p.A", 1).unwrap();
        assert_eq!(tree.name(), "A");
        assert!(tree.children().is_empty());
    }

    #[test]
    fn test_missing_child_is_skipped() {
        let history = History::from_snapshots(vec![ProjectSnapshot::new(
            "project",
            "v1",
            vec![root(&["p.A", "p.Gone"]), class("p.A", 1)],
        )])
        .unwrap();

        let tree = history.hierarchy(ROOT_PATH, 0).unwrap();
        assert_eq!(tree.children().len(), 1);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let history = History::from_snapshots(vec![ProjectSnapshot::new(
            "project",
            "v1",
            vec![
                root(&["p"]),
                NodeRecord::new(Some("p"), "p", ElementKind::Container).with_children(["p.q"]),
                NodeRecord::new(Some("p.q"), "q", ElementKind::Container).with_children(["p"]),
            ],
        )])
        .unwrap();

        let err = history.hierarchy(ROOT_PATH, 0).unwrap_err();
        assert!(matches!(err, HistoryError::Cycle { ref path } if path == "p"));
    }

    #[test]
    fn test_children_on_leaf_is_rejected() {
        let history = History::from_snapshots(vec![ProjectSnapshot::new(
            "project",
            "v1",
            vec![root(&["p.A"]), class("p.A", 1).with_children(["p.A.inner"])],
        )])
        .unwrap();

        let err = history.hierarchy(ROOT_PATH, 0).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::ChildrenOnLeaf {
                kind: ElementKind::Class,
                ..
            }
        ));
    }

    #[test]
    fn test_shared_child_is_rejected() {
        let history = History::from_snapshots(vec![ProjectSnapshot::new(
            "project",
            "v1",
            vec![
                root(&["a", "b"]),
                NodeRecord::new(Some("a"), "a", ElementKind::Container).with_children(["s"]),
                NodeRecord::new(Some("b"), "b", ElementKind::Container).with_children(["s"]),
                class("s", 1),
            ],
        )])
        .unwrap();

        let err = history.hierarchy(ROOT_PATH, 0).unwrap_err();
        assert!(matches!(
            err,
            HistoryError::SharedPath { ref path, ref first, ref second }
                if path == "s" && first == "a" && second == "b"
        ));
    }

    #[test]
    fn test_duplicate_child_entry_is_materialised_once() {
        let history = History::from_snapshots(vec![ProjectSnapshot::new(
            "project",
            "v1",
            vec![root(&["p.A", "p.B", "p.A"]), class("p.A", 1), class("p.B", 2)],
        )])
        .unwrap();

        let tree = history.hierarchy(ROOT_PATH, 0).unwrap();
        let names: Vec<_> = tree.children().iter().map(|c| c.name()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(tree.count(), 3);
    }

    #[test]
    fn test_deep_chain_is_materialised() {
        const DEPTH: usize = 100_000;

        let mut data = vec![root(&["d1"])];
        for level in 1..=DEPTH {
            let path = format!("d{level}");
            let record =
                NodeRecord::new(Some(path.as_str()), path.as_str(), ElementKind::Container);
            let record = if level < DEPTH {
                record.with_children([format!("d{}", level + 1)])
            } else {
                record
            };
            data.push(record);
        }
        let history =
            History::from_snapshots(vec![ProjectSnapshot::new("project", "v1", data)]).unwrap();

        let tree = history.hierarchy(ROOT_PATH, 0).unwrap();
        assert_eq!(tree.count(), DEPTH + 1);
        assert_eq!(tree.height(), DEPTH);
    }

    mod proptest_tests {
        use proptest::prelude::*;

        use super::*;

        /// `presence[i]` says whether `p.A` is part of snapshot `i`.
        fn check_life_span_counts_earlier_snapshots(
            presence: &[bool],
        ) -> Result<(), TestCaseError> {
            let snapshots = presence
                .iter()
                .enumerate()
                .map(|(i, present)| {
                    let data = if *present {
                        vec![root(&["p.A"]), class("p.A", 1)]
                    } else {
                        vec![root(&[])]
                    };
                    ProjectSnapshot::new("project", format!("v{i}"), data)
                })
                .collect();
            let history = History::from_snapshots(snapshots).unwrap();

            let mut earlier = 0;
            for (i, present) in presence.iter().enumerate() {
                prop_assert_eq!(history.life_span(ROOT_PATH, i), Some(i as u32));
                if *present {
                    prop_assert_eq!(history.life_span("p.A", i), Some(earlier));
                    earlier += 1;
                } else {
                    prop_assert_eq!(history.life_span("p.A", i), None);
                }
            }
            Ok(())
        }

        proptest! {
            #[test]
            fn life_span_counts_earlier_snapshots(
                presence in prop::collection::vec(any::<bool>(), 1..8)
            ) {
                check_life_span_counts_earlier_snapshots(&presence)?;
            }
        }
    }
}
