//! Reading the element tree to lay out.
//!
//! Two JSON shapes are accepted:
//!
//! - a single nested element object, laid out as is;
//! - an array of project snapshots, merged into a history from which one
//!   version and one sub-root are selected.

use log::{debug, info};
use serde_json::Value;

use codecity_core::element::Element;
use codecity_history::{History, ProjectSnapshot, ROOT_PATH};

use crate::error::CodeCityError;

/// Which part of a snapshot history to lay out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    root_path: String,
    version: Option<usize>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            root_path: ROOT_PATH.to_string(),
            version: None,
        }
    }
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out the subtree at `root_path` instead of the project root.
    pub fn with_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    /// Selects the version at `index`; the latest version is used otherwise.
    pub fn with_version(mut self, index: usize) -> Self {
        self.version = Some(index);
        self
    }

    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    pub fn version(&self) -> Option<usize> {
        self.version
    }
}

/// Parsed input, before a version is selected.
#[derive(Debug, Clone)]
pub enum CityInput {
    Tree(Element),
    History(History),
}

impl CityInput {
    /// # Errors
    ///
    /// Returns [`CodeCityError::Parse`] for malformed JSON or a document of
    /// the wrong shape, and [`CodeCityError::History`] for an empty
    /// snapshot array.
    pub fn parse(source: &str) -> Result<Self, CodeCityError> {
        let value: Value = serde_json::from_str(source)
            .map_err(|err| CodeCityError::new_parse_error(err, source))?;

        match value {
            Value::Array(_) => {
                let snapshots: Vec<ProjectSnapshot> = serde_json::from_value(value)
                    .map_err(|err| CodeCityError::new_parse_error(err, source))?;
                debug!(snapshots = snapshots.len(); "Reading snapshot history");
                Ok(Self::History(History::from_snapshots(snapshots)?))
            }
            _ => {
                let tree: Element = serde_json::from_value(value)
                    .map_err(|err| CodeCityError::new_parse_error(err, source))?;
                debug!(elements = tree.count(); "Reading element tree");
                Ok(Self::Tree(tree))
            }
        }
    }

    /// Returns the element tree `selection` points at.
    ///
    /// A plain tree ignores the selection.
    ///
    /// # Errors
    ///
    /// Returns [`CodeCityError::History`] when the selected version or root
    /// path does not exist, or the snapshot structure is inconsistent.
    pub fn resolve(&self, selection: &Selection) -> Result<Element, CodeCityError> {
        match self {
            Self::Tree(tree) => Ok(tree.clone()),
            Self::History(history) => {
                let version = selection
                    .version
                    .unwrap_or(history.versions().len().saturating_sub(1));
                info!(
                    project = history.name(),
                    version,
                    root = selection.root_path();
                    "Selecting version"
                );
                Ok(history.hierarchy(selection.root_path(), version)?)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use codecity_core::element::ElementKind;
    use codecity_history::HistoryError;

    use super::*;

    const HISTORY: &str = r#"[
        {"name": "demo", "version": "v1", "data": [
            {"fullPath": null, "name": "demo", "type": "CONTAINER", "children": ["demo.A"]},
            {"fullPath": "demo.A", "name": "A", "type": "CLASS", "methodsCount": 3}
        ]},
        {"name": "demo", "version": "v2", "data": [
            {"fullPath": null, "name": "demo", "type": "CONTAINER", "children": ["demo.A", "demo.B"]},
            {"fullPath": "demo.A", "name": "A", "type": "CLASS", "methodsCount": 4},
            {"fullPath": "demo.B", "name": "B", "type": "INTERFACE", "methodsCount": 1}
        ]}
    ]"#;

    #[test]
    fn test_parse_tree() {
        let source = r#"{"name": "Root", "type": "CONTAINER", "children": [
            {"name": "A", "type": "CLASS", "methodsCount": 10}
        ]}"#;
        let input = CityInput::parse(source).unwrap();
        let tree = input.resolve(&Selection::default()).unwrap();
        assert_eq!(tree.kind(), ElementKind::Container);
        assert_eq!(tree.children()[0].methods_count(), 10);
    }

    #[test]
    fn test_history_defaults_to_latest_version() {
        let input = CityInput::parse(HISTORY).unwrap();
        let tree = input.resolve(&Selection::default()).unwrap();
        assert_eq!(tree.children().len(), 2);
        assert_eq!(tree.life_span(), 1);
    }

    #[test]
    fn test_history_selects_version_and_root() {
        let input = CityInput::parse(HISTORY).unwrap();

        let first = input.resolve(&Selection::new().with_version(0)).unwrap();
        assert_eq!(first.children().len(), 1);

        let sub = input
            .resolve(&Selection::new().with_root_path("demo.A"))
            .unwrap();
        assert_eq!(sub.name(), "A");
        assert_eq!(sub.life_span(), 1);
    }

    #[test]
    fn test_unknown_version_is_reported() {
        let input = CityInput::parse(HISTORY).unwrap();
        let err = input
            .resolve(&Selection::new().with_version(5))
            .unwrap_err();
        assert!(matches!(
            err,
            CodeCityError::History(HistoryError::UnknownVersion { .. })
        ));
    }

    #[test]
    fn test_malformed_json_keeps_source() {
        match CityInput::parse("{\"name\": ").unwrap_err() {
            CodeCityError::Parse { err, src } => {
                assert_eq!(src, "{\"name\": ");
                assert_eq!(err.line(), 1);
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        let err = CityInput::parse("42").unwrap_err();
        assert!(matches!(err, CodeCityError::Parse { .. }));
    }

    #[test]
    fn test_empty_history_is_reported() {
        let err = CityInput::parse("[]").unwrap_err();
        assert!(matches!(err, CodeCityError::History(HistoryError::Empty)));
    }
}
