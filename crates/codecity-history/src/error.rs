//! Error types for snapshot ingestion.

use thiserror::Error;

use codecity_core::element::ElementKind;

/// Errors raised while decoding snapshots or materialising a hierarchy.
#[derive(Debug, Error)]
pub enum HistoryError {
    #[error("failed to decode snapshots: {0}")]
    Json(#[from] serde_json::Error),

    #[error("history contains no snapshots")]
    Empty,

    #[error("version index {index} is out of range ({available} versions available)")]
    UnknownVersion { index: usize, available: usize },

    #[error("path `{path}` does not exist in version `{version}`")]
    UnknownPath { path: String, version: String },

    #[error("cycle detected: `{path}` is its own ancestor")]
    Cycle { path: String },

    #[error("`{path}` is listed under both `{first}` and `{second}`")]
    SharedPath {
        path: String,
        first: String,
        second: String,
    },

    #[error("`{path}` is a {kind} element but lists children")]
    ChildrenOnLeaf { path: String, kind: ElementKind },
}
