//! Versioned structure snapshots for CodeCity.
//!
//! A project is analysed once per version, producing a [`ProjectSnapshot`]: a
//! flat list of [`NodeRecord`]s keyed by fully qualified path, where
//! containers list the paths of their children. This crate merges a sequence
//! of such snapshots into a [`History`] and materialises the nested
//! [`Element`](codecity_core::element::Element) tree the layout consumes.
//!
//! While merging, every record receives a `lifeSpan`: the number of earlier
//! snapshots that already contained its path. Long-lived paths end up with a
//! high life span, freshly added ones with zero.
//!
//! # Example
//!
//! ```
//! # use codecity_history::{History, ROOT_PATH};
//! let json = r#"[
//!   {"name": "demo", "version": "v1", "data": [
//!     {"fullPath": null, "name": "demo", "type": "CONTAINER", "children": ["demo.A"]},
//!     {"fullPath": "demo.A", "name": "A", "type": "CLASS", "methodsCount": 3}
//!   ]},
//!   {"name": "demo", "version": "v2", "data": [
//!     {"fullPath": null, "name": "demo", "type": "CONTAINER", "children": ["demo.A"]},
//!     {"fullPath": "demo.A", "name": "A", "type": "CLASS", "methodsCount": 4}
//!   ]}
//! ]"#;
//!
//! let history = History::from_json(json).unwrap();
//! let tree = history.hierarchy(ROOT_PATH, 1).unwrap();
//! assert_eq!(tree.life_span(), 1);
//! assert_eq!(tree.children()[0].methods_count(), 4);
//! ```

pub mod error;

mod history;
mod snapshot;

pub use error::HistoryError;
pub use history::{History, ROOT_PATH};
pub use snapshot::{NodeRecord, ProjectSnapshot};
