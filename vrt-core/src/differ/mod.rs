//! Structural diff engine for flattened DOM trees.
//!
//! Nodes are matched across trees by structural path only. Matched pairs are
//! compared on trimmed text and on the computed style properties reported for
//! the base node; the resulting records are then deduplicated by
//! `(type, from, to)`.
//!
//! # Example
//!
//! ```
//! use vrt_core::differ::{compare_trees, ChangeKind};
//! use vrt_core::DomNode;
//!
//! let base = DomNode::new("body").with_child(DomNode::new("h1").with_text("Hello"));
//! let test = DomNode::new("body").with_child(DomNode::new("h1").with_text("Hello World"));
//!
//! let report = compare_trees("home", &base, &test).unwrap();
//! assert_eq!(report.changes.len(), 1);
//! assert_eq!(report.changes[0].kind, ChangeKind::Text);
//! ```

pub mod changes;
pub mod comparator;
pub mod dedup;

pub use changes::{ChangeKind, ChangeRecord, DiffReport, DiffSummary};
pub use comparator::{compare_trees, compare_trees_with, diff_flat_dom, diff_flat_dom_with};
pub use dedup::{deduplicate_changes, deduplicate_changes_with};
