//! VRT Core - DOM flattening and structural diff engine.
//!
//! This crate compares two renderings of a web page by their DOM trees:
//! text content and a fixed set of computed style properties. It performs no
//! I/O; callers hand it fully materialized trees and get a deduplicated list
//! of changes back.
//!
//! # Pipeline
//!
//! - **Selector builder**: `tag#id.class1.class2` for each node
//! - **Flattener**: preorder walk assigning each node a unique structural path
//! - **Diff engine**: matches nodes by identical path, compares text and styles
//! - **Deduplicator**: keeps the first change of each `(type, from, to)` class
//!
//! Progress is reported through an injectable [`DiffObserver`]; the engine
//! itself is silent.
//!
//! # Usage
//!
//! ```
//! use vrt_core::{compare_trees, DomNode, StyleProperty};
//!
//! let base = DomNode::new("body").with_style(StyleProperty::BackgroundColor, "#fff");
//! let test = DomNode::new("body").with_style(StyleProperty::BackgroundColor, "#000");
//!
//! let report = compare_trees("home", &base, &test)?;
//! assert_eq!(report.changes[0].kind.to_string(), "style:backgroundColor");
//! # Ok::<(), vrt_core::VrtError>(())
//! ```

pub mod differ;
pub mod error;
pub mod flatten;
pub mod observer;
pub mod selector;
pub mod types;

pub use differ::{
    compare_trees, compare_trees_with, deduplicate_changes, diff_flat_dom, diff_flat_dom_with,
    ChangeKind, ChangeRecord, DiffReport, DiffSummary,
};
pub use error::{Result, VrtError};
pub use flatten::{flatten_dom, flatten_dom_with};
pub use observer::{DiffObserver, NoopObserver, Tee, TracingObserver};
pub use selector::build_selector;
pub use types::{ComputedStyles, DomNode, FlatNode, StyleProperty};
