//! Change types and result structures for DOM diffs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::observer::DiffObserver;
use crate::types::{FlatNode, StyleProperty};

/// Kind of difference detected on a matched node.
///
/// Serialized as `"text"` or `"style:<property>"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ChangeKind {
    Text,
    Style(StyleProperty),
}

impl ChangeKind {
    const STYLE_PREFIX: &'static str = "style:";

    pub fn is_style(&self) -> bool {
        matches!(self, ChangeKind::Style(_))
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Text => f.write_str("text"),
            ChangeKind::Style(p) => write!(f, "{}{}", Self::STYLE_PREFIX, p),
        }
    }
}

impl FromStr for ChangeKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s == "text" {
            return Ok(ChangeKind::Text);
        }
        match s.strip_prefix(Self::STYLE_PREFIX) {
            Some(prop) => prop.parse().map(ChangeKind::Style),
            None => Err(format!("Unknown change type: '{}'", s)),
        }
    }
}

impl From<ChangeKind> for String {
    fn from(kind: ChangeKind) -> Self {
        kind.to_string()
    }
}

impl TryFrom<String> for ChangeKind {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// A single difference between a base node and its structural counterpart.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// Selector of the base node
    pub selector: String,

    /// Structural path of the base node
    pub path: String,

    /// What changed (`text` or `style:<property>`)
    #[serde(rename = "type")]
    pub kind: ChangeKind,

    /// Value in the base tree
    pub from: String,

    /// Value in the test tree
    pub to: String,
}

impl ChangeRecord {
    pub fn new(
        selector: String,
        path: String,
        kind: ChangeKind,
        from: String,
        to: String,
    ) -> Self {
        Self {
            selector,
            path,
            kind,
            from,
            to,
        }
    }

    /// Text change on `base`.
    pub fn text(base: &FlatNode, from: &str, to: &str) -> Self {
        Self::new(
            base.selector.clone(),
            base.path.clone(),
            ChangeKind::Text,
            from.to_string(),
            to.to_string(),
        )
    }

    /// Style change on `base`.
    pub fn style(base: &FlatNode, property: StyleProperty, from: &str, to: &str) -> Self {
        Self::new(
            base.selector.clone(),
            base.path.clone(),
            ChangeKind::Style(property),
            from.to_string(),
            to.to_string(),
        )
    }

    /// Signature used for deduplication. Location is not part of it.
    pub fn signature(&self) -> (ChangeKind, &str, &str) {
        (self.kind, self.from.as_str(), self.to.as_str())
    }
}

/// Counters gathered while flattening and diffing.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffSummary {
    pub nodes_flattened: u32,
    pub nodes_matched: u32,
    pub nodes_unmatched: u32,

    pub text_changes: u32,
    pub style_changes: u32,

    pub duplicates_collapsed: u32,
}

impl DiffSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment counters for a detected change.
    pub fn record(&mut self, kind: ChangeKind) {
        match kind {
            ChangeKind::Text => self.text_changes += 1,
            ChangeKind::Style(_) => self.style_changes += 1,
        }
    }

    /// One-line account of a run, as shown under the report header.
    pub fn text(&self) -> String {
        let mut text = format!(
            "{} nodes flattened, {} matched, {} unmatched",
            self.nodes_flattened, self.nodes_matched, self.nodes_unmatched
        );
        if self.duplicates_collapsed > 0 {
            text.push_str(&format!(
                ", {} duplicates collapsed",
                self.duplicates_collapsed
            ));
        }
        text
    }
}

impl DiffObserver for DiffSummary {
    fn node_flattened(&mut self, _node: &FlatNode) {
        self.nodes_flattened += 1;
    }

    fn node_matched(&mut self, _base: &FlatNode) {
        self.nodes_matched += 1;
    }

    fn node_unmatched(&mut self, _base: &FlatNode) {
        self.nodes_unmatched += 1;
    }

    fn change_detected(&mut self, change: &ChangeRecord) {
        self.record(change.kind);
    }

    fn deduplicated(&mut self, _before: usize, dropped: usize) {
        self.duplicates_collapsed += dropped as u32;
    }
}

/// Result of one comparison run, in the shape persisted as `<label>_diff.json`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffReport {
    /// Identifier of the comparison run
    pub label: String,

    /// Deduplicated changes in base-tree order
    pub changes: Vec<ChangeRecord>,
}

impl DiffReport {
    pub fn new(label: impl Into<String>, changes: Vec<ChangeRecord>) -> Self {
        Self {
            label: label.into(),
            changes,
        }
    }

    /// Decode a report from JSON. Extra per-change fields are ignored.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Check if there are any changes.
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Get change count.
    pub fn change_count(&self) -> usize {
        self.changes.len()
    }
}
