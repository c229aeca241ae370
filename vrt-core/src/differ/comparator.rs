//! Comparator logic for diffing flattened DOM trees.

use std::collections::HashMap;

use crate::differ::changes::{ChangeRecord, DiffReport};
use crate::differ::dedup::deduplicate_changes_with;
use crate::error::Result;
use crate::flatten::flatten_dom_with;
use crate::observer::{DiffObserver, NoopObserver};
use crate::types::{DomNode, FlatNode};

/// Diff one matched pair of nodes.
///
/// Style comparison is driven by the base node's properties only; a test
/// value that is absent or empty is never reported.
fn diff_nodes(base: &FlatNode, test: &FlatNode, changes: &mut Vec<ChangeRecord>) {
    if base.text != test.text {
        changes.push(ChangeRecord::text(base, &base.text, &test.text));
    }

    for (property, base_value) in base.styles.iter() {
        let Some(test_value) = test.styles.get(property).filter(|v| !v.is_empty()) else {
            continue;
        };
        if base_value != test_value {
            changes.push(ChangeRecord::style(base, property, base_value, test_value));
        }
    }
}

/// Diff two flat sequences by structural path.
///
/// Base nodes without a test node at the same path are skipped, so
/// insertions and removals never show up. Output follows base order.
pub fn diff_flat_dom(base: &[FlatNode], test: &[FlatNode]) -> Vec<ChangeRecord> {
    diff_flat_dom_with(base, test, &mut NoopObserver)
}

/// [`diff_flat_dom`] with progress reported to `observer`.
pub fn diff_flat_dom_with(
    base: &[FlatNode],
    test: &[FlatNode],
    observer: &mut dyn DiffObserver,
) -> Vec<ChangeRecord> {
    observer.diff_started(base.len(), test.len());

    // Last write wins on duplicate paths
    let test_by_path: HashMap<&str, &FlatNode> =
        test.iter().map(|n| (n.path.as_str(), n)).collect();

    let mut changes = Vec::new();
    for base_node in base {
        let Some(test_node) = test_by_path.get(base_node.path.as_str()) else {
            observer.node_unmatched(base_node);
            continue;
        };
        observer.node_matched(base_node);

        let first_new = changes.len();
        diff_nodes(base_node, test_node, &mut changes);
        for change in &changes[first_new..] {
            observer.change_detected(change);
        }
    }

    observer.diff_finished(changes.len());
    changes
}

/// Full pipeline: flatten both trees, diff, deduplicate.
pub fn compare_trees(label: &str, base: &DomNode, test: &DomNode) -> Result<DiffReport> {
    compare_trees_with(label, base, test, &mut NoopObserver)
}

/// [`compare_trees`] with progress reported to `observer`.
///
/// A structural fault in either tree aborts the run before any diffing.
pub fn compare_trees_with(
    label: &str,
    base: &DomNode,
    test: &DomNode,
    observer: &mut dyn DiffObserver,
) -> Result<DiffReport> {
    let base_flat = flatten_dom_with(base, observer)?;
    let test_flat = flatten_dom_with(test, observer)?;

    let changes = diff_flat_dom_with(&base_flat, &test_flat, observer);
    let changes = deduplicate_changes_with(changes, observer);

    Ok(DiffReport::new(label, changes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::changes::{ChangeKind, DiffSummary};
    use crate::error::VrtError;
    use crate::flatten::flatten_dom;
    use crate::types::{ComputedStyles, StyleProperty};

    fn make_flat(path: &str, selector: &str, text: &str, styles: ComputedStyles) -> FlatNode {
        FlatNode {
            path: path.to_string(),
            selector: selector.to_string(),
            text: text.to_string(),
            styles,
            tag: selector.split(&['#', '.'][..]).next().unwrap_or("").to_string(),
        }
    }

    fn page(title: &str, bg: &str) -> DomNode {
        DomNode::new("body")
            .with_style(StyleProperty::BackgroundColor, bg)
            .with_child(
                DomNode::new("p")
                    .with_attr("class", "title")
                    .with_text(title)
                    .with_style(StyleProperty::Color, "rgb(0, 0, 0)"),
            )
            .with_child(DomNode::new("div").with_child(DomNode::new("span").with_text("x")))
    }

    #[test]
    fn test_identical_trees_have_no_changes() {
        let tree = page("Hello", "#fff");
        let flat = flatten_dom(&tree).unwrap();
        let copy = flatten_dom(&tree.clone()).unwrap();

        assert!(diff_flat_dom(&flat, &copy).is_empty());
    }

    #[test]
    fn test_text_change() {
        let base = vec![make_flat(" > P:nth-child(1)", "p.title", "Hello", ComputedStyles::new())];
        let test = vec![make_flat(
            " > P:nth-child(1)",
            "p.title",
            "Hello World",
            ComputedStyles::new(),
        )];

        let changes = diff_flat_dom(&base, &test);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].kind, ChangeKind::Text);
        assert_eq!(changes[0].selector, "p.title");
        assert_eq!(changes[0].from, "Hello");
        assert_eq!(changes[0].to, "Hello World");
    }

    #[test]
    fn test_style_change() {
        let base = vec![make_flat(
            " > DIV:nth-child(1)",
            "div",
            "",
            ComputedStyles::new().with(StyleProperty::BackgroundColor, "#fff"),
        )];
        let test = vec![make_flat(
            " > DIV:nth-child(1)",
            "div",
            "",
            ComputedStyles::new().with(StyleProperty::BackgroundColor, "#000"),
        )];

        let changes = diff_flat_dom(&base, &test);

        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0].kind,
            ChangeKind::Style(StyleProperty::BackgroundColor)
        );
        assert_eq!(changes[0].from, "#fff");
        assert_eq!(changes[0].to, "#000");
    }

    #[test]
    fn test_style_only_in_test_is_ignored() {
        let base = vec![make_flat(" > DIV:nth-child(1)", "div", "", ComputedStyles::new())];
        let test = vec![make_flat(
            " > DIV:nth-child(1)",
            "div",
            "",
            ComputedStyles::new()
                .with(StyleProperty::Color, "red")
                .with(StyleProperty::Width, "100px"),
        )];

        assert!(diff_flat_dom(&base, &test).is_empty());
    }

    #[test]
    fn test_missing_or_empty_test_value_is_ignored() {
        let base = vec![make_flat(
            " > DIV:nth-child(1)",
            "div",
            "",
            ComputedStyles::new()
                .with(StyleProperty::Color, "red")
                .with(StyleProperty::Width, "100px"),
        )];
        let test = vec![make_flat(
            " > DIV:nth-child(1)",
            "div",
            "",
            ComputedStyles::new().with(StyleProperty::Width, ""),
        )];

        assert!(diff_flat_dom(&base, &test).is_empty());
    }

    #[test]
    fn test_unmatched_base_nodes_are_skipped() {
        let base = vec![
            make_flat(" > A:nth-child(1)", "a", "old", ComputedStyles::new()),
            make_flat(" > B:nth-child(2)", "b", "gone", ComputedStyles::new()),
        ];
        let test = vec![
            make_flat(" > A:nth-child(1)", "a", "new", ComputedStyles::new()),
            make_flat(" > C:nth-child(2)", "c", "added", ComputedStyles::new()),
        ];

        let mut summary = DiffSummary::default();
        let changes = diff_flat_dom_with(&base, &test, &mut summary);

        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, " > A:nth-child(1)");
        assert_eq!(summary.nodes_matched, 1);
        assert_eq!(summary.nodes_unmatched, 1);
    }

    #[test]
    fn test_text_before_styles_in_property_order() {
        let base = vec![make_flat(
            " > P:nth-child(1)",
            "p",
            "a",
            ComputedStyles::new()
                .with(StyleProperty::Height, "1px")
                .with(StyleProperty::FontSize, "12px")
                .with(StyleProperty::BackgroundColor, "white"),
        )];
        let test = vec![make_flat(
            " > P:nth-child(1)",
            "p",
            "b",
            ComputedStyles::new()
                .with(StyleProperty::Height, "2px")
                .with(StyleProperty::FontSize, "14px")
                .with(StyleProperty::BackgroundColor, "black"),
        )];

        let kinds: Vec<String> = diff_flat_dom(&base, &test)
            .iter()
            .map(|c| c.kind.to_string())
            .collect();

        assert_eq!(
            kinds,
            vec![
                "text",
                "style:backgroundColor",
                "style:fontSize",
                "style:height"
            ]
        );
    }

    #[test]
    fn test_output_follows_base_order() {
        let base = vec![
            make_flat(" > X:nth-child(1)", "x", "1", ComputedStyles::new()),
            make_flat(" > Y:nth-child(2)", "y", "1", ComputedStyles::new()),
        ];
        // Test sequence in reverse order
        let test = vec![
            make_flat(" > Y:nth-child(2)", "y", "2", ComputedStyles::new()),
            make_flat(" > X:nth-child(1)", "x", "2", ComputedStyles::new()),
        ];

        let selectors: Vec<String> = diff_flat_dom(&base, &test)
            .into_iter()
            .map(|c| c.selector)
            .collect();
        assert_eq!(selectors, vec!["x", "y"]);
    }

    #[test]
    fn test_duplicate_test_paths_last_wins() {
        let base = vec![make_flat(" > P:nth-child(1)", "p", "a", ComputedStyles::new())];
        let test = vec![
            make_flat(" > P:nth-child(1)", "p", "first", ComputedStyles::new()),
            make_flat(" > P:nth-child(1)", "p", "second", ComputedStyles::new()),
        ];

        let changes = diff_flat_dom(&base, &test);
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].to, "second");
    }

    #[test]
    fn test_compare_trees_end_to_end() {
        let base = page("Hello", "#fff");
        let test = page("Hello World", "#000");

        let mut summary = DiffSummary::default();
        let report = compare_trees_with("home", &base, &test, &mut summary).unwrap();

        assert_eq!(report.label, "home");
        assert_eq!(report.change_count(), 2);
        assert_eq!(
            report.changes[0].kind,
            ChangeKind::Style(StyleProperty::BackgroundColor)
        );
        assert_eq!(report.changes[0].selector, "body");
        assert_eq!(report.changes[1].kind, ChangeKind::Text);
        assert_eq!(report.changes[1].selector, "p.title");
        assert_eq!(summary.nodes_flattened, 8);
        assert_eq!(summary.nodes_matched, 4);
    }

    #[test]
    fn test_compare_trees_dedups_repeated_changes() {
        let item = |color: &str| {
            DomNode::new("li")
                .with_text("item")
                .with_style(StyleProperty::Color, color)
        };
        let base = DomNode::new("ul")
            .with_child(item("red"))
            .with_child(item("red"));
        let test = DomNode::new("ul")
            .with_child(item("blue"))
            .with_child(item("blue"));

        let report = compare_trees("list", &base, &test).unwrap();

        assert_eq!(report.change_count(), 1);
        assert_eq!(report.changes[0].path, " > UL:nth-child(1) > LI:nth-child(1)");
    }

    #[test]
    fn test_compare_trees_structural_fault_aborts() {
        let base = page("Hello", "#fff");
        let test = DomNode::new("body").with_child(DomNode::default());

        let err = compare_trees("broken", &base, &test).unwrap_err();
        assert!(matches!(err, VrtError::StructuralFault { .. }));
    }
}
