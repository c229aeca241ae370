//! Tree flattening: nested `DomNode` trees to preorder `FlatNode` sequences.

use crate::error::{Result, VrtError};
use crate::observer::{DiffObserver, NoopObserver};
use crate::selector::build_selector;
use crate::types::{DomNode, FlatNode};

/// Structural path of a node given its parent's path and 1-based sibling index.
pub fn node_path(parent_path: &str, tag: &str, nth: usize) -> String {
    format!("{} > {}:nth-child({})", parent_path, tag.to_uppercase(), nth)
}

/// Flatten a tree in preorder.
pub fn flatten_dom(root: &DomNode) -> Result<Vec<FlatNode>> {
    flatten_dom_with(root, &mut NoopObserver)
}

/// Flatten a tree in preorder, reporting progress to `observer`.
///
/// Fails with [`VrtError::StructuralFault`] on the first node without a tag;
/// nothing is returned for the rest of the tree. The walk uses an explicit
/// stack, so depth is bounded only by memory.
pub fn flatten_dom_with(
    root: &DomNode,
    observer: &mut dyn DiffObserver,
) -> Result<Vec<FlatNode>> {
    let mut flat = Vec::with_capacity(root.node_count());
    // (node, parent path, 1-based sibling index)
    let mut pending: Vec<(&DomNode, String, usize)> = vec![(root, String::new(), 1)];

    while let Some((node, parent_path, nth)) = pending.pop() {
        if node.tag.trim().is_empty() {
            return Err(VrtError::missing_tag(&parent_path, nth));
        }

        let path = node_path(&parent_path, &node.tag, nth);
        // Reversed so the first child is popped next
        for (i, child) in node.children.iter().enumerate().rev() {
            pending.push((child, path.clone(), i + 1));
        }

        let entry = FlatNode {
            path,
            selector: build_selector(&node.tag, &node.attributes),
            text: node.text.trim().to_string(),
            styles: node.computed_styles.clone(),
            tag: node.tag.clone(),
        };
        observer.node_flattened(&entry);
        flat.push(entry);
    }

    observer.flatten_finished(flat.len());
    Ok(flat)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StyleProperty;
    use std::collections::HashSet;

    fn sample_tree() -> DomNode {
        DomNode::new("body")
            .with_child(
                DomNode::new("div")
                    .with_attr("id", "main")
                    .with_child(DomNode::new("p").with_text("  Hello  world \n"))
                    .with_child(DomNode::new("p").with_attr("class", "title")),
            )
            .with_child(DomNode::new("footer").with_style(StyleProperty::Color, "red"))
    }

    #[test]
    fn test_root_path() {
        let flat = flatten_dom(&DomNode::new("body")).unwrap();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].path, " > BODY:nth-child(1)");
        assert_eq!(flat[0].selector, "body");
        assert_eq!(flat[0].tag, "body");
    }

    #[test]
    fn test_preorder_and_paths() {
        let flat = flatten_dom(&sample_tree()).unwrap();
        let paths: Vec<&str> = flat.iter().map(|n| n.path.as_str()).collect();

        assert_eq!(
            paths,
            vec![
                " > BODY:nth-child(1)",
                " > BODY:nth-child(1) > DIV:nth-child(1)",
                " > BODY:nth-child(1) > DIV:nth-child(1) > P:nth-child(1)",
                " > BODY:nth-child(1) > DIV:nth-child(1) > P:nth-child(2)",
                " > BODY:nth-child(1) > FOOTER:nth-child(2)",
            ]
        );
        assert_eq!(flat[1].selector, "div#main");
        assert_eq!(flat[3].selector, "p.title");
    }

    #[test]
    fn test_text_is_trimmed_not_collapsed() {
        let flat = flatten_dom(&sample_tree()).unwrap();
        assert_eq!(flat[2].text, "Hello  world");
    }

    #[test]
    fn test_styles_are_copied() {
        let flat = flatten_dom(&sample_tree()).unwrap();
        assert_eq!(flat[4].styles.get(StyleProperty::Color), Some("red"));
        assert!(flat[0].styles.is_empty());
    }

    #[test]
    fn test_paths_are_unique() {
        // Same tag repeated at several depths and positions
        let mut root = DomNode::new("body");
        for _ in 0..4 {
            let mut div = DomNode::new("div");
            for _ in 0..3 {
                div = div.with_child(DomNode::new("div").with_child(DomNode::new("div")));
            }
            root = root.with_child(div);
        }

        let flat = flatten_dom(&root).unwrap();
        assert_eq!(flat.len(), root.node_count());

        let unique: HashSet<&str> = flat.iter().map(|n| n.path.as_str()).collect();
        assert_eq!(unique.len(), flat.len());
    }

    #[test]
    fn test_missing_tag_is_structural_fault() {
        let root = DomNode::new("body")
            .with_child(DomNode::new("div"))
            .with_child(DomNode::default().with_text("orphan"));

        let err = flatten_dom(&root).unwrap_err();
        match err {
            VrtError::StructuralFault {
                parent_path, index, ..
            } => {
                assert_eq!(parent_path, " > BODY:nth-child(1)");
                assert_eq!(index, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_root_tag() {
        let err = flatten_dom(&DomNode::default()).unwrap_err();
        assert!(matches!(
            err,
            VrtError::StructuralFault { index: 1, .. }
        ));
    }

    #[test]
    fn test_deep_tree() {
        let mut node = DomNode::new("span").with_text("leaf");
        for _ in 1..500 {
            node = DomNode::new("div").with_child(node);
        }

        let flat = flatten_dom(&node).unwrap();
        assert_eq!(flat.len(), 500);
        assert_eq!(flat[0].path, " > DIV:nth-child(1)");
        assert!(flat[499].path.ends_with(" > DIV:nth-child(1) > SPAN:nth-child(1)"));
        assert_eq!(flat[499].path.matches(" > ").count(), 500);
        assert_eq!(flat[499].text, "leaf");
    }

    #[test]
    fn test_node_path() {
        assert_eq!(
            node_path(" > BODY:nth-child(1)", "section", 3),
            " > BODY:nth-child(1) > SECTION:nth-child(3)"
        );
    }
}
