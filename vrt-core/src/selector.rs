//! Human-readable selectors for DOM nodes.

use std::collections::HashMap;

/// Build a CSS-like selector from a tag and its attributes.
///
/// `tag`, then `#id` when the id is non-empty, then `.a.b` for the class
/// list. Newlines inside the class attribute are removed before splitting.
pub fn build_selector(tag: &str, attributes: &HashMap<String, String>) -> String {
    let mut selector = tag.to_string();

    if let Some(id) = attributes.get("id").filter(|id| !id.is_empty()) {
        selector.push('#');
        selector.push_str(id);
    }

    if let Some(class) = attributes.get("class") {
        let normalized = class.replace('\n', "");
        let classes: Vec<&str> = normalized.split_whitespace().collect();
        if !classes.is_empty() {
            selector.push('.');
            selector.push_str(&classes.join("."));
        }
    }

    selector
}
