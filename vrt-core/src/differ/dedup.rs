//! Collapse repeated change classes.

use std::collections::HashSet;

use crate::differ::changes::{ChangeKind, ChangeRecord};
use crate::observer::{DiffObserver, NoopObserver};

/// Keep the first record of every distinct `(type, from, to)` signature.
///
/// Selector and path are not part of the signature, so the same change on
/// several elements is reported once, at its first position.
pub fn deduplicate_changes(changes: Vec<ChangeRecord>) -> Vec<ChangeRecord> {
    deduplicate_changes_with(changes, &mut NoopObserver)
}

/// [`deduplicate_changes`] with the dropped count reported to `observer`.
pub fn deduplicate_changes_with(
    changes: Vec<ChangeRecord>,
    observer: &mut dyn DiffObserver,
) -> Vec<ChangeRecord> {
    let before = changes.len();
    let mut seen: HashSet<(ChangeKind, String, String)> = HashSet::with_capacity(before);
    let mut deduped = Vec::with_capacity(before);

    for change in changes {
        let (kind, from, to) = change.signature();
        let key = (kind, from.to_string(), to.to_string());
        if seen.insert(key) {
            deduped.push(change);
        }
    }

    observer.deduplicated(before, before - deduped.len());
    deduped
}
