//! Command implementations for VRT CLI
//!
//! Each command module provides a `run` function that executes the command logic.

pub mod diff;
pub mod enrich;
pub mod show;

use vrt_core::ChangeRecord;

/// Count text and style changes.
pub(crate) fn kind_counts<'a>(changes: impl IntoIterator<Item = &'a ChangeRecord>) -> (usize, usize) {
    changes
        .into_iter()
        .fold((0, 0), |(text, style), change| {
            if change.kind.is_style() {
                (text, style + 1)
            } else {
                (text + 1, style)
            }
        })
}
