//! Progress sinks for flattening and diffing.
//!
//! The engine never prints. Callers that want progress pass a
//! [`DiffObserver`]; every method has an empty default so an observer only
//! implements what it cares about.

use crate::differ::ChangeRecord;
use crate::types::FlatNode;

/// Receives events from the flattener and the diff engine.
pub trait DiffObserver {
    /// A node was appended to the flat sequence.
    fn node_flattened(&mut self, _node: &FlatNode) {}

    /// A whole tree finished flattening.
    fn flatten_finished(&mut self, _node_count: usize) {}

    /// Diffing is about to start.
    fn diff_started(&mut self, _base_count: usize, _test_count: usize) {}

    /// A base node had a structural counterpart in the test tree.
    fn node_matched(&mut self, _base: &FlatNode) {}

    /// A base node had no structural counterpart and was skipped.
    fn node_unmatched(&mut self, _base: &FlatNode) {}

    /// A difference was recorded.
    fn change_detected(&mut self, _change: &ChangeRecord) {}

    /// Diffing finished with `change_count` raw (pre-dedup) changes.
    fn diff_finished(&mut self, _change_count: usize) {}

    /// Deduplication dropped `dropped` records out of `before`.
    fn deduplicated(&mut self, _before: usize, _dropped: usize) {}
}

/// Observer that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl DiffObserver for NoopObserver {}

/// Observer that forwards events to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl DiffObserver for TracingObserver {
    fn flatten_finished(&mut self, node_count: usize) {
        tracing::debug!(target: "vrt_core::flatten", node_count, "Flattened DOM tree");
    }

    fn diff_started(&mut self, base_count: usize, test_count: usize) {
        tracing::info!(
            target: "vrt_core::differ",
            base_count,
            test_count,
            "Comparing DOM trees"
        );
    }

    fn node_unmatched(&mut self, base: &FlatNode) {
        tracing::trace!(target: "vrt_core::differ", path = %base.path, "No counterpart in test tree");
    }

    fn change_detected(&mut self, change: &ChangeRecord) {
        tracing::debug!(
            target: "vrt_core::differ",
            kind = %change.kind,
            selector = %change.selector,
            "{} -> {}",
            change.from,
            change.to
        );
    }

    fn diff_finished(&mut self, change_count: usize) {
        tracing::info!(target: "vrt_core::differ", "Found {} changes", change_count);
    }

    fn deduplicated(&mut self, before: usize, dropped: usize) {
        tracing::debug!(
            target: "vrt_core::differ",
            before,
            dropped,
            "Collapsed duplicate changes"
        );
    }
}

/// Fans events out to two observers.
pub struct Tee<'a> {
    first: &'a mut dyn DiffObserver,
    second: &'a mut dyn DiffObserver,
}

impl<'a> Tee<'a> {
    pub fn new(first: &'a mut dyn DiffObserver, second: &'a mut dyn DiffObserver) -> Self {
        Self { first, second }
    }
}

impl DiffObserver for Tee<'_> {
    fn node_flattened(&mut self, node: &FlatNode) {
        self.first.node_flattened(node);
        self.second.node_flattened(node);
    }

    fn flatten_finished(&mut self, node_count: usize) {
        self.first.flatten_finished(node_count);
        self.second.flatten_finished(node_count);
    }

    fn diff_started(&mut self, base_count: usize, test_count: usize) {
        self.first.diff_started(base_count, test_count);
        self.second.diff_started(base_count, test_count);
    }

    fn node_matched(&mut self, base: &FlatNode) {
        self.first.node_matched(base);
        self.second.node_matched(base);
    }

    fn node_unmatched(&mut self, base: &FlatNode) {
        self.first.node_unmatched(base);
        self.second.node_unmatched(base);
    }

    fn change_detected(&mut self, change: &ChangeRecord) {
        self.first.change_detected(change);
        self.second.change_detected(change);
    }

    fn diff_finished(&mut self, change_count: usize) {
        self.first.diff_finished(change_count);
        self.second.diff_finished(change_count);
    }

    fn deduplicated(&mut self, before: usize, dropped: usize) {
        self.first.deduplicated(before, dropped);
        self.second.deduplicated(before, dropped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::differ::DiffSummary;
    use crate::types::ComputedStyles;

    fn flat(path: &str) -> FlatNode {
        FlatNode {
            path: path.to_string(),
            selector: "div".to_string(),
            text: String::new(),
            styles: ComputedStyles::default(),
            tag: "div".to_string(),
        }
    }

    #[test]
    fn test_tee_forwards_to_both() {
        let mut a = DiffSummary::default();
        let mut b = DiffSummary::default();
        {
            let mut tee = Tee::new(&mut a, &mut b);
            tee.node_unmatched(&flat(" > DIV:nth-child(1)"));
            tee.node_matched(&flat(" > DIV:nth-child(2)"));
        }
        assert_eq!(a.nodes_unmatched, 1);
        assert_eq!(b.nodes_unmatched, 1);
        assert_eq!(a.nodes_matched, 1);
        assert_eq!(b.nodes_matched, 1);
    }
}
