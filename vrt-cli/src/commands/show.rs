//! Show command - Render a stored report

use super::diff::DiffView;
use super::enrich::EnrichedView;
use crate::output::{self, OutputFormat};
use crate::store::ReportStore;

/// Run the show command
pub async fn run(
    label: &str,
    enriched: bool,
    store: &ReportStore,
    format: OutputFormat,
) -> anyhow::Result<()> {
    if enriched {
        let report = store.load_enriched(label)?;
        let view = EnrichedView {
            report,
            saved_to: None,
        };
        return output::print(&view, format);
    }

    let report = store.load_diff(label)?;
    let view = DiffView {
        report,
        summary: None,
        saved_to: None,
    };
    output::print(&view, format)
}
