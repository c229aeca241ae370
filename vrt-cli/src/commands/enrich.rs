//! Enrich command - Attach fix suggestions to a stored diff
//!
//! Reads `<label>_diff.json`, asks the configured model for a suggestion per
//! change and writes `<label>_diff_with_ai.json`.

use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use vrt_core::DiffReport;

use super::diff::change_columns;
use crate::config::EnrichSettings;
use crate::enrich::{enrich_report, EnrichedReport, OllamaClient};
use crate::output::{self, Column, JsonOutput, OutputFormat, Render, RenderConfig, TableOutput};
use crate::store::ReportStore;

/// An enriched report plus where it was written.
#[derive(Debug, Serialize)]
pub struct EnrichedView {
    pub report: EnrichedReport,
    #[serde(skip)]
    pub saved_to: Option<PathBuf>,
}

impl Render for EnrichedView {
    fn table(&self, config: &RenderConfig) -> String {
        let mut output = format!(
            "{} {}  {} changes with suggestions\n\n",
            "ENRICHED:".cyan().bold(),
            self.report.label.yellow(),
            self.report.changes.len().to_string().cyan()
        );

        if self.report.changes.is_empty() {
            output.push_str(&format!("{}\n", "No DOM changes detected.".dimmed()));
        } else {
            let mut columns = change_columns();
            columns.push(Column::new("Suggestion", "ai_suggestion"));
            output.push_str(&TableOutput::format_with_columns(
                &self.report.changes,
                &columns,
                config,
            ));
            output.push('\n');
        }

        if let Some(path) = &self.saved_to {
            output.push_str(&format!("\nSaved to {}", path.display().to_string().green()));
        }

        output
    }

    fn json(&self) -> String {
        JsonOutput::format(&self.report)
    }
}

/// Output is stored under the requested label even when the stored report
/// carries a different one.
fn keyed_by(mut report: DiffReport, label: &str) -> DiffReport {
    if report.label != label {
        tracing::warn!(
            "Stored report '{}' carries label '{}', keeping '{}'",
            label,
            report.label,
            label
        );
        report.label = label.to_string();
    }
    report
}

/// Run the enrich command
pub async fn run(
    label: &str,
    store: &ReportStore,
    settings: EnrichSettings,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let report = keyed_by(store.load_diff(label)?, label);

    let enriched = if report.has_changes() {
        let client = OllamaClient::new(&settings)?;
        tracing::info!("Querying model {} at {}", settings.model, client.endpoint());
        enrich_report(report, &client)
            .await
            .with_context(|| format!("Failed to enrich '{}'", label))?
    } else {
        tracing::info!("No changes in '{}', skipping model queries", label);
        EnrichedReport {
            label: report.label,
            changes: Vec::new(),
        }
    };

    let saved_to = store.save_enriched(&enriched)?;
    tracing::info!("Enriched diff saved to {}", saved_to.display());

    let view = EnrichedView {
        report: enriched,
        saved_to: Some(saved_to),
    };
    output::print(&view, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrich::EnrichedChange;
    use vrt_core::{ChangeKind, ChangeRecord, StyleProperty};

    #[test]
    fn test_keyed_by_requested_label() {
        let stored = DiffReport::new("nightly", Vec::new());
        assert_eq!(keyed_by(stored, "release").label, "release");

        let stored = DiffReport::new("release", Vec::new());
        assert_eq!(keyed_by(stored, "release").label, "release");
    }

    #[test]
    fn test_table_shows_suggestion_column() {
        colored::control::set_override(false);
        let view = EnrichedView {
            report: EnrichedReport {
                label: "home".to_string(),
                changes: vec![EnrichedChange {
                    change: ChangeRecord::new(
                        "body".to_string(),
                        " > BODY:nth-child(1)".to_string(),
                        ChangeKind::Style(StyleProperty::BackgroundColor),
                        "#fff".to_string(),
                        "#000".to_string(),
                    ),
                    ai_suggestion: "Revert background to #fff.".to_string(),
                }],
            },
            saved_to: None,
        };
        let config = RenderConfig::new(OutputFormat::Table);
        let table = view.table(&config);

        assert!(table.contains("Suggestion"));
        assert!(table.contains("Revert background to #fff."));
        assert!(table.contains("style:backgroundColor"));
    }
}
