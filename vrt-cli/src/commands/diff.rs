//! Diff command - Compare two DOM snapshots
//!
//! Loads a base and a test snapshot, runs the structural diff, stores the
//! report as `<label>_diff.json` and renders it.

use std::path::{Path, PathBuf};

use anyhow::Context;
use colored::Colorize;
use serde::Serialize;
use vrt_core::{compare_trees_with, DiffReport, DiffSummary, Tee, TracingObserver};

use super::kind_counts;
use crate::output::{self, Column, JsonOutput, OutputFormat, Render, RenderConfig, TableOutput};
use crate::store::{load_snapshot, validate_label, ReportStore};

/// A diff report plus what is only shown in table output.
#[derive(Debug, Serialize)]
pub struct DiffView {
    pub report: DiffReport,
    #[serde(skip)]
    pub summary: Option<DiffSummary>,
    #[serde(skip)]
    pub saved_to: Option<PathBuf>,
}

pub(crate) fn change_columns() -> Vec<Column> {
    vec![
        Column::new("Type", "type"),
        Column::new("Selector", "selector").with_max_width(40),
        Column::new("From", "from"),
        Column::new("To", "to"),
    ]
}

impl Render for DiffView {
    fn table(&self, config: &RenderConfig) -> String {
        let mut output = String::new();
        let (text, style) = kind_counts(&self.report.changes);

        output.push_str(&format!(
            "{} {}  {} changes ({} text, {} style)\n",
            "DIFF:".cyan().bold(),
            self.report.label.yellow(),
            self.report.change_count().to_string().cyan(),
            text,
            style
        ));

        if let Some(summary) = &self.summary {
            output.push_str(&format!("{}\n", summary.text().dimmed()));
        }
        output.push('\n');

        if self.report.has_changes() {
            output.push_str(&TableOutput::format_with_columns(
                &self.report.changes,
                &change_columns(),
                config,
            ));
            output.push('\n');
        } else {
            output.push_str(&format!("{}\n", "No DOM changes detected.".dimmed()));
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

/// Default label when none is given: `vrt_<unix seconds>`.
pub fn default_label() -> String {
    format!("vrt_{}", chrono::Utc::now().timestamp())
}

/// Run the diff command
pub async fn run(
    base_path: &Path,
    test_path: &Path,
    label: Option<&str>,
    store: Option<&ReportStore>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let label = label.map(str::to_string).unwrap_or_else(default_label);
    validate_label(&label)?;

    tracing::info!("Starting DOM diff for label: {}", label);
    let base = load_snapshot(base_path)?;
    let test = load_snapshot(test_path)?;

    let mut summary = DiffSummary::new();
    let mut tracer = TracingObserver;
    let report = compare_trees_with(&label, &base, &test, &mut Tee::new(&mut tracer, &mut summary))
        .context("Failed to compare DOM trees")?;

    let saved_to = match store {
        Some(store) => Some(store.save_diff(&report)?),
        None => None,
    };

    let view = DiffView {
        report,
        summary: Some(summary),
        saved_to,
    };
    output::print(&view, format)
}
