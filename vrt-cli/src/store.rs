//! Report persistence.
//!
//! Reports are keyed by label: `<label>_diff.json` for the raw diff and
//! `<label>_diff_with_ai.json` for the enriched one, both in one directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use serde::Serialize;
use vrt_core::{DiffReport, DomNode};

use crate::enrich::EnrichedReport;

/// Directory of stored reports.
#[derive(Debug, Clone)]
pub struct ReportStore {
    root: PathBuf,
}

impl ReportStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the raw diff for `label`.
    pub fn diff_path(&self, label: &str) -> PathBuf {
        self.root.join(format!("{}_diff.json", label))
    }

    /// Path of the enriched diff for `label`.
    pub fn enriched_path(&self, label: &str) -> PathBuf {
        self.root.join(format!("{}_diff_with_ai.json", label))
    }

    pub fn save_diff(&self, report: &DiffReport) -> anyhow::Result<PathBuf> {
        validate_label(&report.label)?;
        let path = self.diff_path(&report.label);
        write_json(&path, report)?;
        Ok(path)
    }

    pub fn load_diff(&self, label: &str) -> anyhow::Result<DiffReport> {
        validate_label(label)?;
        read_json(&self.diff_path(label))
    }

    pub fn save_enriched(&self, report: &EnrichedReport) -> anyhow::Result<PathBuf> {
        validate_label(&report.label)?;
        let path = self.enriched_path(&report.label);
        write_json(&path, report)?;
        Ok(path)
    }

    pub fn load_enriched(&self, label: &str) -> anyhow::Result<EnrichedReport> {
        validate_label(label)?;
        read_json(&self.enriched_path(label))
    }
}

/// Labels become file names, so they must not be empty or contain separators.
pub fn validate_label(label: &str) -> anyhow::Result<()> {
    if label.trim().is_empty() {
        bail!("label must not be empty");
    }
    if label.contains(['/', '\\']) || label == "." || label == ".." {
        bail!("label '{}' must not contain path separators", label);
    }
    Ok(())
}

/// Load a DOM snapshot produced by the extraction step.
pub fn load_snapshot(path: &Path) -> anyhow::Result<DomNode> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read DOM snapshot {}", path.display()))?;
    DomNode::from_json(&content)
        .with_context(|| format!("Invalid DOM snapshot {}", path.display()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("No report found at {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid report {}", path.display()))
}
