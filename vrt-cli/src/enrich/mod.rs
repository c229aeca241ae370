//! Fix suggestions for detected changes.
//!
//! Each change of a stored report is turned into a short prompt, sent to a
//! [`SuggestionProvider`], and the trimmed answer is attached as
//! `ai_suggestion`. Requests go out one at a time in report order.

mod ollama;

pub use ollama::OllamaClient;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use vrt_core::{ChangeKind, ChangeRecord, DiffReport};

/// Errors raised while enriching a report.
#[derive(Error, Debug)]
pub enum EnrichError {
    /// The HTTP request could not be sent or its body could not be read.
    #[error("Model request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model server answered with a non-success status.
    #[error("Model API error (status {status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for diagnostics.
        body: String,
    },

    /// The response did not carry the expected field.
    #[error("Model response missing '{field}' field")]
    MalformedResponse {
        /// Name of the missing field.
        field: &'static str,
    },
}

/// Something that can answer a prompt with a suggestion.
#[allow(async_fn_in_trait)]
pub trait SuggestionProvider {
    async fn suggest(&self, prompt: &str) -> Result<String, EnrichError>;
}

/// A change with its fix suggestion attached.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedChange {
    #[serde(flatten)]
    pub change: ChangeRecord,
    pub ai_suggestion: String,
}

/// A report in the shape persisted as `<label>_diff_with_ai.json`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedReport {
    pub label: String,
    pub changes: Vec<EnrichedChange>,
}

/// Build the prompt for one change.
pub fn build_prompt(change: &ChangeRecord) -> String {
    match change.kind {
        ChangeKind::Style(property) => format!(
            "A style change was detected on `{}`.\n\
             The `{}` changed from `{}` to `{}`.\n\
             explain it how to fix it in very short words.",
            change.selector, property, change.from, change.to
        ),
        ChangeKind::Text => format!(
            "A text change was detected on `{}`.\n\
             The text changed from:\n\"{}\"\nTo:\n\"{}\"\n\
             explain it how to fix it in very short words.",
            change.selector, change.from, change.to
        ),
    }
}

/// Attach a suggestion to every change of `report`.
///
/// The first failing request aborts the whole run.
pub async fn enrich_report<P: SuggestionProvider>(
    report: DiffReport,
    provider: &P,
) -> Result<EnrichedReport, EnrichError> {
    tracing::info!(
        "Processing {} changes for '{}'",
        report.changes.len(),
        report.label
    );

    let mut changes = Vec::with_capacity(report.changes.len());
    for (i, change) in report.changes.into_iter().enumerate() {
        let prompt = build_prompt(&change);
        tracing::debug!(index = i, kind = %change.kind, selector = %change.selector, "Requesting suggestion");

        let suggestion = provider.suggest(&prompt).await?;
        changes.push(EnrichedChange {
            change,
            ai_suggestion: suggestion.trim().to_string(),
        });
    }

    Ok(EnrichedReport {
        label: report.label,
        changes,
    })
}
