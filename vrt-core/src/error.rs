//! Error types for vrt-core.

use thiserror::Error;

/// Result type alias for vrt-core operations.
pub type Result<T> = std::result::Result<T, VrtError>;

/// Errors that can occur while flattening or diffing DOM trees.
#[derive(Error, Debug)]
pub enum VrtError {
    /// The input tree violates the node contract (e.g. a node without a tag).
    #[error("Structural fault at child {index} of '{parent_path}': {reason}")]
    StructuralFault {
        /// Structural path of the parent (empty for the root).
        parent_path: String,
        /// 1-based sibling index of the offending node.
        index: usize,
        /// Description of the violation.
        reason: String,
    },

    /// A DOM snapshot or report could not be decoded.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VrtError {
    pub(crate) fn missing_tag(parent_path: &str, index: usize) -> Self {
        VrtError::StructuralFault {
            parent_path: parent_path.to_string(),
            index,
            reason: "node has no tag".to_string(),
        }
    }
}
