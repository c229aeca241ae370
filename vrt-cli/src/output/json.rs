//! Report JSON for scripts and pipes.

use serde::Serialize;

pub struct JsonOutput;

impl JsonOutput {
    /// Pretty-printed, the same layout as stored reports. Non-ASCII is
    /// written as-is.
    pub fn format<T: Serialize + ?Sized>(data: &T) -> String {
        serde_json::to_string_pretty(data)
            .unwrap_or_else(|e| serde_json::json!({ "error": e.to_string() }).to_string())
    }
}
