//! VRT configuration loading from `.vrtrc.toml`.
//!
//! Configuration is optional - every setting has a default, and the model
//! settings can also come from the environment.
//!
//! # Example Configuration
//!
//! ```toml
//! [output]
//! format = "table"
//! color = true
//!
//! [storage]
//! directory = "dom_diff_outputs"
//!
//! [enrich]
//! base_url = "http://localhost:11434"
//! model = "llama3.2:latest"
//! temperature = 0.5
//! timeout_secs = 120
//! ```
//!
//! Precedence for model settings: command-line flag, then `OLLAMA_BASE_URL` /
//! `MODEL_NAME` / `TEMPERATURE`, then the file, then the defaults below.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE: &str = ".vrtrc.toml";

/// Default directory for `<label>_diff.json` reports.
pub const DEFAULT_OUTPUT_DIR: &str = "dom_diff_outputs";

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_MODEL: &str = "llama3.2:latest";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Root configuration structure loaded from `.vrtrc.toml`.
#[derive(Debug, Deserialize, Default)]
pub struct VrtConfig {
    /// Output formatting preferences.
    #[serde(default)]
    pub output: OutputSettings,

    /// Where reports are read from and written to.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Language model used for fix suggestions.
    #[serde(default)]
    pub enrich: EnrichConfig,
}

/// Output formatting preferences.
///
/// Command-line flags (e.g., `--format json`) override these settings.
#[derive(Debug, Deserialize, Default)]
pub struct OutputSettings {
    /// Default output format: `table` or `json`.
    #[serde(default)]
    pub format: Option<String>,

    /// Whether to use colored output. Unset means auto-detect.
    #[serde(default)]
    pub color: Option<bool>,
}

/// Report storage configuration.
#[derive(Debug, Deserialize, Default)]
pub struct StorageConfig {
    /// Directory holding `<label>_diff.json` and `<label>_diff_with_ai.json`.
    ///
    /// Default: `dom_diff_outputs`
    #[serde(default)]
    pub directory: Option<String>,
}

/// Model endpoint configuration for `vrt enrich`.
#[derive(Debug, Deserialize, Default)]
pub struct EnrichConfig {
    /// Ollama server base URL.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Model name passed to the generate endpoint.
    #[serde(default)]
    pub model: Option<String>,

    /// Sampling temperature. Unset leaves the model default.
    #[serde(default)]
    pub temperature: Option<f64>,

    /// Per-request timeout in seconds.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Fully resolved model settings.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichSettings {
    pub base_url: String,
    pub model: String,
    pub temperature: Option<f64>,
    pub timeout: Duration,
}

impl EnrichSettings {
    /// Builder: override the base URL.
    pub fn with_base_url(mut self, base_url: Option<String>) -> Self {
        if let Some(url) = base_url {
            self.base_url = url;
        }
        self
    }

    /// Builder: override the model.
    pub fn with_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        self
    }
}

impl VrtConfig {
    /// Load configuration from `.vrtrc.toml` in the given directory.
    ///
    /// If the config file doesn't exist or can't be parsed, returns defaults.
    /// Parse errors are logged as warnings but don't cause failures.
    pub fn load(root: &Path) -> Self {
        let config_path = root.join(CONFIG_FILE);
        if config_path.exists() {
            match std::fs::read_to_string(&config_path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(config) => return config,
                    Err(e) => {
                        tracing::warn!("Failed to parse {}: {}", CONFIG_FILE, e);
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to read {}: {}", CONFIG_FILE, e);
                }
            }
        }
        Self::default()
    }

    /// Get the default output format, if configured.
    pub fn default_format(&self) -> Option<&str> {
        self.output.format.as_deref()
    }

    /// Check if colored output should be used.
    ///
    /// Returns the configured value, or `None` to use auto-detection.
    pub fn use_color(&self) -> Option<bool> {
        self.output.color
    }

    /// Report directory, honoring an explicit override.
    pub fn output_dir(&self, override_dir: Option<&Path>) -> PathBuf {
        match override_dir {
            Some(dir) => dir.to_path_buf(),
            None => PathBuf::from(
                self.storage
                    .directory
                    .as_deref()
                    .unwrap_or(DEFAULT_OUTPUT_DIR),
            ),
        }
    }

    /// Resolve model settings against the process environment.
    pub fn enrich_settings(&self) -> EnrichSettings {
        self.enrich_settings_from(|key| std::env::var(key).ok())
    }

    /// Resolve model settings with a custom environment lookup.
    pub fn enrich_settings_from(&self, env: impl Fn(&str) -> Option<String>) -> EnrichSettings {
        let base_url = env("OLLAMA_BASE_URL")
            .or_else(|| self.enrich.base_url.clone())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let model = env("MODEL_NAME")
            .or_else(|| self.enrich.model.clone())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let temperature = match env("TEMPERATURE").map(|t| t.parse::<f64>()) {
            Some(Ok(t)) => Some(t),
            Some(Err(e)) => {
                tracing::warn!("Ignoring invalid TEMPERATURE: {}", e);
                self.enrich.temperature
            }
            None => self.enrich.temperature,
        };

        EnrichSettings {
            base_url,
            model,
            temperature,
            timeout: Duration::from_secs(self.enrich.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        }
    }
}
