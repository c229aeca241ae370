//! Rendering of reports for the terminal.
//!
//! Every command result implements [`Render`]: a table for people and the
//! stored report shape as JSON for scripts.

use clap::ValueEnum;
use serde::Serialize;
use std::io::IsTerminal;

mod json;
mod table;

pub use self::json::JsonOutput;
pub use self::table::TableOutput;

/// How results are printed.
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Colored header plus one table row per change
    #[default]
    Table,
    /// Report JSON, identical to what is stored on disk
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }
}

/// Rendering options for one command result.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    pub format: OutputFormat,
    /// Width to fit tables into. `None` renders cells untruncated.
    pub width: Option<usize>,
}

impl RenderConfig {
    /// Options with no width limit.
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            width: None,
        }
    }

    /// Options for stdout: fit the terminal when attached to one, otherwise
    /// print full cell values so piped output stays lossless.
    pub fn for_stdout(format: OutputFormat) -> Self {
        Self {
            width: std::io::stdout().is_terminal().then(terminal_width),
            ..Self::new(format)
        }
    }
}

fn terminal_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| usize::from(w.0))
        .unwrap_or(80)
}

/// A table column read from one field of each serialized row.
#[derive(Debug, Clone)]
pub struct Column {
    pub header: &'static str,
    pub field: &'static str,
    /// Cap for this column; otherwise it gets an even share of the width.
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(header: &'static str, field: &'static str) -> Self {
        Self {
            header,
            field,
            max_width: None,
        }
    }

    pub fn with_max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// A command result that can be printed in either format.
pub trait Render: Serialize {
    fn table(&self, config: &RenderConfig) -> String;

    fn json(&self) -> String {
        JsonOutput::format(self)
    }

    fn render(&self, config: &RenderConfig) -> String {
        match config.format {
            OutputFormat::Table => self.table(config),
            OutputFormat::Json => self.json(),
        }
    }
}

/// Print `view` to stdout.
pub fn print<T: Render>(view: &T, format: OutputFormat) -> anyhow::Result<()> {
    println!("{}", view.render(&RenderConfig::for_stdout(format)));
    Ok(())
}

/// Shorten `s` to at most `max_width` characters, marking the cut with `...`.
pub fn truncate(s: &str, max_width: usize) -> String {
    let keep = if max_width > 3 { max_width - 3 } else { max_width };
    match s.char_indices().nth(max_width) {
        None => s.to_string(),
        Some(_) => {
            let end = s.char_indices().nth(keep).map_or(s.len(), |(i, _)| i);
            if max_width > 3 {
                format!("{}...", &s[..end])
            } else {
                s[..end].to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_keeps_short_values() {
        assert_eq!(truncate("#fff", 4), "#fff");
        assert_eq!(truncate("p.title", 40), "p.title");
    }

    #[test]
    fn test_truncate_marks_cut() {
        assert_eq!(truncate("rgb(255, 255, 255)", 8), "rgb(2...");
        assert_eq!(truncate("héllo wörld", 8), "héllo...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_from_name() {
        assert_eq!(OutputFormat::from_name("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_name("table"), Some(OutputFormat::Table));
        assert_eq!(OutputFormat::from_name("csv"), None);
    }

    #[test]
    fn test_render_config_new_is_unbounded() {
        let config = RenderConfig::new(OutputFormat::Json);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.width, None);
    }
}
