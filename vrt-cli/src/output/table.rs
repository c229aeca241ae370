//! Change tables built with `tabled`.

use super::{truncate, Column, RenderConfig};
use serde::Serialize;
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{object::Columns, style::Style, Modify, Width},
};

pub struct TableOutput;

impl TableOutput {
    /// One row per item; each cell is the item's serialized `Column::field`.
    pub fn format_with_columns<T: Serialize>(
        rows: &[T],
        columns: &[Column],
        config: &RenderConfig,
    ) -> String {
        if rows.is_empty() {
            return "(no results)".to_string();
        }

        let mut builder = Builder::default();
        builder.push_record(columns.iter().map(|c| c.header));

        for row in rows {
            let value = serde_json::to_value(row).unwrap_or_default();
            builder.push_record(
                columns
                    .iter()
                    .map(|col| Self::cell(value.get(col.field), col, config.width)),
            );
        }

        let mut table = builder.build();
        table.with(Style::rounded());

        if let Some(width) = config.width {
            // Three characters of border and padding per column
            let share = width.saturating_sub(columns.len() * 3) / columns.len().max(1);
            for (i, col) in columns.iter().enumerate() {
                let limit = col.max_width.unwrap_or(share);
                if limit > 0 {
                    table.with(Modify::new(Columns::single(i)).with(Width::truncate(limit)));
                }
            }
            table.with(Width::wrap(width));
        }

        table.to_string()
    }

    /// Empty strings are quoted so a cleared value stays visible.
    fn cell(value: Option<&Value>, col: &Column, width: Option<usize>) -> String {
        let text = match value {
            None | Some(Value::Null) => "-".to_string(),
            Some(Value::String(s)) if s.is_empty() => "\"\"".to_string(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        };

        match (col.max_width, width) {
            (Some(max), Some(_)) => truncate(&text, max),
            _ => text,
        }
    }
}
