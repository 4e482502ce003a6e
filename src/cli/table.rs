//! Table formatting utilities for CLI list commands
//!
//! Every list command (providers, receivers, food, claims, and the filtered
//! tables on the dashboard) builds [`TableRow`]s of typed [`CellValue`]s and
//! hands them to a [`TableFormatter`], which renders TSV, CSV, Markdown or
//! bare IDs.

use chrono::{NaiveDate, NaiveDateTime};
use console::style;
use std::fmt::Write as _;

use crate::cli::helpers::{escape_csv, truncate_str};
use crate::cli::OutputFormat;
use crate::entities::ClaimStatus;

/// Configuration for table output
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Show summary line after table (e.g., "5 provider(s) found")
    pub show_summary: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self { show_summary: true }
    }
}

impl TableConfig {
    /// Create config optimized for piping (no summary)
    pub fn for_pipe() -> Self {
        Self {
            show_summary: false,
        }
    }
}

/// A typed cell value with semantic meaning for formatting
#[derive(Debug, Clone)]
pub enum CellValue {
    /// Row identity (cyan colored)
    Id(i64),
    /// Plain text, truncated to the column width
    Text(String),
    /// Category such as provider type or meal type
    Type(String),
    /// Numeric value, right aligned
    Number(i64),
    /// Calendar date
    Date(NaiveDate),
    /// Date with time
    DateTime(NaiveDateTime),
    /// Claim status with color coding
    Status(ClaimStatus),
    /// Empty/placeholder
    Empty,
}

impl CellValue {
    /// Format for TSV output (with colors if terminal)
    pub fn format_tsv(&self, width: usize) -> String {
        match self {
            CellValue::Id(id) => format!("{:<width$}", style(id).cyan(), width = width),
            CellValue::Text(s) => {
                format!("{:<width$}", truncate_str(s, width), width = width)
            }
            CellValue::Type(t) => {
                format!("{:<width$}", style(truncate_str(t, width)).magenta(), width = width)
            }
            CellValue::Number(n) => format!("{:>width$}", n, width = width),
            CellValue::Date(d) => format!("{:<width$}", d.format("%Y-%m-%d"), width = width),
            CellValue::DateTime(dt) => {
                format!("{:<width$}", dt.format("%Y-%m-%d %H:%M"), width = width)
            }
            CellValue::Status(status) => {
                let s = status.to_string();
                let styled = match status {
                    ClaimStatus::Completed => style(s).green(),
                    ClaimStatus::Pending => style(s).yellow(),
                    ClaimStatus::Cancelled => style(s).red(),
                    ClaimStatus::Other(_) => style(s).dim(),
                };
                format!("{:<width$}", styled, width = width)
            }
            CellValue::Empty => format!("{:<width$}", "-", width = width),
        }
    }

    /// Format for CSV output (RFC 4180, no colors)
    pub fn format_csv(&self) -> String {
        match self {
            CellValue::Text(s) | CellValue::Type(s) => escape_csv(s),
            CellValue::Status(status) => escape_csv(status.as_str()),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%dT%H:%M:%S").to_string(),
            other => other.raw(),
        }
    }

    /// Format for Markdown output (no colors, escaped pipes)
    pub fn format_md(&self) -> String {
        let raw = match self {
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M").to_string(),
            CellValue::Empty => "-".to_string(),
            other => other.raw(),
        };
        // Escape pipe characters for markdown tables
        raw.replace('|', "\\|")
    }

    /// Get raw string value (no formatting)
    pub fn raw(&self) -> String {
        match self {
            CellValue::Id(id) | CellValue::Number(id) => id.to_string(),
            CellValue::Text(s) | CellValue::Type(s) => s.clone(),
            CellValue::Date(d) => d.format("%Y-%m-%d").to_string(),
            CellValue::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            CellValue::Status(status) => status.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    /// Get the display width of this cell's content (for dynamic column sizing)
    pub fn display_width(&self) -> usize {
        match self {
            CellValue::Id(id) | CellValue::Number(id) => id.to_string().len(),
            CellValue::Text(s) | CellValue::Type(s) => s.chars().count(),
            CellValue::Date(_) => 10,     // "YYYY-MM-DD"
            CellValue::DateTime(_) => 16, // "YYYY-MM-DD HH:MM"
            CellValue::Status(status) => status.as_str().chars().count(),
            CellValue::Empty => 1,
        }
    }
}

/// Column definition with header label and maximum width
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub key: &'static str,
    pub header: &'static str,
    pub width: usize,
}

impl ColumnDef {
    pub const fn new(key: &'static str, header: &'static str, width: usize) -> Self {
        Self { key, header, width }
    }
}

/// A row of cell values for table output
pub struct TableRow {
    pub id: i64,
    pub cells: Vec<(&'static str, CellValue)>,
}

impl TableRow {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            cells: Vec::new(),
        }
    }

    pub fn cell(mut self, key: &'static str, value: CellValue) -> Self {
        self.cells.push((key, value));
        self
    }

    pub fn get(&self, key: &str) -> Option<&CellValue> {
        self.cells.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

/// Table formatter that outputs rows in various formats
pub struct TableFormatter<'a> {
    columns: &'a [ColumnDef],
    entity_name: &'static str,
    config: TableConfig,
}

impl<'a> TableFormatter<'a> {
    pub fn new(columns: &'a [ColumnDef], entity_name: &'static str) -> Self {
        Self {
            columns,
            entity_name,
            config: TableConfig::default(),
        }
    }

    /// Configure the formatter with custom settings
    pub fn with_config(mut self, config: TableConfig) -> Self {
        self.config = config;
        self
    }

    /// Print rows to stdout in the specified format
    pub fn output<I>(&self, rows: I, format: OutputFormat)
    where
        I: IntoIterator<Item = TableRow>,
    {
        let rows: Vec<TableRow> = rows.into_iter().collect();
        print!("{}", self.render(&rows, format));
    }

    /// Render rows in the specified format
    pub fn render(&self, rows: &[TableRow], format: OutputFormat) -> String {
        match format {
            OutputFormat::Csv => self.render_csv(rows),
            OutputFormat::Md => self.render_md(rows),
            OutputFormat::Id => self.render_ids(rows),
            _ => self.render_tsv(rows),
        }
    }

    /// Calculate dynamic column widths based on actual content
    fn calculate_widths(&self, rows: &[TableRow]) -> Vec<usize> {
        self.columns
            .iter()
            .map(|col| {
                let max_content = rows
                    .iter()
                    .filter_map(|r| r.get(col.key))
                    .map(|v| v.display_width())
                    .max()
                    .unwrap_or(0);
                // Grow to fit content, but never past the column's cap
                col.header.len().max(max_content).min(col.width)
            })
            .collect()
    }

    fn render_tsv(&self, rows: &[TableRow]) -> String {
        let widths = self.calculate_widths(rows);
        let mut out = String::new();

        let header: Vec<String> = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(col, w)| format!("{:<width$}", style(col.header).bold(), width = *w))
            .collect();
        let _ = writeln!(out, "{}", header.join(" "));

        let total_width: usize = widths.iter().sum::<usize>() + widths.len().saturating_sub(1);
        let _ = writeln!(out, "{}", "-".repeat(total_width));

        for row in rows {
            let parts: Vec<String> = self
                .columns
                .iter()
                .zip(&widths)
                .map(|(col, w)| match row.get(col.key) {
                    Some(value) => value.format_tsv(*w),
                    None => CellValue::Empty.format_tsv(*w),
                })
                .collect();
            let _ = writeln!(out, "{}", parts.join(" ").trim_end());
        }

        if self.config.show_summary {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{} {}(s) found.",
                style(rows.len()).cyan(),
                self.entity_name
            );
        }

        out
    }

    fn render_csv(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.key).collect();
        let _ = writeln!(out, "{}", headers.join(","));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| row.get(col.key).map(|v| v.format_csv()).unwrap_or_default())
                .collect();
            let _ = writeln!(out, "{}", values.join(","));
        }
        out
    }

    fn render_md(&self, rows: &[TableRow]) -> String {
        let mut out = String::new();
        let headers: Vec<&str> = self.columns.iter().map(|c| c.header).collect();
        let _ = writeln!(out, "| {} |", headers.join(" | "));

        let separators: Vec<&str> = headers.iter().map(|_| "---").collect();
        let _ = writeln!(out, "|{}|", separators.join("|"));

        for row in rows {
            let values: Vec<String> = self
                .columns
                .iter()
                .map(|col| {
                    row.get(col.key)
                        .map(|v| v.format_md())
                        .unwrap_or_else(|| "-".to_string())
                })
                .collect();
            let _ = writeln!(out, "| {} |", values.join(" | "));
        }
        out
    }

    fn render_ids(&self, rows: &[TableRow]) -> String {
        rows.iter().map(|r| format!("{}\n", r.id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COLUMNS: &[ColumnDef] = &[
        ColumnDef::new("id", "ID", 6),
        ColumnDef::new("name", "NAME", 12),
        ColumnDef::new("status", "STATUS", 10),
    ];

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow::new(1)
                .cell("id", CellValue::Id(1))
                .cell("name", CellValue::Text("Green, Cafe".to_string()))
                .cell("status", CellValue::Status(ClaimStatus::Completed)),
            TableRow::new(7)
                .cell("id", CellValue::Id(7))
                .cell("name", CellValue::Text("a|b".to_string())),
        ]
    }

    fn plain() {
        console::set_colors_enabled(false);
    }

    #[test]
    fn test_cell_value_text_format() {
        let cell = CellValue::Text("Hello World".to_string());
        assert!(cell.format_tsv(20).contains("Hello World"));
        assert_eq!(cell.format_csv(), "Hello World");
        assert_eq!(cell.format_md(), "Hello World");
    }

    #[test]
    fn test_cell_value_status_format() {
        let cell = CellValue::Status(ClaimStatus::Other("On Hold".to_string()));
        assert_eq!(cell.format_csv(), "On Hold");
        assert_eq!(cell.display_width(), 7);
    }

    #[test]
    fn test_cell_value_dates() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 20).unwrap();
        assert_eq!(CellValue::Date(date).format_csv(), "2025-03-20");

        let dt = date.and_hms_opt(8, 30, 0).unwrap();
        assert_eq!(CellValue::DateTime(dt).format_csv(), "2025-03-20T08:30:00");
        assert_eq!(CellValue::DateTime(dt).format_md(), "2025-03-20 08:30");
    }

    #[test]
    fn test_cell_value_md_escapes_pipes() {
        let cell = CellValue::Text("a|b|c".to_string());
        assert_eq!(cell.format_md(), "a\\|b\\|c");
    }

    #[test]
    fn test_table_row_builder() {
        let row = TableRow::new(3).cell("name", CellValue::Text("Deli".to_string()));
        assert_eq!(row.id, 3);
        assert!(row.get("name").is_some());
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn test_render_csv() {
        let out = TableFormatter::new(COLUMNS, "provider").render(&rows(), OutputFormat::Csv);
        assert_eq!(out, "id,name,status\n1,\"Green, Cafe\",Completed\n7,a|b,\n");
    }

    #[test]
    fn test_render_md() {
        let out = TableFormatter::new(COLUMNS, "provider").render(&rows(), OutputFormat::Md);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "| ID | NAME | STATUS |");
        assert_eq!(lines[1], "|---|---|---|");
        assert_eq!(lines[3], "| 7 | a\\|b | - |");
    }

    #[test]
    fn test_render_ids() {
        let out = TableFormatter::new(COLUMNS, "provider").render(&rows(), OutputFormat::Id);
        assert_eq!(out, "1\n7\n");
    }

    #[test]
    fn test_render_tsv_summary() {
        plain();
        let formatter = TableFormatter::new(COLUMNS, "provider");
        let out = formatter.render(&rows(), OutputFormat::Tsv);
        assert!(out.starts_with("ID"));
        assert!(out.contains("Green, Cafe"));
        assert!(out.trim_end().ends_with("2 provider(s) found."));

        let piped = formatter
            .with_config(TableConfig::for_pipe())
            .render(&rows(), OutputFormat::Tsv);
        assert!(!piped.contains("found"));
    }

    #[test]
    fn test_widths_are_capped() {
        let long = vec![TableRow::new(1).cell(
            "name",
            CellValue::Text("An extremely long provider name".to_string()),
        )];
        let widths = TableFormatter::new(COLUMNS, "provider").calculate_widths(&long);
        assert_eq!(widths, vec![2, 12, 6]);
    }
}
