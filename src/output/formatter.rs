//! Core formatting traits and the plain text implementation

use crate::error::Result;
use crate::models::report::{CorrelationRow, SeasonReport, SessionAverage, SkippedUnit};
use std::fmt::Write as _;

/// Main trait for output formatting
pub trait OutputFormatter {
    /// Format a header section
    fn format_header(&self, title: &str) -> Result<String>;

    /// Format per-event correlation rows as a table
    fn format_correlation_table(&self, rows: &[CorrelationRow]) -> Result<String>;

    /// Format season-wide averages per session kind
    fn format_averages(&self, averages: &[SessionAverage]) -> Result<String>;

    /// Format the list of skipped events and sessions
    fn format_skips(&self, skipped: &[SkippedUnit]) -> Result<String>;

    /// Format the final verdict line
    fn format_verdict(&self, report: &SeasonReport) -> Result<String>;

    /// Format warning messages
    fn format_warning(&self, warning: &str) -> Result<String>;

    /// Format error messages
    fn format_error(&self, error: &str) -> Result<String>;

    /// Format success messages
    fn format_success(&self, message: &str) -> Result<String>;
}

/// Configuration options for formatting
#[derive(Debug, Clone)]
pub struct FormattingOptions {
    /// Enable colored output
    pub enable_color: bool,
    /// Enable verbose mode with detailed information
    pub verbose_mode: bool,
    /// Show a separator line under table headers
    pub table_borders: bool,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            enable_color: true,
            verbose_mode: false,
            table_borders: true,
        }
    }
}

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Column definition for table formatting
#[derive(Debug, Clone)]
pub struct Column {
    /// Column header
    pub header: &'static str,
    /// Column alignment
    pub alignment: Alignment,
}

impl Column {
    pub fn left(header: &'static str) -> Self {
        Self {
            header,
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: &'static str) -> Self {
        Self {
            header,
            alignment: Alignment::Right,
        }
    }
}

/// Row data for table formatting
pub type RowData = Vec<String>;

/// Compute per-column widths over header and cell contents
pub(super) fn column_widths(columns: &[Column], rows: &[RowData]) -> Vec<usize> {
    let mut widths: Vec<usize> = columns.iter().map(|c| c.header.len()).collect();
    for row in rows {
        for (idx, cell) in row.iter().enumerate() {
            if idx < widths.len() {
                widths[idx] = widths[idx].max(cell.len());
            }
        }
    }
    widths
}

/// Pad a single cell according to its column definition
pub(super) fn pad_cell(cell: &str, width: usize, alignment: Alignment) -> String {
    match alignment {
        Alignment::Left => format!("{:<width$}", cell),
        Alignment::Right => format!("{:>width$}", cell),
    }
}

/// Columns of the per-event correlation table
pub(super) fn correlation_columns() -> Vec<Column> {
    vec![
        Column::left("Event"),
        Column::left("Session"),
        Column::right("vs Qualifying"),
        Column::right("vs Race"),
        Column::right("Drivers"),
    ]
}

/// Cell contents of one correlation row
pub(super) fn correlation_cells(row: &CorrelationRow) -> RowData {
    vec![
        row.event.clone(),
        row.session.code().to_string(),
        row.vs_qualifying.to_string(),
        row.vs_race.to_string(),
        row.sample_size.to_string(),
    ]
}

/// Columns of the season averages table
pub(super) fn average_columns() -> Vec<Column> {
    vec![
        Column::left("Session"),
        Column::right("vs Qualifying"),
        Column::right("vs Race"),
        Column::right("Overall"),
        Column::right("Events"),
    ]
}

/// Cell contents of one session average
pub(super) fn average_cells(average: &SessionAverage) -> RowData {
    vec![
        average.session.code().to_string(),
        average.vs_qualifying.to_string(),
        average.vs_race.to_string(),
        average.overall().to_string(),
        average.events_counted.to_string(),
    ]
}

/// Plain text formatter implementation
pub struct PlainFormatter {
    options: FormattingOptions,
}

impl PlainFormatter {
    /// Create a new plain formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self { options }
    }

    fn create_table(&self, columns: &[Column], rows: &[RowData]) -> String {
        if rows.is_empty() {
            return "(no data)\n".to_string();
        }

        let widths = column_widths(columns, rows);
        let mut output = String::new();

        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| pad_cell(c.header, w, c.alignment))
            .collect();
        output.push_str(header.join("  ").trim_end());
        output.push('\n');

        if self.options.table_borders {
            let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
            output.push_str(&"-".repeat(total));
            output.push('\n');
        }

        for row in rows {
            let cells: Vec<String> = columns
                .iter()
                .zip(&widths)
                .zip(row)
                .map(|((c, &w), cell)| pad_cell(cell, w, c.alignment))
                .collect();
            output.push_str(cells.join("  ").trim_end());
            output.push('\n');
        }

        output
    }
}

impl OutputFormatter for PlainFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        writeln!(output, "{}", title).ok();
        writeln!(output, "{}", "=".repeat(title.len())).ok();
        Ok(output)
    }

    fn format_correlation_table(&self, rows: &[CorrelationRow]) -> Result<String> {
        let data: Vec<RowData> = rows.iter().map(correlation_cells).collect();
        Ok(self.create_table(&correlation_columns(), &data))
    }

    fn format_averages(&self, averages: &[SessionAverage]) -> Result<String> {
        let mut output = String::from("Average correlations per session:\n\n");
        let data: Vec<RowData> = averages.iter().map(average_cells).collect();
        output.push_str(&self.create_table(&average_columns(), &data));
        Ok(output)
    }

    fn format_skips(&self, skipped: &[SkippedUnit]) -> Result<String> {
        if skipped.is_empty() {
            return Ok(String::new());
        }

        let mut output = format!("Skipped ({} units without data):\n", skipped.len());
        for unit in skipped {
            match unit.session {
                Some(kind) => {
                    writeln!(output, "  - {} {}: {}", unit.event, kind, unit.reason).ok();
                }
                None => {
                    writeln!(output, "  - {}: {}", unit.event, unit.reason).ok();
                }
            }
        }
        Ok(output)
    }

    fn format_verdict(&self, report: &SeasonReport) -> Result<String> {
        match report.most_predictive {
            Some(kind) => Ok(format!(
                "Most predictive session of {}: {} ({})",
                report.season,
                kind.code(),
                kind.display_name()
            )),
            None => Ok(format!(
                "Season {} produced no comparable session data",
                report.season
            )),
        }
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("WARNING: {}", warning))
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("ERROR: {}", error))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("OK: {}", message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Correlation;
    use crate::types::SessionKind;
    use chrono::Utc;
    use uuid::Uuid;

    fn sample_row() -> CorrelationRow {
        CorrelationRow {
            event: "Bahrain Grand Prix".to_string(),
            round: 1,
            session: SessionKind::Fp2,
            vs_qualifying: Correlation::Coefficient(0.853),
            vs_race: Correlation::NoData,
            sample_size: 19,
        }
    }

    fn sample_report(rows: Vec<CorrelationRow>) -> SeasonReport {
        SeasonReport {
            run_id: Uuid::new_v4(),
            season: 2024,
            threshold_factor: 1.2,
            generated_at: Utc::now(),
            averages: vec![SessionAverage::from_rows(SessionKind::Fp2, &rows)],
            most_predictive: Some(SessionKind::Fp2),
            rows,
            skipped: Vec::new(),
        }
    }

    #[test]
    fn test_header_underline_matches_title() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let header = formatter.format_header("Results").unwrap();
        assert_eq!(header, "Results\n=======\n");
    }

    #[test]
    fn test_correlation_table_contents() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let table = formatter.format_correlation_table(&[sample_row()]).unwrap();

        assert!(table.contains("Event"));
        assert!(table.contains("Bahrain Grand Prix"));
        assert!(table.contains("FP2"));
        assert!(table.contains("+0.853"));
        assert!(table.contains("n/a"));
        assert!(table.contains("19"));
    }

    #[test]
    fn test_empty_table_placeholder() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let table = formatter.format_correlation_table(&[]).unwrap();
        assert_eq!(table, "(no data)\n");
    }

    #[test]
    fn test_averages_table() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let rows = vec![sample_row()];
        let averages = vec![SessionAverage::from_rows(SessionKind::Fp2, &rows)];
        let output = formatter.format_averages(&averages).unwrap();

        assert!(output.contains("Average correlations"));
        assert!(output.contains("FP2"));
        assert!(output.contains("Overall"));
    }

    #[test]
    fn test_skips_listing() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let skipped = vec![
            SkippedUnit {
                event: "Monaco Grand Prix".to_string(),
                session: Some(SessionKind::Fp3),
                reason: "no archive entry".to_string(),
            },
            SkippedUnit {
                event: "Emilia Romagna Grand Prix".to_string(),
                session: None,
                reason: "event cancelled".to_string(),
            },
        ];

        let output = formatter.format_skips(&skipped).unwrap();
        assert!(output.contains("Monaco Grand Prix FP3"));
        assert!(output.contains("Emilia Romagna Grand Prix: event cancelled"));

        assert!(formatter.format_skips(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_verdict_lines() {
        let formatter = PlainFormatter::new(FormattingOptions::default());
        let report = sample_report(vec![sample_row()]);
        let verdict = formatter.format_verdict(&report).unwrap();
        assert!(verdict.contains("FP2"));
        assert!(verdict.contains("Free Practice 2"));

        let mut empty = sample_report(Vec::new());
        empty.most_predictive = None;
        let verdict = formatter.format_verdict(&empty).unwrap();
        assert!(verdict.contains("no comparable session data"));
    }
}
