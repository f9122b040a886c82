//! Colored formatter implementation with terminal color support

use super::formatter::{
    average_cells, average_columns, column_widths, correlation_cells, correlation_columns,
    pad_cell, Column, FormattingOptions, OutputFormatter, PlainFormatter, RowData,
};
use crate::error::Result;
use crate::models::report::{CorrelationRow, SeasonReport, SessionAverage, SkippedUnit};
use crate::stats::Correlation;
use colored::{Color, Colorize};

/// Strength classification of a correlation coefficient for color coding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PredictionStrength {
    /// Coefficient >= 0.7
    Strong,
    /// Coefficient >= 0.4
    Moderate,
    /// Coefficient >= 0.0
    Weak,
    /// Negative coefficient, order tends to invert
    Inverse,
}

impl PredictionStrength {
    /// Classify a coefficient
    pub fn from_coefficient(value: f64) -> Self {
        if value >= 0.7 {
            Self::Strong
        } else if value >= 0.4 {
            Self::Moderate
        } else if value >= 0.0 {
            Self::Weak
        } else {
            Self::Inverse
        }
    }

    /// Color for this strength level
    pub fn color(&self) -> Color {
        match self {
            Self::Strong => Color::Green,
            Self::Moderate => Color::Cyan,
            Self::Weak => Color::Yellow,
            Self::Inverse => Color::Red,
        }
    }

    /// Descriptive text
    pub fn description(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Moderate => "moderate",
            Self::Weak => "weak",
            Self::Inverse => "inverse",
        }
    }
}

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            muted: Color::BrightBlack,
        }
    }
}

/// Rich colored output formatter
pub struct ColoredFormatter {
    plain: PlainFormatter,
    scheme: ColorScheme,
}

impl ColoredFormatter {
    /// Create a new colored formatter with options
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            plain: PlainFormatter::new(options),
            scheme: ColorScheme::default(),
        }
    }

    /// Color a padded coefficient cell by its strength
    fn colorize_coefficient(&self, padded: String, value: Correlation) -> String {
        match value.value() {
            Some(v) => padded
                .color(PredictionStrength::from_coefficient(v).color())
                .to_string(),
            None => padded.color(self.scheme.muted).to_string(),
        }
    }

    /// Render a table, coloring the given coefficient columns after padding
    /// so ANSI escapes never disturb the alignment
    fn create_table(
        &self,
        columns: &[Column],
        rows: &[RowData],
        coefficients: &[(usize, Vec<Correlation>)],
    ) -> String {
        if rows.is_empty() {
            return "(no data)\n".to_string();
        }

        let widths = column_widths(columns, rows);
        let mut output = String::new();

        let header: Vec<String> = columns
            .iter()
            .zip(&widths)
            .map(|(c, &w)| pad_cell(c.header, w, c.alignment).bold().to_string())
            .collect();
        output.push_str(&header.join("  "));
        output.push('\n');

        let total: usize = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
        output.push_str(&"-".repeat(total).color(self.scheme.muted).to_string());
        output.push('\n');

        for (row_idx, row) in rows.iter().enumerate() {
            let cells: Vec<String> = columns
                .iter()
                .zip(&widths)
                .zip(row)
                .enumerate()
                .map(|(col_idx, ((c, &w), cell))| {
                    let padded = pad_cell(cell, w, c.alignment);
                    match coefficients.iter().find(|(idx, _)| *idx == col_idx) {
                        Some((_, values)) => self.colorize_coefficient(padded, values[row_idx]),
                        None => padded,
                    }
                })
                .collect();
            output.push_str(cells.join("  ").trim_end());
            output.push('\n');
        }

        output
    }
}

impl OutputFormatter for ColoredFormatter {
    fn format_header(&self, title: &str) -> Result<String> {
        let mut output = String::new();
        output.push_str(&title.color(self.scheme.header).bold().to_string());
        output.push('\n');
        output.push_str(
            &"=".repeat(title.len())
                .color(self.scheme.header)
                .to_string(),
        );
        output.push('\n');
        Ok(output)
    }

    fn format_correlation_table(&self, rows: &[CorrelationRow]) -> Result<String> {
        let data: Vec<RowData> = rows.iter().map(correlation_cells).collect();
        let coefficients = vec![
            (2, rows.iter().map(|r| r.vs_qualifying).collect()),
            (3, rows.iter().map(|r| r.vs_race).collect()),
        ];
        Ok(self.create_table(&correlation_columns(), &data, &coefficients))
    }

    fn format_averages(&self, averages: &[SessionAverage]) -> Result<String> {
        let mut output = String::new();
        output.push_str(&"Average correlations per session:".bold().to_string());
        output.push_str("\n\n");

        let data: Vec<RowData> = averages.iter().map(average_cells).collect();
        let coefficients = vec![
            (1, averages.iter().map(|a| a.vs_qualifying).collect()),
            (2, averages.iter().map(|a| a.vs_race).collect()),
            (3, averages.iter().map(|a| a.overall()).collect()),
        ];
        output.push_str(&self.create_table(&average_columns(), &data, &coefficients));
        Ok(output)
    }

    fn format_skips(&self, skipped: &[SkippedUnit]) -> Result<String> {
        let plain = self.plain.format_skips(skipped)?;
        if plain.is_empty() {
            return Ok(plain);
        }
        Ok(plain.color(self.scheme.warning).to_string())
    }

    fn format_verdict(&self, report: &SeasonReport) -> Result<String> {
        let plain = self.plain.format_verdict(report)?;
        match report.most_predictive {
            Some(_) => Ok(plain.color(self.scheme.success).bold().to_string()),
            None => Ok(plain.color(self.scheme.warning).to_string()),
        }
    }

    fn format_warning(&self, warning: &str) -> Result<String> {
        Ok(format!("{} {}", "WARNING:".color(self.scheme.warning).bold(), warning))
    }

    fn format_error(&self, error: &str) -> Result<String> {
        Ok(format!("{} {}", "ERROR:".color(self.scheme.error).bold(), error))
    }

    fn format_success(&self, message: &str) -> Result<String> {
        Ok(format!("{} {}", "OK:".color(self.scheme.success).bold(), message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SessionKind;

    #[test]
    fn test_strength_classification() {
        assert_eq!(
            PredictionStrength::from_coefficient(0.9),
            PredictionStrength::Strong
        );
        assert_eq!(
            PredictionStrength::from_coefficient(0.5),
            PredictionStrength::Moderate
        );
        assert_eq!(
            PredictionStrength::from_coefficient(0.1),
            PredictionStrength::Weak
        );
        assert_eq!(
            PredictionStrength::from_coefficient(-0.3),
            PredictionStrength::Inverse
        );
    }

    #[test]
    fn test_strength_boundaries() {
        assert_eq!(
            PredictionStrength::from_coefficient(0.7),
            PredictionStrength::Strong
        );
        assert_eq!(
            PredictionStrength::from_coefficient(0.4),
            PredictionStrength::Moderate
        );
        assert_eq!(
            PredictionStrength::from_coefficient(0.0),
            PredictionStrength::Weak
        );
    }

    #[test]
    fn test_colored_table_contains_contents() {
        let formatter = ColoredFormatter::new(FormattingOptions::default());
        let rows = vec![CorrelationRow {
            event: "Bahrain Grand Prix".to_string(),
            round: 1,
            session: SessionKind::Fp2,
            vs_qualifying: Correlation::Coefficient(0.853),
            vs_race: Correlation::Coefficient(-0.2),
            sample_size: 19,
        }];

        let table = formatter.format_correlation_table(&rows).unwrap();
        assert!(table.contains("Bahrain Grand Prix"));
        assert!(table.contains("+0.853"));
        assert!(table.contains("-0.200"));
    }

    #[test]
    fn test_colored_empty_table() {
        let formatter = ColoredFormatter::new(FormattingOptions::default());
        let table = formatter.format_correlation_table(&[]).unwrap();
        assert_eq!(table, "(no data)\n");
    }
}
