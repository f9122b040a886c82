//! Output formatting and display system
//!
//! Provides the formatter trait with plain and colored implementations for
//! the season report, and the terminal chart renderer for fastest-lap
//! comparisons.

pub mod chart;
mod colored;
mod formatter;

pub use self::chart::{ChartRenderer, FastestLapChart, TextChartRenderer};
pub use self::colored::{ColorScheme, ColoredFormatter, PredictionStrength};
pub use self::formatter::{FormattingOptions, OutputFormatter, PlainFormatter};

use crate::error::Result;
use crate::models::report::SeasonReport;

/// Output formatting factory for creating appropriate formatters
pub struct OutputFormatterFactory;

impl OutputFormatterFactory {
    /// Create a formatter based on color support and preferences
    pub fn create_formatter(enable_color: bool, verbose: bool) -> Box<dyn OutputFormatter> {
        let options = FormattingOptions {
            enable_color,
            verbose_mode: verbose,
            table_borders: true,
        };

        if enable_color {
            Box::new(ColoredFormatter::new(options))
        } else {
            Box::new(PlainFormatter::new(options))
        }
    }
}

/// Main output coordinator that assembles the report display
pub struct OutputCoordinator {
    formatter: Box<dyn OutputFormatter>,
}

impl OutputCoordinator {
    /// Create a new output coordinator with the specified formatter
    pub fn new(formatter: Box<dyn OutputFormatter>) -> Self {
        Self { formatter }
    }

    /// Display a complete season report
    pub fn display_report(&self, report: &SeasonReport) -> Result<String> {
        let mut output = String::new();

        let title = format!("Practice Session Predictiveness - Season {}", report.season);
        output.push_str(&self.formatter.format_header(&title)?);
        output.push('\n');

        output.push_str(&self.formatter.format_correlation_table(&report.rows)?);
        output.push('\n');

        output.push_str(&self.formatter.format_averages(&report.averages)?);
        output.push('\n');

        let skips = self.formatter.format_skips(&report.skipped)?;
        if !skips.is_empty() {
            output.push_str(&skips);
            output.push('\n');
        }

        output.push_str(&self.formatter.format_verdict(report)?);
        output.push('\n');

        Ok(output)
    }
}
