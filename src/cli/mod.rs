//! Command-line interface definition

use clap::Parser;
use std::path::PathBuf;

/// Practice Session Analyzer - ranks how well practice lap order predicts race weekends
#[derive(Parser, Debug, Clone)]
#[command(name = "practice-session-analyzer")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Season to analyze (e.g. 2024)
    #[arg(short, long, env = "PSA_SEASON")]
    pub season: u16,

    /// Root directory of the local timing archive
    #[arg(short, long, env = "PSA_DATA_DIR", value_name = "DIR")]
    pub data_dir: PathBuf,

    /// Predictor sessions to rank, comma-separated (order breaks ties)
    #[arg(long, env = "PSA_SESSIONS", default_value = crate::defaults::DEFAULT_SESSIONS)]
    pub sessions: String,

    /// Multiplier applied to the average qualifying lap when filtering slow laps
    #[arg(long, env = "PSA_THRESHOLD_FACTOR", default_value_t = crate::defaults::DEFAULT_THRESHOLD_FACTOR)]
    pub threshold_factor: f64,

    /// Render fastest-lap charts for one event after the analysis
    #[arg(long)]
    pub chart: bool,

    /// Event name to chart instead of the first scheduled one
    #[arg(long, requires = "chart", value_name = "EVENT")]
    pub chart_event: Option<String>,

    /// Write the season report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub export: Option<PathBuf>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts and requirements
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if self.sessions.trim().is_empty() {
            return Err("Session list must not be empty".to_string());
        }

        Ok(())
    }

    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        if self.color {
            true
        } else if self.no_color {
            false
        } else {
            supports_color()
        }
    }
}

/// Detect whether the terminal supports colored output
fn supports_color() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => term != "dumb",
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["psa"];
        full.extend_from_slice(args);
        Cli::try_parse_from(full).unwrap()
    }

    #[test]
    fn test_minimal_arguments() {
        let cli = parse(&["--season", "2024", "--data-dir", "archive"]);
        assert_eq!(cli.season, 2024);
        assert_eq!(cli.data_dir, PathBuf::from("archive"));
        assert_eq!(cli.sessions, crate::defaults::DEFAULT_SESSIONS);
        assert_eq!(cli.threshold_factor, crate::defaults::DEFAULT_THRESHOLD_FACTOR);
        assert!(!cli.chart);
    }

    #[test]
    fn test_missing_season_fails() {
        let result = Cli::try_parse_from(["psa", "--data-dir", "archive"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_color_conflict_detected() {
        let cli = parse(&[
            "--season", "2024", "--data-dir", "archive", "--color", "--no-color",
        ]);
        assert!(cli.validate().is_err());
    }

    #[test]
    fn test_chart_event_requires_chart() {
        let result = Cli::try_parse_from([
            "psa",
            "--season",
            "2024",
            "--data-dir",
            "archive",
            "--chart-event",
            "Monaco Grand Prix",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_color_flags() {
        let colored = parse(&["--season", "2024", "--data-dir", "archive", "--color"]);
        assert!(colored.use_colors());

        let plain = parse(&["--season", "2024", "--data-dir", "archive", "--no-color"]);
        assert!(!plain.use_colors());
    }
}
