//! Application configuration model

use crate::types::SessionKind;
use std::path::PathBuf;

/// Resolved application configuration
///
/// Built by `config::load_config` from CLI arguments and environment
/// variables. The `sessions` order doubles as the tie-break order when two
/// session kinds end up with equal mean correlations.
#[derive(Debug, Clone)]
pub struct Config {
    /// Season to analyze
    pub season: u16,

    /// Root directory of the timing archive
    pub data_dir: PathBuf,

    /// Predictor sessions to rank, in enumeration order
    pub sessions: Vec<SessionKind>,

    /// Multiplier applied to the average qualifying lap when filtering
    pub threshold_factor: f64,

    /// Render fastest-lap charts after the analysis
    pub render_charts: bool,

    /// Event to chart instead of the first scheduled one
    pub chart_event: Option<String>,

    /// Write the season report as JSON to this path
    pub export_path: Option<PathBuf>,

    /// Enable colored output
    pub enable_color: bool,

    /// Enable verbose output
    pub verbose: bool,

    /// Enable debug output
    pub debug: bool,
}

impl Config {
    /// Human-readable session list, e.g. "FP1, FP2, Q"
    pub fn session_list(&self) -> String {
        self.sessions
            .iter()
            .map(|s| s.code())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_list_display() {
        let config = Config {
            season: 2024,
            data_dir: PathBuf::from("archive"),
            sessions: vec![SessionKind::Fp1, SessionKind::Qualifying],
            threshold_factor: 1.2,
            render_charts: false,
            chart_event: None,
            export_path: None,
            enable_color: false,
            verbose: false,
            debug: false,
        };
        assert_eq!(config.session_list(), "FP1, Q");
    }
}
