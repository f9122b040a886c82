//! Practice Session Analyzer
//!
//! Measures how well the fastest-lap order of practice and qualifying
//! sessions predicts race weekend results. Timing data flows in through an
//! injected session data provider; the bundled provider reads a local JSON
//! timing archive.

pub mod analyzer;
pub mod cli;
pub mod config;
pub mod error;
pub mod laps;
pub mod logging;
pub mod models;
pub mod output;
pub mod provider;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use analyzer::{EventEvaluation, SeasonAnalyzer};
pub use error::{AppError, Result};
pub use models::{
    Config, CorrelationRow, EventDescriptor, LapRecord, LoadOptions, RankedList, SeasonReport,
    SessionAverage, SessionHandle, SkippedUnit,
};
pub use output::{
    ChartRenderer, ColoredFormatter, FastestLapChart, OutputCoordinator, OutputFormatter,
    OutputFormatterFactory, PlainFormatter, TextChartRenderer,
};
pub use provider::{ArchiveSessionProvider, SessionDataProvider};
pub use stats::{predictive_correlation, spearman, Correlation};
pub use types::SessionKind;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    /// Laps slower than the qualifying average scaled by this factor are
    /// ignored when ranking a session
    pub const DEFAULT_THRESHOLD_FACTOR: f64 = 1.20;

    /// Predictor sessions compared by default
    pub const DEFAULT_SESSIONS: &str = "FP1,FP2,FP3,Q";
}
