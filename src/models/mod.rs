//! Data models for session analysis

pub mod config;
pub mod report;
pub mod session;

pub use config::Config;
pub use report::{most_predictive, CorrelationRow, SeasonReport, SessionAverage, SkippedUnit};
pub use session::{EventDescriptor, LapRecord, LoadOptions, RankedList, SessionHandle};
