//! Error taxonomy for the analyzer
//!
//! Every fallible path in the crate returns [`AppError`]. The only
//! recoverable variant is `DataUnavailable`: the season sweep logs it and
//! skips the offending event or session. Everything else aborts the run.

use thiserror::Error;

/// Application error, one variant per failure class
#[derive(Error, Debug)]
pub enum AppError {
    /// Bad or missing configuration (CLI, env, archive root)
    #[error("Configuration error: {0}")]
    Config(String),

    /// The session data provider could not supply a requested unit
    #[error("Data unavailable: {0}")]
    DataUnavailable(String),

    /// Input violates an invariant (duplicate driver, bad factor)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed archive JSON or an unparseable value
    #[error("Parsing error: {0}")]
    Parse(String),

    /// Filesystem failures
    #[error("I/O error: {0}")]
    Io(String),

    /// Correlation math could not be carried out
    #[error("Statistics error: {0}")]
    Statistics(String),

    /// Bug territory
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// `Config` from any message
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config(message.into())
    }

    /// `DataUnavailable` from any message
    pub fn data_unavailable<S: Into<String>>(message: S) -> Self {
        Self::DataUnavailable(message.into())
    }

    /// `Validation` from any message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation(message.into())
    }

    /// `Parse` from any message
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse(message.into())
    }

    /// `Io` from any message
    pub fn io<S: Into<String>>(message: S) -> Self {
        Self::Io(message.into())
    }

    /// `Statistics` from any message
    pub fn statistics<S: Into<String>>(message: S) -> Self {
        Self::Statistics(message.into())
    }

    /// `Internal` from any message
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal(message.into())
    }

    /// Short category tag used in log lines and console output
    pub fn category(&self) -> &'static str {
        match self {
            Self::Config(_) => "CONFIG",
            Self::DataUnavailable(_) => "DATA",
            Self::Validation(_) => "VALIDATION",
            Self::Parse(_) => "PARSE",
            Self::Io(_) => "IO",
            Self::Statistics(_) => "STATS",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Whether the season sweep may skip the offending unit and continue
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DataUnavailable(_))
    }

    /// Message plus a suggestion for the most likely fix
    pub fn user_friendly_message(&self) -> String {
        let (headline, suggestion) = match self {
            Self::Config(msg) => (
                format!("Configuration problem: {}", msg),
                "Check the CLI arguments and any PSA_* variables in your environment or .env file.",
            ),
            Self::DataUnavailable(msg) => (
                format!("Session data unavailable: {}", msg),
                "Check that the timing archive covers the requested season and sessions.",
            ),
            Self::Validation(msg) => (
                format!("Invalid input: {}", msg),
                "Check the session list, threshold factor and other configuration values.",
            ),
            Self::Parse(msg) => (
                format!("Failed to parse data: {}", msg),
                "Check the format of your archive files or configuration values.",
            ),
            Self::Io(msg) => (
                format!("File operation failed: {}", msg),
                "Check file permissions and free disk space.",
            ),
            Self::Statistics(msg) => (
                format!("Statistics calculation failed: {}", msg),
                "This may indicate insufficient or invalid timing data.",
            ),
            Self::Internal(msg) => (
                format!("Internal error: {}", msg),
                "This is likely a bug. Please report this issue with the error details.",
            ),
        };
        format!("{}\n\nSuggestion: {}", headline, suggestion)
    }

    /// Process exit code reported by the binary for this failure class
    pub fn exit_code(&self) -> i32 {
        match self {
            // Usage problems
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => 1,
            // Archive coverage problems
            Self::DataUnavailable(_) => 2,
            Self::Io(_) => 5,
            // The analysis itself could not produce a result
            Self::Statistics(_) => 6,
            Self::Internal(_) => 99,
        }
    }

    /// `[CATEGORY] message` line, colored by severity when requested
    pub fn format_for_console(&self, use_color: bool) -> String {
        let category = self.category();
        let message = self.to_string();

        if !use_color {
            return format!("[{}] {}", category, message);
        }

        use colored::{Color, Colorize};
        let color = match self {
            Self::Config(_) | Self::Validation(_) | Self::Parse(_) => Color::Red,
            Self::DataUnavailable(_) => Color::Yellow,
            Self::Io(_) | Self::Statistics(_) => Color::Cyan,
            Self::Internal(_) => Color::BrightRed,
        };
        format!(
            "[{}] {}",
            category.color(color).bold(),
            message.color(color)
        )
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> Self {
        Self::parse(format!("JSON parse error: {}", error))
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(error: std::num::ParseIntError) -> Self {
        Self::parse(format!("Integer parse error: {}", error))
    }
}

impl From<std::num::ParseFloatError> for AppError {
    fn from(error: std::num::ParseFloatError) -> Self {
        Self::parse(format!("Float parse error: {}", error))
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::internal(error.to_string())
    }
}

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, AppError>;

/// Attach a "while doing X" prefix to an error
pub trait ErrorContext<T> {
    /// Prefix with a lazily built context string
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Prefix with a static context string
    fn context(self, message: &'static str) -> Result<T>;
}

impl<T, E> ErrorContext<T> for std::result::Result<T, E>
where
    E: Into<AppError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let inner: AppError = e.into();
            AppError::internal(format!("{}: {}", f(), inner))
        })
    }

    fn context(self, message: &'static str) -> Result<T> {
        self.with_context(|| message.to_string())
    }
}
