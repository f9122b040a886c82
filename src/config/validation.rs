//! Configuration validation with warnings

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::types::SessionKind;

/// Non-fatal configuration concern surfaced before the run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// Configuration field the warning applies to
    pub field: String,

    /// Warning text
    pub message: String,
}

impl ValidationWarning {
    fn new<F: Into<String>, M: Into<String>>(field: F, message: M) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Format the warning for console display
    pub fn format(&self, use_color: bool) -> String {
        if use_color {
            use colored::Colorize;
            format!("{} {}: {}", "warning:".yellow().bold(), self.field, self.message)
        } else {
            format!("warning: {}: {}", self.field, self.message)
        }
    }
}

/// Validate a resolved configuration
///
/// Hard errors make the run impossible or meaningless; warnings flag
/// settings that are legal but probably not what the user wanted.
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    let mut warnings = Vec::new();

    if config.sessions.is_empty() {
        return Err(AppError::validation(
            "At least one predictor session is required",
        ));
    }
    if config.sessions.contains(&SessionKind::Race) {
        return Err(AppError::validation(
            "The race classification is the reference and cannot be a predictor",
        ));
    }
    if !config.threshold_factor.is_finite() || config.threshold_factor <= 0.0 {
        return Err(AppError::validation(format!(
            "Threshold factor must be finite and positive, got {}",
            config.threshold_factor
        )));
    }
    if !(1950..=2100).contains(&config.season) {
        return Err(AppError::validation(format!(
            "Season {} is outside the supported range 1950-2100",
            config.season
        )));
    }
    if !config.data_dir.is_dir() {
        return Err(AppError::config(format!(
            "Timing archive directory '{}' does not exist",
            config.data_dir.display()
        )));
    }

    if config.threshold_factor < 1.0 {
        warnings.push(ValidationWarning::new(
            "threshold-factor",
            format!(
                "factor {:.2} discards laps faster than the qualifying reference",
                config.threshold_factor
            ),
        ));
    }
    if config.threshold_factor > 2.0 {
        warnings.push(ValidationWarning::new(
            "threshold-factor",
            format!(
                "factor {:.2} admits in- and out-laps into the ranking",
                config.threshold_factor
            ),
        ));
    }

    Ok(warnings)
}
