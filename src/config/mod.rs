//! Configuration loading and validation

pub mod validation;

pub use validation::{validate_config, ValidationWarning};

use crate::cli::Cli;
use crate::error::{AppError, Result};
use crate::models::Config;
use crate::types::SessionKind;
use std::path::Path;

/// Load `.env` if present, then resolve the CLI into a `Config`
///
/// Environment fallbacks are handled by the clap `env` attributes
/// (`PSA_SEASON`, `PSA_DATA_DIR`, `PSA_SESSIONS`, `PSA_THRESHOLD_FACTOR`),
/// so a `.env` file loaded here participates the same way as the process
/// environment.
pub fn load_config(cli: Cli) -> Result<Config> {
    load_env_file(cli.debug)?;

    cli.validate().map_err(AppError::config)?;

    let sessions = parse_sessions(&cli.sessions)?;
    let enable_color = cli.use_colors();

    Ok(Config {
        season: cli.season,
        data_dir: cli.data_dir,
        sessions,
        threshold_factor: cli.threshold_factor,
        render_charts: cli.chart,
        chart_event: cli.chart_event,
        export_path: cli.export,
        enable_color,
        verbose: cli.verbose,
        debug: cli.debug,
    })
}

/// Load `.env` from the current directory if it exists
fn load_env_file(debug: bool) -> Result<()> {
    if Path::new(".env").exists() {
        dotenv::from_filename(".env")
            .map_err(|e| AppError::config(format!("Failed to load .env file: {}", e)))?;
        if debug {
            println!("Loaded configuration from .env file");
        }
    } else if debug {
        println!("No .env file found, using defaults and CLI arguments");
    }
    Ok(())
}

/// Parse a comma-separated session list, deduplicating repeats
pub fn parse_sessions(raw: &str) -> Result<Vec<SessionKind>> {
    let mut sessions = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let kind: SessionKind = part.parse()?;
        if !sessions.contains(&kind) {
            sessions.push(kind);
        }
    }
    Ok(sessions)
}

/// Render a configuration summary for debug output
pub fn display_config_summary(config: &Config) -> String {
    let mut summary = String::new();
    summary.push_str(&format!("  Season: {}\n", config.season));
    summary.push_str(&format!("  Archive: {}\n", config.data_dir.display()));
    summary.push_str(&format!("  Sessions: {}\n", config.session_list()));
    summary.push_str(&format!(
        "  Threshold factor: {:.2}\n",
        config.threshold_factor
    ));
    summary.push_str(&format!("  Charts: {}\n", config.render_charts));
    summary.push_str(&format!("  Colored output: {}\n", config.enable_color));
    if let Some(path) = &config.export_path {
        summary.push_str(&format!("  Export: {}\n", path.display()));
    }
    summary
}
