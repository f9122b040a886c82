//! Practice Session Analyzer - Main CLI Application
//!
//! Ranks how well practice and qualifying lap order predicts race weekend
//! results, using a local JSON timing archive as the data source.

use clap::Parser;
use practice_session_analyzer::{
    analyzer::SeasonAnalyzer,
    cli::Cli,
    config::{display_config_summary, load_config, validate_config},
    error::{AppError, Result},
    models::{Config, LoadOptions},
    output::{
        ChartRenderer, FastestLapChart, OutputCoordinator, OutputFormatterFactory,
        TextChartRenderer,
    },
    provider::{ArchiveSessionProvider, SessionDataProvider},
    types::SessionKind,
    PKG_NAME, VERSION,
};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set up better panic handling
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("Application panic: {}", panic_info);
        process::exit(1);
    }));

    // Parse command line arguments
    let cli = Cli::parse();
    let use_color = cli.use_colors();

    if let Err(e) = run_application(cli).await {
        eprintln!("{}", e.format_for_console(use_color));
        print_error_suggestions(&e);
        process::exit(e.exit_code());
    }
}

/// Main application logic
async fn run_application(cli: Cli) -> Result<()> {
    if cli.debug {
        println!(
            "{} v{} (built {}, {})",
            PKG_NAME,
            VERSION,
            env!("BUILD_TIME"),
            env!("GIT_COMMIT")
        );
        println!("Debug mode enabled");
        println!();
    }

    // Load and validate configuration
    let config = load_config(cli)?;
    let warnings = validate_config(&config)?;

    if config.debug {
        println!("Configuration loaded successfully:");
        print!("{}", display_config_summary(&config));
        println!();
    }

    for warning in &warnings {
        eprintln!("{}", warning.format(config.enable_color));
    }

    // The archive provider is the injected session data source
    let provider = ArchiveSessionProvider::new(config.data_dir.clone())?;

    if config.verbose || config.debug {
        println!(
            "Analyzing season {} across sessions: {}",
            config.season,
            config.session_list()
        );
        println!();
    }

    // Run the season analysis
    let analyzer = SeasonAnalyzer::new(&provider, &config);
    let report = analyzer.analyze_season().await?;

    if report.rows.is_empty() {
        return Err(AppError::statistics(format!(
            "Season {} produced no correlation data ({} units skipped)",
            config.season,
            report.skipped.len()
        )));
    }

    // Display the report
    let formatter = OutputFormatterFactory::create_formatter(config.enable_color, config.verbose);
    let coordinator = OutputCoordinator::new(formatter);
    println!("{}", coordinator.display_report(&report)?);

    // Optional JSON export
    if let Some(path) = &config.export_path {
        std::fs::write(path, report.to_json()?)?;
        if config.verbose || config.debug {
            println!("Report written to {}", path.display());
        }
    }

    // Optional fastest-lap charts, rendered after and independent of the
    // analysis
    if config.render_charts {
        render_charts(&provider, &config).await;
    }

    Ok(())
}

/// Render fastest-lap charts for the configured event
///
/// Chart failures are presentation-only and never fail the run.
async fn render_charts(provider: &ArchiveSessionProvider, config: &Config) {
    let event = match chart_event(provider, config).await {
        Ok(event) => event,
        Err(e) => {
            eprintln!("Skipping charts: {}", e);
            return;
        }
    };

    let renderer = TextChartRenderer::new(config.enable_color);
    let mut kinds = config.sessions.clone();
    if !kinds.contains(&SessionKind::Qualifying) {
        kinds.push(SessionKind::Qualifying);
    }

    for kind in kinds {
        let chart = provider
            .load_session(config.season, &event, kind, &LoadOptions::laps_only())
            .await
            .and_then(|handle| FastestLapChart::from_session(&handle))
            .and_then(|chart| renderer.render(&chart));

        match chart {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => eprintln!("Skipping chart for {} {}: {}", event, kind, e),
        }
    }
}

/// Resolve which event to chart: the configured one, or the season opener
async fn chart_event(provider: &ArchiveSessionProvider, config: &Config) -> Result<String> {
    if let Some(event) = &config.chart_event {
        return Ok(event.clone());
    }
    provider
        .schedule(config.season)
        .await?
        .first()
        .map(|event| event.name.clone())
        .ok_or_else(|| {
            AppError::data_unavailable(format!("Season {} has no scheduled events", config.season))
        })
}

/// Print helpful suggestions for common errors
fn print_error_suggestions(error: &AppError) {
    match error {
        AppError::Config { .. } => {
            eprintln!();
            eprintln!("Configuration help:");
            eprintln!("  - Check that --data-dir points at your timing archive");
            eprintln!("  - Check your .env file format (PSA_* variables)");
            eprintln!("  - Session lists are comma-separated codes: FP1,FP2,FP3,Q");
        }
        AppError::DataUnavailable { .. } => {
            eprintln!();
            eprintln!("Data help:");
            eprintln!("  - The archive needs <season>/schedule.json plus one JSON file per session");
            eprintln!("  - Individual missing sessions are skipped automatically;");
            eprintln!("    this error means a season-level requirement was not met");
        }
        AppError::Statistics { .. } => {
            eprintln!();
            eprintln!("Analysis help:");
            eprintln!("  - At least one event needs qualifying laps, a qualifying");
            eprintln!("    classification and a race classification");
            eprintln!("  - Try widening --threshold-factor if all laps were filtered out");
        }
        _ => {}
    }
}
