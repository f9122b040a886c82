//! Terminal fastest-lap chart rendering
//!
//! Presentation only: charts consume session data after the analysis and
//! never feed back into correlation results.

use crate::error::{AppError, Result};
use crate::laps::fastest_per_driver;
use crate::models::session::SessionHandle;
use crate::types::SessionKind;
use colored::{Color, Colorize};
use std::fmt::Write as _;
use std::time::Duration;

/// Maximum bar width in characters
const MAX_BAR_WIDTH: usize = 40;

/// One driver's bar in a fastest-lap chart
#[derive(Debug, Clone)]
pub struct ChartEntry {
    /// Driver identifier
    pub driver: String,

    /// Team name, if the session data carries it
    pub team: Option<String>,

    /// Fastest lap time
    pub time: Duration,

    /// Gap to the pole lap
    pub delta: Duration,
}

/// Fastest-lap gap chart for one session
#[derive(Debug, Clone)]
pub struct FastestLapChart {
    /// Event name
    pub event: String,

    /// Season
    pub season: u16,

    /// Session kind
    pub kind: SessionKind,

    /// Entries ordered fastest first
    pub entries: Vec<ChartEntry>,
}

impl FastestLapChart {
    /// Build a chart from a loaded session's lap data
    pub fn from_session(handle: &SessionHandle) -> Result<Self> {
        let fastest = fastest_per_driver(handle.laps()?);
        if fastest.is_empty() {
            return Err(AppError::data_unavailable(format!(
                "No laps to chart for {}",
                handle.label()
            )));
        }

        let pole_time = fastest[0].time;
        let entries = fastest
            .iter()
            .map(|lap| ChartEntry {
                driver: lap.driver.clone(),
                team: handle.team_of(&lap.driver).map(str::to_string),
                time: lap.time,
                delta: lap.time.saturating_sub(pole_time),
            })
            .collect();

        Ok(Self {
            event: handle.event.clone(),
            season: handle.season,
            kind: handle.kind,
            entries,
        })
    }

    /// The pole entry (fastest driver)
    pub fn pole(&self) -> &ChartEntry {
        &self.entries[0]
    }
}

/// Renders a fastest-lap chart for presentation
pub trait ChartRenderer {
    /// Render the chart to a displayable string
    fn render(&self, chart: &FastestLapChart) -> Result<String>;
}

/// Horizontal bar chart drawn with terminal characters
pub struct TextChartRenderer {
    use_color: bool,
}

impl TextChartRenderer {
    /// Create a renderer
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    /// Bar padded to `MAX_BAR_WIDTH` before coloring, so ANSI escapes never
    /// disturb the delta column
    fn bar(&self, delta: Duration, max_delta: Duration, team: Option<&str>) -> String {
        let width = if max_delta.is_zero() {
            0
        } else {
            let ratio = delta.as_secs_f64() / max_delta.as_secs_f64();
            (ratio * MAX_BAR_WIDTH as f64).round() as usize
        };

        let bar = "█".repeat(width);
        let padding = " ".repeat(MAX_BAR_WIDTH - width);
        if self.use_color {
            format!("{}{}", bar.color(team_color(team)), padding)
        } else {
            format!("{}{}", bar, padding)
        }
    }
}

impl ChartRenderer for TextChartRenderer {
    fn render(&self, chart: &FastestLapChart) -> Result<String> {
        let pole = chart.pole();
        let mut output = String::new();

        let title = format!(
            "{} {} {}",
            chart.event,
            chart.season,
            chart.kind.display_name()
        );
        let subtitle = format!(
            "Fastest Lap: {} ({})",
            format_lap_time(pole.time),
            pole.driver
        );
        if self.use_color {
            writeln!(output, "{}", title.bold()).ok();
        } else {
            writeln!(output, "{}", title).ok();
        }
        writeln!(output, "{}", subtitle).ok();
        writeln!(output).ok();

        let max_delta = chart
            .entries
            .iter()
            .map(|e| e.delta)
            .max()
            .unwrap_or(Duration::ZERO);

        for entry in &chart.entries {
            writeln!(
                output,
                "{:<4} {} +{:.3}",
                entry.driver,
                self.bar(entry.delta, max_delta, entry.team.as_deref()),
                entry.delta.as_secs_f64(),
            )
            .ok();
        }

        Ok(output)
    }
}

/// Format a lap time as `m:ss.mmm`
pub fn format_lap_time(time: Duration) -> String {
    let total_ms = time.as_millis();
    let minutes = total_ms / 60_000;
    let seconds = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{}:{:02}.{:03}", minutes, seconds, millis)
}

/// Terminal color approximating a team's livery
fn team_color(team: Option<&str>) -> Color {
    let Some(team) = team else {
        return Color::White;
    };
    let team = team.to_ascii_lowercase();

    if team.contains("ferrari") {
        Color::Red
    } else if team.contains("mercedes") {
        Color::Cyan
    } else if team.contains("red bull") {
        Color::Blue
    } else if team.contains("mclaren") {
        Color::BrightYellow
    } else if team.contains("aston martin") {
        Color::Green
    } else if team.contains("alpine") {
        Color::BrightBlue
    } else if team.contains("williams") {
        Color::BrightCyan
    } else if team.contains("sauber") || team.contains("alfa romeo") {
        Color::BrightGreen
    } else if team.contains("haas") {
        Color::BrightBlack
    } else if team.contains("racing bulls") || team.contains("alphatauri") {
        Color::BrightMagenta
    } else {
        Color::White
    }
}
