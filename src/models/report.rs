//! Season analysis result models

use crate::stats::Correlation;
use crate::types::SessionKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Correlation coefficients for one predictor session at one event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorrelationRow {
    /// Event name
    pub event: String,

    /// Round number within the season
    pub round: u32,

    /// Predictor session kind
    pub session: SessionKind,

    /// Correlation of the session's fastest-lap order against the
    /// qualifying classification
    pub vs_qualifying: Correlation,

    /// Correlation of the session's fastest-lap order against the race
    /// classification
    pub vs_race: Correlation,

    /// Number of drivers with a meaningful lap in the session
    pub sample_size: usize,
}

/// An event or session skipped because its data was unavailable
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedUnit {
    /// Event name
    pub event: String,

    /// Skipped session, `None` when the whole event was dropped
    pub session: Option<SessionKind>,

    /// Why the unit was skipped
    pub reason: String,
}

/// Season-wide mean correlations for one predictor session kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionAverage {
    /// Predictor session kind
    pub session: SessionKind,

    /// Mean coefficient against qualifying, `NoData` rows excluded
    pub vs_qualifying: Correlation,

    /// Mean coefficient against the race, `NoData` rows excluded
    pub vs_race: Correlation,

    /// Number of events contributing at least one coefficient
    pub events_counted: usize,
}

impl SessionAverage {
    /// Average the rows of one session kind across a season
    pub fn from_rows(session: SessionKind, rows: &[CorrelationRow]) -> Self {
        let mine: Vec<&CorrelationRow> = rows.iter().filter(|r| r.session == session).collect();

        let vs_qualifying =
            Correlation::mean_of(&mine.iter().map(|r| r.vs_qualifying).collect::<Vec<_>>());
        let vs_race = Correlation::mean_of(&mine.iter().map(|r| r.vs_race).collect::<Vec<_>>());
        let events_counted = mine
            .iter()
            .filter(|r| !r.vs_qualifying.is_no_data() || !r.vs_race.is_no_data())
            .count();

        Self {
            session,
            vs_qualifying,
            vs_race,
            events_counted,
        }
    }

    /// Mean across both reference columns, where defined
    pub fn overall(&self) -> Correlation {
        Correlation::mean_of(&[self.vs_qualifying, self.vs_race])
    }
}

/// Most predictive session kind among the averages
///
/// Walks the averages in their given order (the configured session
/// enumeration order) with a strict comparison, so an equal mean keeps the
/// earliest kind. Averages without any defined coefficient never win.
pub fn most_predictive(averages: &[SessionAverage]) -> Option<SessionKind> {
    let mut best: Option<(SessionKind, f64)> = None;
    for average in averages {
        if let Some(value) = average.overall().value() {
            match best {
                Some((_, best_value)) if value <= best_value => {}
                _ => best = Some((average.session, value)),
            }
        }
    }
    best.map(|(session, _)| session)
}

/// Full season analysis report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonReport {
    /// Unique id of this analysis run
    pub run_id: Uuid,

    /// Analyzed season
    pub season: u16,

    /// Threshold factor the lap filter ran with
    pub threshold_factor: f64,

    /// When this report was generated
    pub generated_at: DateTime<Utc>,

    /// Per-event, per-session correlation rows
    pub rows: Vec<CorrelationRow>,

    /// Season-wide averages, in configured session order
    pub averages: Vec<SessionAverage>,

    /// Session kind with the highest overall mean correlation
    pub most_predictive: Option<SessionKind>,

    /// Events and sessions skipped for missing data
    pub skipped: Vec<SkippedUnit>,
}

impl SeasonReport {
    /// Export the report as pretty-printed JSON
    pub fn to_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
