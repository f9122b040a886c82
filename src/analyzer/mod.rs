//! Season-wide evaluation of practice predictiveness
//!
//! For every event on the schedule the analyzer loads the qualifying and
//! race classifications as references, ranks each configured predictor
//! session by fastest meaningful lap, and correlates that order against both
//! references. Units whose data the provider cannot supply are logged and
//! skipped; everything else is fatal. Processing is strictly sequential, one
//! provider call awaited at a time.

use crate::error::{AppError, Result};
use crate::laps::{fastest_per_driver, filter_meaningful, mean_lap_time, ranking_from};
use crate::logging::Logger;
use crate::models::report::{
    most_predictive, CorrelationRow, SeasonReport, SessionAverage, SkippedUnit,
};
use crate::models::session::{EventDescriptor, LoadOptions, RankedList};
use crate::models::Config;
use crate::provider::SessionDataProvider;
use crate::stats::predictive_correlation;
use crate::types::SessionKind;
use chrono::Utc;
use std::time::Duration;
use uuid::Uuid;

/// Outcome of evaluating one event
#[derive(Debug, Clone, Default)]
pub struct EventEvaluation {
    /// One row per predictor session that produced data
    pub rows: Vec<CorrelationRow>,

    /// Predictor sessions skipped for missing data
    pub skipped: Vec<SkippedUnit>,
}

/// Orchestrates the per-event evaluation across a season
pub struct SeasonAnalyzer<'a> {
    provider: &'a dyn SessionDataProvider,
    config: &'a Config,
    logger: Logger,
}

impl<'a> SeasonAnalyzer<'a> {
    /// Create an analyzer over an injected data provider
    pub fn new(provider: &'a dyn SessionDataProvider, config: &'a Config) -> Self {
        let logger = Logger::from_config(config);
        Self {
            provider,
            config,
            logger,
        }
    }

    /// Evaluate every event of the configured season
    ///
    /// An empty schedule is fatal; events and sessions without data are
    /// skipped and recorded, so a partially covered season still yields a
    /// report over whatever data was available.
    pub async fn analyze_season(&self) -> Result<SeasonReport> {
        let schedule = self.provider.schedule(self.config.season).await?;
        if schedule.is_empty() {
            return Err(AppError::validation(format!(
                "Season {} has an empty schedule",
                self.config.season
            )));
        }

        let mut rows = Vec::new();
        let mut skipped = Vec::new();

        for event in &schedule {
            self.logger
                .info(&format!("processing {} (round {})", event.name, event.round));

            match self.evaluate_event(event).await {
                Ok(mut evaluation) => {
                    rows.append(&mut evaluation.rows);
                    skipped.append(&mut evaluation.skipped);
                }
                Err(e) if e.is_recoverable() => {
                    self.logger
                        .warn(&format!("skipping {}: {}", event.name, e));
                    skipped.push(SkippedUnit {
                        event: event.name.clone(),
                        session: None,
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }

        let averages: Vec<SessionAverage> = self
            .config
            .sessions
            .iter()
            .map(|&kind| SessionAverage::from_rows(kind, &rows))
            .collect();
        let most_predictive = most_predictive(&averages);

        Ok(SeasonReport {
            run_id: Uuid::new_v4(),
            season: self.config.season,
            threshold_factor: self.config.threshold_factor,
            generated_at: Utc::now(),
            rows,
            averages,
            most_predictive,
            skipped,
        })
    }

    /// Evaluate the configured predictor sessions of one event
    ///
    /// Fails with `DataUnavailable` when the event's references (qualifying
    /// laps and classifications) cannot be obtained; the caller skips the
    /// whole event in that case.
    pub async fn evaluate_event(&self, event: &EventDescriptor) -> Result<EventEvaluation> {
        let qualifying = self
            .provider
            .load_session(
                self.config.season,
                &event.name,
                SessionKind::Qualifying,
                &LoadOptions::everything(),
            )
            .await?;
        let race = self
            .provider
            .load_session(
                self.config.season,
                &event.name,
                SessionKind::Race,
                &LoadOptions::results_only(),
            )
            .await?;

        let reference_lap = mean_lap_time(qualifying.laps()?).ok_or_else(|| {
            AppError::data_unavailable(format!(
                "No qualifying laps recorded for {}",
                event.name
            ))
        })?;
        let qualifying_order = qualifying.results()?;
        let race_order = race.results()?;

        let mut evaluation = EventEvaluation::default();
        for &kind in &self.config.sessions {
            match self
                .evaluate_session(event, kind, reference_lap, qualifying_order, race_order)
                .await
            {
                Ok(row) => {
                    self.logger.debug(&format!(
                        "{} {}: vs_qualifying={} vs_race={} (n={})",
                        event.name, kind, row.vs_qualifying, row.vs_race, row.sample_size
                    ));
                    evaluation.rows.push(row);
                }
                Err(e) if e.is_recoverable() => {
                    self.logger
                        .warn(&format!("skipping {} {}: {}", event.name, kind, e));
                    evaluation.skipped.push(SkippedUnit {
                        event: event.name.clone(),
                        session: Some(kind),
                        reason: e.to_string(),
                    });
                }
                Err(e) => return Err(e),
            }
        }
        Ok(evaluation)
    }

    async fn evaluate_session(
        &self,
        event: &EventDescriptor,
        kind: SessionKind,
        reference_lap: Duration,
        qualifying_order: &RankedList,
        race_order: &RankedList,
    ) -> Result<CorrelationRow> {
        let session = self
            .provider
            .load_session(
                self.config.season,
                &event.name,
                kind,
                &LoadOptions::laps_only(),
            )
            .await?;

        let meaningful = filter_meaningful(
            session.laps()?,
            reference_lap,
            self.config.threshold_factor,
        )?;
        let fastest = fastest_per_driver(&meaningful);
        let session_order = ranking_from(&fastest)?;

        Ok(CorrelationRow {
            event: event.name.clone(),
            round: event.round,
            session: kind,
            vs_qualifying: predictive_correlation(&session_order, qualifying_order)?,
            vs_race: predictive_correlation(&session_order, race_order)?,
            sample_size: session_order.len(),
        })
    }
}
