//! Local JSON timing archive provider
//!
//! Reads a season directory tree of pre-downloaded timing data:
//!
//! ```text
//! <root>/<season>/schedule.json          schedule, [{"round":1,"name":"..."}]
//! <root>/<season>/<round:02>-<code>.json one file per session, e.g. 01-fp2.json
//! ```
//!
//! A session file carries laps, the final classification and the
//! driver-to-team mapping:
//!
//! ```json
//! {
//!   "laps": [{"driver": "VER", "time_ms": 93123}],
//!   "results": ["VER", "PER"],
//!   "teams": {"VER": "Red Bull Racing", "PER": "Red Bull Racing"}
//! }
//! ```
//!
//! A missing file is a recoverable `DataUnavailable`; a file that exists but
//! does not parse is a fatal `Parse` error.

use crate::error::{AppError, ErrorContext, Result};
use crate::models::session::{
    EventDescriptor, LapRecord, LoadOptions, RankedList, SessionHandle,
};
use crate::provider::SessionDataProvider;
use crate::types::SessionKind;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the per-season schedule file
pub const SCHEDULE_FILE: &str = "schedule.json";

/// On-disk shape of one session file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct SessionFile {
    #[serde(default)]
    laps: Vec<LapRecord>,

    #[serde(default)]
    results: RankedList,

    #[serde(default)]
    teams: HashMap<String, String>,
}

/// Session data provider backed by a local JSON archive
#[derive(Debug, Clone)]
pub struct ArchiveSessionProvider {
    root: PathBuf,
}

impl ArchiveSessionProvider {
    /// Create a provider over an existing archive root directory
    pub fn new<P: Into<PathBuf>>(root: P) -> Result<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(AppError::config(format!(
                "Timing archive directory '{}' does not exist",
                root.display()
            )));
        }
        Ok(Self { root })
    }

    /// Archive root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn season_dir(&self, season: u16) -> PathBuf {
        self.root.join(season.to_string())
    }

    fn session_path(&self, season: u16, round: u32, kind: SessionKind) -> PathBuf {
        self.season_dir(season)
            .join(format!("{:02}-{}.json", round, kind.code().to_lowercase()))
    }

    fn read_schedule(&self, season: u16) -> Result<Vec<EventDescriptor>> {
        let path = self.season_dir(season).join(SCHEDULE_FILE);
        if !path.is_file() {
            return Err(AppError::data_unavailable(format!(
                "No schedule for season {} in '{}'",
                season,
                self.root.display()
            )));
        }

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("While reading '{}'", path.display()))?;
        let mut schedule: Vec<EventDescriptor> = serde_json::from_str(&raw)?;
        schedule.sort_by_key(|event| event.round);
        Ok(schedule)
    }

    fn round_of(&self, season: u16, event: &str) -> Result<u32> {
        self.read_schedule(season)?
            .into_iter()
            .find(|e| e.name == event)
            .map(|e| e.round)
            .ok_or_else(|| {
                AppError::data_unavailable(format!(
                    "Event '{}' is not on the {} schedule",
                    event, season
                ))
            })
    }

    fn read_session_file(&self, path: &Path) -> Result<SessionFile> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("While reading '{}'", path.display()))?;
        serde_json::from_str(&raw)
            .map_err(|e| AppError::parse(format!("Invalid session file '{}': {}", path.display(), e)))
    }
}

#[async_trait]
impl SessionDataProvider for ArchiveSessionProvider {
    async fn schedule(&self, season: u16) -> Result<Vec<EventDescriptor>> {
        self.read_schedule(season)
    }

    async fn session(
        &self,
        season: u16,
        event: &str,
        kind: SessionKind,
    ) -> Result<SessionHandle> {
        let round = self.round_of(season, event)?;
        let path = self.session_path(season, round, kind);
        if !path.is_file() {
            return Err(AppError::data_unavailable(format!(
                "No archive entry for {} {} ({})",
                event, kind, season
            )));
        }
        Ok(SessionHandle::new(season, event, kind))
    }

    async fn load(&self, handle: &mut SessionHandle, options: &LoadOptions) -> Result<()> {
        let round = self.round_of(handle.season, &handle.event)?;
        let path = self.session_path(handle.season, round, handle.kind);
        if !path.is_file() {
            return Err(AppError::data_unavailable(format!(
                "No archive entry for {} ({})",
                handle.label(),
                handle.season
            )));
        }

        let file = self.read_session_file(&path)?;
        let laps = if options.laps { file.laps } else { Vec::new() };
        let results = if options.results {
            file.results
        } else {
            RankedList::empty()
        };
        handle.populate(laps, results, file.teams);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn write_archive(root: &Path) {
        let season = root.join("2024");
        fs::create_dir_all(&season).unwrap();
        fs::write(
            season.join(SCHEDULE_FILE),
            r#"[
                {"round": 2, "name": "Saudi Arabian Grand Prix"},
                {"round": 1, "name": "Bahrain Grand Prix"}
            ]"#,
        )
        .unwrap();
        fs::write(
            season.join("01-fp2.json"),
            r#"{
                "laps": [
                    {"driver": "VER", "time_ms": 93123},
                    {"driver": "HAM", "time_ms": 93500}
                ],
                "results": ["VER", "HAM"],
                "teams": {"VER": "Red Bull Racing", "HAM": "Mercedes"}
            }"#,
        )
        .unwrap();
        fs::write(season.join("01-r.json"), r#"{"results": ["VER", "HAM"]}"#).unwrap();
    }

    #[tokio::test]
    async fn test_schedule_sorted_by_round() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path());
        let provider = ArchiveSessionProvider::new(dir.path()).unwrap();

        let schedule = provider.schedule(2024).await.unwrap();
        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule[0].round, 1);
        assert_eq!(schedule[0].name, "Bahrain Grand Prix");
        assert_eq!(schedule[1].round, 2);
    }

    #[tokio::test]
    async fn test_missing_season_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path());
        let provider = ArchiveSessionProvider::new(dir.path()).unwrap();

        let err = provider.schedule(1999).await.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_load_session_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path());
        let provider = ArchiveSessionProvider::new(dir.path()).unwrap();

        let handle = provider
            .load_session(
                2024,
                "Bahrain Grand Prix",
                SessionKind::Fp2,
                &LoadOptions::everything(),
            )
            .await
            .unwrap();

        let laps = handle.laps().unwrap();
        assert_eq!(laps.len(), 2);
        assert_eq!(laps[0].driver, "VER");
        assert_eq!(laps[0].time, Duration::from_millis(93_123));
        assert_eq!(handle.results().unwrap().position("HAM"), Some(1));
        assert_eq!(handle.team_of("VER"), Some("Red Bull Racing"));
    }

    #[tokio::test]
    async fn test_load_options_narrow_population() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path());
        let provider = ArchiveSessionProvider::new(dir.path()).unwrap();

        let handle = provider
            .load_session(
                2024,
                "Bahrain Grand Prix",
                SessionKind::Fp2,
                &LoadOptions::results_only(),
            )
            .await
            .unwrap();

        assert!(handle.laps().unwrap().is_empty());
        assert_eq!(handle.results().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_missing_session_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path());
        let provider = ArchiveSessionProvider::new(dir.path()).unwrap();

        let err = provider
            .session(2024, "Bahrain Grand Prix", SessionKind::Fp3)
            .await
            .unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("FP3"));
    }

    #[tokio::test]
    async fn test_unknown_event_is_data_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path());
        let provider = ArchiveSessionProvider::new(dir.path()).unwrap();

        let err = provider
            .session(2024, "Monaco Grand Prix", SessionKind::Fp2)
            .await
            .unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn test_malformed_session_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        write_archive(dir.path());
        fs::write(dir.path().join("2024/01-q.json"), "not json").unwrap();
        let provider = ArchiveSessionProvider::new(dir.path()).unwrap();

        let err = provider
            .load_session(
                2024,
                "Bahrain Grand Prix",
                SessionKind::Qualifying,
                &LoadOptions::everything(),
            )
            .await
            .unwrap_err();
        assert_eq!(err.category(), "PARSE");
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_missing_root_is_config_error() {
        let err = ArchiveSessionProvider::new("/definitely/not/there").unwrap_err();
        assert_eq!(err.category(), "CONFIG");
    }

    #[test]
    fn test_session_path_layout() {
        let dir = tempfile::tempdir().unwrap();
        let provider = ArchiveSessionProvider::new(dir.path()).unwrap();
        let path = provider.session_path(2024, 3, SessionKind::Qualifying);
        assert!(path.ends_with("2024/03-q.json"));
    }
}
