//! Session timing data models

use crate::error::{AppError, Result};
use crate::types::SessionKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Serde helper storing lap times as integer milliseconds
pub mod duration_ms {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

/// One scheduled event of a season
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDescriptor {
    /// Round number within the season (1-based)
    pub round: u32,

    /// Event name, e.g. "Bahrain Grand Prix"
    pub name: String,
}

/// A single timed lap by one driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LapRecord {
    /// Driver identifier (abbreviation)
    pub driver: String,

    /// Lap duration
    #[serde(with = "duration_ms", rename = "time_ms")]
    pub time: Duration,
}

impl LapRecord {
    /// Create a new lap record
    pub fn new<S: Into<String>>(driver: S, time: Duration) -> Self {
        Self {
            driver: driver.into(),
            time,
        }
    }

    /// Lap time in milliseconds for display and statistics
    pub fn time_ms(&self) -> f64 {
        self.time.as_secs_f64() * 1000.0
    }
}

/// An ordered classification of drivers, best first
///
/// Position encodes rank: index 0 is the fastest/winning driver. The list
/// never contains the same identifier twice; the invariant is enforced at
/// construction and survives deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct RankedList {
    entries: Vec<String>,
}

impl RankedList {
    /// Create a ranked list, rejecting duplicate identifiers
    pub fn new(entries: Vec<String>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for entry in &entries {
            if !seen.insert(entry.as_str()) {
                return Err(AppError::validation(format!(
                    "Duplicate identifier '{}' in ranked list",
                    entry
                )));
            }
        }
        Ok(Self { entries })
    }

    /// An empty classification
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rank position of an identifier (0 = best), if present
    pub fn position(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|e| e == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    /// Identifiers present in both lists, preserving THIS list's order
    pub fn common_with<'a>(&'a self, other: &RankedList) -> Vec<&'a str> {
        self.entries
            .iter()
            .filter(|e| other.contains(e))
            .map(String::as_str)
            .collect()
    }
}

impl TryFrom<Vec<String>> for RankedList {
    type Error = AppError;

    fn try_from(entries: Vec<String>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<RankedList> for Vec<String> {
    fn from(list: RankedList) -> Self {
        list.entries
    }
}

/// Options controlling how much session data a provider load populates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Populate lap timing data
    pub laps: bool,
    /// Populate the final classification
    pub results: bool,
}

impl LoadOptions {
    /// Load laps and results
    pub fn everything() -> Self {
        Self {
            laps: true,
            results: true,
        }
    }

    /// Load lap timing data only
    pub fn laps_only() -> Self {
        Self {
            laps: true,
            results: false,
        }
    }

    /// Load the final classification only
    pub fn results_only() -> Self {
        Self {
            laps: false,
            results: true,
        }
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self::everything()
    }
}

/// Handle to one session's timing data
///
/// Produced unloaded by a provider's `session` call; lap and result data
/// become available after the provider's `load` call populated it.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    /// Season the session belongs to
    pub season: u16,

    /// Event name
    pub event: String,

    /// Session kind
    pub kind: SessionKind,

    loaded: bool,
    laps: Vec<LapRecord>,
    results: RankedList,
    teams: HashMap<String, String>,
}

impl SessionHandle {
    /// Create an unloaded handle
    pub fn new<S: Into<String>>(season: u16, event: S, kind: SessionKind) -> Self {
        Self {
            season,
            event: event.into(),
            kind,
            loaded: false,
            laps: Vec::new(),
            results: RankedList::empty(),
            teams: HashMap::new(),
        }
    }

    /// Short "event kind" label for log and error messages
    pub fn label(&self) -> String {
        format!("{} {}", self.event, self.kind)
    }

    /// Populate the handle; called by provider implementations
    pub fn populate(
        &mut self,
        laps: Vec<LapRecord>,
        results: RankedList,
        teams: HashMap<String, String>,
    ) {
        self.laps = laps;
        self.results = results;
        self.teams = teams;
        self.loaded = true;
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Lap records of the session, in recording order
    pub fn laps(&self) -> Result<&[LapRecord]> {
        if !self.loaded {
            return Err(AppError::validation(format!(
                "Session {} accessed before load",
                self.label()
            )));
        }
        Ok(&self.laps)
    }

    /// Final classification of the session, best first
    pub fn results(&self) -> Result<&RankedList> {
        if !self.loaded {
            return Err(AppError::validation(format!(
                "Session {} accessed before load",
                self.label()
            )));
        }
        Ok(&self.results)
    }

    /// Team a driver belongs to, if the archive carries it
    pub fn team_of(&self, driver: &str) -> Option<&str> {
        self.teams.get(driver).map(String::as_str)
    }
}
