//! Type definitions and aliases

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Session kinds within one race weekend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionKind {
    /// First free practice
    #[serde(rename = "FP1")]
    Fp1,
    /// Second free practice
    #[serde(rename = "FP2")]
    Fp2,
    /// Third free practice
    #[serde(rename = "FP3")]
    Fp3,
    /// Qualifying
    #[serde(rename = "Q")]
    Qualifying,
    /// Race
    #[serde(rename = "R")]
    Race,
}

impl SessionKind {
    /// Short session code as used in CLI flags, archive file names and reports
    pub fn code(&self) -> &'static str {
        match self {
            SessionKind::Fp1 => "FP1",
            SessionKind::Fp2 => "FP2",
            SessionKind::Fp3 => "FP3",
            SessionKind::Qualifying => "Q",
            SessionKind::Race => "R",
        }
    }

    /// Full session name for display
    pub fn display_name(&self) -> &'static str {
        match self {
            SessionKind::Fp1 => "Free Practice 1",
            SessionKind::Fp2 => "Free Practice 2",
            SessionKind::Fp3 => "Free Practice 3",
            SessionKind::Qualifying => "Qualifying",
            SessionKind::Race => "Race",
        }
    }

    /// All kinds that can act as a predictor (everything except the race)
    pub fn predictor_kinds() -> &'static [SessionKind] {
        &[
            SessionKind::Fp1,
            SessionKind::Fp2,
            SessionKind::Fp3,
            SessionKind::Qualifying,
        ]
    }
}

impl std::str::FromStr for SessionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FP1" => Ok(SessionKind::Fp1),
            "FP2" => Ok(SessionKind::Fp2),
            "FP3" => Ok(SessionKind::Fp3),
            "Q" | "QUALI" | "QUALIFYING" => Ok(SessionKind::Qualifying),
            "R" | "RACE" => Ok(SessionKind::Race),
            other => Err(AppError::parse(format!(
                "Unknown session kind '{}' (use FP1, FP2, FP3, Q or R)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_kind_codes() {
        assert_eq!(SessionKind::Fp1.code(), "FP1");
        assert_eq!(SessionKind::Qualifying.code(), "Q");
        assert_eq!(SessionKind::Race.code(), "R");
    }

    #[test]
    fn test_session_kind_parsing() {
        assert_eq!("fp2".parse::<SessionKind>().unwrap(), SessionKind::Fp2);
        assert_eq!(" Q ".parse::<SessionKind>().unwrap(), SessionKind::Qualifying);
        assert_eq!("race".parse::<SessionKind>().unwrap(), SessionKind::Race);

        let err = "FP4".parse::<SessionKind>().unwrap_err();
        assert_eq!(err.category(), "PARSE");
    }

    #[test]
    fn test_session_kind_serde_codes() {
        let json = serde_json::to_string(&SessionKind::Fp3).unwrap();
        assert_eq!(json, "\"FP3\"");

        let kind: SessionKind = serde_json::from_str("\"Q\"").unwrap();
        assert_eq!(kind, SessionKind::Qualifying);
    }

    #[test]
    fn test_predictor_kinds_exclude_race() {
        assert!(!SessionKind::predictor_kinds().contains(&SessionKind::Race));
        assert_eq!(SessionKind::predictor_kinds().len(), 4);
    }
}
