//! FMEA entry domain model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::risk::{classify_risk, compute_rpn, RiskLevel};

/// Workflow label of an entry.
///
/// The set matches the German form labels used throughout the tool.
/// There is no enforced transition graph; any status may follow any
/// other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Open,
    InProgress,
    Completed,
}

impl Default for EntryStatus {
    fn default() -> Self {
        Self::Open
    }
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Open => write!(f, "Offen"),
            EntryStatus::InProgress => write!(f, "In Bearbeitung"),
            EntryStatus::Completed => write!(f, "Abgeschlossen"),
        }
    }
}

impl std::str::FromStr for EntryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Offen" => Ok(EntryStatus::Open),
            "In Bearbeitung" => Ok(EntryStatus::InProgress),
            "Abgeschlossen" => Ok(EntryStatus::Completed),
            other => Err(format!("unknown entry status: {}", other)),
        }
    }
}

/// One FMEA row: a function, how it fails, why, the consequences, and
/// the three 1-10 ratings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FmeaEntry {
    pub id: i32,
    pub function: String,
    pub failure_mode: String,
    pub failure_effect: String,
    pub severity: i32,
    pub failure_cause: String,
    pub occurrence: i32,
    pub test_method: String,
    pub detection: i32,
    pub actions: Option<String>,
    pub status: EntryStatus,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FmeaEntry {
    /// Risk Priority Number, recomputed from the ratings on every read.
    /// Never persisted.
    pub fn rpn(&self) -> i32 {
        compute_rpn(self.severity, self.occurrence, self.detection)
    }

    /// Risk tier derived from the current RPN.
    pub fn risk_level(&self) -> RiskLevel {
        classify_risk(self.rpn())
    }
}

/// Predicate set for listing entries.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    /// Substring match across function, failure mode, cause and effect
    pub search: Option<String>,
    /// Exact status match
    pub status: Option<EntryStatus>,
    /// Filter on the derived risk tier, applied after the fetch
    pub risk: Option<RiskLevel>,
}

/// Field values for a new entry.
#[derive(Debug, Clone)]
pub struct NewEntry {
    pub function: String,
    pub failure_mode: String,
    pub failure_effect: String,
    pub severity: i32,
    pub failure_cause: String,
    pub occurrence: i32,
    pub test_method: String,
    pub detection: i32,
    pub actions: Option<String>,
    pub status: EntryStatus,
    pub created_by: String,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct EntryUpdate {
    pub function: Option<String>,
    pub failure_mode: Option<String>,
    pub failure_effect: Option<String>,
    pub severity: Option<i32>,
    pub failure_cause: Option<String>,
    pub occurrence: Option<i32>,
    pub test_method: Option<String>,
    pub detection: Option<i32>,
    pub actions: Option<String>,
    pub status: Option<EntryStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(severity: i32, occurrence: i32, detection: i32) -> FmeaEntry {
        let now = Utc::now();
        FmeaEntry {
            id: 1,
            function: "Motor starten".to_string(),
            failure_mode: "Motor startet nicht".to_string(),
            failure_effect: "Produktionsausfall".to_string(),
            severity,
            failure_cause: "Leere Batterie".to_string(),
            occurrence,
            test_method: "Spannungsmessung".to_string(),
            detection,
            actions: None,
            status: EntryStatus::Open,
            created_by: "user-1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn rpn_and_risk_level_are_derived_from_the_ratings() {
        assert_eq!(entry(8, 3, 2).rpn(), 48);
        assert_eq!(entry(8, 3, 2).risk_level(), RiskLevel::Low);

        assert_eq!(entry(10, 2, 3).rpn(), 60);
        assert_eq!(entry(10, 2, 3).risk_level(), RiskLevel::Medium);

        assert_eq!(entry(7, 4, 4).rpn(), 112);
        assert_eq!(entry(7, 4, 4).risk_level(), RiskLevel::High);
    }

    #[test]
    fn status_labels_are_the_german_form_values() {
        assert_eq!(EntryStatus::Open.to_string(), "Offen");
        assert_eq!(EntryStatus::InProgress.to_string(), "In Bearbeitung");
        assert_eq!(EntryStatus::Completed.to_string(), "Abgeschlossen");

        assert_eq!("Offen".parse::<EntryStatus>().unwrap(), EntryStatus::Open);
        assert!("Open".parse::<EntryStatus>().is_err());
    }
}
