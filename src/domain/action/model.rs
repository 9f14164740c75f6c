//! Remediation action domain model

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::risk::compute_rpn;

/// Action priority, using the German form labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionPriority {
    Low,
    Medium,
    High,
}

impl Default for ActionPriority {
    fn default() -> Self {
        Self::Medium
    }
}

impl std::fmt::Display for ActionPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActionPriority::Low => write!(f, "Niedrig"),
            ActionPriority::Medium => write!(f, "Mittel"),
            ActionPriority::High => write!(f, "Hoch"),
        }
    }
}

impl std::str::FromStr for ActionPriority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Niedrig" => Ok(ActionPriority::Low),
            "Mittel" => Ok(ActionPriority::Medium),
            "Hoch" => Ok(ActionPriority::High),
            other => Err(format!("unknown priority: {}", other)),
        }
    }
}

/// A remediation task, optionally linked to the FMEA entry it mitigates.
///
/// The link is a weak reference: deleting the parent entry detaches the
/// action instead of removing it. The mitigation-tracking block records
/// who fixed what and when, plus the post-mitigation re-rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub id: i32,
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: ActionPriority,
    /// Free-form label, defaults to "Offen"
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub fmea_entry_id: Option<i32>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    // Mitigation tracking
    pub responsible: Option<String>,
    pub measure_taken: Option<String>,
    pub implemented_at: Option<NaiveDate>,
    pub implemented_by: Option<String>,

    // Post-mitigation re-rating, each 1-10 when present
    pub new_severity: Option<i32>,
    pub new_occurrence: Option<i32>,
    pub new_detection: Option<i32>,
}

impl Action {
    /// Post-mitigation RPN ("neue RPZ"), recomputed on every read.
    ///
    /// Present only when all three post-mitigation ratings are supplied.
    pub fn new_rpn(&self) -> Option<i32> {
        match (self.new_severity, self.new_occurrence, self.new_detection) {
            (Some(s), Some(o), Some(d)) => Some(compute_rpn(s, o, d)),
            _ => None,
        }
    }
}

/// Action joined with the function of its parent entry, as returned by
/// listings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionWithEntry {
    pub action: Action,
    pub entry_function: Option<String>,
}

/// Field values for a new action.
#[derive(Debug, Clone, Default)]
pub struct NewAction {
    pub title: String,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: ActionPriority,
    pub status: String,
    pub due_date: Option<NaiveDate>,
    pub fmea_entry_id: Option<i32>,
    pub created_by: String,
    pub responsible: Option<String>,
    pub measure_taken: Option<String>,
    pub implemented_at: Option<NaiveDate>,
    pub implemented_by: Option<String>,
    pub new_severity: Option<i32>,
    pub new_occurrence: Option<i32>,
    pub new_detection: Option<i32>,
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ActionUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<String>,
    pub priority: Option<ActionPriority>,
    pub status: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub fmea_entry_id: Option<Option<i32>>,
    pub responsible: Option<String>,
    pub measure_taken: Option<String>,
    pub implemented_at: Option<NaiveDate>,
    pub implemented_by: Option<String>,
    pub new_severity: Option<i32>,
    pub new_occurrence: Option<i32>,
    pub new_detection: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn action() -> Action {
        let now = Utc::now();
        Action {
            id: 1,
            title: "Wartungsplan erstellen".to_string(),
            description: None,
            assigned_to: None,
            priority: ActionPriority::Medium,
            status: "Offen".to_string(),
            due_date: None,
            fmea_entry_id: Some(1),
            created_by: "user-1".to_string(),
            created_at: now,
            updated_at: now,
            responsible: None,
            measure_taken: None,
            implemented_at: None,
            implemented_by: None,
            new_severity: None,
            new_occurrence: None,
            new_detection: None,
        }
    }

    #[test]
    fn new_rpn_requires_all_three_ratings() {
        let mut a = action();
        assert_eq!(a.new_rpn(), None);

        a.new_severity = Some(4);
        a.new_occurrence = Some(2);
        assert_eq!(a.new_rpn(), None);

        a.new_detection = Some(3);
        assert_eq!(a.new_rpn(), Some(24));
    }

    #[test]
    fn priority_labels_are_the_german_form_values() {
        assert_eq!(ActionPriority::Low.to_string(), "Niedrig");
        assert_eq!("Hoch".parse::<ActionPriority>().unwrap(), ActionPriority::High);
        assert!("high".parse::<ActionPriority>().is_err());
    }
}
